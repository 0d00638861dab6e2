//! # Generation
//!
//! Two-phase table generation. The base pass fills independent columns and
//! leaves placeholders for dependent ones; the resolver then computes the
//! dependent columns in declared order. Values are coerced to their column
//! type once, as soon as they are final.

pub mod base;
pub mod coerce;
pub mod engine;
pub mod resolve;
pub mod sampling;
pub mod text;
pub mod value;
