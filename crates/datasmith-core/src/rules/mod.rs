//! # Rules
//!
//! Raw rule records as they appear in a rules file, the normalized rule
//! model the engine runs on, and the normalization step between them.

pub mod parse;
pub mod spec;
pub mod types;
