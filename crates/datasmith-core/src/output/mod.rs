//! # Output
//!
//! Writers that serialize a generated [`Table`](crate::table::Table),
//! preserving column order.

pub mod csv;
pub mod json;
