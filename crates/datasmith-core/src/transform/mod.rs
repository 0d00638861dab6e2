//! # Post-generation transforms
//!
//! The append pass (mode 2 and up) and the column reorder pass (mode 3).

pub mod append;
pub mod reorder;
