//! # Column Graph
//!
//! Dependency graph of a rule set, for inspection and rendering. Generation
//! itself walks the rules in declared order and never needs this graph.

pub mod dag;
pub mod visualize;
