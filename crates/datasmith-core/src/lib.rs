pub mod config;
pub mod error;
pub mod generate;
pub mod graph;
pub mod output;
pub mod rules;
pub mod table;
pub mod transform;

// Re-export key types for convenience
pub use error::{DatasmithError, Result};
pub use generate::engine::{execute_run, execute_run_with_rng, generate_table, GenerationRun};
pub use generate::value::Value;
pub use rules::spec::{AppendSpec, ColumnSpec};
pub use rules::types::{AppendRule, ColumnRule, ReorderSpec, RuleSet, RunMode};
pub use table::Table;
