//! # Error Types
//!
//! Defines `DatasmithError`, the unified error enum for every structural
//! failure in a generation run. Rule errors always carry the offending
//! column's name and 1-based position so a failed run points straight at the
//! line of the rules file that caused it.
//!
//! Per-row data anomalies (unconvertible values, unmatched lookup keys, an
//! invalid reorder list) are never errors; they are absorbed by the engine's
//! documented fallbacks.

use thiserror::Error;

/// All errors that can occur in Datasmith operations.
#[derive(Error, Debug)]
pub enum DatasmithError {
    #[error("Malformed rule for column '{column}' (position {position}): {message}")]
    MalformedRule {
        column: String,
        position: usize,
        message: String,
    },

    #[error("Column '{column}' (position {position}) references column {reference}, which is not an earlier column\n  Rules may only read columns declared before them (positions 1..{position}, exclusive)")]
    ForwardReference {
        column: String,
        position: usize,
        reference: usize,
    },

    #[error("Column '{column}' (position {position}): aggregate operator '{operator}' is not supported\n  Supported operators: + (sum), * (product)")]
    UnsupportedOperator {
        column: String,
        position: usize,
        operator: String,
    },

    #[error("Duplicate column name '{column}'\n  Column names must be unique within a table")]
    DuplicateColumn { column: String },

    #[error("Malformed append rule {position}: {message}")]
    MalformedAppend { position: usize, message: String },

    #[error("Column '{column}' has {actual} values but the table holds {expected} records")]
    ColumnLength {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Output error: {message}: {source}")]
    Output {
        message: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Other(String),
}

impl DatasmithError {
    /// Shorthand for a [`DatasmithError::MalformedRule`].
    pub fn malformed(column: &str, position: usize, message: impl Into<String>) -> Self {
        DatasmithError::MalformedRule {
            column: column.to_string(),
            position,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DatasmithError>;
