//! Error types for the audit pipeline
//!
//! Every failure is fatal to a run; nothing here is retried.

use thiserror::Error;

/// Top-level audit error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuditError {
    #[error("missing column: {column}")]
    MissingColumn { column: String },

    #[error("column {column} has the wrong type: expected {expected}")]
    ColumnType { column: String, expected: &'static str },

    #[error("column {column} has {actual} rows, table has {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("test group {group} has no rows")]
    MissingGroup { group: String },

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("chart rendering failed: {reason}")]
    Render { reason: String },

    #[error("console write failed: {reason}")]
    Console { reason: String },
}

impl AuditError {
    pub fn missing_column(column: &str) -> Self {
        Self::MissingColumn {
            column: column.to_string(),
        }
    }

    pub fn render(err: impl std::fmt::Display) -> Self {
        Self::Render {
            reason: err.to_string(),
        }
    }

    pub fn console(err: std::io::Error) -> Self {
        Self::Console {
            reason: err.to_string(),
        }
    }
}
