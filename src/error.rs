//! Custom error types for the ledger
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Rejected input: negative amounts, missing fields, disagreeing types
    #[error("Validation error: {0}")]
    Validation(String),

    /// A field value that cannot be interpreted
    ///
    /// `line` is 1-based; 0 means the value did not come from a file.
    #[error("{}", format_error_message(*line, field, value))]
    Format {
        line: usize,
        field: &'static str,
        value: String,
    },

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Import errors
    #[error("Import error: {0}")]
    Import(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

fn format_error_message(line: usize, field: &str, value: &str) -> String {
    if line == 0 {
        format!("Invalid {}: '{}'", field, value)
    } else {
        format!("Invalid {} on line {}: '{}'", field, line, value)
    }
}

impl LedgerError {
    /// Create a format error for a value that did not come from a file
    pub fn format(field: &'static str, value: impl Into<String>) -> Self {
        Self::Format {
            line: 0,
            field,
            value: value.into(),
        }
    }

    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Attach a line number to a format error; other errors pass through
    pub fn at_line(self, line: usize) -> Self {
        match self {
            Self::Format { field, value, .. } => Self::Format { line, field, value },
            Self::Validation(msg) => Self::Validation(format!("line {}: {}", line, msg)),
            other => other,
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a format error
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format { .. })
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for LedgerError {
    fn from(err: csv::Error) -> Self {
        Self::Import(err.to_string())
    }
}

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
