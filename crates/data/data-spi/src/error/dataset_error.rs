//! Dataset error types.

use thiserror::Error;

/// Errors raised while reading, cleaning, splitting or reloading a dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV
    #[error("CSV error: {0}")]
    Csv(String),

    /// Required column is absent
    #[error("Missing column '{column}' (available: {})", .available.join(", "))]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    /// Cell could not be parsed as a number
    #[error("Non-numeric value '{value}' in column '{column}' at row {row}")]
    NonNumeric {
        row: usize,
        column: String,
        value: String,
    },

    /// No usable rows
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Files or columns that should line up do not
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Invalid configuration value
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },
}

/// Result type for dataset operations.
pub type Result<T> = std::result::Result<T, DatasetError>;
