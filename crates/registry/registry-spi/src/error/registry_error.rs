//! Registry error types.

use thiserror::Error;

/// Model store errors.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No such model or version
    #[error("Model not found: {0}")]
    NotFound(String),

    /// Tag or name could not be parsed
    #[error("Invalid model tag '{tag}': {reason}")]
    InvalidTag { tag: String, reason: String },

    /// Filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored JSON could not be written or read back
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
