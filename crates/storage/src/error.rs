//! Storage error types.

use thiserror::Error;

/// File store and archive cache errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("archive not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error fetching {id}: {message}")]
    Http { id: String, message: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("fetch task failed: {0}")]
    Task(String),
}

impl StorageError {
    /// Whether this error means the archive does not exist in the file store.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound(_))
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = std::result::Result<T, StorageError>;
