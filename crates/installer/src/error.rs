//! Installation error types.

use piecemeal_storage::StorageError;
use thiserror::Error;

/// Errors surfaced by a piece installation.
#[derive(Debug, Error)]
pub enum InstallError {
    /// Filling the archive cache failed; nothing was handed to the installer.
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("installer error: {0}")]
    Installer(String),

    #[error("package manager exited with {status}: {stderr}")]
    CommandFailed { status: String, stderr: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl InstallError {
    /// Whether a requested archive does not exist in the file store.
    pub fn is_not_found(&self) -> bool {
        matches!(self, InstallError::Storage(e) if e.is_not_found())
    }
}

/// Result type for installation operations.
pub type InstallResult<T> = std::result::Result<T, InstallError>;
