//! Error types for the core domain.

use thiserror::Error;

/// Core domain error type.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid piece name: {0}")]
    InvalidPieceName(String),

    #[error("invalid version: {0}")]
    InvalidVersion(String),

    #[error("invalid archive id: {0}")]
    InvalidArchiveId(String),

    #[error("invalid piece spec: {0}")]
    InvalidPieceSpec(String),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
