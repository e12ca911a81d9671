//! Core domain types and shared configuration for piecemeal.
//!
//! This crate defines the data model used across all other crates:
//! - Piece references and their package type (registry or archive)
//! - Validated piece names, exact versions and archive identifiers
//! - Configuration for the archive cache, file store and installer

pub mod config;
pub mod error;
pub mod piece;

pub use config::{AppConfig, CacheConfig, FileStoreConfig, InstallerConfig};
pub use error::{Error, Result};
pub use piece::{ArchiveId, ExactVersion, PackageType, PieceKind, PieceName, PiecePackage};

/// File extension of cached piece archives.
pub const ARCHIVE_EXTENSION: &str = "tgz";

/// Maximum length of an archive identifier in bytes.
pub const MAX_ARCHIVE_ID_LEN: usize = 128;
