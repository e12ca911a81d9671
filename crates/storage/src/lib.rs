//! File store clients and the local piece archive cache.
//!
//! This crate provides:
//! - The `FileStore` abstraction for fetching uploaded archives by id
//! - Backends: local filesystem and HTTP
//! - Deterministic archive paths under a cache root
//! - `ArchiveCache`, which materializes archive-backed pieces on local disk

mod atomic;
pub mod backends;
pub mod cache;
pub mod error;
pub mod path;
pub mod traits;

pub use backends::{filesystem::FilesystemFileStore, http::HttpFileStore};
pub use cache::{ArchiveCache, CacheFillReport};
pub use error::{StorageError, StorageResult};
pub use path::archive_path;
pub use traits::{ArchiveFile, FileStore};

use piecemeal_core::FileStoreConfig;
use std::sync::Arc;
use std::time::Duration;

/// Create a file store from configuration.
pub async fn from_config(config: &FileStoreConfig) -> StorageResult<Arc<dyn FileStore>> {
    config.validate().map_err(StorageError::Config)?;

    match config {
        FileStoreConfig::Filesystem { path } => {
            let store = FilesystemFileStore::new(path).await?;
            Ok(Arc::new(store))
        }
        FileStoreConfig::Http {
            base_url,
            token,
            timeout_secs,
        } => {
            let store = HttpFileStore::new(
                base_url,
                token.clone(),
                Duration::from_secs(*timeout_secs),
            )?;
            Ok(Arc::new(store))
        }
    }
}
