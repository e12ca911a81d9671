//! Local filesystem file store backend.

use crate::atomic::write_atomic;
use crate::error::{StorageError, StorageResult};
use crate::traits::{ArchiveFile, FileStore};
use async_trait::async_trait;
use bytes::Bytes;
use piecemeal_core::ArchiveId;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::instrument;

/// File store backed by a local directory, one file per archive id.
pub struct FilesystemFileStore {
    root: PathBuf,
}

impl FilesystemFileStore {
    /// Create a new filesystem file store, creating the root if needed.
    pub async fn new(root: impl AsRef<Path>) -> StorageResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    // Archive ids are restricted to a path-safe alphabet, so joining is enough.
    fn file_path(&self, id: &ArchiveId) -> PathBuf {
        self.root.join(id.as_str())
    }

    /// Store an archive, replacing any existing payload atomically.
    #[instrument(skip(self, data), fields(backend = "filesystem", size = data.len()))]
    pub async fn put(&self, id: &ArchiveId, data: Bytes) -> StorageResult<()> {
        write_atomic(&self.file_path(id), &data).await?;
        Ok(())
    }
}

#[async_trait]
impl FileStore for FilesystemFileStore {
    #[instrument(skip(self), fields(backend = "filesystem"))]
    async fn get_by_id_or_fail(&self, id: &ArchiveId) -> StorageResult<ArchiveFile> {
        let path = self.file_path(id);
        let data = fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::NotFound(id.to_string())
            } else {
                StorageError::Io(e)
            }
        })?;
        Ok(ArchiveFile {
            id: id.clone(),
            data: Bytes::from(data),
        })
    }

    fn backend_name(&self) -> &'static str {
        "filesystem"
    }
}
