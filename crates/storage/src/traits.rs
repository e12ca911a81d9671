//! Storage trait definitions.

use crate::error::StorageResult;
use async_trait::async_trait;
use bytes::Bytes;
use piecemeal_core::ArchiveId;

/// An archive payload retrieved from the file store.
#[derive(Clone, Debug)]
pub struct ArchiveFile {
    pub id: ArchiveId,
    pub data: Bytes,
}

/// Read access to uploaded piece archives, keyed by archive id.
#[async_trait]
pub trait FileStore: Send + Sync + 'static {
    /// Fetch an archive, failing with `StorageError::NotFound` if the id is unknown.
    async fn get_by_id_or_fail(&self, id: &ArchiveId) -> StorageResult<ArchiveFile>;

    /// Get the name of this file store backend.
    ///
    /// Used for logging.
    fn backend_name(&self) -> &'static str;
}
