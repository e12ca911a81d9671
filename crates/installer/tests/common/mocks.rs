use async_trait::async_trait;
use bytes::Bytes;
use piecemeal_core::ArchiveId;
use piecemeal_installer::{AddRequest, DependencyInstaller, InstallError, InstallResult};
use piecemeal_storage::error::{StorageError, StorageResult};
use piecemeal_storage::traits::{ArchiveFile, FileStore};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory file store that counts fetches.
#[allow(dead_code)]
pub struct MemoryFileStore {
    archives: HashMap<ArchiveId, Bytes>,
    fetches: AtomicUsize,
}

#[allow(dead_code)]
impl MemoryFileStore {
    pub fn new() -> Self {
        Self {
            archives: HashMap::new(),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn with_archive(mut self, id: &str, data: &'static [u8]) -> Self {
        self.archives
            .insert(ArchiveId::new(id).unwrap(), Bytes::from_static(data));
        self
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FileStore for MemoryFileStore {
    async fn get_by_id_or_fail(&self, id: &ArchiveId) -> StorageResult<ArchiveFile> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.archives
            .get(id)
            .map(|data| ArchiveFile {
                id: id.clone(),
                data: data.clone(),
            })
            .ok_or_else(|| StorageError::NotFound(id.to_string()))
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

/// Installer that records every request and optionally rejects them.
#[allow(dead_code)]
pub struct RecordingInstaller {
    requests: Mutex<Vec<AddRequest>>,
    reject_with: Option<String>,
}

#[allow(dead_code)]
impl RecordingInstaller {
    pub fn new() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            reject_with: None,
        }
    }

    pub fn rejecting(message: &str) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            reject_with: Some(message.to_string()),
        }
    }

    pub fn requests(&self) -> Vec<AddRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl DependencyInstaller for RecordingInstaller {
    async fn add(&self, request: AddRequest) -> InstallResult<()> {
        self.requests.lock().unwrap().push(request);
        match &self.reject_with {
            Some(message) => Err(InstallError::Installer(message.clone())),
            None => Ok(()),
        }
    }

    fn installer_name(&self) -> &'static str {
        "recording"
    }
}
