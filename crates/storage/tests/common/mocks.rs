use async_trait::async_trait;
use bytes::Bytes;
use piecemeal_core::ArchiveId;
use piecemeal_storage::error::{StorageError, StorageResult};
use piecemeal_storage::traits::{ArchiveFile, FileStore};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::time::Duration;

/// In-memory file store that records every fetch.
///
/// Tracks total fetches, per-id fetches and the peak number of fetches in
/// flight at once. An optional delay keeps fetches overlapping so the
/// concurrency bound is observable.
#[allow(dead_code)]
pub struct CountingFileStore {
    archives: HashMap<ArchiveId, Bytes>,
    delay: Option<Duration>,
    fetches: AtomicUsize,
    per_id: Mutex<HashMap<ArchiveId, usize>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

#[allow(dead_code)]
impl CountingFileStore {
    pub fn new() -> Self {
        Self {
            archives: HashMap::new(),
            delay: None,
            fetches: AtomicUsize::new(0),
            per_id: Mutex::new(HashMap::new()),
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn with_archive(mut self, id: &str, data: impl Into<Bytes>) -> Self {
        self.archives
            .insert(ArchiveId::new(id).unwrap(), data.into());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn fetches_of(&self, id: &str) -> usize {
        let id = ArchiveId::new(id).unwrap();
        self.per_id.lock().unwrap().get(&id).copied().unwrap_or(0)
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FileStore for CountingFileStore {
    async fn get_by_id_or_fail(&self, id: &ArchiveId) -> StorageResult<ArchiveFile> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        *self.per_id.lock().unwrap().entry(id.clone()).or_insert(0) += 1;

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(current, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.archives.get(id) {
            Some(data) => Ok(ArchiveFile {
                id: id.clone(),
                data: data.clone(),
            }),
            None => Err(StorageError::NotFound(id.to_string())),
        }
    }

    fn backend_name(&self) -> &'static str {
        "counting"
    }
}
