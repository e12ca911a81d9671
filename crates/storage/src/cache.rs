//! Write-through local cache of piece archives.
//!
//! The cache directory is shared by every install: an archive fetched once is
//! reused by later installs and by other processes pointed at the same root.

use crate::atomic::write_atomic;
use crate::error::{StorageError, StorageResult};
use crate::path::archive_path;
use crate::traits::FileStore;
use futures::StreamExt;
use futures::stream::FuturesUnordered;
use piecemeal_core::{ArchiveId, CacheConfig, PiecePackage};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Semaphore;
use tracing::instrument;

/// Outcome of a cache fill.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheFillReport {
    /// Distinct archive ids referenced by the request.
    pub requested: usize,
    /// Archives that were already on disk.
    pub already_cached: usize,
    /// Archives fetched from the file store and written.
    pub fetched: usize,
}

/// Local archive cache keyed by archive id.
pub struct ArchiveCache {
    store: Arc<dyn FileStore>,
    root: PathBuf,
    // Shared by overlapping fills so the bound holds per cache, not per call.
    fetch_permits: Arc<Semaphore>,
}

impl ArchiveCache {
    /// Create a cache over `store`, rooted at `config.archive_dir`.
    pub fn new(store: Arc<dyn FileStore>, config: &CacheConfig) -> StorageResult<Self> {
        config.validate().map_err(StorageError::Config)?;
        Ok(Self {
            store,
            root: config.archive_dir.clone(),
            fetch_permits: Arc::new(Semaphore::new(
                config.max_parallel_fetches.min(Semaphore::MAX_PERMITS),
            )),
        })
    }

    /// Root directory of the cache.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Cache path of an archive.
    pub fn archive_path(&self, id: &ArchiveId) -> PathBuf {
        archive_path(&self.root, id)
    }

    /// Make sure every archive-backed piece has its payload on local disk.
    ///
    /// Registry pieces are ignored. Missing archives are fetched concurrently,
    /// each id at most once per call, bounded by the configured fetch limit.
    /// Every fetch is awaited even after a failure; the first error observed
    /// is returned and files written by successful siblings are kept.
    #[instrument(skip_all, fields(pieces = pieces.len(), root = %self.root.display()))]
    pub async fn ensure_cached(&self, pieces: &[PiecePackage]) -> StorageResult<CacheFillReport> {
        let (requested, uncached) = self.uncached_archives(pieces).await?;
        let mut report = CacheFillReport {
            requested,
            already_cached: requested - uncached.len(),
            fetched: 0,
        };

        if uncached.is_empty() {
            tracing::debug!(requested, "All archives already cached");
            return Ok(report);
        }

        tracing::info!(
            requested,
            missing = uncached.len(),
            backend = self.store.backend_name(),
            "Fetching uncached piece archives"
        );

        let mut jobs = FuturesUnordered::new();
        for id in uncached {
            let store = self.store.clone();
            let permits = self.fetch_permits.clone();
            let path = self.archive_path(&id);
            jobs.push(tokio::spawn(async move {
                let _permit = permits
                    .acquire_owned()
                    .await
                    .map_err(|e| StorageError::Task(e.to_string()))?;
                fetch_and_save(store.as_ref(), &id, &path).await
            }));
        }

        let mut first_error = None;
        while let Some(joined) = jobs.next().await {
            let result = joined
                .map_err(|e| StorageError::Task(e.to_string()))
                .and_then(|r| r);
            match result {
                Ok(()) => report.fetched += 1,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to cache piece archive");
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }

        if let Some(e) = first_error {
            return Err(e);
        }

        tracing::info!(fetched = report.fetched, "Piece archives cached");
        Ok(report)
    }

    /// Distinct archive ids referenced by `pieces`, and those without a local file.
    async fn uncached_archives(
        &self,
        pieces: &[PiecePackage],
    ) -> StorageResult<(usize, Vec<ArchiveId>)> {
        let mut seen = HashSet::new();
        let mut uncached = Vec::new();

        for id in pieces.iter().filter_map(PiecePackage::archive_id) {
            if !seen.insert(id) {
                continue;
            }
            if fs::try_exists(self.archive_path(id)).await? {
                continue;
            }
            uncached.push(id.clone());
        }

        Ok((seen.len(), uncached))
    }
}

async fn fetch_and_save(store: &dyn FileStore, id: &ArchiveId, path: &Path) -> StorageResult<()> {
    let file = store.get_by_id_or_fail(id).await?;
    write_atomic(path, &file.data).await?;
    tracing::debug!(
        archive_id = %id,
        path = %path.display(),
        size = file.data.len(),
        "Piece archive written"
    );
    Ok(())
}
