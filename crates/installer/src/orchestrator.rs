//! Piece installation pipeline: fill the archive cache, then install.

use crate::dependency::{AddRequest, Dependency};
use crate::error::InstallResult;
use crate::traits::DependencyInstaller;
use piecemeal_core::PiecePackage;
use piecemeal_storage::ArchiveCache;
use std::path::Path;
use std::sync::Arc;
use tracing::instrument;

/// Installs batches of pieces into project directories.
pub struct PieceInstaller {
    cache: ArchiveCache,
    installer: Arc<dyn DependencyInstaller>,
    registry: String,
}

impl PieceInstaller {
    /// `registry` is the label attached to registry dependencies.
    pub fn new(
        cache: ArchiveCache,
        installer: Arc<dyn DependencyInstaller>,
        registry: impl Into<String>,
    ) -> Self {
        Self {
            cache,
            installer,
            registry: registry.into(),
        }
    }

    pub fn cache(&self) -> &ArchiveCache {
        &self.cache
    }

    /// Dependency descriptors for `pieces`, in request order.
    pub fn dependencies(&self, pieces: &[PiecePackage]) -> Vec<Dependency> {
        pieces
            .iter()
            .map(|piece| Dependency::from_piece(piece, self.cache.root(), &self.registry))
            .collect()
    }

    /// Install `pieces` into the project at `project_path`.
    ///
    /// Every archive-backed piece is cached locally first; if that fails the
    /// installer is never invoked. The whole batch is then handed to the
    /// installer in a single call. Errors are returned unchanged.
    #[instrument(
        skip(self, pieces),
        fields(project = %project_path.display(), pieces = pieces.len())
    )]
    pub async fn install(&self, project_path: &Path, pieces: &[PiecePackage]) -> InstallResult<()> {
        let report = self.cache.ensure_cached(pieces).await?;
        tracing::debug!(
            fetched = report.fetched,
            already_cached = report.already_cached,
            "Archive cache ready"
        );

        let dependencies = self.dependencies(pieces);
        tracing::info!(
            dependencies = dependencies.len(),
            installer = self.installer.installer_name(),
            "Installing piece dependencies"
        );

        self.installer
            .add(AddRequest {
                path: project_path.to_path_buf(),
                dependencies,
            })
            .await
    }
}
