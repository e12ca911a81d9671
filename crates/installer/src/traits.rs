//! Installer trait definitions.

use crate::dependency::AddRequest;
use crate::error::InstallResult;
use async_trait::async_trait;

/// Materializes dependencies into a project's dependency tree.
#[async_trait]
pub trait DependencyInstaller: Send + Sync + 'static {
    /// Add every dependency of `request` to the project at `request.path`.
    async fn add(&self, request: AddRequest) -> InstallResult<()>;

    /// Get the name of this installer.
    ///
    /// Used for logging.
    fn installer_name(&self) -> &'static str;
}
