//! Installer that shells out to a package manager.

use crate::dependency::{AddRequest, Dependency, DependencySource};
use crate::error::{InstallError, InstallResult};
use crate::traits::DependencyInstaller;
use async_trait::async_trait;
use piecemeal_core::InstallerConfig;
use std::process::Stdio;
use tokio::process::Command;
use tracing::instrument;

/// Runs `<program> <args...> <spec...>` inside the project directory.
///
/// Registry dependencies are passed as `name@version`, archive dependencies
/// as `name@file:<absolute path>`. The registry label is not passed on; the
/// program resolves registry dependencies from its own configuration.
pub struct CommandInstaller {
    program: String,
    args: Vec<String>,
}

impl CommandInstaller {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_config(config: &InstallerConfig) -> Self {
        Self::new(config.program.clone(), config.args.clone())
    }
}

/// Package manager argument for one dependency.
pub fn install_spec(dependency: &Dependency) -> std::io::Result<String> {
    match &dependency.source {
        DependencySource::Registry(_) => Ok(format!("{}@{}", dependency.name, dependency.version)),
        DependencySource::Archive(path) => {
            // The package manager runs in the project directory, so relative
            // cache paths must be anchored first.
            let path = std::path::absolute(path)?;
            Ok(format!("{}@file:{}", dependency.name, path.display()))
        }
    }
}

#[async_trait]
impl DependencyInstaller for CommandInstaller {
    #[instrument(skip(self, request), fields(program = %self.program, project = %request.path.display()))]
    async fn add(&self, request: AddRequest) -> InstallResult<()> {
        if request.dependencies.is_empty() {
            tracing::debug!("No dependencies to add");
            return Ok(());
        }

        let specs = request
            .dependencies
            .iter()
            .map(install_spec)
            .collect::<std::io::Result<Vec<_>>>()?;

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .args(&specs)
            .current_dir(&request.path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        tracing::info!(dependencies = specs.len(), "Running package manager");
        let output = cmd.output().await.map_err(|e| {
            InstallError::Installer(format!("failed to spawn {}: {e}", self.program))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(InstallError::CommandFailed {
                status: output.status.to_string(),
                stderr,
            });
        }

        tracing::debug!(
            stdout = %String::from_utf8_lossy(&output.stdout).trim(),
            "Package manager finished"
        );
        Ok(())
    }

    fn installer_name(&self) -> &'static str {
        "command"
    }
}
