//! Command-line installer for workflow pieces.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use piecemeal_core::{AppConfig, PiecePackage};
use piecemeal_installer::{CommandInstaller, DependencyInstaller, PieceInstaller};
use piecemeal_storage::ArchiveCache;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "piecemeal")]
#[command(about = "Install workflow pieces into a project dependency tree")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(
        short,
        long,
        global = true,
        env = "PIECEMEAL_CONFIG",
        default_value = "piecemeal.toml"
    )]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cache archive-backed pieces, then install every piece into a project
    Install {
        /// Project directory to install into (created if missing)
        #[arg(long)]
        project: PathBuf,
        #[command(flatten)]
        pieces: PieceArgs,
    },
    /// Cache archive-backed pieces without installing anything
    Fetch {
        #[command(flatten)]
        pieces: PieceArgs,
    },
}

#[derive(Args, Clone)]
struct PieceArgs {
    /// Piece to install: NAME@VERSION for registry pieces,
    /// NAME@VERSION=ARCHIVE_ID for uploaded archives (repeatable)
    #[arg(long = "piece", value_name = "SPEC")]
    pieces: Vec<PiecePackage>,

    /// JSON file holding an array of piece references
    #[arg(long, value_name = "FILE")]
    pieces_file: Option<PathBuf>,
}

impl PieceArgs {
    /// Pieces from the command line followed by those from `--pieces-file`.
    fn load(&self) -> Result<Vec<PiecePackage>> {
        let mut pieces = self.pieces.clone();
        if let Some(path) = &self.pieces_file {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let from_file: Vec<PiecePackage> = serde_json::from_str(&contents)
                .with_context(|| format!("invalid pieces file {}", path.display()))?;
            pieces.extend(from_file);
        }
        if pieces.is_empty() {
            anyhow::bail!("no pieces requested; pass --piece or --pieces-file");
        }
        Ok(pieces)
    }
}

/// Load configuration from an optional TOML file overlaid with
/// `PIECEMEAL_`-prefixed environment variables.
fn load_config(path: &Path) -> Result<AppConfig> {
    let mut figment = Figment::new();
    if path.exists() {
        tracing::info!(config_path = %path.display(), "Loading configuration from file");
        figment = figment.merge(Toml::file(path));
    } else {
        tracing::debug!("No config file found at {}", path.display());
    }

    let mut config: AppConfig = figment
        .merge(Env::prefixed("PIECEMEAL_").ignore(&["config"]).split("__"))
        .extract()
        .context("failed to load configuration")?;
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;

    // Archive paths are handed to a package manager running elsewhere.
    config.cache.archive_dir = std::path::absolute(&config.cache.archive_dir)
        .context("failed to resolve cache.archive_dir")?;
    Ok(config)
}

async fn build_cache(config: &AppConfig) -> Result<ArchiveCache> {
    let store = piecemeal_storage::from_config(&config.file_store)
        .await
        .context("failed to initialize file store")?;
    ArchiveCache::new(store, &config.cache).context("failed to initialize archive cache")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = load_config(&cli.config)?;

    match cli.command {
        Commands::Install { project, pieces } => {
            let pieces = pieces.load()?;
            tokio::fs::create_dir_all(&project)
                .await
                .with_context(|| format!("failed to create {}", project.display()))?;

            let cache = build_cache(&config).await?;
            let installer: Arc<dyn DependencyInstaller> =
                Arc::new(CommandInstaller::from_config(&config.installer));
            let piece_installer =
                PieceInstaller::new(cache, installer, config.installer.registry.clone());

            piece_installer
                .install(&project, &pieces)
                .await
                .context("piece installation failed")?;
            println!(
                "Installed {} piece(s) into {}",
                pieces.len(),
                project.display()
            );
        }
        Commands::Fetch { pieces } => {
            let pieces = pieces.load()?;
            let cache = build_cache(&config).await?;
            let report = cache
                .ensure_cached(&pieces)
                .await
                .context("failed to cache piece archives")?;
            println!(
                "Archives: {} requested, {} fetched, {} already cached ({})",
                report.requested,
                report.fetched,
                report.already_cached,
                cache.root().display()
            );
        }
    }

    Ok(())
}
