//! Configuration types shared across crates.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Local archive cache configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Root directory for cached piece archives.
    #[serde(default = "default_archive_dir")]
    pub archive_dir: PathBuf,
    /// Maximum number of archives fetched from the file store at once.
    #[serde(default = "default_max_parallel_fetches")]
    pub max_parallel_fetches: usize,
}

fn default_archive_dir() -> PathBuf {
    PathBuf::from("./cache/archives")
}

fn default_max_parallel_fetches() -> usize {
    8
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            archive_dir: default_archive_dir(),
            max_parallel_fetches: default_max_parallel_fetches(),
        }
    }
}

impl CacheConfig {
    /// Configuration rooted at the given directory, otherwise default.
    pub fn with_archive_dir(archive_dir: impl Into<PathBuf>) -> Self {
        Self {
            archive_dir: archive_dir.into(),
            ..Self::default()
        }
    }

    /// Validate cache configuration invariants.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_parallel_fetches == 0 {
            return Err("cache.max_parallel_fetches must be at least 1".to_string());
        }
        if self.archive_dir.as_os_str().is_empty() {
            return Err("cache.archive_dir must not be empty".to_string());
        }
        Ok(())
    }
}

/// File store backend configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FileStoreConfig {
    /// Archives stored as files in a local directory, one file per id.
    Filesystem {
        /// Root directory of the store.
        path: PathBuf,
    },
    /// Archives served over HTTP at `{base_url}/v1/files/{id}`.
    Http {
        /// Base URL of the file service.
        base_url: String,
        /// Bearer token sent with each request.
        /// WARNING: Prefer PIECEMEAL_FILE_STORE__TOKEN over storing in config.
        token: Option<String>,
        /// Request timeout in seconds.
        #[serde(default = "default_http_timeout_secs")]
        timeout_secs: u64,
    },
}

fn default_http_timeout_secs() -> u64 {
    60
}

impl Default for FileStoreConfig {
    fn default() -> Self {
        Self::Filesystem {
            path: PathBuf::from("./data/files"),
        }
    }
}

impl FileStoreConfig {
    /// Validate file store configuration invariants.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            FileStoreConfig::Filesystem { path } => {
                if path.as_os_str().is_empty() {
                    return Err("file_store.path must not be empty".to_string());
                }
                Ok(())
            }
            FileStoreConfig::Http {
                base_url,
                timeout_secs,
                ..
            } => {
                if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
                    return Err(format!(
                        "file_store.base_url must be an http(s) URL, got {base_url:?}"
                    ));
                }
                if *timeout_secs == 0 {
                    return Err("file_store.timeout_secs must be at least 1".to_string());
                }
                Ok(())
            }
        }
    }
}

/// Package manager invocation configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InstallerConfig {
    /// Package manager executable.
    #[serde(default = "default_program")]
    pub program: String,
    /// Arguments placed before the dependency specs.
    #[serde(default = "default_args")]
    pub args: Vec<String>,
    /// Registry label recorded on registry dependencies. The package manager
    /// resolves them through its own configured registry.
    #[serde(default = "default_registry")]
    pub registry: String,
}

fn default_program() -> String {
    "npm".to_string()
}

fn default_args() -> Vec<String> {
    vec![
        "install".to_string(),
        "--no-audit".to_string(),
        "--no-fund".to_string(),
    ]
}

fn default_registry() -> String {
    "npm".to_string()
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
            registry: default_registry(),
        }
    }
}

impl InstallerConfig {
    /// Validate installer configuration invariants.
    pub fn validate(&self) -> Result<(), String> {
        if self.program.trim().is_empty() {
            return Err("installer.program must not be empty".to_string());
        }
        Ok(())
    }
}

/// Complete application configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Archive cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,
    /// File store backend configuration.
    #[serde(default)]
    pub file_store: FileStoreConfig,
    /// Package manager configuration.
    #[serde(default)]
    pub installer: InstallerConfig,
}

impl AppConfig {
    /// Validate every section.
    pub fn validate(&self) -> Result<(), String> {
        self.cache.validate()?;
        self.file_store.validate()?;
        self.installer.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_defaults_from_empty_json() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.cache.max_parallel_fetches, 8);
        assert_eq!(config.installer.program, "npm");
        assert_eq!(config.installer.registry, "npm");
        assert!(matches!(config.file_store, FileStoreConfig::Filesystem { .. }));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cache_config_rejects_zero_parallelism() {
        let config = CacheConfig {
            max_parallel_fetches: 0,
            ..CacheConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_http_store_timeout_defaults() {
        let json = r#"{"type":"http","base_url":"https://files.example.com"}"#;
        let config: FileStoreConfig = serde_json::from_str(json).unwrap();
        match config {
            FileStoreConfig::Http {
                token,
                timeout_secs,
                ..
            } => {
                assert!(token.is_none());
                assert_eq!(timeout_secs, 60);
            }
            _ => panic!("expected http config"),
        }
    }

    #[test]
    fn test_http_store_validate_url_scheme() {
        let invalid = FileStoreConfig::Http {
            base_url: "files.example.com".to_string(),
            token: None,
            timeout_secs: 60,
        };
        assert!(invalid.validate().is_err());

        let valid = FileStoreConfig::Http {
            base_url: "http://127.0.0.1:9000".to_string(),
            token: Some("secret".to_string()),
            timeout_secs: 5,
        };
        assert!(valid.validate().is_ok());
    }

    #[test]
    fn test_installer_config_rejects_blank_program() {
        let config = InstallerConfig {
            program: "  ".to_string(),
            ..InstallerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
