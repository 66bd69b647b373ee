//! Loads the client configuration.
//!
//! Precedence, lowest first: built-in defaults, `config.toml`, environment
//! variables. Command-line flags are applied on top by the binary.

use medibot_core::config::ClientConfig;
use medibot_core::error::{MedibotError, Result};
use std::path::PathBuf;

use crate::paths::MedibotPaths;
use crate::storage::AtomicTomlFile;

pub const ENV_BASE_URL: &str = "MEDIBOT_BASE_URL";
pub const ENV_DOCUMENTS_DIR: &str = "MEDIBOT_DOCUMENTS_DIR";

pub struct ConfigService {
    file: AtomicTomlFile<ClientConfig>,
}

impl ConfigService {
    /// Reads from the default `config.toml` location.
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(MedibotPaths::config_file()?))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
        }
    }

    /// Loads the file (defaults when absent) and applies process environment overrides.
    pub fn load(&self) -> Result<ClientConfig> {
        let config = self.load_file()?;
        Ok(apply_env_overrides(config, |key| std::env::var(key).ok()))
    }

    /// Loads the file only. A missing file yields the default config.
    pub fn load_file(&self) -> Result<ClientConfig> {
        let config = self.file.load().map_err(|e| {
            MedibotError::config(format!(
                "Failed to read {}: {}",
                self.file.path().display(),
                e
            ))
        })?;
        match config {
            Some(config) => {
                tracing::debug!(path = %self.file.path().display(), "Loaded config file");
                Ok(config)
            }
            None => Ok(ClientConfig::default()),
        }
    }

}

/// Applies `MEDIBOT_*` overrides read through `lookup`. Blank values are ignored.
pub fn apply_env_overrides<F>(mut config: ClientConfig, lookup: F) -> ClientConfig
where
    F: Fn(&str) -> Option<String>,
{
    let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(base_url) = non_blank(ENV_BASE_URL) {
        config.api.base_url = base_url;
    }
    if let Some(dir) = non_blank(ENV_DOCUMENTS_DIR) {
        config.documents.dir = Some(PathBuf::from(dir));
    }
    config
}
