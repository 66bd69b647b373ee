//! Path management for MediBot's local files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/medibot/           # Config directory
//! ├── config.toml              # Client configuration
//! └── identity.toml            # Signed-in user name (auto-login)
//!
//! ~/Documents/MediBot/         # Downloaded prescriptions
//! └── prescription-YYYYMMDD-HHMMSS.pdf
//! ```

use medibot_core::error::{MedibotError, Result};
use std::path::PathBuf;

const APP_DIR: &str = "medibot";
const DOCUMENTS_DIR: &str = "MediBot";

pub struct MedibotPaths;

impl MedibotPaths {
    /// Returns the platform config directory with `medibot` appended.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| MedibotError::config("Cannot find the config directory"))
    }

    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn identity_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("identity.toml"))
    }

    /// Returns the directory downloaded prescriptions are written to.
    ///
    /// Prefers the user's documents folder and falls back to the data directory
    /// on systems without one.
    pub fn documents_dir() -> Result<PathBuf> {
        if let Some(dir) = dirs::document_dir() {
            return Ok(dir.join(DOCUMENTS_DIR));
        }
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR).join("documents"))
            .ok_or_else(|| MedibotError::config("Cannot find a directory for documents"))
    }
}
