//! TOML-backed persistence of the signed-in identity.

use async_trait::async_trait;
use medibot_core::error::{MedibotError, Result};
use medibot_core::user::{Identity, IdentityRepository};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

use crate::paths::MedibotPaths;
use crate::storage::AtomicTomlFile;

/// On-disk shape of `identity.toml`.
#[derive(Debug, Serialize, Deserialize)]
struct StoredIdentity {
    user_name: String,
}

/// Stores the identity as a single `user_name` entry in `identity.toml`.
///
/// File access runs on the blocking pool so callers on the async runtime
/// never stall on disk I/O.
#[derive(Clone)]
pub struct TomlIdentityRepository {
    file: Arc<AtomicTomlFile<StoredIdentity>>,
}

impl TomlIdentityRepository {
    /// Uses the default location under the platform config directory.
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(MedibotPaths::identity_file()?))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicTomlFile::new(path)),
        }
    }

    async fn blocking<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&AtomicTomlFile<StoredIdentity>) -> Result<T> + Send + 'static,
    {
        let file = Arc::clone(&self.file);
        tokio::task::spawn_blocking(move || f(&file))
            .await
            .map_err(|e| MedibotError::io(format!("Failed to join storage task: {}", e)))?
    }
}

#[async_trait]
impl IdentityRepository for TomlIdentityRepository {
    async fn load(&self) -> Result<Option<Identity>> {
        let stored = self.blocking(|file| file.load()).await?;
        match stored {
            Some(stored) => match Identity::parse(&stored.user_name) {
                Ok(identity) => Ok(Some(identity)),
                Err(_) => {
                    tracing::warn!("Ignoring blank user name in identity file");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    async fn save(&self, identity: &Identity) -> Result<()> {
        let stored = StoredIdentity {
            user_name: identity.as_str().to_string(),
        };
        self.blocking(move |file| file.save(&stored)).await
    }

    async fn clear(&self) -> Result<()> {
        self.blocking(|file| file.remove()).await
    }
}
