//! Writes generated documents to the local documents directory.

use chrono::{DateTime, Utc};
use medibot_core::document::DocumentPayload;
use medibot_core::error::{MedibotError, Result};
use std::path::{Path, PathBuf};

const FILE_PREFIX: &str = "prescription";
const FILE_EXTENSION: &str = "pdf";

/// Directory-backed store for downloaded prescriptions.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    dir: PathBuf,
}

impl DocumentStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Decodes `payload` and writes it under a timestamped file name.
    ///
    /// The directory is created on first use. A second document in the same
    /// second gets a numeric suffix instead of replacing the first.
    pub async fn write(&self, payload: &DocumentPayload) -> Result<PathBuf> {
        let bytes = payload.decode()?;

        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            MedibotError::document(format!(
                "cannot create directory {}: {e}",
                self.dir.display()
            ))
        })?;

        let path = self.free_path(Utc::now()).await;
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| MedibotError::document(format!("cannot write {}: {e}", path.display())))?;

        tracing::info!(path = %path.display(), bytes = bytes.len(), "Saved document");
        Ok(path)
    }

    async fn free_path(&self, now: DateTime<Utc>) -> PathBuf {
        let stem = file_stem(now);
        let mut candidate = self.dir.join(format!("{stem}.{FILE_EXTENSION}"));
        let mut counter = 1;
        while tokio::fs::try_exists(&candidate).await.unwrap_or(false) {
            candidate = self.dir.join(format!("{stem}-{counter}.{FILE_EXTENSION}"));
            counter += 1;
        }
        candidate
    }
}

fn file_stem(now: DateTime<Utc>) -> String {
    format!("{FILE_PREFIX}-{}", now.format("%Y%m%d-%H%M%S"))
}
