//! Saves generated prescriptions and opens them for the user.

use medibot_core::document::{DocumentPayload, DocumentViewer};
use medibot_core::error::{MedibotError, Result};
use medibot_infrastructure::DocumentStore;
use std::path::PathBuf;
use std::sync::Arc;

pub struct DocumentDelivery {
    store: DocumentStore,
    viewer: Arc<dyn DocumentViewer>,
    open_after_download: bool,
}

impl DocumentDelivery {
    pub fn new(store: DocumentStore, viewer: Arc<dyn DocumentViewer>, open_after_download: bool) -> Self {
        Self {
            store,
            viewer,
            open_after_download,
        }
    }

    /// Writes the document to disk and, unless disabled, opens it.
    ///
    /// Returns the path of the written file. If the viewer fails the file is
    /// still on disk and the error names its path.
    pub async fn deliver(&self, payload: &DocumentPayload) -> Result<PathBuf> {
        let path = self.store.write(payload).await?;

        if self.open_after_download {
            self.viewer.open(&path).await.map_err(|e| {
                tracing::warn!("Failed to open {}: {}", path.display(), e);
                MedibotError::document(format!(
                    "saved to {} but could not open it ({e})",
                    path.display()
                ))
            })?;
        }
        Ok(path)
    }
}
