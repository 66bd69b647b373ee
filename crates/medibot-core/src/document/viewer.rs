use async_trait::async_trait;
use std::path::Path;

use crate::error::Result;

/// Opens a written document with whatever the platform uses to show PDFs.
#[async_trait]
pub trait DocumentViewer: Send + Sync {
    async fn open(&self, path: &Path) -> Result<()>;
}
