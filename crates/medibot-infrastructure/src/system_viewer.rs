//! Opens saved documents with the desktop's default application.

use async_trait::async_trait;
use medibot_core::document::DocumentViewer;
use medibot_core::error::{MedibotError, Result};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

/// Launches the platform opener (`open`, `xdg-open`, or `start`) for a file.
#[derive(Debug, Clone, Default)]
pub struct SystemDocumentViewer;

impl SystemDocumentViewer {
    pub fn new() -> Self {
        Self
    }
}

/// Program and leading arguments for the current platform's opener.
pub fn opener_command() -> (&'static str, &'static [&'static str]) {
    if cfg!(target_os = "macos") {
        ("open", &[])
    } else if cfg!(target_os = "windows") {
        ("cmd", &["/C", "start", ""])
    } else {
        ("xdg-open", &[])
    }
}

#[async_trait]
impl DocumentViewer for SystemDocumentViewer {
    async fn open(&self, path: &Path) -> Result<()> {
        let (program, args) = opener_command();
        tracing::debug!(program, path = %path.display(), "Opening document");

        let status = Command::new(program)
            .args(args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| MedibotError::document(format!("cannot launch {program}: {e}")))?;

        if status.success() {
            Ok(())
        } else {
            Err(MedibotError::document(format!(
                "{program} exited with {status} for {}",
                path.display()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opener_matches_platform() {
        let (program, args) = opener_command();
        if cfg!(target_os = "macos") {
            assert_eq!(program, "open");
        } else if cfg!(target_os = "windows") {
            assert_eq!(program, "cmd");
            assert_eq!(args[0], "/C");
        } else {
            assert_eq!(program, "xdg-open");
            assert!(args.is_empty());
        }
    }
}
