mod common;

use common::MockViewer;
use medibot_application::DocumentDelivery;
use medibot_core::document::DocumentPayload;
use medibot_core::error::MedibotError;
use medibot_infrastructure::DocumentStore;
use std::sync::Arc;
use tempfile::TempDir;

#[tokio::test]
async fn test_deliver_without_opening() {
    let temp = TempDir::new().unwrap();
    let viewer = Arc::new(MockViewer::default());
    let delivery = DocumentDelivery::new(DocumentStore::new(temp.path()), viewer.clone(), false);

    let path = delivery
        .deliver(&DocumentPayload::from_bytes(b"%PDF"))
        .await
        .unwrap();

    assert!(path.exists());
    assert!(viewer.opened.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_viewer_failure_keeps_file_and_names_it() {
    let temp = TempDir::new().unwrap();
    let viewer = Arc::new(MockViewer {
        fails: true,
        ..MockViewer::default()
    });
    let delivery = DocumentDelivery::new(DocumentStore::new(temp.path()), viewer, true);

    let err = delivery
        .deliver(&DocumentPayload::from_bytes(b"%PDF"))
        .await
        .unwrap_err();

    match err {
        MedibotError::Document(message) => {
            assert!(message.contains(&temp.path().display().to_string()));
        }
        other => panic!("expected a document error, got {other:?}"),
    }
    assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 1);
}
