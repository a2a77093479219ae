//! Integration tests for JSONL persistence.
//!
//! Cover the save/load round trip, id continuity across restarts, reload
//! semantics, and resilience to damaged data files.

use civica::domain::{Category, NewIssue, Priority, Status};
use civica::storage::in_memory::load_from_jsonl;
use civica::storage::{create_store, IssueStore, StorageBackend};
use std::path::PathBuf;
use tempfile::TempDir;

fn report(title: &str) -> NewIssue {
    NewIssue {
        title: title.to_string(),
        description: format!("{title} description"),
        category: Category::StreetLighting,
        priority: Priority::High,
        location: "5th and Main".to_string(),
        address: None,
        latitude: Some(22.3511),
        longitude: Some(73.3717),
        image_urls: vec!["https://blobs.test/photo.jpg".to_string()],
        video_urls: vec![],
        user_id: Some("resident@example.com".to_string()),
    }
}

fn data_path(dir: &TempDir) -> PathBuf {
    dir.path().join("issues.jsonl")
}

#[tokio::test]
async fn save_then_load_round_trips_issues() {
    let dir = TempDir::new().unwrap();
    let path = data_path(&dir);

    let mut store = create_store(StorageBackend::Jsonl(path.clone()), "CIV")
        .await
        .unwrap();
    let created = store.create(report("Streetlight out")).await.unwrap();
    store.save().await.unwrap();

    let reopened = create_store(StorageBackend::Jsonl(path), "CIV")
        .await
        .unwrap();
    let loaded = reopened.get(created.id).await.unwrap().unwrap();

    assert_eq!(loaded.title, "Streetlight out");
    assert_eq!(loaded.tracking_id, created.tracking_id);
    assert_eq!(loaded.status, Status::Pending);
    assert_eq!(loaded.latitude, created.latitude);
    assert_eq!(loaded.image_urls, created.image_urls);
    assert_eq!(loaded.created_at, created.created_at);
}

#[tokio::test]
async fn id_assignment_continues_after_restart() {
    let dir = TempDir::new().unwrap();
    let path = data_path(&dir);

    let mut store = create_store(StorageBackend::Jsonl(path.clone()), "CIV")
        .await
        .unwrap();
    let first = store.create(report("First")).await.unwrap();
    let second = store.create(report("Second")).await.unwrap();
    store.save().await.unwrap();

    let mut reopened = create_store(StorageBackend::Jsonl(path), "CIV")
        .await
        .unwrap();
    let third = reopened.create(report("Third")).await.unwrap();

    assert!(third.id > second.id);
    assert!(third.id > first.id);
    assert_ne!(third.tracking_id, first.tracking_id);
    assert_ne!(third.tracking_id, second.tracking_id);
}

#[tokio::test]
async fn reload_discards_unsaved_changes() {
    let dir = TempDir::new().unwrap();
    let path = data_path(&dir);

    let mut store = create_store(StorageBackend::Jsonl(path), "CIV")
        .await
        .unwrap();
    let issue = store.create(report("Pothole")).await.unwrap();
    store.save().await.unwrap();

    store.set_status(issue.id, Status::Resolved).await.unwrap();
    assert_eq!(
        store.get(issue.id).await.unwrap().unwrap().status,
        Status::Resolved
    );

    store.reload().await.unwrap();
    assert_eq!(
        store.get(issue.id).await.unwrap().unwrap().status,
        Status::Pending
    );
}

#[tokio::test]
async fn reload_with_missing_file_resets_to_empty() {
    let dir = TempDir::new().unwrap();
    let path = data_path(&dir);

    let mut store = create_store(StorageBackend::Jsonl(path.clone()), "CIV")
        .await
        .unwrap();
    let issue = store.create(report("Pothole")).await.unwrap();
    store.save().await.unwrap();

    std::fs::remove_file(&path).unwrap();
    store.reload().await.unwrap();

    assert!(store.get(issue.id).await.unwrap().is_none());
}

#[tokio::test]
async fn malformed_lines_are_skipped_with_warnings() {
    let dir = TempDir::new().unwrap();
    let path = data_path(&dir);

    let mut store = create_store(StorageBackend::Jsonl(path.clone()), "CIV")
        .await
        .unwrap();
    store.create(report("Good record")).await.unwrap();
    store.save().await.unwrap();

    // Damage the file: append a half-written line.
    let mut content = std::fs::read_to_string(&path).unwrap();
    content.push_str("{\"id\": 99, \"title\": \"trunc");
    std::fs::write(&path, content).unwrap();

    let (loaded, warnings) = load_from_jsonl(&path, "CIV").await.unwrap();

    assert_eq!(loaded.list().await.unwrap().len(), 1);
    assert_eq!(warnings.len(), 1);
}

#[tokio::test]
async fn duplicate_records_are_dropped_on_load() {
    let dir = TempDir::new().unwrap();
    let path = data_path(&dir);

    let mut store = create_store(StorageBackend::Jsonl(path.clone()), "CIV")
        .await
        .unwrap();
    store.create(report("Original")).await.unwrap();
    store.save().await.unwrap();

    // Duplicate the only line wholesale: same id, same tracking id.
    let content = std::fs::read_to_string(&path).unwrap();
    std::fs::write(&path, format!("{content}{content}")).unwrap();

    let (loaded, warnings) = load_from_jsonl(&path, "CIV").await.unwrap();

    assert_eq!(loaded.list().await.unwrap().len(), 1);
    assert_eq!(warnings.len(), 1);
}

#[tokio::test]
async fn in_memory_backend_save_and_reload_are_noops() {
    let mut store = create_store(StorageBackend::InMemory, "CIV").await.unwrap();

    let issue = store.create(report("Ephemeral")).await.unwrap();
    store.save().await.unwrap();
    store.reload().await.unwrap();

    assert!(store.get(issue.id).await.unwrap().is_some());
}
