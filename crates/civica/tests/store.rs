//! Integration tests for the in-memory issue store.
//!
//! These verify the store's identity assignment, ordering, lookup, and
//! deletion semantics through the `IssueStore` trait object.

use civica::domain::{Category, IssueId, NewIssue, Priority, Status};
use civica::error::Error;
use civica::storage::in_memory::new_in_memory_store;
use civica::storage::IssueStore;
use std::collections::HashSet;

fn report(title: &str) -> NewIssue {
    NewIssue {
        title: title.to_string(),
        description: format!("{title} description"),
        category: Category::RoadTransportation,
        priority: Priority::Medium,
        location: "Main Street".to_string(),
        address: None,
        latitude: None,
        longitude: None,
        image_urls: vec![],
        video_urls: vec![],
        user_id: None,
    }
}

#[tokio::test]
async fn create_assigns_identity_and_initial_state() {
    let mut store = new_in_memory_store("CIV");

    let issue = store.create(report("Pothole")).await.unwrap();

    assert_eq!(issue.id, IssueId::new(1));
    assert!(issue.tracking_id.as_str().starts_with("CIV-"));
    assert_eq!(issue.status, Status::Pending);
    assert_eq!(issue.upvotes, 0);
    assert_eq!(issue.created_at, issue.updated_at);
}

#[tokio::test]
async fn ids_are_monotonically_increasing() {
    let mut store = new_in_memory_store("CIV");

    let first = store.create(report("First")).await.unwrap();
    let second = store.create(report("Second")).await.unwrap();
    let third = store.create(report("Third")).await.unwrap();

    assert!(first.id < second.id);
    assert!(second.id < third.id);
}

#[tokio::test]
async fn deleted_ids_are_never_reused() {
    let mut store = new_in_memory_store("CIV");

    let first = store.create(report("First")).await.unwrap();
    store.delete(first.id).await.unwrap();

    let second = store.create(report("Second")).await.unwrap();
    assert!(second.id > first.id);
}

#[tokio::test]
async fn tracking_ids_are_unique_across_many_creates() {
    let mut store = new_in_memory_store("CIV");
    let mut codes = HashSet::new();

    for i in 0..200 {
        let issue = store.create(report(&format!("Issue {i}"))).await.unwrap();
        assert!(
            codes.insert(issue.tracking_id.as_str().to_string()),
            "tracking id collision"
        );
    }
}

#[tokio::test]
async fn list_is_newest_first() {
    let mut store = new_in_memory_store("CIV");

    store.create(report("Oldest")).await.unwrap();
    store.create(report("Middle")).await.unwrap();
    store.create(report("Newest")).await.unwrap();

    let listed = store.list().await.unwrap();
    let titles: Vec<_> = listed.iter().map(|issue| issue.title.as_str()).collect();

    assert_eq!(titles, vec!["Newest", "Middle", "Oldest"]);
}

#[tokio::test]
async fn get_missing_issue_is_none() {
    let store = new_in_memory_store("CIV");

    let result = store.get(IssueId::new(42)).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn lookup_by_tracking_id() {
    let mut store = new_in_memory_store("CIV");

    let created = store.create(report("Pothole")).await.unwrap();

    let found = store
        .find_by_tracking_id(created.tracking_id.as_str())
        .await
        .unwrap();
    assert_eq!(found.unwrap().id, created.id);

    let missing = store.find_by_tracking_id("CIV-ZZZZZZ").await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn delete_then_get_is_none() {
    let mut store = new_in_memory_store("CIV");

    let issue = store.create(report("Short lived")).await.unwrap();
    store.delete(issue.id).await.unwrap();

    assert!(store.get(issue.id).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_missing_issue_is_not_found_not_a_crash() {
    let mut store = new_in_memory_store("CIV");

    let result = store.delete(IssueId::new(42)).await;
    assert!(matches!(result, Err(Error::IssueNotFound(_))));
}

#[tokio::test]
async fn set_status_refreshes_updated_at_only() {
    let mut store = new_in_memory_store("CIV");

    let issue = store.create(report("Pothole")).await.unwrap();
    let updated = store.set_status(issue.id, Status::Resolved).await.unwrap();

    assert_eq!(updated.status, Status::Resolved);
    assert_eq!(updated.created_at, issue.created_at);
    assert!(updated.updated_at >= issue.updated_at);
    assert!(updated.created_at <= updated.updated_at);
}

#[tokio::test]
async fn set_status_on_missing_issue_is_not_found() {
    let mut store = new_in_memory_store("CIV");

    let result = store.set_status(IssueId::new(42), Status::Resolved).await;
    assert!(matches!(result, Err(Error::IssueNotFound(_))));
}

#[tokio::test]
async fn upvote_on_missing_issue_is_not_found() {
    let mut store = new_in_memory_store("CIV");

    let result = store.increment_upvotes(IssueId::new(42)).await;
    assert!(matches!(result, Err(Error::IssueNotFound(_))));
}

#[tokio::test]
async fn upvotes_count_up_from_zero() {
    let mut store = new_in_memory_store("CIV");

    let issue = store.create(report("Popular pothole")).await.unwrap();

    assert_eq!(store.increment_upvotes(issue.id).await.unwrap(), 1);
    assert_eq!(store.increment_upvotes(issue.id).await.unwrap(), 2);
    assert_eq!(store.increment_upvotes(issue.id).await.unwrap(), 3);

    let fetched = store.get(issue.id).await.unwrap().unwrap();
    assert_eq!(fetched.upvotes, 3);
}
