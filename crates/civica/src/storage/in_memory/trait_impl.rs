//! IssueStore trait implementation for the in-memory store.

use super::InMemoryStore;
use crate::domain::{Issue, IssueId, NewIssue, Status, TrackingId};
use crate::error::{Error, Result};
use crate::storage::IssueStore;
use async_trait::async_trait;
use chrono::Utc;

#[async_trait]
impl IssueStore for InMemoryStore {
    async fn create(&mut self, record: NewIssue) -> Result<Issue> {
        let mut inner = self.state().lock().await;

        let code = inner.allocate_tracking_code(&record.title, &record.description)?;
        let id = inner.allocate_id();
        let now = Utc::now();

        let issue = Issue {
            id,
            tracking_id: TrackingId::new(code),
            title: record.title,
            description: record.description,
            category: record.category,
            priority: record.priority,
            status: Status::Pending,
            location: record.location,
            address: record.address,
            latitude: record.latitude,
            longitude: record.longitude,
            image_urls: record.image_urls,
            video_urls: record.video_urls,
            upvotes: 0,
            user_id: record.user_id,
            created_at: now,
            updated_at: now,
        };

        inner.issues.insert(id, issue.clone());
        tracing::debug!(id = %id, tracking_id = %issue.tracking_id, "issue created");

        Ok(issue)
    }

    async fn get(&self, id: IssueId) -> Result<Option<Issue>> {
        let inner = self.state().lock().await;
        Ok(inner.issues.get(&id).cloned())
    }

    async fn find_by_tracking_id(&self, code: &str) -> Result<Option<Issue>> {
        let inner = self.state().lock().await;
        Ok(inner
            .issues
            .values()
            .find(|issue| issue.tracking_id.as_str() == code)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Issue>> {
        let inner = self.state().lock().await;

        let mut issues: Vec<Issue> = inner.issues.values().cloned().collect();

        // Newest first; id breaks ties so the order is deterministic when
        // timestamps collide.
        issues.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(b.id.cmp(&a.id))
        });

        Ok(issues)
    }

    async fn set_status(&mut self, id: IssueId, status: Status) -> Result<Issue> {
        let mut inner = self.state().lock().await;

        let issue = inner
            .issues
            .get_mut(&id)
            .ok_or_else(|| Error::not_found(id))?;

        issue.status = status;
        issue.updated_at = Utc::now();

        Ok(issue.clone())
    }

    async fn increment_upvotes(&mut self, id: IssueId) -> Result<u32> {
        let mut inner = self.state().lock().await;

        let issue = inner
            .issues
            .get_mut(&id)
            .ok_or_else(|| Error::not_found(id))?;

        issue.upvotes += 1;

        Ok(issue.upvotes)
    }

    async fn delete(&mut self, id: IssueId) -> Result<()> {
        let mut inner = self.state().lock().await;

        if inner.issues.remove(&id).is_none() {
            return Err(Error::not_found(id));
        }

        tracing::debug!(id = %id, "issue deleted");
        Ok(())
    }

    async fn import_issues(&mut self, issues: Vec<Issue>) -> Result<()> {
        let mut inner = self.state().lock().await;

        for issue in issues {
            inner.register_imported(issue);
        }

        Ok(())
    }

    async fn export_all(&self) -> Result<Vec<Issue>> {
        let inner = self.state().lock().await;
        Ok(inner.issues.values().cloned().collect())
    }

    async fn save(&self) -> Result<()> {
        // The plain in-memory store has no backing file.
        Ok(())
    }

    async fn reload(&mut self) -> Result<()> {
        // The plain in-memory store has no backing file.
        Ok(())
    }
}
