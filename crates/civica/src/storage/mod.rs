//! Storage abstraction layer for civica.
//!
//! This module provides the core storage trait and factory for creating
//! storage backends:
//!
//! - **In-memory**: fast, ephemeral storage backed by a HashMap
//! - **JSONL**: the in-memory backend with JSON Lines file persistence
//!
//! # Architecture
//!
//! The storage layer uses an async trait so the same interface can front
//! both the in-memory backend and a future relational one. The trait is
//! object-safe, allowing dynamic dispatch via `Box<dyn IssueStore>`.
//!
//! # Mutation discipline
//!
//! `status` and `upvotes` are never written through a general-purpose patch.
//! The only mutators are [`IssueStore::set_status`] (invoked by the lifecycle
//! engine after its authorization check) and [`IssueStore::increment_upvotes`]
//! (the open counter). Everything else about an issue is immutable once
//! created.

use crate::domain::{Issue, IssueId, NewIssue, Status};
use crate::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub mod in_memory;

/// Core storage trait for issue records.
///
/// Implementations must be `Send + Sync` to support concurrent access in
/// async contexts, and must serialize operations on a single issue so that
/// per-record atomicity holds: concurrent updates to different issues never
/// interfere, and upvote increments are linearizable per issue.
#[async_trait]
pub trait IssueStore: Send + Sync {
    /// Create a new issue from a validated record.
    ///
    /// Assigns the next numeric id and a unique tracking id, and sets
    /// `created_at = updated_at = now`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if tracking-id assignment exhausts its retry
    /// budget.
    async fn create(&mut self, record: NewIssue) -> Result<Issue>;

    /// Get an issue by numeric id.
    ///
    /// Returns `None` if the issue doesn't exist.
    async fn get(&self, id: IssueId) -> Result<Option<Issue>>;

    /// Look up an issue by its tracking id.
    ///
    /// Returns `None` if no issue carries the code. Matching is exact.
    async fn find_by_tracking_id(&self, code: &str) -> Result<Option<Issue>>;

    /// List all issues, newest `created_at` first.
    ///
    /// Ties on `created_at` break by descending id so the order is
    /// deterministic.
    async fn list(&self) -> Result<Vec<Issue>>;

    /// Set the status of an issue and refresh `updated_at`.
    ///
    /// Reserved for the lifecycle engine; callers go through
    /// [`crate::lifecycle::transition`], which performs the role check.
    /// Setting the current status is permitted and still refreshes
    /// `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `Error::IssueNotFound` if the issue doesn't exist.
    async fn set_status(&mut self, id: IssueId, status: Status) -> Result<Issue>;

    /// Atomically add one to an issue's upvote counter.
    ///
    /// Returns the new count. Open to any caller, with no deduplication;
    /// concurrent increments never lose an update.
    ///
    /// # Errors
    ///
    /// Returns `Error::IssueNotFound` if the issue doesn't exist.
    async fn increment_upvotes(&mut self, id: IssueId) -> Result<u32>;

    /// Permanently delete an issue.
    ///
    /// There is no soft delete; the record is gone.
    ///
    /// # Errors
    ///
    /// Returns `Error::IssueNotFound` if the issue doesn't exist.
    async fn delete(&mut self, id: IssueId) -> Result<()>;

    /// Import issues in bulk, e.g. when loading from a JSONL file.
    ///
    /// Registers each issue's tracking id and advances the id counter past
    /// the highest imported id.
    async fn import_issues(&mut self, issues: Vec<Issue>) -> Result<()>;

    /// Export all issues in unspecified order, suitable for persistence.
    async fn export_all(&self) -> Result<Vec<Issue>>;

    /// Save changes to persistent storage.
    ///
    /// Takes `&self` so saves can happen from shared references after
    /// read-only operations; implementations use interior mutability. For
    /// the plain in-memory backend this is a no-op.
    async fn save(&self) -> Result<()>;

    /// Reload state from persistent storage, discarding in-memory changes.
    ///
    /// For the plain in-memory backend this is a no-op.
    async fn reload(&mut self) -> Result<()>;
}

/// Storage backend configuration.
#[derive(Debug, Clone)]
pub enum StorageBackend {
    /// In-memory storage (ephemeral).
    InMemory,

    /// JSONL file storage (persistent).
    Jsonl(PathBuf),
}

impl StorageBackend {
    /// Returns the data file path for file-based backends.
    #[must_use]
    pub fn data_path(&self) -> Option<&Path> {
        match self {
            StorageBackend::Jsonl(path) => Some(path),
            StorageBackend::InMemory => None,
        }
    }
}

/// Wrapper that adds JSONL file persistence to the in-memory backend.
///
/// Holds the file path and implements `save()` by writing all issues to the
/// JSONL file atomically, and `reload()` by rebuilding the inner store from
/// the file.
struct JsonlBackedStore {
    inner: Box<dyn IssueStore>,
    path: PathBuf,
    prefix: String,
}

#[async_trait]
impl IssueStore for JsonlBackedStore {
    async fn create(&mut self, record: NewIssue) -> Result<Issue> {
        self.inner.create(record).await
    }

    async fn get(&self, id: IssueId) -> Result<Option<Issue>> {
        self.inner.get(id).await
    }

    async fn find_by_tracking_id(&self, code: &str) -> Result<Option<Issue>> {
        self.inner.find_by_tracking_id(code).await
    }

    async fn list(&self) -> Result<Vec<Issue>> {
        self.inner.list().await
    }

    async fn set_status(&mut self, id: IssueId, status: Status) -> Result<Issue> {
        self.inner.set_status(id, status).await
    }

    async fn increment_upvotes(&mut self, id: IssueId) -> Result<u32> {
        self.inner.increment_upvotes(id).await
    }

    async fn delete(&mut self, id: IssueId) -> Result<()> {
        self.inner.delete(id).await
    }

    async fn import_issues(&mut self, issues: Vec<Issue>) -> Result<()> {
        self.inner.import_issues(issues).await
    }

    async fn export_all(&self) -> Result<Vec<Issue>> {
        self.inner.export_all().await
    }

    async fn save(&self) -> Result<()> {
        in_memory::save_to_jsonl(self.inner.as_ref(), &self.path).await
    }

    async fn reload(&mut self) -> Result<()> {
        if self.path.exists() {
            let (store, warnings) = in_memory::load_from_jsonl(&self.path, &self.prefix).await?;
            for warning in &warnings {
                tracing::warn!(warning = ?warning, "JSONL reload warning");
            }
            self.inner = store;
        } else {
            self.inner = in_memory::new_in_memory_store(&self.prefix);
        }
        Ok(())
    }
}

/// Create a storage instance for the given backend.
///
/// # Arguments
///
/// * `backend` - The storage backend to use
/// * `prefix` - The tracking-id prefix (e.g., "CIV")
///
/// # Errors
///
/// - `Error::Io` if file operations fail (JSONL backend)
/// - `Error::Storage` for backend-specific initialization errors
pub async fn create_store(backend: StorageBackend, prefix: &str) -> Result<Box<dyn IssueStore>> {
    match backend {
        StorageBackend::InMemory => Ok(in_memory::new_in_memory_store(prefix)),
        StorageBackend::Jsonl(path) => {
            let inner = if path.exists() {
                let (store, warnings) = in_memory::load_from_jsonl(&path, prefix).await?;
                for warning in &warnings {
                    tracing::warn!(warning = ?warning, "JSONL load warning");
                }
                store
            } else {
                in_memory::new_in_memory_store(prefix)
            };
            Ok(Box::new(JsonlBackedStore {
                inner,
                path,
                prefix: prefix.to_string(),
            }))
        }
    }
}
