//! In-memory storage backend with optional JSONL persistence.
//!
//! All data is held in RAM and lost when the process exits unless the
//! JSONL helpers are used. The implementation uses:
//!
//! - `HashMap<IssueId, Issue>` for O(1) issue lookups
//! - a monotonic `u64` counter for id assignment
//! - a [`TrackingIdGenerator`](crate::tracking::TrackingIdGenerator) for
//!   collision-free tracking codes
//!
//! # Thread Safety
//!
//! The store is an `Arc<tokio::sync::Mutex<StoreInner>>`. Every operation
//! acquires the lock, which gives the per-record guarantees the store
//! promises for free: updates to one issue are serialized, and upvote
//! increments are read-modify-write under the lock, so concurrent
//! increments never lose an update.
//!
//! # Performance Characteristics
//!
//! - Create / get / status / upvote: O(1)
//! - List: O(n log n) for the newest-first sort
//!
//! Derived statistics are recomputed from the full snapshot on demand (see
//! [`crate::query`]); nothing here maintains incremental counters.

mod inner;
mod jsonl;
mod trait_impl;

use crate::storage::IssueStore;
use inner::StoreInner;
use std::sync::Arc;
use tokio::sync::Mutex;

pub use jsonl::{load_from_jsonl, save_to_jsonl, LoadWarning};

/// Thread-safe in-memory issue store.
///
/// Cloning yields another handle to the same underlying store, which is how
/// concurrent callers (e.g. simultaneous upvoters) share it.
#[derive(Clone)]
pub struct InMemoryStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl InMemoryStore {
    /// Create a new empty store with the given tracking-id prefix.
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self {
            inner: Arc::new(Mutex::new(StoreInner::new(prefix))),
        }
    }

    pub(super) fn state(&self) -> &Mutex<StoreInner> {
        &self.inner
    }
}

/// Create a new in-memory store as a trait object.
///
/// # Arguments
///
/// * `prefix` - The tracking-id prefix (e.g., "CIV")
pub fn new_in_memory_store(prefix: &str) -> Box<dyn IssueStore> {
    Box::new(InMemoryStore::new(prefix))
}
