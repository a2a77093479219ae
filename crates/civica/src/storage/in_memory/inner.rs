//! Core in-memory storage data structures.
//!
//! This module contains the inner storage structure that holds all data and
//! is wrapped in `Arc<Mutex<>>` for thread safety.

use crate::domain::{Issue, IssueId};
use crate::error::Result;
use crate::tracking::TrackingIdGenerator;
use std::collections::HashMap;

/// Inner storage structure (not thread-safe).
pub(crate) struct StoreInner {
    /// Issues indexed by id for O(1) lookups.
    pub(super) issues: HashMap<IssueId, Issue>,

    /// Next numeric id to assign. Strictly increasing, never reused even
    /// after deletes.
    pub(super) next_id: u64,

    /// Tracking-code generator holding every code ever issued or imported.
    pub(super) tracking: TrackingIdGenerator,
}

impl StoreInner {
    /// Create a new empty storage instance.
    pub(crate) fn new(prefix: &str) -> Self {
        Self {
            issues: HashMap::new(),
            next_id: 1,
            tracking: TrackingIdGenerator::new(prefix),
        }
    }

    /// Assign the next numeric id.
    pub(super) fn allocate_id(&mut self) -> IssueId {
        let id = IssueId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Generate a unique tracking code for a new record.
    pub(super) fn allocate_tracking_code(
        &mut self,
        title: &str,
        description: &str,
    ) -> Result<String> {
        self.tracking.generate(title, description)
    }

    /// Record an imported issue, keeping the id counter and tracking set
    /// consistent with history.
    pub(super) fn register_imported(&mut self, issue: Issue) {
        if issue.id.value() >= self.next_id {
            self.next_id = issue.id.value() + 1;
        }
        self.tracking.register(issue.tracking_id.as_str());
        self.issues.insert(issue.id, issue);
    }
}
