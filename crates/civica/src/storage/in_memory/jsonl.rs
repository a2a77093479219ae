//! JSONL persistence for the in-memory store.
//!
//! Each line of the data file is one serialized [`Issue`]. Loading is
//! resilient: a malformed line or an integrity violation skips that record
//! with a warning instead of failing the whole load.

use super::inner::StoreInner;
use super::InMemoryStore;
use crate::domain::Issue;
use crate::error::{Error, Result};
use crate::storage::IssueStore;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::sync::Mutex;

/// Warnings that can occur during JSONL file loading.
///
/// These are non-fatal: the load continues and the problematic record is
/// skipped. Callers should surface them, since they indicate data-quality
/// problems needing manual attention.
#[derive(Debug, Clone)]
pub enum LoadWarning {
    /// A line that couldn't be parsed as an issue record.
    MalformedLine {
        /// 1-based line number in the file.
        line_number: usize,
        /// Parser error text.
        error: String,
    },

    /// A record whose tracking id was already claimed by an earlier line.
    ///
    /// Tracking ids are unique across all issues ever created; the later
    /// record is dropped to preserve the invariant.
    DuplicateTrackingId {
        /// 1-based line number in the file.
        line_number: usize,
        /// The offending code.
        tracking_id: String,
    },

    /// A record whose numeric id was already claimed by an earlier line.
    DuplicateId {
        /// 1-based line number in the file.
        line_number: usize,
        /// The offending id.
        id: u64,
    },
}

/// Load a store from a JSONL file.
///
/// # Error Handling
///
/// - Malformed lines are skipped with a warning
/// - Duplicate ids / tracking ids are skipped with a warning
/// - An unreadable file is a hard error
///
/// # Returns
///
/// A tuple of `(store, warnings)` where warnings contains all non-fatal
/// problems encountered.
pub async fn load_from_jsonl(
    path: &Path,
    prefix: &str,
) -> Result<(Box<dyn IssueStore>, Vec<LoadWarning>)> {
    let content = tokio::fs::read_to_string(path).await.map_err(Error::Io)?;

    let mut warnings = Vec::new();
    let mut issues: Vec<Issue> = Vec::new();
    let mut seen_ids = HashSet::new();
    let mut seen_codes = HashSet::new();

    for (index, line) in content.lines().enumerate() {
        let line_number = index + 1;
        if line.trim().is_empty() {
            continue;
        }

        let issue: Issue = match serde_json::from_str(line) {
            Ok(issue) => issue,
            Err(e) => {
                warnings.push(LoadWarning::MalformedLine {
                    line_number,
                    error: e.to_string(),
                });
                continue;
            }
        };

        if !seen_ids.insert(issue.id) {
            warnings.push(LoadWarning::DuplicateId {
                line_number,
                id: issue.id.value(),
            });
            continue;
        }

        if !seen_codes.insert(issue.tracking_id.as_str().to_string()) {
            warnings.push(LoadWarning::DuplicateTrackingId {
                line_number,
                tracking_id: issue.tracking_id.as_str().to_string(),
            });
            continue;
        }

        issues.push(issue);
    }

    let mut inner = StoreInner::new(prefix);
    for issue in issues {
        inner.register_imported(issue);
    }

    let store = InMemoryStore {
        inner: Arc::new(Mutex::new(inner)),
    };

    Ok((Box::new(store), warnings))
}

/// Save a store to a JSONL file with atomic writes.
///
/// Uses a write-then-rename pattern, atomic on POSIX systems: if the process
/// is interrupted mid-save the original file remains unchanged. Issues are
/// written in ascending id order for stable diffs.
pub async fn save_to_jsonl(store: &dyn IssueStore, path: &Path) -> Result<()> {
    let temp_path = path.with_extension("tmp");

    let file = File::create(&temp_path).await.map_err(Error::Io)?;
    let mut writer = BufWriter::new(file);

    let mut issues = store.export_all().await?;
    issues.sort_by_key(|issue| issue.id);

    for issue in &issues {
        let json = serde_json::to_string(issue).map_err(Error::Json)?;
        writer.write_all(json.as_bytes()).await.map_err(Error::Io)?;
        writer.write_all(b"\n").await.map_err(Error::Io)?;
    }

    writer.flush().await.map_err(Error::Io)?;

    tokio::fs::rename(&temp_path, path).await.map_err(Error::Io)?;

    Ok(())
}
