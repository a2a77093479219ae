//! Error types for civica operations.

use std::io;
use thiserror::Error;

/// The error type for civica operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A submission failed validation; no record was created.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The invoking identity lacks the required role; nothing was modified.
    #[error("Authorization error: {0}")]
    Authorization(String),

    /// Operation referenced an issue that does not exist.
    #[error("Issue not found: {0}")]
    IssueNotFound(String),

    /// The external blob store rejected an upload; the submission was aborted.
    #[error("Upload error: {0}")]
    Upload(String),

    /// Persistence failure, fatal for the current operation only.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization or parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Construct an [`Error::IssueNotFound`] from any issue reference.
    pub fn not_found(reference: impl ToString) -> Self {
        Error::IssueNotFound(reference.to_string())
    }
}

/// A specialized Result type for civica operations.
pub type Result<T> = std::result::Result<T, Error>;
