//! Hash-based tracking-id assignment.
//!
//! Tracking ids are the human-presentable receipt handed back to a reporter,
//! distinct from the internal numeric id. Codes take the form
//! `{prefix}-{6 uppercase base36 chars}` (e.g., `CIV-A3F8K2`) and are derived
//! from a SHA-256 hash of the submission content, the current timestamp, and
//! a retry nonce. A collision with any previously issued code triggers a
//! retry with the next nonce; the retry budget is small and exhausting it is
//! a storage failure rather than a loop.

use chrono::Utc;
use sha2::{Digest, Sha256};
use std::collections::HashSet;

use crate::error::{Error, Result};

const BASE36_CHARS: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Number of base36 characters in a tracking code suffix.
pub const CODE_LENGTH: usize = 6;

/// Nonce retry budget before code assignment fails.
pub const MAX_NONCE: u32 = 16;

/// Default tracking-id prefix.
pub const DEFAULT_PREFIX: &str = "CIV";

/// Tracking-code generator with collision detection.
///
/// Holds the set of every code it has issued or been told about; callers
/// loading persisted issues must register their codes before generating new
/// ones so uniqueness holds across the full history.
#[derive(Debug)]
pub struct TrackingIdGenerator {
    prefix: String,
    issued: HashSet<String>,
}

impl TrackingIdGenerator {
    /// Create a generator for the given prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            issued: HashSet::new(),
        }
    }

    /// Register an existing code so it can never be issued again.
    pub fn register(&mut self, code: impl Into<String>) {
        self.issued.insert(code.into());
    }

    /// Number of codes known to this generator.
    #[must_use]
    pub fn issued_count(&self) -> usize {
        self.issued.len()
    }

    /// Generate a new unique tracking code.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the nonce budget is exhausted without
    /// finding an unused code.
    pub fn generate(&mut self, title: &str, description: &str) -> Result<String> {
        let timestamp = Utc::now().timestamp_nanos_opt().unwrap_or_default();

        for nonce in 0..MAX_NONCE {
            let code = self.hash_code(title, description, timestamp, nonce);

            if !self.issued.contains(&code) {
                if nonce > 0 {
                    tracing::debug!(nonce, code, "tracking code assigned after collision retries");
                }
                self.issued.insert(code.clone());
                return Ok(code);
            }
        }

        Err(Error::Storage(format!(
            "tracking id budget exhausted after {MAX_NONCE} attempts"
        )))
    }

    fn hash_code(&self, title: &str, description: &str, timestamp: i64, nonce: u32) -> String {
        let mut hasher = Sha256::new();
        hasher.update(title.as_bytes());
        hasher.update(b"|");
        hasher.update(description.as_bytes());
        hasher.update(b"|");
        hasher.update(timestamp.to_le_bytes());
        hasher.update(b"|");
        hasher.update(nonce.to_le_bytes());
        let digest = hasher.finalize();

        let suffix: String = digest
            .iter()
            .take(CODE_LENGTH)
            .map(|byte| BASE36_CHARS[usize::from(*byte) % BASE36_CHARS.len()] as char)
            .collect();

        format!("{}-{}", self.prefix, suffix)
    }
}

/// Check that a code matches the `{prefix}-{base36}` shape.
#[must_use]
pub fn is_valid_code(code: &str, prefix: &str) -> bool {
    let Some(suffix) = code
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
    else {
        return false;
    };

    suffix.len() == CODE_LENGTH
        && suffix
            .bytes()
            .all(|b| b.is_ascii_digit() || b.is_ascii_uppercase())
}
