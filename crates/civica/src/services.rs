//! External collaborator interfaces: blob storage and reverse geocoding.
//!
//! Both are consumed as opaque request/response calls. The blob store is
//! where photo and video attachments live; the store only ever sees the
//! reference strings it returns. Geocoding is cosmetic: failures degrade to
//! a coordinate string and never surface to the submitter.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::path::PathBuf;

use crate::error::{Error, Result};

/// External object storage for media attachments.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Upload a blob and return its public reference string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Upload`] on any storage failure. The caller aborts
    /// the whole submission on the first failed upload.
    async fn upload(&self, bytes: &[u8], suggested_name: &str) -> Result<String>;
}

/// External reverse-geocoding service.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve coordinates to a human-readable address.
    ///
    /// Returns `Ok(None)` when the service has no answer. Callers fall back
    /// to [`coordinate_fallback`] on `None` or on error; geocoding must
    /// never block a submission.
    async fn reverse(&self, latitude: f64, longitude: f64) -> Result<Option<String>>;
}

/// The address string used whenever the geocoder errors or has no result.
#[must_use]
pub fn coordinate_fallback(latitude: f64, longitude: f64) -> String {
    format!("{latitude:.6}, {longitude:.6}")
}

/// Blob store writing into a local media directory.
///
/// Stand-in for a hosted bucket: blobs land under the repository's media
/// directory with `{timestamp}-{content-hash}.{ext}` names and the stored
/// path is returned as the reference string.
#[derive(Debug, Clone)]
pub struct LocalMediaStore {
    root: PathBuf,
}

impl LocalMediaStore {
    /// Create a store rooted at the given directory.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn object_name(bytes: &[u8], suggested_name: &str) -> String {
        let extension = suggested_name
            .rsplit('.')
            .next()
            .filter(|ext| !ext.is_empty() && ext.len() < suggested_name.len())
            .unwrap_or("bin")
            .to_ascii_lowercase();

        let digest = Sha256::digest(bytes);
        let hash: String = digest.iter().take(4).map(|b| format!("{b:02x}")).collect();

        let timestamp = chrono::Utc::now().timestamp_millis();
        format!("{timestamp}-{hash}.{extension}")
    }
}

#[async_trait]
impl BlobStore for LocalMediaStore {
    async fn upload(&self, bytes: &[u8], suggested_name: &str) -> Result<String> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| Error::Upload(format!("media directory unavailable: {e}")))?;

        let name = Self::object_name(bytes, suggested_name);
        let path = self.root.join(&name);

        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| Error::Upload(format!("write failed for {name}: {e}")))?;

        Ok(path.to_string_lossy().into_owned())
    }
}

/// Geocoder with no upstream service.
///
/// Always answers `None`, so every address derivation takes the coordinate
/// fallback path.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineGeocoder;

#[async_trait]
impl Geocoder for OfflineGeocoder {
    async fn reverse(&self, _latitude: f64, _longitude: f64) -> Result<Option<String>> {
        Ok(None)
    }
}

// ========== Test Utilities ==========

/// Blob store test double that records uploads in memory.
///
/// Available when running tests or when the `test-util` feature is enabled,
/// so downstream crates can exercise code that depends on [`BlobStore`]
/// without touching a real bucket.
///
/// Every upload returns a `https://blobs.test/...` reference carrying the
/// suggested name, so extension-based partitioning behaves as in
/// production. A store built with [`RecordingBlobStore::failing`] rejects
/// every upload instead.
#[cfg(any(test, feature = "test-util"))]
#[derive(Debug, Default)]
pub struct RecordingBlobStore {
    uploads: std::sync::Mutex<Vec<String>>,
    fail: bool,
}

#[cfg(any(test, feature = "test-util"))]
impl RecordingBlobStore {
    /// Create a store that accepts every upload.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that rejects every upload.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            uploads: std::sync::Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// The references handed out so far, in upload order.
    #[must_use]
    pub fn uploaded(&self) -> Vec<String> {
        self.uploads.lock().expect("uploads lock poisoned").clone()
    }
}

#[cfg(any(test, feature = "test-util"))]
#[async_trait]
impl BlobStore for RecordingBlobStore {
    async fn upload(&self, _bytes: &[u8], suggested_name: &str) -> Result<String> {
        if self.fail {
            return Err(Error::Upload("blob store unavailable".to_string()));
        }

        let url = format!("https://blobs.test/{suggested_name}");
        self.uploads
            .lock()
            .expect("uploads lock poisoned")
            .push(url.clone());
        Ok(url)
    }
}
