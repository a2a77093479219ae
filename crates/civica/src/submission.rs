//! Submission validation and the intake pipeline.
//!
//! A candidate issue travels: validation (before any upload call) →
//! concurrent media uploads (all-or-nothing) → media partition by extension
//! → address derivation → store create. If any upload fails the whole
//! submission is aborted and no record is created; there are no orphaned
//! issues with missing media.

use futures::future::try_join_all;

use crate::auth::RequestContext;
use crate::domain::{
    Category, Issue, NewIssue, Priority, IMAGE_EXTENSIONS, MAX_MEDIA_BYTES, MAX_MEDIA_ITEMS,
    VIDEO_EXTENSIONS,
};
use crate::error::{Error, Result};
use crate::services::{coordinate_fallback, BlobStore, Geocoder};
use crate::storage::IssueStore;

/// A candidate issue as supplied by a client, before validation.
#[derive(Debug, Clone, Default)]
pub struct IssueDraft {
    /// Issue title.
    pub title: String,

    /// Detailed description.
    pub description: String,

    /// Category literal; must name one of the fixed set.
    pub category: String,

    /// Priority; defaults to Medium when unset.
    pub priority: Option<Priority>,

    /// Free-text location description.
    pub location: String,

    /// Human-readable address, if the client already has one.
    pub address: Option<String>,

    /// Latitude of the reported location.
    pub latitude: Option<f64>,

    /// Longitude of the reported location.
    pub longitude: Option<f64>,
}

/// A media file attached to a submission, not yet uploaded.
#[derive(Debug, Clone)]
pub struct MediaUpload {
    /// Original file name; its extension determines the media type.
    pub file_name: String,

    /// Raw file contents.
    pub bytes: Vec<u8>,
}

/// Media type inferred from a file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// A photo attachment.
    Image,

    /// A video attachment.
    Video,
}

/// Infer the media type of a file name or URL, case-insensitively.
///
/// Returns `None` for anything that is neither a recognized image nor video
/// extension.
#[must_use]
pub fn media_kind(name: &str) -> Option<MediaKind> {
    let extension = name.rsplit('.').next()?.to_ascii_lowercase();

    if IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        Some(MediaKind::Image)
    } else if VIDEO_EXTENSIONS.contains(&extension.as_str()) {
        Some(MediaKind::Video)
    } else {
        None
    }
}

/// Validate a candidate submission against the admission rules.
///
/// Runs entirely before any upload call. Returns the parsed category on
/// success; the draft is otherwise untouched.
///
/// # Errors
///
/// Returns [`Error::Validation`] if the title or description is empty, the
/// category is not in the fixed set, more than [`MAX_MEDIA_ITEMS`] media
/// files are attached, any file exceeds [`MAX_MEDIA_BYTES`], any file is
/// neither image nor video, or only one half of a coordinate pair is given.
pub fn validate(draft: &IssueDraft, media: &[MediaUpload]) -> Result<Category> {
    if draft.title.trim().is_empty() {
        return Err(Error::Validation("title is required".to_string()));
    }

    if draft.description.trim().is_empty() {
        return Err(Error::Validation("description is required".to_string()));
    }

    let category: Category = draft
        .category
        .parse()
        .map_err(Error::Validation)?;

    if draft.latitude.is_some() != draft.longitude.is_some() {
        return Err(Error::Validation(
            "latitude and longitude must be provided together".to_string(),
        ));
    }

    if media.len() > MAX_MEDIA_ITEMS {
        return Err(Error::Validation(format!(
            "at most {MAX_MEDIA_ITEMS} media files are allowed, got {}",
            media.len()
        )));
    }

    for file in media {
        if file.bytes.len() as u64 > MAX_MEDIA_BYTES {
            return Err(Error::Validation(format!(
                "'{}' exceeds the {} MiB media size limit",
                file.file_name,
                MAX_MEDIA_BYTES / (1024 * 1024)
            )));
        }

        if media_kind(&file.file_name).is_none() {
            return Err(Error::Validation(format!(
                "'{}' is neither an image nor a video",
                file.file_name
            )));
        }
    }

    Ok(category)
}

/// Partition uploaded reference strings into image and video lists.
///
/// Matching is by file extension, case-insensitive. A reference with an
/// unrecognized extension is dropped from both lists; a warning is logged
/// since the attachment silently disappears from the record.
#[must_use]
pub fn partition_media(urls: Vec<String>) -> (Vec<String>, Vec<String>) {
    let mut image_urls = Vec::new();
    let mut video_urls = Vec::new();

    for url in urls {
        match media_kind(&url) {
            Some(MediaKind::Image) => image_urls.push(url),
            Some(MediaKind::Video) => video_urls.push(url),
            None => {
                tracing::warn!(url, "uploaded reference has unrecognized extension, dropped");
            }
        }
    }

    (image_urls, video_urls)
}

/// Run the full intake pipeline for one submission.
///
/// Media uploads proceed concurrently, one task per file; the first failure
/// aborts the submission before any record is created. Address derivation
/// never fails: geocoder errors and empty answers degrade to the coordinate
/// fallback string.
///
/// # Errors
///
/// - [`Error::Validation`] from the admission rules (before any upload)
/// - [`Error::Upload`] if any media upload fails
/// - [`Error::Storage`] if the store cannot admit the record
pub async fn submit(
    store: &mut dyn IssueStore,
    blobs: &dyn BlobStore,
    geocoder: &dyn Geocoder,
    ctx: &RequestContext,
    draft: IssueDraft,
    media: Vec<MediaUpload>,
) -> Result<Issue> {
    let category = validate(&draft, &media)?;
    let priority = draft.priority.unwrap_or_default();

    let uploads = media
        .iter()
        .map(|file| blobs.upload(&file.bytes, &file.file_name));
    let urls = try_join_all(uploads).await?;

    let (image_urls, video_urls) = partition_media(urls);

    let address = match (draft.address, draft.latitude, draft.longitude) {
        (Some(address), _, _) => Some(address),
        (None, Some(lat), Some(lon)) => Some(resolve_address(geocoder, lat, lon).await),
        _ => None,
    };

    let record = NewIssue {
        title: draft.title.trim().to_string(),
        description: draft.description.trim().to_string(),
        category,
        priority,
        location: draft.location,
        address,
        latitude: draft.latitude,
        longitude: draft.longitude,
        image_urls,
        video_urls,
        user_id: ctx.user_id(),
    };

    store.create(record).await
}

async fn resolve_address(geocoder: &dyn Geocoder, lat: f64, lon: f64) -> String {
    match geocoder.reverse(lat, lon).await {
        Ok(Some(address)) => address,
        Ok(None) => coordinate_fallback(lat, lon),
        Err(e) => {
            tracing::debug!(error = %e, "reverse geocoding failed, using coordinate fallback");
            coordinate_fallback(lat, lon)
        }
    }
}
