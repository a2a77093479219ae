//! Domain types for civic-issue reporting.
//!
//! This module contains the core domain types for the civica issue backend.
//! The serialized field names and enumerated value literals of [`Issue`] are
//! the wire contract presented to UI and API clients and must not change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum number of media items (images plus videos) per issue.
pub const MAX_MEDIA_ITEMS: usize = 5;

/// Maximum size of a single media item in bytes (10 MiB).
pub const MAX_MEDIA_BYTES: u64 = 10 * 1024 * 1024;

/// Recognized image file extensions (lowercase).
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Recognized video file extensions (lowercase).
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "ogg", "mov"];

/// Unique numeric identifier for an issue.
///
/// Assigned monotonically by the store at creation and immutable thereafter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct IssueId(pub u64);

impl IssueId {
    /// Create a new issue ID from a raw value.
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw numeric value.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for IssueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for IssueId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Human-presentable tracking code, distinct from the numeric id.
///
/// Assigned at creation, unique across all issues ever created, and used for
/// external lookup (shared with the reporter as a receipt).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackingId(pub String);

impl TrackingId {
    /// Create a tracking ID from an existing code.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Represents a reported civic issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// Unique identifier, assigned by the store.
    pub id: IssueId,

    /// Externally shareable tracking code.
    pub tracking_id: TrackingId,

    /// Issue title.
    pub title: String,

    /// Detailed description.
    pub description: String,

    /// Issue category.
    pub category: Category,

    /// Priority level.
    pub priority: Priority,

    /// Current lifecycle status. Mutated only through lifecycle transitions.
    pub status: Status,

    /// Free-text location description (e.g., "Near City Hall").
    pub location: String,

    /// Human-readable address, derived from coordinates when available.
    pub address: Option<String>,

    /// Latitude of the reported location.
    pub latitude: Option<f64>,

    /// Longitude of the reported location.
    pub longitude: Option<f64>,

    /// References to externally stored photos.
    #[serde(default)]
    pub image_urls: Vec<String>,

    /// References to externally stored videos.
    #[serde(default)]
    pub video_urls: Vec<String>,

    /// Popularity counter. Only ever incremented.
    pub upvotes: u32,

    /// Submitting identity, absent for anonymous submissions.
    pub user_id: Option<String>,

    /// Creation timestamp. Immutable.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp. Refreshed on every successful transition.
    pub updated_at: DateTime<Utc>,
}

impl Issue {
    /// Whether this issue carries a coordinate pair.
    ///
    /// Coordinate presence is independent of address presence: an issue may
    /// have only a free-text location.
    #[must_use]
    pub fn has_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}

/// Fixed category set for civic issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Roads, traffic, and transportation infrastructure.
    #[serde(rename = "Road & Transportation")]
    RoadTransportation,

    /// Water supply and sanitation.
    #[serde(rename = "Water & Sanitation")]
    WaterSanitation,

    /// Public safety hazards.
    #[serde(rename = "Public Safety")]
    PublicSafety,

    /// Parks and recreational facilities.
    #[serde(rename = "Parks & Recreation")]
    ParksRecreation,

    /// Power, gas, and other utilities.
    #[serde(rename = "Utilities")]
    Utilities,

    /// Garbage collection and disposal.
    #[serde(rename = "Waste Management")]
    WasteManagement,

    /// Street lighting faults.
    #[serde(rename = "Street Lighting")]
    StreetLighting,

    /// Public building maintenance.
    #[serde(rename = "Public Buildings")]
    PublicBuildings,

    /// Anything that fits no other category.
    #[serde(rename = "Other")]
    Other,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 9] = [
        Category::RoadTransportation,
        Category::WaterSanitation,
        Category::PublicSafety,
        Category::ParksRecreation,
        Category::Utilities,
        Category::WasteManagement,
        Category::StreetLighting,
        Category::PublicBuildings,
        Category::Other,
    ];

    /// The canonical wire literal for this category.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::RoadTransportation => "Road & Transportation",
            Category::WaterSanitation => "Water & Sanitation",
            Category::PublicSafety => "Public Safety",
            Category::ParksRecreation => "Parks & Recreation",
            Category::Utilities => "Utilities",
            Category::WasteManagement => "Waste Management",
            Category::StreetLighting => "Street Lighting",
            Category::PublicBuildings => "Public Buildings",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .find(|c| c.as_str() == s)
            .copied()
            .ok_or_else(|| format!("unknown category: '{s}'"))
    }
}

/// Priority level of an issue.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Priority {
    /// Cosmetic or low-impact.
    Low,

    /// Routine impact. The default when unspecified.
    #[default]
    Medium,

    /// Significant disruption.
    High,

    /// Safety hazard requiring immediate attention.
    Critical,
}

impl Priority {
    /// All priorities, lowest first.
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Critical,
    ];

    /// The canonical wire literal for this priority.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Critical => "Critical",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Priority::ALL
            .iter()
            .find(|p| p.as_str() == s)
            .copied()
            .ok_or_else(|| format!("unknown priority: '{s}'"))
    }
}

/// Lifecycle status of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Submitted, awaiting triage. The initial status of every issue.
    Pending,

    /// Acknowledged and being worked on.
    #[serde(rename = "In Progress")]
    InProgress,

    /// Fixed or otherwise addressed.
    Resolved,

    /// Triaged and declined.
    Rejected,
}

impl Status {
    /// All statuses in lifecycle order.
    pub const ALL: [Status; 4] = [
        Status::Pending,
        Status::InProgress,
        Status::Resolved,
        Status::Rejected,
    ];

    /// The canonical wire literal for this status.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pending => "Pending",
            Status::InProgress => "In Progress",
            Status::Resolved => "Resolved",
            Status::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .iter()
            .find(|v| v.as_str() == s)
            .copied()
            .ok_or_else(|| format!("unknown status: '{s}'"))
    }
}

/// Normalized data for creating a new issue.
///
/// Produced by the submission validator; the store assigns `id`,
/// `tracking_id`, and timestamps on create. Status and upvotes are fixed at
/// their initial values by construction.
#[derive(Debug, Clone)]
pub struct NewIssue {
    /// Issue title (non-empty).
    pub title: String,

    /// Detailed description (non-empty).
    pub description: String,

    /// Issue category.
    pub category: Category,

    /// Priority level (defaulted to Medium by the validator if unset).
    pub priority: Priority,

    /// Free-text location description.
    pub location: String,

    /// Human-readable address, if known.
    pub address: Option<String>,

    /// Latitude of the reported location.
    pub latitude: Option<f64>,

    /// Longitude of the reported location.
    pub longitude: Option<f64>,

    /// References to uploaded photos.
    pub image_urls: Vec<String>,

    /// References to uploaded videos.
    pub video_urls: Vec<String>,

    /// Submitting identity, absent for anonymous submissions.
    pub user_id: Option<String>,
}

/// Filter for deriving a view over the issue snapshot.
///
/// Absent fields mean no filtering on that dimension. Active dimensions
/// combine conjunctively.
#[derive(Debug, Clone, Default)]
pub struct IssueFilter {
    /// Case-insensitive substring matched against title, description, and
    /// tracking id. An issue matches if any of the three contains the term.
    pub search: Option<String>,

    /// Exact-match category filter.
    pub category: Option<Category>,

    /// Exact-match status filter.
    pub status: Option<Status>,

    /// Exact-match priority filter.
    pub priority: Option<Priority>,
}

impl IssueFilter {
    /// Whether this filter constrains anything at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.search.is_none()
            && self.category.is_none()
            && self.status.is_none()
            && self.priority.is_none()
    }
}

/// Aggregate statistics over an issue snapshot.
///
/// Status counts and the priority count are independent dimensions; only
/// `total` is guaranteed to equal the snapshot length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Number of issues in the snapshot.
    pub total: usize,

    /// Issues with status Pending.
    pub pending: usize,

    /// Issues with status In Progress.
    #[serde(rename = "inProgress")]
    pub in_progress: usize,

    /// Issues with status Resolved.
    pub resolved: usize,

    /// Issues with priority Critical, regardless of status.
    pub critical: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_to_wire_literals() {
        assert_eq!(
            serde_json::to_string(&Status::InProgress).unwrap(),
            "\"In Progress\""
        );
        assert_eq!(serde_json::to_string(&Status::Pending).unwrap(), "\"Pending\"");
    }

    #[test]
    fn category_serializes_to_wire_literals() {
        assert_eq!(
            serde_json::to_string(&Category::RoadTransportation).unwrap(),
            "\"Road & Transportation\""
        );
        assert_eq!(
            serde_json::to_string(&Category::WasteManagement).unwrap(),
            "\"Waste Management\""
        );
    }

    #[test]
    fn category_round_trips_through_from_str() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn status_round_trips_through_serde() {
        for status in Status::ALL {
            let json = serde_json::to_string(&status).unwrap();
            let back: Status = serde_json::from_str(&json).unwrap();
            assert_eq!(back, status);
        }
    }

    #[test]
    fn priority_defaults_to_medium() {
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn unknown_category_is_rejected() {
        assert!("Potholes".parse::<Category>().is_err());
    }

    #[test]
    fn issue_with_one_coordinate_is_not_located() {
        let mut issue = test_issue();
        issue.latitude = Some(22.3511);
        issue.longitude = None;
        assert!(!issue.has_coordinates());
        issue.longitude = Some(73.3717);
        assert!(issue.has_coordinates());
    }

    #[test]
    fn issue_wire_shape_matches_the_contract() {
        let value = serde_json::to_value(test_issue()).unwrap();
        let object = value.as_object().unwrap();

        for field in [
            "id",
            "tracking_id",
            "title",
            "description",
            "category",
            "priority",
            "status",
            "location",
            "address",
            "latitude",
            "longitude",
            "image_urls",
            "video_urls",
            "upvotes",
            "user_id",
            "created_at",
            "updated_at",
        ] {
            assert!(object.contains_key(field), "missing wire field: {field}");
        }
    }

    #[test]
    fn dashboard_stats_uses_camel_case_for_in_progress() {
        let stats = DashboardStats {
            total: 3,
            pending: 1,
            in_progress: 2,
            resolved: 0,
            critical: 0,
        };
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"inProgress\":2"));
    }

    fn test_issue() -> Issue {
        let now = Utc::now();
        Issue {
            id: IssueId::new(1),
            tracking_id: TrackingId::new("CIV-TEST01"),
            title: "Test".to_string(),
            description: "Test".to_string(),
            category: Category::Other,
            priority: Priority::Medium,
            status: Status::Pending,
            location: String::new(),
            address: None,
            latitude: None,
            longitude: None,
            image_urls: vec![],
            video_urls: vec![],
            upvotes: 0,
            user_id: None,
            created_at: now,
            updated_at: now,
        }
    }
}
