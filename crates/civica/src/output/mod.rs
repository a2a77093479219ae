//! CLI output rendering.
//!
//! Human-readable rendering lives here; every command also has a `--json`
//! path that serializes the domain types directly, which is the stable
//! contract. The human format makes no such promise.

pub mod color;

use crate::domain::{DashboardStats, Issue};

/// Output configuration for rendering.
#[derive(Debug, Clone, Copy)]
pub struct OutputConfig {
    /// Emit JSON instead of human-readable text.
    pub json: bool,

    /// Apply ANSI colors to human-readable text.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Configuration for the given `--json` flag; colors are disabled for
    /// JSON output.
    #[must_use]
    pub fn new(json: bool) -> Self {
        Self {
            json,
            use_colors: !json,
        }
    }
}

/// Render one issue as a single list line.
#[must_use]
pub fn issue_line(issue: &Issue, config: &OutputConfig) -> String {
    let upvotes = if issue.upvotes > 0 {
        format!("  +{}", issue.upvotes)
    } else {
        String::new()
    };

    format!(
        "{:>5}  {}  {:<11} {:<8}  {}  [{}]{}",
        issue.id,
        color::colorize_tracking_id(issue.tracking_id.as_str(), config),
        color::colorize_status(issue.status, config),
        color::colorize_priority(issue.priority, config),
        issue.title,
        issue.category,
        upvotes,
    )
}

/// Render the full detail view of an issue.
#[must_use]
pub fn issue_detail(issue: &Issue, config: &OutputConfig) -> String {
    let mut lines = vec![
        format!(
            "{} {}",
            color::colorize_tracking_id(issue.tracking_id.as_str(), config),
            issue.title
        ),
        format!("  id:        {}", issue.id),
        format!("  status:    {}", color::colorize_status(issue.status, config)),
        format!(
            "  priority:  {}",
            color::colorize_priority(issue.priority, config)
        ),
        format!("  category:  {}", issue.category),
        format!("  upvotes:   {}", issue.upvotes),
    ];

    if !issue.location.is_empty() {
        lines.push(format!("  location:  {}", issue.location));
    }
    if let Some(address) = &issue.address {
        lines.push(format!("  address:   {address}"));
    }
    if let (Some(lat), Some(lon)) = (issue.latitude, issue.longitude) {
        lines.push(format!("  position:  {lat:.6}, {lon:.6}"));
    }
    if !issue.image_urls.is_empty() {
        lines.push(format!("  images:    {}", issue.image_urls.join(", ")));
    }
    if !issue.video_urls.is_empty() {
        lines.push(format!("  videos:    {}", issue.video_urls.join(", ")));
    }
    if let Some(user_id) = &issue.user_id {
        lines.push(format!("  reporter:  {user_id}"));
    }

    lines.push(format!("  created:   {}", issue.created_at.to_rfc3339()));
    lines.push(format!("  updated:   {}", issue.updated_at.to_rfc3339()));
    lines.push(String::new());
    lines.push(format!("  {}", issue.description));

    lines.join("\n")
}

/// Render dashboard statistics.
#[must_use]
pub fn stats_block(stats: &DashboardStats) -> String {
    [
        format!("total:        {}", stats.total),
        format!("pending:      {}", stats.pending),
        format!("in progress:  {}", stats.in_progress),
        format!("resolved:     {}", stats.resolved),
        format!("critical:     {}", stats.critical),
    ]
    .join("\n")
}

/// Render a map pin line for an issue with coordinates.
///
/// Returns `None` when the issue has no coordinate pair.
#[must_use]
pub fn pin_line(issue: &Issue) -> Option<String> {
    match (issue.latitude, issue.longitude) {
        (Some(lat), Some(lon)) => Some(format!("{lat:.6} {lon:.6}  {}", issue.title)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, IssueId, Priority, Status, TrackingId};
    use chrono::Utc;

    fn issue() -> Issue {
        let now = Utc::now();
        Issue {
            id: IssueId::new(7),
            tracking_id: TrackingId::new("CIV-A3F8K2"),
            title: "Pothole".to_string(),
            description: "Large pothole".to_string(),
            category: Category::RoadTransportation,
            priority: Priority::High,
            status: Status::Pending,
            location: "Main Street".to_string(),
            address: None,
            latitude: Some(22.3511),
            longitude: Some(73.3717),
            image_urls: vec![],
            video_urls: vec![],
            upvotes: 3,
            user_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn issue_line_carries_the_key_fields() {
        let config = OutputConfig::new(true);
        let line = issue_line(&issue(), &config);

        assert!(line.contains("CIV-A3F8K2"));
        assert!(line.contains("Pothole"));
        assert!(line.contains("+3"));
    }

    #[test]
    fn pin_line_requires_coordinates() {
        let mut located = issue();
        assert_eq!(
            pin_line(&located).unwrap(),
            "22.351100 73.371700  Pothole"
        );

        located.longitude = None;
        assert!(pin_line(&located).is_none());
    }

    #[test]
    fn detail_omits_absent_fields() {
        let config = OutputConfig::new(true);
        let detail = issue_detail(&issue(), &config);

        assert!(detail.contains("location:  Main Street"));
        assert!(!detail.contains("address:"));
        assert!(!detail.contains("images:"));
    }
}
