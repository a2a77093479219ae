//! Pure derivation of filtered views and dashboard statistics.
//!
//! Everything here is a side-effect-free function over a snapshot of the
//! store's `list()` output. Filtering preserves the snapshot's newest-first
//! order; statistics are recomputed fresh on every call rather than
//! maintained incrementally, which is fine at full-snapshot input sizes.

use crate::domain::{DashboardStats, Issue, IssueFilter, Priority, Status};

/// Derive the subsequence of issues matching the filter.
///
/// Dimensions combine conjunctively; an absent dimension matches
/// everything. The search term is a case-insensitive substring match
/// against title, description, and tracking id (any of the three
/// suffices). Input order is preserved.
#[must_use]
pub fn filter(issues: &[Issue], criteria: &IssueFilter) -> Vec<Issue> {
    let term = criteria
        .search
        .as_deref()
        .map(str::to_lowercase)
        .filter(|t| !t.is_empty());

    issues
        .iter()
        .filter(|issue| {
            if let Some(term) = &term {
                if !matches_term(issue, term) {
                    return false;
                }
            }

            if let Some(category) = criteria.category {
                if issue.category != category {
                    return false;
                }
            }

            if let Some(status) = criteria.status {
                if issue.status != status {
                    return false;
                }
            }

            if let Some(priority) = criteria.priority {
                if issue.priority != priority {
                    return false;
                }
            }

            true
        })
        .cloned()
        .collect()
}

fn matches_term(issue: &Issue, lowercase_term: &str) -> bool {
    issue.title.to_lowercase().contains(lowercase_term)
        || issue.description.to_lowercase().contains(lowercase_term)
        || issue
            .tracking_id
            .as_str()
            .to_lowercase()
            .contains(lowercase_term)
}

/// Compute dashboard statistics over a snapshot.
///
/// `total` always equals the snapshot length. The status counts and the
/// critical count are independent dimensions: they are not expected to sum
/// to `total`.
#[must_use]
pub fn aggregate(issues: &[Issue]) -> DashboardStats {
    DashboardStats {
        total: issues.len(),
        pending: count_status(issues, Status::Pending),
        in_progress: count_status(issues, Status::InProgress),
        resolved: count_status(issues, Status::Resolved),
        critical: issues
            .iter()
            .filter(|issue| issue.priority == Priority::Critical)
            .count(),
    }
}

fn count_status(issues: &[Issue], status: Status) -> usize {
    issues.iter().filter(|issue| issue.status == status).count()
}

/// The map-provider feed: issues carrying a coordinate pair, in input order.
#[must_use]
pub fn with_coordinates(issues: &[Issue]) -> Vec<&Issue> {
    issues.iter().filter(|issue| issue.has_coordinates()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, IssueId, TrackingId};
    use chrono::Utc;
    use proptest::prelude::*;

    fn issue(id: u64, title: &str, status: Status, priority: Priority) -> Issue {
        let now = Utc::now();
        Issue {
            id: IssueId::new(id),
            tracking_id: TrackingId::new(format!("CIV-{id:06}")),
            title: title.to_string(),
            description: format!("{title} description"),
            category: Category::RoadTransportation,
            priority,
            status,
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

    fn snapshot() -> Vec<Issue> {
        vec![
            issue(3, "Streetlight flickering", Status::Pending, Priority::Low),
            issue(2, "Pothole near Main St", Status::InProgress, Priority::Critical),
            issue(1, "Overflowing bins", Status::Resolved, Priority::Medium),
        ]
    }

    #[test]
    fn search_is_case_insensitive_over_description() {
        let issues = snapshot();
        let criteria = IssueFilter {
            search: Some("pothole".to_string()),
            ..IssueFilter::default()
        };

        let matched = filter(&issues, &criteria);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, IssueId::new(2));
    }

    #[test]
    fn search_matches_tracking_id() {
        let issues = snapshot();
        let criteria = IssueFilter {
            search: Some("civ-000003".to_string()),
            ..IssueFilter::default()
        };

        assert_eq!(filter(&issues, &criteria).len(), 1);
    }

    #[test]
    fn dimensions_combine_conjunctively() {
        let issues = snapshot();
        let criteria = IssueFilter {
            search: Some("pothole".to_string()),
            status: Some(Status::Resolved),
            ..IssueFilter::default()
        };

        assert!(filter(&issues, &criteria).is_empty());
    }

    #[test]
    fn empty_filter_preserves_the_snapshot() {
        let issues = snapshot();
        let filtered = filter(&issues, &IssueFilter::default());

        let ids: Vec<_> = filtered.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![IssueId::new(3), IssueId::new(2), IssueId::new(1)]);
    }

    #[test]
    fn aggregate_counts_each_dimension() {
        let stats = aggregate(&snapshot());

        assert_eq!(stats.total, 3);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.in_progress, 1);
        assert_eq!(stats.resolved, 1);
        assert_eq!(stats.critical, 1);
    }

    #[test]
    fn with_coordinates_keeps_only_located_issues() {
        let mut issues = snapshot();
        issues[0].latitude = Some(22.3511);
        issues[0].longitude = Some(73.3717);
        issues[1].latitude = Some(22.0);

        let located = with_coordinates(&issues);
        assert_eq!(located.len(), 1);
        assert_eq!(located[0].id, IssueId::new(3));
    }

    fn arb_status() -> impl Strategy<Value = Status> {
        prop::sample::select(Status::ALL.to_vec())
    }

    fn arb_priority() -> impl Strategy<Value = Priority> {
        prop::sample::select(Priority::ALL.to_vec())
    }

    fn arb_issue() -> impl Strategy<Value = Issue> {
        (1..10_000u64, "[a-zA-Z ]{0,24}", arb_status(), arb_priority())
            .prop_map(|(id, title, status, priority)| issue(id, &title, status, priority))
    }

    fn arb_filter() -> impl Strategy<Value = IssueFilter> {
        (
            prop::option::of("[a-zA-Z]{0,6}"),
            prop::option::of(arb_status()),
            prop::option::of(arb_priority()),
        )
            .prop_map(|(search, status, priority)| IssueFilter {
                search,
                category: None,
                status,
                priority,
            })
    }

    proptest! {
        #[test]
        fn filter_is_idempotent(
            issues in prop::collection::vec(arb_issue(), 0..32),
            criteria in arb_filter(),
        ) {
            let once = filter(&issues, &criteria);
            let twice = filter(&once, &criteria);

            let once_ids: Vec<_> = once.iter().map(|i| i.id).collect();
            let twice_ids: Vec<_> = twice.iter().map(|i| i.id).collect();
            prop_assert_eq!(once_ids, twice_ids);
        }

        #[test]
        fn aggregate_total_matches_length(
            issues in prop::collection::vec(arb_issue(), 0..32),
        ) {
            prop_assert_eq!(aggregate(&issues).total, issues.len());
        }
    }
}
