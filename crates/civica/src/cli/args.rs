//! CLI argument structs for all commands.
//!
//! Each command has its own argument struct with clap derive attributes for
//! parsing and validation.

use clap::Parser;
use std::path::PathBuf;

use super::types::{PriorityArg, StatusArg};
use super::validators::{parse_category, validate_description, validate_email, validate_title};
use crate::domain::{Category, IssueId};

/// Arguments for the `init` command.
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Tracking-id prefix (e.g., "CIV" for "CIV-A3F8K2")
    ///
    /// Must be 2-10 alphanumeric characters; it is uppercased.
    #[arg(short, long)]
    pub prefix: Option<String>,

    /// Suppress output messages
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the `report` command.
#[derive(Parser, Debug, Clone)]
pub struct ReportArgs {
    /// Issue title
    #[arg(long, value_parser = validate_title)]
    pub title: String,

    /// Detailed description
    #[arg(short = 'D', long, value_parser = validate_description)]
    pub description: String,

    /// Issue category (exact name, e.g. "Road & Transportation")
    #[arg(short, long, value_parser = parse_category)]
    pub category: Category,

    /// Priority level
    #[arg(short, long, value_enum)]
    pub priority: Option<PriorityArg>,

    /// Free-text location description (e.g., "Near City Hall")
    #[arg(short, long, default_value = "")]
    pub location: String,

    /// Latitude of the reported location
    #[arg(long, requires = "longitude")]
    pub latitude: Option<f64>,

    /// Longitude of the reported location
    #[arg(long, requires = "latitude")]
    pub longitude: Option<f64>,

    /// Media files to attach (max 5, 10 MiB each, images or videos)
    #[arg(short, long)]
    pub media: Vec<PathBuf>,

    /// Acting identity email; omit to submit anonymously
    #[arg(long = "as", value_name = "EMAIL", value_parser = validate_email)]
    pub acting_as: Option<String>,
}

/// Arguments for the `list` command.
#[derive(Parser, Debug, Clone)]
pub struct ListArgs {
    /// Case-insensitive search over title, description, and tracking id
    #[arg(short, long)]
    pub search: Option<String>,

    /// Filter by category (exact name)
    #[arg(short, long, value_parser = parse_category)]
    pub category: Option<Category>,

    /// Filter by status
    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,

    /// Filter by priority
    #[arg(short, long, value_enum)]
    pub priority: Option<PriorityArg>,

    /// Maximum number of issues to display
    #[arg(short = 'n', long, default_value = "50")]
    pub limit: usize,

    /// Emit only issues with coordinates, as "lat lon title" pin lines
    #[arg(long)]
    pub pins: bool,
}

/// Arguments for the `show` command.
#[derive(Parser, Debug, Clone)]
pub struct ShowArgs {
    /// Numeric id or tracking id of the issue
    pub issue: String,
}

/// Arguments for the `transition` command.
#[derive(Parser, Debug, Clone)]
pub struct TransitionArgs {
    /// Numeric id of the issue
    pub id: u64,

    /// Target status
    #[arg(value_enum)]
    pub status: StatusArg,

    /// Acting identity email (must hold the admin role)
    #[arg(long = "as", value_name = "EMAIL", value_parser = validate_email)]
    pub acting_as: String,
}

impl TransitionArgs {
    /// The issue id as a domain value.
    #[must_use]
    pub fn issue_id(&self) -> IssueId {
        IssueId::new(self.id)
    }
}

/// Arguments for the `upvote` command.
#[derive(Parser, Debug, Clone)]
pub struct UpvoteArgs {
    /// Numeric id of the issue
    pub id: u64,
}

/// Arguments for the `delete` command.
#[derive(Parser, Debug, Clone)]
pub struct DeleteArgs {
    /// Numeric id of the issue
    pub id: u64,

    /// Acting identity email (must hold the admin role)
    #[arg(long = "as", value_name = "EMAIL", value_parser = validate_email)]
    pub acting_as: String,
}

/// Arguments for the `stats` command.
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {}

/// Arguments for the `grant-admin` command.
#[derive(Parser, Debug, Clone)]
pub struct GrantAdminArgs {
    /// Email to bind the admin role to
    #[arg(value_parser = validate_email)]
    pub email: String,
}
