//! CLI argument parsing and command dispatch.
//!
//! This module provides the command-line interface for civica using clap's
//! derive API. Each command has its own argument struct with validation and
//! helpful error messages.
//!
//! # Commands
//!
//! - `init`: Initialize a new civica repository
//! - `report`: Submit a new issue
//! - `list`: List issues with optional filters
//! - `show`: Show issue details by id or tracking id
//! - `transition`: Change an issue's status (admin)
//! - `upvote`: Upvote an issue
//! - `delete`: Delete an issue permanently (admin)
//! - `stats`: Show dashboard statistics
//! - `grant-admin`: Bind the admin role to an email
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//!
//! # Example
//!
//! ```bash
//! civica report --title "Pothole" -D "Large pothole" -c "Road & Transportation"
//! civica list --status pending --priority critical
//! civica transition 7 resolved --as clerk@city.gov
//! ```

mod args;
mod execute;
mod types;
mod validators;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub use args::{
    DeleteArgs, GrantAdminArgs, InitArgs, ListArgs, ReportArgs, ShowArgs, StatsArgs,
    TransitionArgs, UpvoteArgs,
};
pub use types::{PriorityArg, StatusArg};
pub use validators::{parse_category, validate_description, validate_email, validate_title};

/// Civica - civic-issue reporting and triage
///
/// Residents report issues with location and media; administrators triage
/// them through status transitions. Issues are stored in
/// `.civica/issues.jsonl`.
#[derive(Parser, Debug)]
#[command(name = "civica")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Initialize a new civica repository
    ///
    /// Creates the `.civica/` directory with configuration, an empty issue
    /// database, and a media directory. Run this once in your project root.
    Init(InitArgs),

    /// Submit a new issue
    ///
    /// Validates the submission, uploads any attached media, and admits the
    /// issue with status Pending. Prints the tracking id on success.
    Report(ReportArgs),

    /// List issues with optional filters
    ///
    /// Shows issues newest first. Filters combine conjunctively; the search
    /// term matches title, description, and tracking id.
    List(ListArgs),

    /// Show detailed information about an issue
    ///
    /// Accepts either the numeric id or the tracking id.
    Show(ShowArgs),

    /// Change an issue's status
    ///
    /// Requires the admin role. Any target status is legal, including the
    /// current one.
    Transition(TransitionArgs),

    /// Upvote an issue
    ///
    /// Open to anyone, any number of times.
    Upvote(UpvoteArgs),

    /// Delete an issue permanently
    ///
    /// Requires the admin role. Irreversible.
    Delete(DeleteArgs),

    /// Show dashboard statistics
    ///
    /// Total, per-status, and critical counts over the full issue set.
    Stats(StatsArgs),

    /// Bind the admin role to an email
    ///
    /// Idempotent; granting to an existing admin is a no-op.
    GrantAdmin(GrantAdminArgs),
}

impl Cli {
    /// Parse command-line arguments.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Execute the parsed command.
    ///
    /// # Errors
    ///
    /// Propagates command failures after printing user-facing diagnostics.
    pub async fn execute(self) -> Result<()> {
        execute::run(self).await
    }
}
