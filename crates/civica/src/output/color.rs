//! Color and styling helpers for CLI output.
//!
//! Semantic color theme:
//!   - Resolved:    green
//!   - In Progress: blue
//!   - Rejected:    red
//!   - Pending:     dimmed
//!   - Critical:    red bold
//!   - High:        red
//!   - Medium:      yellow
//!   - Low:         green
//!   - Tracking id: cyan

use colored::Colorize;

use super::OutputConfig;
use crate::domain::{Priority, Status};

/// Apply color to status text based on issue status.
pub(crate) fn colorize_status(status: Status, config: &OutputConfig) -> String {
    let text = format!("{status}");
    if !config.use_colors {
        return text;
    }
    match status {
        Status::Pending => text.dimmed().to_string(),
        Status::InProgress => text.blue().to_string(),
        Status::Resolved => text.green().to_string(),
        Status::Rejected => text.red().to_string(),
    }
}

/// Apply color to priority text based on priority level.
pub(crate) fn colorize_priority(priority: Priority, config: &OutputConfig) -> String {
    let text = format!("{priority}");
    if !config.use_colors {
        return text;
    }
    match priority {
        Priority::Critical => text.red().bold().to_string(),
        Priority::High => text.red().to_string(),
        Priority::Medium => text.yellow().to_string(),
        Priority::Low => text.green().to_string(),
    }
}

/// Colorize a tracking id (cyan).
pub(crate) fn colorize_tracking_id(code: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return code.to_string();
    }
    code.cyan().to_string()
}
