//! CLI-facing argument types.
//!
//! Clap `ValueEnum` wrappers around the domain enums, so the command line
//! accepts friendly lowercase forms while the domain keeps its wire
//! literals.

use clap::ValueEnum;

use crate::domain::{Priority, Status};

/// Status values accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    /// Awaiting triage.
    Pending,
    /// Being worked on.
    InProgress,
    /// Fixed or addressed.
    Resolved,
    /// Declined.
    Rejected,
}

impl From<StatusArg> for Status {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Pending => Status::Pending,
            StatusArg::InProgress => Status::InProgress,
            StatusArg::Resolved => Status::Resolved,
            StatusArg::Rejected => Status::Rejected,
        }
    }
}

/// Priority values accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PriorityArg {
    /// Cosmetic or low-impact.
    Low,
    /// Routine impact.
    Medium,
    /// Significant disruption.
    High,
    /// Safety hazard.
    Critical,
}

impl From<PriorityArg> for Priority {
    fn from(arg: PriorityArg) -> Self {
        match arg {
            PriorityArg::Low => Priority::Low,
            PriorityArg::Medium => Priority::Medium,
            PriorityArg::High => Priority::High,
            PriorityArg::Critical => Priority::Critical,
        }
    }
}
