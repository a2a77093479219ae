//! Lifecycle transitions and deletion.
//!
//! The state machine over {Pending, In Progress, Resolved, Rejected} permits
//! every edge, including re-applying the current status; what it enforces is
//! *who* may drive it. Both transitions and deletion require the `admin`
//! role, checked here on the server side against the per-request context.
//! A caller with bare API access and no role gets an authorization error and
//! an unmodified issue.

use crate::auth::RequestContext;
use crate::domain::{Issue, IssueId, Status};
use crate::error::{Error, Result};
use crate::storage::IssueStore;

/// Transition an issue to the target status.
///
/// Any target is legal, including the current status; a no-op transition
/// still refreshes `updated_at`.
///
/// # Errors
///
/// - [`Error::Authorization`] if the context lacks the `admin` role; the
///   issue is left unmodified.
/// - [`Error::IssueNotFound`] if the issue doesn't exist.
pub async fn transition(
    store: &mut dyn IssueStore,
    ctx: &RequestContext,
    id: IssueId,
    target: Status,
) -> Result<Issue> {
    require_admin(ctx, "transition issue status")?;

    let issue = store.set_status(id, target).await?;
    tracing::debug!(id = %id, status = %target, "issue transitioned");

    Ok(issue)
}

/// Permanently delete an issue.
///
/// Irreversible; there is no tombstone.
///
/// # Errors
///
/// - [`Error::Authorization`] if the context lacks the `admin` role.
/// - [`Error::IssueNotFound`] if the issue doesn't exist.
pub async fn remove(store: &mut dyn IssueStore, ctx: &RequestContext, id: IssueId) -> Result<()> {
    require_admin(ctx, "delete issue")?;

    store.delete(id).await?;
    tracing::debug!(id = %id, "issue removed");

    Ok(())
}

fn require_admin(ctx: &RequestContext, action: &str) -> Result<()> {
    if ctx.is_admin() {
        return Ok(());
    }

    Err(Error::Authorization(format!(
        "the admin role is required to {action}"
    )))
}
