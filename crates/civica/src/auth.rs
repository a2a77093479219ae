//! Identity and authorization context.
//!
//! Role bindings are created outside this crate (an operator grants the
//! `admin` role); the lifecycle engine only consults them. Authorization
//! state is carried in an explicit [`RequestContext`] value built per
//! invocation from an [`AuthProvider`], never in shared mutable
//! process-wide state.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// The only distinguished role. Absence of a binding implies ordinary-user
/// privilege.
pub const ADMIN_ROLE: &str = "admin";

/// An authenticated identity as issued by the external auth provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Stable identifier for the identity.
    pub id: String,

    /// Email address, when the provider discloses one.
    pub email: Option<String>,
}

impl Identity {
    /// Create an identity whose id is its email address.
    ///
    /// Convenient for providers that key role bindings by email.
    pub fn from_email(email: impl Into<String>) -> Self {
        let email = email.into();
        Self {
            id: email.clone(),
            email: Some(email),
        }
    }
}

/// Per-request authorization context.
///
/// Built once per operation from a verified identity and the role bindings
/// the provider knows about, then passed by reference into the lifecycle
/// engine and the submission pipeline.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// The invoking identity, absent for anonymous callers.
    pub identity: Option<Identity>,

    /// Whether the identity holds the `admin` role.
    admin: bool,
}

impl RequestContext {
    /// Context for an anonymous caller.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Context for an authenticated caller with a resolved admin flag.
    #[must_use]
    pub fn authenticated(identity: Identity, admin: bool) -> Self {
        Self {
            identity: Some(identity),
            admin,
        }
    }

    /// Resolve a context from the auth provider for the given identity.
    ///
    /// # Errors
    ///
    /// Propagates provider failures; a failed role lookup must not silently
    /// grant privileges.
    pub async fn resolve(provider: &dyn AuthProvider, identity: Option<Identity>) -> Result<Self> {
        match identity {
            Some(identity) => {
                let admin = provider.has_role(&identity.id, ADMIN_ROLE).await?;
                Ok(Self::authenticated(identity, admin))
            }
            None => Ok(Self::anonymous()),
        }
    }

    /// Whether this context carries the `admin` role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.admin
    }

    /// The submitting user id to record on an issue, if any.
    #[must_use]
    pub fn user_id(&self) -> Option<String> {
        self.identity.as_ref().map(|identity| identity.id.clone())
    }
}

/// External authentication provider.
///
/// Identity storage and token issuance live outside this crate; the trait
/// exposes only what the engine consults.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// The identity bound to the current session, if any.
    async fn current_identity(&self) -> Result<Option<Identity>>;

    /// Whether the identity holds the named role.
    async fn has_role(&self, identity_id: &str, role: &str) -> Result<bool>;
}

/// Auth provider backed by a fixed admin list, as loaded from configuration.
///
/// Identities are keyed by email; anyone whose email appears in the list
/// holds the `admin` role.
#[derive(Debug, Clone, Default)]
pub struct StaticAuthProvider {
    admins: Vec<String>,
}

impl StaticAuthProvider {
    /// Create a provider from an admin email list.
    #[must_use]
    pub fn new(admins: Vec<String>) -> Self {
        Self { admins }
    }
}

#[async_trait]
impl AuthProvider for StaticAuthProvider {
    async fn current_identity(&self) -> Result<Option<Identity>> {
        // No ambient session; callers name the acting identity explicitly.
        Ok(None)
    }

    async fn has_role(&self, identity_id: &str, role: &str) -> Result<bool> {
        Ok(role == ADMIN_ROLE && self.admins.iter().any(|admin| admin == identity_id))
    }
}
