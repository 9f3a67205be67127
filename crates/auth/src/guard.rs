//! Tree-level access guard for role-scoped page trees.
//!
//! Per request the guard moves through
//! `Authenticated | Unauthenticated` and ends in `Authorized | Redirected`.
//! Nothing is kept between requests.
//!
//! Missing sessions and wrong roles are routine: both end in a redirect,
//! never an error. Per-resource ownership checks are the caller's concern.

use serde::Serialize;

use crate::navigation::login_redirect;
use crate::roles::Role;
use crate::session::Session;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "role", rename_all = "snake_case")]
pub enum GuardState {
    Authenticated(Role),
    Unauthenticated,
    Authorized,
    Redirected,
}

impl GuardState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GuardState::Authorized | GuardState::Redirected)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RedirectReason {
    /// No session, or a session without a role.
    Unauthenticated,
    /// Authenticated, but the tree belongs to another role.
    WrongRole { actual: Role, required: Role },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum AccessDecision {
    Allow,
    Redirect { target: String, reason: RedirectReason },
}

impl AccessDecision {
    pub fn state(&self) -> GuardState {
        match self {
            AccessDecision::Allow => GuardState::Authorized,
            AccessDecision::Redirect { .. } => GuardState::Redirected,
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessDecision::Allow)
    }
}

/// First step: does the request carry a usable identity?
pub fn authenticate(session: Option<&Session>) -> GuardState {
    match session.and_then(|s| s.role) {
        Some(role) => GuardState::Authenticated(role),
        None => GuardState::Unauthenticated,
    }
}

/// Decide whether a request may enter the page tree owned by `required`.
///
/// - unauthenticated → login, with `requested_path` as the callback
/// - wrong role → that role's own dashboard root
/// - matching role → allow
pub fn guard(session: Option<&Session>, required: Role, requested_path: &str) -> AccessDecision {
    let decision = match authenticate(session) {
        GuardState::Authenticated(role) if role == required => AccessDecision::Allow,
        GuardState::Authenticated(role) => AccessDecision::Redirect {
            target: role.dashboard_root().as_path().to_string(),
            reason: RedirectReason::WrongRole {
                actual: role,
                required,
            },
        },
        _ => AccessDecision::Redirect {
            target: login_redirect(requested_path),
            reason: RedirectReason::Unauthenticated,
        },
    };

    tracing::debug!(
        required = %required,
        path = requested_path,
        state = ?decision.state(),
        "access guard decision"
    );

    decision
}
