//! `learnhub-auth` — sessions, roles and role-gated navigation.
//!
//! This crate is intentionally decoupled from HTTP and storage: it turns a
//! session (or its absence) into pure navigation decisions. The HTTP layer
//! performs the actual redirects.

pub mod claims;
pub mod guard;
pub mod landing;
pub mod navigation;
pub mod roles;
pub mod session;

pub use claims::{SessionClaims, TokenValidationError, validate_claims};
pub use guard::{AccessDecision, GuardState, RedirectReason, authenticate, guard};
pub use landing::resolve_landing;
pub use navigation::{Route, login_redirect};
pub use roles::{Role, UnknownRole};
pub use session::{Hs256SessionProvider, Session, SessionError, SessionProvider};
