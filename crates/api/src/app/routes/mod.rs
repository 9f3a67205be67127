use axum::{Router, middleware::from_fn_with_state, routing::get};

use learnhub_auth::Role;

use crate::middleware::guard_middleware;

pub mod admin;
pub mod instructor;
pub mod mentor;
pub mod student;
pub mod system;

/// Router for the landing route and every role-scoped page tree.
///
/// Each tree is guarded once, at its root.
pub fn router() -> Router {
    Router::new()
        .route("/", get(system::landing))
        .route("/whoami", get(system::whoami))
        .nest("/student", guarded(student::router(), Role::Student))
        .nest("/instructor", guarded(instructor::router(), Role::Instructor))
        .nest("/mentor", guarded(mentor::router(), Role::Mentor))
        .nest("/admin", guarded(admin::router(), Role::Admin))
}

/// The fallback sits inside the guard so unknown paths under a tree are
/// gated like the known ones.
fn guarded(tree: Router, required: Role) -> Router {
    tree.fallback(system::not_found)
        .layer(from_fn_with_state(required, guard_middleware))
}
