use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Json,
};

use learnhub_auth::resolve_landing;

use crate::app::{dto, errors};
use crate::context::SessionContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn not_found() -> axum::response::Response {
    errors::json_error(StatusCode::NOT_FOUND, "not_found", "no such page")
}

/// GET / - send the caller to their default page.
pub async fn landing(Extension(context): Extension<SessionContext>) -> Redirect {
    Redirect::to(resolve_landing(context.session()).as_path())
}

pub async fn whoami(Extension(context): Extension<SessionContext>) -> axum::response::Response {
    let Some(session) = context.session() else {
        return errors::json_error(StatusCode::UNAUTHORIZED, "unauthenticated", "no session");
    };

    Json(dto::WhoAmIResponse {
        user_id: session.user_id,
        role: session.role,
        landing: resolve_landing(Some(session)).as_path(),
    })
    .into_response()
}
