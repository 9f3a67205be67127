use std::sync::Arc;

use axum::{extract::Extension, response::IntoResponse, routing::get, Json, Router};

use crate::app::{dto, errors, services::AppServices};
use crate::context::AuthorizedSession;

pub fn router() -> Router {
    Router::new().route("/courses", get(list_courses))
}

/// GET /instructor/courses - courses taught by the caller.
pub async fn list_courses(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(AuthorizedSession(session)): Extension<AuthorizedSession>,
) -> axum::response::Response {
    match services.dashboards.instructor_dashboard(session.user_id).await {
        Ok(courses) => Json(dto::CourseListResponse { courses }).into_response(),
        Err(e) => errors::gateway_error_to_response(e),
    }
}
