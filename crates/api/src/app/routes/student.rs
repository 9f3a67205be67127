use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use learnhub_core::EnrollmentId;

use crate::app::{dto, errors, services::AppServices};
use crate::context::AuthorizedSession;

pub fn router() -> Router {
    Router::new()
        .route("/courses", get(list_courses))
        .route("/enrollments/:id/progress", get(get_progress))
}

/// GET /student/courses - the caller's enrollments with completion.
pub async fn list_courses(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(AuthorizedSession(session)): Extension<AuthorizedSession>,
) -> axum::response::Response {
    match services.dashboards.student_dashboard(session.user_id).await {
        Ok(enrollments) => Json(dto::StudentDashboardResponse { enrollments }).into_response(),
        Err(e) => errors::progress_error_to_response(e),
    }
}

/// GET /student/enrollments/:id/progress
///
/// Someone else's enrollment answers 404, same as a missing one.
pub async fn get_progress(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(AuthorizedSession(session)): Extension<AuthorizedSession>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let enrollment_id: EnrollmentId = match errors::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let row = match services
        .dashboards
        .aggregator()
        .enrollment_progress(enrollment_id)
        .await
    {
        Ok(row) => row,
        Err(e) => return errors::progress_error_to_response(e),
    };

    if row.user_id != session.user_id {
        return errors::json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("enrollment {enrollment_id} not found"),
        );
    }

    Json(row).into_response()
}
