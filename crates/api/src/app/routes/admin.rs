//! Admin page tree: catalog overview and progress lookups for any enrollment.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use learnhub_core::EnrollmentId;

use crate::app::{dto, errors, services::AppServices};

pub fn router() -> Router {
    Router::new()
        .route("/", get(dashboard))
        .route("/enrollments/:id/progress", get(get_progress))
}

/// GET /admin - catalog with enrollment counts.
pub async fn dashboard(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.dashboards.catalog().await {
        Ok(courses) => Json(dto::CourseListResponse { courses }).into_response(),
        Err(e) => errors::gateway_error_to_response(e),
    }
}

/// GET /admin/enrollments/:id/progress
pub async fn get_progress(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let enrollment_id: EnrollmentId = match errors::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.dashboards.aggregator().compute_progress(enrollment_id).await {
        Ok(percentage) => Json(dto::ProgressResponse {
            enrollment_id,
            percentage,
        })
        .into_response(),
        Err(e) => errors::progress_error_to_response(e),
    }
}
