use std::sync::Arc;

use axum::{extract::Extension, response::IntoResponse, routing::get, Json, Router};

use crate::app::{dto, errors, services::AppServices};

pub fn router() -> Router {
    Router::new().route("/", get(dashboard))
}

/// GET /mentor - every course a mentor may review projects for.
pub async fn dashboard(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.dashboards.catalog().await {
        Ok(courses) => Json(dto::CourseListResponse { courses }).into_response(),
        Err(e) => errors::gateway_error_to_response(e),
    }
}
