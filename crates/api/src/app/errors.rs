use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use learnhub_core::DomainError;
use learnhub_progress::{GatewayError, ProgressError};

pub fn progress_error_to_response(err: ProgressError) -> axum::response::Response {
    match err {
        ProgressError::NotFound(id) => json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("enrollment {id} not found"),
        ),
        ProgressError::Upstream(e) => gateway_error_to_response(e),
    }
}

pub fn gateway_error_to_response(err: GatewayError) -> axum::response::Response {
    tracing::error!(error = %err, "course storage read failed");
    json_error(StatusCode::INTERNAL_SERVER_ERROR, "upstream_failure", err.to_string())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn parse_id<T>(raw: &str) -> Result<T, axum::response::Response>
where
    T: core::str::FromStr<Err = DomainError>,
{
    raw.parse::<T>()
        .map_err(|e| json_error(StatusCode::BAD_REQUEST, "invalid_id", e.to_string()))
}
