//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: storage/gateway wiring and the dashboard service
//! - `routes/`: one file per page tree (student, instructor, mentor, admin) plus system routes
//! - `dto.rs`: response DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use learnhub_auth::Hs256SessionProvider;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
pub fn build_app(services: Arc<services::AppServices>, session_secret: &[u8]) -> Router {
    let session_state = middleware::SessionState {
        provider: Arc::new(Hs256SessionProvider::new(session_secret)),
    };

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(
            ServiceBuilder::new()
                .layer(Extension(services))
                .layer(axum::middleware::from_fn_with_state(
                    session_state,
                    middleware::session_middleware,
                )),
        )
}
