use std::sync::Arc;

use learnhub_infra::{AppConfig, InMemoryCourseGateway, PostgresCourseGateway};
use learnhub_progress::{CourseGateway, DashboardService, GatewayError};

/// Shared, request-independent services.
///
/// Holds no per-request state; the gateway owns the only shared resource
/// (its connection pool).
#[derive(Clone)]
pub struct AppServices {
    pub dashboards: DashboardService,
}

impl AppServices {
    pub fn new(gateway: Arc<dyn CourseGateway>) -> Self {
        Self {
            dashboards: DashboardService::new(gateway),
        }
    }
}

/// Pick the gateway from configuration: Postgres when `DATABASE_URL` is set,
/// an empty in-memory store otherwise.
pub fn build_services(config: &AppConfig) -> Result<AppServices, GatewayError> {
    let gateway: Arc<dyn CourseGateway> = match &config.database_url {
        Some(url) => {
            tracing::info!(max_connections = config.db_max_connections, "using postgres course gateway");
            Arc::new(PostgresCourseGateway::connect_lazy(url, config.db_max_connections)?)
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using empty in-memory course gateway");
            Arc::new(InMemoryCourseGateway::new())
        }
    };

    Ok(AppServices::new(gateway))
}
