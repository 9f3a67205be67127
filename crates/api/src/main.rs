use std::sync::Arc;

use anyhow::Context;

use learnhub_infra::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("failed to load configuration")?;

    learnhub_observability::init(config.log_format);

    if config.uses_dev_secret() {
        tracing::warn!("LEARNHUB_SESSION_SECRET not set; using insecure dev default");
    }

    let services = learnhub_api::app::services::build_services(&config)
        .context("failed to set up course storage")?;
    let app = learnhub_api::app::build_app(Arc::new(services), config.session_secret.as_bytes());

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
