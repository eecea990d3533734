use std::sync::Arc;

use anyhow::Context;

use stockbook_api::{app, config::AppConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    stockbook_observability::init_with(config.log_format);

    if config.database_url.is_none() {
        tracing::warn!("database_url not set; stock data will not survive a restart");
    }

    let services = app::services::AppServices::open(&config)
        .await
        .context("failed to open stock ledger")?;

    let router = app::build_app(Arc::new(services));

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr()))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, router).await?;
    Ok(())
}
