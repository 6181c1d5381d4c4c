use std::process::ExitCode;

use anyhow::Context;

use dumroo_api::app::{AppServices, build_app};
use dumroo_api::config::AppConfig;

#[tokio::main]
async fn main() -> ExitCode {
    dumroo_observability::init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("startup failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    let services = AppServices::from_config(&config)?;
    let app = build_app(services);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
