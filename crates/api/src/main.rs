//! qbo-bridge - QuickBooks Online bridge service
//!
//! Main entry point for the HTTP server.

use std::sync::Arc;

use anyhow::Context;
use qbo_bridge_api::utils::logging::init_tracing;
use qbo_bridge_api::{app, AppContext};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before logging so RUST_LOG and QBO_LOG_FORMAT apply
    let dotenv = dotenvy::dotenv();
    init_tracing()?;

    match dotenv {
        Ok(path) => info!(path = %path.display(), "Loaded .env"),
        Err(e) => warn!(error = %e, "Could not load .env file"),
    }

    let config = qbo_bridge_infra::config::load().context("failed to load configuration")?;
    let bind_addr = config.server.bind_addr.clone();

    let ctx =
        Arc::new(AppContext::new(config).context("failed to initialize application context")?);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    info!(addr = %bind_addr, "qbo-bridge listening");

    axum::serve(listener, app(ctx)).with_graceful_shutdown(shutdown_signal()).await?;

    info!("qbo-bridge stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
