// =============================================================================
// MarketDesk — Main Entry Point
// =============================================================================
//
// A small market-data proxy: fetch a quote series from the upstream API,
// run the indicator engine over it, serve the combined result as JSON.
// The process fails fast when the upstream API token is missing.
// =============================================================================

mod api;
mod config;
mod error;
mod indicators;
mod types;
mod upstream;

use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::api::AppState;
use crate::config::Config;
use crate::upstream::UpstreamClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    info!(base_url = %config.base_url, "MarketDesk starting up");

    // ── 2. Build shared state ────────────────────────────────────────────
    let state = Arc::new(AppState {
        upstream: UpstreamClient::new(&config),
    });

    // ── 3. Serve the API ─────────────────────────────────────────────────
    let app = api::router(state);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %config.bind_addr, "API server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("MarketDesk shut down complete.");
    Ok(())
}

/// Resolve when Ctrl+C is received.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to install Ctrl+C handler");
        return;
    }
    warn!("Shutdown signal received — stopping gracefully");
}
