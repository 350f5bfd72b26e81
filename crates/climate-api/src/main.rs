//! climated - climate query API server
//!
//! Startup order: logging, config, one-shot dataset load, HTTP serve.
//! The dataset is immutable after load; the store pool is dropped before
//! the server starts taking requests.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use climate_store::StoreClient;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    climate_obs::init("climate-api");

    let cfg = climate_config::AppConfig::load().unwrap_or_default();
    let http_bind = cfg.http_bind();
    let dataset_url = cfg.dataset_url();

    let store = StoreClient::new(&dataset_url)
        .await
        .with_context(|| format!("Failed to open dataset store at {dataset_url}"))?;
    store.ping().await.context("Dataset store ping failed")?;

    let dataset = store
        .load_dataset()
        .await
        .context("Failed to load dataset")?;
    info!(
        observations = dataset.observations().len(),
        stations = dataset.stations().len(),
        "Dataset loaded"
    );
    store.close().await;

    let (app, state) = climate_api::build_app(Arc::new(dataset));

    let addr: SocketAddr = http_bind.parse().context("Invalid HTTP bind address")?;
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind TCP listener")?;

    // Mark ready just before serving
    climate_api::set_ready(&state, true);

    info!(%addr, "HTTP server listening");
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
