//! Order Book Depth Service
//!
//! HTTP service that ingests order book CSV uploads and serves aggregated
//! depth views to the dashboard.

use std::sync::Arc;

use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use orderbook_depth::{api, AppState, Config, TickStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().json())
        .with(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    info!("Starting Order Book Depth Service");

    let config = Arc::new(Config::load()?);
    info!(
        database_url = %config.database_url,
        http_addr = %config.http_addr,
        mapping = ?config.field_mapping,
        "Configuration loaded"
    );

    let store = TickStore::connect(&config.database_url, config.db_max_connections).await?;
    info!(ticks = store.count().await?, "Tick store opened");

    let state = Arc::new(AppState::new(store, config.clone())?);
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(config.http_addr).await?;
    info!(addr = %config.http_addr, "Starting HTTP server");
    axum::serve(listener, app).await?;

    Ok(())
}
