//! Order Book Depth Service Library
//!
//! Ingests tick-level order book CSV feeds into SQLite and serves aggregated
//! depth views (latest by price, historical by time and price) over HTTP.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod feed;
pub mod ingest;
pub mod metrics;
pub mod orderbook;
pub mod store;

pub use config::Config;
pub use error::{DashboardError, Result};
pub use ingest::{FieldMapping, IngestSummary, Ingestor};
pub use metrics::Metrics;
pub use orderbook::{HistoricalLevel, LatestLevel, OrderBookService, QueryLimits};
pub use store::{Tick, TickStore};

/// Application state shared across request handlers
pub struct AppState {
    pub orderbook: OrderBookService,
    pub ingestor: Ingestor,
    pub metrics: Arc<Metrics>,
    pub limits: QueryLimits,
    pub config: Arc<Config>,
}

impl AppState {
    /// Wire every component to the given store
    pub fn new(store: TickStore, config: Arc<Config>) -> Result<Self> {
        config.validate()?;
        let metrics = Arc::new(Metrics::new()?);

        Ok(Self {
            orderbook: OrderBookService::new(store.clone(), metrics.clone()),
            ingestor: Ingestor::new(store, config.field_mapping, metrics.clone()),
            metrics,
            limits: QueryLimits {
                default_limit: config.default_limit,
                max_limit: config.max_limit,
            },
            config,
        })
    }
}
