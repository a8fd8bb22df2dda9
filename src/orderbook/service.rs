//! Order book query service
//!
//! Runs the aggregated views against the tick store.

use std::sync::Arc;

use tracing::debug;

use super::{HistoricalLevel, HistoricalQuery, LatestLevel, LatestQuery};
use crate::error::Result;
use crate::metrics::Metrics;
use crate::store::TickStore;

/// Serves the latest and historical order book views
#[derive(Clone)]
pub struct OrderBookService {
    store: TickStore,
    metrics: Arc<Metrics>,
}

impl OrderBookService {
    pub fn new(store: TickStore, metrics: Arc<Metrics>) -> Self {
        Self { store, metrics }
    }

    /// Depth per price level, highest price first
    pub async fn latest(&self, query: &LatestQuery) -> Result<Vec<LatestLevel>> {
        let levels = self
            .store
            .latest_by_price(query.before.as_deref(), query.limit)
            .await?;

        self.metrics.queries.with_label_values(&["latest"]).inc();
        debug!(
            limit = query.limit,
            before = ?query.before,
            levels = levels.len(),
            "Served latest order book"
        );
        Ok(levels)
    }

    /// Depth per (time, price), newest time first
    pub async fn historical(&self, query: &HistoricalQuery) -> Result<Vec<HistoricalLevel>> {
        let levels = self.store.historical_by_time_and_price(query.limit).await?;

        self.metrics.queries.with_label_values(&["historical"]).inc();
        debug!(limit = query.limit, levels = levels.len(), "Served historical order book");
        Ok(levels)
    }
}
