//! Order book aggregation
//!
//! Two read-only views over the stored ticks: current depth per price level
//! and a depth time series per (time, price).

mod query;
mod service;

pub use query::{HistoricalQuery, LatestQuery, QueryLimits};
pub use service::OrderBookService;

use serde::Serialize;

/// Aggregated depth at one price level
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LatestLevel {
    pub price: f64,
    pub bid_volume: f64,
    pub ask_volume: f64,
    pub total_volume: f64,
}

/// Aggregated depth at one price level for a single timestamp
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalLevel {
    pub time: String,
    pub price: f64,
    pub bid_volume: f64,
    pub ask_volume: f64,
}
