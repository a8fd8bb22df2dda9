//! Prometheus metrics for ingestion and queries

use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

use crate::error::{DashboardError, Result};

/// Service metrics, registered on a registry owned by this struct
#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub rows_ingested: IntCounter,
    pub rows_rejected: IntCounter,
    pub queries: IntCounterVec,
}

impl Metrics {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let rows_ingested = IntCounter::new(
            "orderbook_rows_ingested_total",
            "Ticks inserted from uploaded CSV payloads",
        )?;
        let rows_rejected = IntCounter::new(
            "orderbook_rows_rejected_total",
            "CSV rows discarded as malformed during ingestion",
        )?;
        let queries = IntCounterVec::new(
            Opts::new("orderbook_queries_total", "Order book view queries served"),
            &["view"],
        )?;

        registry.register(Box::new(rows_ingested.clone()))?;
        registry.register(Box::new(rows_rejected.clone()))?;
        registry.register(Box::new(queries.clone()))?;

        Ok(Self {
            registry,
            rows_ingested,
            rows_rejected,
            queries,
        })
    }

    /// Render all metrics in the Prometheus text format
    pub fn render(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| DashboardError::Metrics(e.to_string()))
    }
}
