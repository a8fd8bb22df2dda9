//! Ingestion pipeline
//!
//! Turns uploaded CSV payloads into ticks and appends them to the store.

mod mapping;
mod parser;

pub use mapping::FieldMapping;
pub use parser::{parse_csv, ParsedBatch, RejectReason, RejectedRow};

use std::sync::Arc;

use tracing::{debug, info};

use crate::error::Result;
use crate::metrics::Metrics;
use crate::store::TickStore;

/// Outcome of one upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestSummary {
    pub inserted: u64,
    pub rejected: u64,
}

/// Parses payloads with a fixed column mapping and stores the accepted rows
#[derive(Clone)]
pub struct Ingestor {
    store: TickStore,
    mapping: FieldMapping,
    metrics: Arc<Metrics>,
}

impl Ingestor {
    pub fn new(store: TickStore, mapping: FieldMapping, metrics: Arc<Metrics>) -> Self {
        Self {
            store,
            mapping,
            metrics,
        }
    }

    /// Parse and store a payload.
    ///
    /// Accepted rows are committed regardless of how many rows were rejected.
    pub async fn ingest(&self, payload: Vec<u8>) -> Result<IngestSummary> {
        let mapping = self.mapping;
        let batch = tokio::task::spawn_blocking(move || parse_csv(&payload, &mapping)).await??;

        for row in &batch.rejected {
            debug!(line = row.line, reason = %row.reason, "Skipping malformed row");
        }

        let inserted = self.store.insert_many(&batch.accepted).await?;
        let rejected = batch.rejected.len() as u64;

        self.metrics.rows_ingested.inc_by(inserted);
        self.metrics.rows_rejected.inc_by(rejected);
        info!(inserted, rejected, "Ingested CSV payload");

        Ok(IngestSummary { inserted, rejected })
    }
}
