//! HTTP handlers for uploads and order book views

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Multipart, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{DashboardError, Result};
use crate::orderbook::{HistoricalLevel, HistoricalQuery, LatestLevel, LatestQuery};
use crate::AppState;

/// Multipart field carrying the CSV file
const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Deserialize)]
pub struct LatestParams {
    pub limit: Option<i64>,
    pub before: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HistoricalParams {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct Rows<T> {
    pub rows: Vec<T>,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn upload_csv(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let mut payload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| DashboardError::InvalidPayload(e.to_string()))?
    {
        if field.name() == Some(UPLOAD_FIELD) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| DashboardError::InvalidPayload(e.to_string()))?;
            payload = Some(bytes.to_vec());
            break;
        }
    }

    let payload = payload.ok_or_else(|| {
        DashboardError::InvalidPayload(format!("missing multipart field '{}'", UPLOAD_FIELD))
    })?;

    let summary = state.ingestor.ingest(payload).await?;

    Ok(Json(UploadResponse {
        message: format!("{} rows uploaded successfully.", summary.inserted),
    }))
}

pub async fn latest_orderbook(
    State(state): State<Arc<AppState>>,
    params: std::result::Result<Query<LatestParams>, QueryRejection>,
) -> Result<Json<Rows<LatestLevel>>> {
    let Query(params) = params?;
    let query = LatestQuery::new(&state.limits, params.limit, params.before)?;
    let rows = state.orderbook.latest(&query).await?;
    Ok(Json(Rows { rows }))
}

pub async fn historical_orderbook(
    State(state): State<Arc<AppState>>,
    params: std::result::Result<Query<HistoricalParams>, QueryRejection>,
) -> Result<Json<Rows<HistoricalLevel>>> {
    let Query(params) = params?;
    let query = HistoricalQuery::new(&state.limits, params.limit)?;
    let rows = state.orderbook.historical(&query).await?;
    Ok(Json(Rows { rows }))
}

pub async fn metrics(State(state): State<Arc<AppState>>) -> Result<String> {
    state.metrics.render()
}
