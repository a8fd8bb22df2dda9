//! Error types for the order book depth service

use thiserror::Error;

/// Order book depth service errors
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Metrics error: {0}")]
    Metrics(String),

    #[error("Background task failed: {0}")]
    Task(String),
}

impl From<tokio::task::JoinError> for DashboardError {
    fn from(err: tokio::task::JoinError) -> Self {
        DashboardError::Task(err.to_string())
    }
}

impl From<prometheus::Error> for DashboardError {
    fn from(err: prometheus::Error) -> Self {
        DashboardError::Metrics(err.to_string())
    }
}

impl From<std::str::Utf8Error> for DashboardError {
    fn from(err: std::str::Utf8Error) -> Self {
        DashboardError::InvalidPayload(format!("payload is not valid UTF-8: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
