//! Configuration module for the order book depth service

use std::env;
use std::net::SocketAddr;

use crate::error::{DashboardError, Result};
use crate::ingest::FieldMapping;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection string (e.g., "sqlite://orderbook.db")
    pub database_url: String,

    /// Upper bound on pooled store connections
    pub db_max_connections: u32,

    /// Address the HTTP server binds to
    pub http_addr: SocketAddr,

    /// Origins allowed by CORS (the dashboard front-end)
    pub cors_origins: Vec<String>,

    /// Query row limits
    pub default_limit: i64,
    pub max_limit: i64,

    /// Maximum accepted upload body size in bytes
    pub max_upload_bytes: usize,

    /// Column positions of the upstream CSV feed
    pub field_mapping: FieldMapping,
}

impl Config {
    /// Load configuration from environment variables
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let http_addr = match env::var("HTTP_ADDR") {
            Ok(raw) => raw
                .parse()
                .map_err(|e| DashboardError::Config(format!("invalid HTTP_ADDR {}: {}", raw, e)))?,
            Err(_) => defaults.http_addr,
        };

        let cors_origins: Vec<String> = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let mapping = &defaults.field_mapping;
        let field_mapping = FieldMapping {
            time: env_or("CSV_TIME_COLUMN", mapping.time),
            price: env_or("CSV_PRICE_COLUMN", mapping.price),
            bid_volume: env_or("CSV_BID_VOLUME_COLUMN", mapping.bid_volume),
            ask_volume: env_or("CSV_ASK_VOLUME_COLUMN", mapping.ask_volume),
        };

        let config = Self {
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            db_max_connections: env_or("DB_MAX_CONNECTIONS", defaults.db_max_connections),
            http_addr,
            cors_origins,
            default_limit: env_or("DEFAULT_LIMIT", defaults.default_limit),
            max_limit: env_or("MAX_LIMIT", defaults.max_limit),
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", defaults.max_upload_bytes),
            field_mapping,
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would disable the query row bound or make the CORS
    /// layer unbuildable.
    pub fn validate(&self) -> Result<()> {
        if self.default_limit <= 0 {
            return Err(DashboardError::Config(format!(
                "DEFAULT_LIMIT must be positive, got {}",
                self.default_limit
            )));
        }
        if self.max_limit < self.default_limit {
            return Err(DashboardError::Config(format!(
                "MAX_LIMIT ({}) must be at least DEFAULT_LIMIT ({})",
                self.max_limit, self.default_limit
            )));
        }
        // Credentialed CORS cannot use a wildcard origin
        if self.cors_origins.iter().any(|origin| origin == "*") {
            return Err(DashboardError::Config(
                "CORS_ORIGINS must list explicit origins, '*' is not allowed".to_string(),
            ));
        }
        Ok(())
    }
}

/// Read a numeric variable, falling back to `default` when unset or unparseable
fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://orderbook.db".to_string(),
            db_max_connections: 5,
            http_addr: SocketAddr::from(([0, 0, 0, 0], 5001)),
            cors_origins: vec!["http://localhost:3000".to_string()],
            default_limit: 300,
            max_limit: 10_000,
            max_upload_bytes: 256 * 1024 * 1024,
            field_mapping: FieldMapping::default(),
        }
    }
}
