//! Record store
//!
//! Append-only SQLite storage of ticks. Owns the schema and the grouped-sum
//! queries behind the order book views; grouping is done in SQL so sums always
//! cover every matching tick.

mod schema;
mod tick;

pub use tick::Tick;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::{QueryBuilder, Sqlite};
use tracing::{debug, info};

use crate::error::Result;
use crate::orderbook::{HistoricalLevel, LatestLevel};
use schema::{
    CREATE_ORDERBOOK_TABLE, CREATE_TIME_INDEX, HISTORICAL_BY_TIME_AND_PRICE, INSERT_CHUNK_ROWS,
    INSERT_TICKS_PREFIX, LATEST_BY_PRICE_SELECT,
};

/// Handle to the tick table. Cheap to clone; every operation checks a
/// connection out of the pool and returns it when the operation ends.
#[derive(Debug, Clone)]
pub struct TickStore {
    pool: SqlitePool,
}

impl TickStore {
    /// Connect to a SQLite database, creating the file if missing, and ensure
    /// the schema exists.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.initialize().await?;

        info!(url = %url, max_connections, "Tick store ready");
        Ok(store)
    }

    /// Private in-memory database. A single long-lived connection keeps the
    /// data alive for the lifetime of the store.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.initialize().await?;
        Ok(store)
    }

    /// Ensure the tick table and its time index exist. Idempotent.
    pub async fn initialize(&self) -> Result<()> {
        sqlx::query(CREATE_ORDERBOOK_TABLE)
            .execute(&self.pool)
            .await?;
        sqlx::query(CREATE_TIME_INDEX).execute(&self.pool).await?;
        Ok(())
    }

    /// Append ticks, returning how many rows were written.
    pub async fn insert_many(&self, ticks: &[Tick]) -> Result<u64> {
        if ticks.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;

        for chunk in ticks.chunks(INSERT_CHUNK_ROWS) {
            let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(INSERT_TICKS_PREFIX);
            builder.push_values(chunk, |mut row, tick| {
                row.push_bind(tick.time.as_str())
                    .push_bind(tick.price)
                    .push_bind(tick.bid_volume)
                    .push_bind(tick.ask_volume);
            });
            inserted += builder.build().execute(&mut *tx).await?.rows_affected();
        }

        tx.commit().await?;

        debug!(rows = inserted, "Inserted ticks");
        Ok(inserted)
    }

    /// Depth per price level, highest price first.
    ///
    /// `before` filters raw ticks (`time < before`) ahead of grouping, so it
    /// selects which ticks feed the sums rather than which levels come back.
    pub async fn latest_by_price(
        &self,
        before: Option<&str>,
        limit: i64,
    ) -> Result<Vec<LatestLevel>> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(LATEST_BY_PRICE_SELECT);
        if let Some(before) = before {
            builder.push(" WHERE time < ").push_bind(before);
        }
        builder
            .push(" GROUP BY price ORDER BY price DESC LIMIT ")
            .push_bind(limit);

        let levels = builder
            .build_query_as::<LatestLevel>()
            .fetch_all(&self.pool)
            .await?;
        Ok(levels)
    }

    /// Depth per (time, price) pair, newest time first.
    pub async fn historical_by_time_and_price(&self, limit: i64) -> Result<Vec<HistoricalLevel>> {
        let levels = sqlx::query_as::<_, HistoricalLevel>(HISTORICAL_BY_TIME_AND_PRICE)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(levels)
    }

    /// Number of stored ticks
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orderbook")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Release all pooled connections
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
