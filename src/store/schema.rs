//! SQLite schema for the tick table

/// Tick table. `id` uses AUTOINCREMENT so surrogate keys are never reused.
pub const CREATE_ORDERBOOK_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS orderbook (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    time TEXT,
    price REAL,
    bidVolume REAL,
    askVolume REAL
)
"#;

/// Newest-first scans and the `time < ?` cursor filter both use this index.
pub const CREATE_TIME_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_time ON orderbook(time DESC)";

pub const INSERT_TICKS_PREFIX: &str =
    "INSERT INTO orderbook (time, price, bidVolume, askVolume) ";

pub const LATEST_BY_PRICE_SELECT: &str = r#"
SELECT
    price,
    SUM(bidVolume) AS bid_volume,
    SUM(askVolume) AS ask_volume,
    SUM(bidVolume + askVolume) AS total_volume
FROM orderbook
"#;

pub const HISTORICAL_BY_TIME_AND_PRICE: &str = r#"
SELECT
    time,
    price,
    SUM(bidVolume) AS bid_volume,
    SUM(askVolume) AS ask_volume
FROM orderbook
GROUP BY time, price
ORDER BY time DESC, price DESC
LIMIT ?
"#;

/// 4 bound parameters per row keeps each statement well under SQLite's
/// host parameter limit.
pub const INSERT_CHUNK_ROWS: usize = 200;
