/// A single order book observation, as produced by ingestion.
///
/// `time` is kept as opaque text. Stored ordering relies on the upstream feed
/// emitting fixed-width, zero-padded timestamps so that text order matches
/// chronological order.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub time: String,
    pub price: f64,
    pub bid_volume: f64,
    pub ask_volume: f64,
}

impl Tick {
    pub fn new(time: impl Into<String>, price: f64, bid_volume: f64, ask_volume: f64) -> Self {
        Self {
            time: time.into(),
            price,
            bid_volume,
            ask_volume,
        }
    }
}
