/// Zero-based column positions of the tick fields in an upstream CSV layout.
///
/// The default matches the MBP-10 feed export
/// (`ts_recv,ts_event,...,price,...,bid_sz_00,ask_sz_00,...`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping {
    pub time: usize,
    pub price: usize,
    pub bid_volume: usize,
    pub ask_volume: usize,
}

impl FieldMapping {
    /// Fewest columns a row needs to carry every mapped field
    pub fn min_columns(&self) -> usize {
        self.time
            .max(self.price)
            .max(self.bid_volume)
            .max(self.ask_volume)
            + 1
    }
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self {
            time: 1,
            price: 8,
            bid_volume: 15,
            ask_volume: 16,
        }
    }
}
