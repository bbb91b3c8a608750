#[derive(Debug, Clone, PartialEq)]
pub struct Candle {
    /// Open time in milliseconds, as reported by the exchange.
    pub time: u64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    pub fn time_secs(&self) -> f64 {
        self.time as f64 / 1000.0
    }
}
