use market_feed::candles::Candles;

/// Which part of the page a fetch feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Full series reload of the chart.
    Chart,
    /// Manual price refresh, leaves the series alone.
    Price,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandlesRequest {
    pub interval: String,
    pub limit: u32,
    pub target: Target,
}

#[derive(Debug)]
pub struct CandlesResponse {
    pub request: CandlesRequest,
    /// `Err` only when the fetch itself never completed.
    pub candles: Result<Candles, String>,
}
