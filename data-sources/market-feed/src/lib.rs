use async_trait::async_trait;
use candles::Candles;
use url::Url;

pub mod candle;
pub mod candles;

/// The only market the chart follows.
pub const BTCUSDT: &str = "BTCUSDT";

/// Number of most recent candles requested when no limit is given.
pub const DEFAULT_LIMIT: u32 = 50;

#[derive(Debug, Clone)]
pub struct FetchCandlesInput {
    pub api_host: Url,
    pub ticker: String,
    /// Forwarded to the exchange as is.
    pub interval: String,
    pub limit: u32,
}

/// Anything able to hand out the most recent candles for an interval.
///
/// Implementations never fail: a request that could not be served yields an
/// empty [`Candles`].
#[async_trait]
pub trait CandleSource: Send + Sync {
    async fn fetch(&self, interval: &str, limit: u32) -> Candles;
}

#[cfg(feature = "binance")]
mod binance_adaptor;

#[cfg(feature = "binance")]
pub use binance_adaptor::*;
