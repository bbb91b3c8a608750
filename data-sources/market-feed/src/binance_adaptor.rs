use async_trait::async_trait;
use binance::{error::Error, spot::candle::CandlesQuery};
use tracing::{error, info};
use url::Url;

use crate::{candle::Candle, candles::Candles, CandleSource, FetchCandlesInput, BTCUSDT};

pub use binance::API_HOST;

pub async fn try_fetch_candles(input: FetchCandlesInput) -> Result<Candles, Error> {
    let bin_candles = binance::spot::fetch_candles(
        input.api_host,
        CandlesQuery {
            symbol: input.ticker,
            interval: input.interval,
            start_time: None,
            end_time: None,
            limit: Some(input.limit),
        },
    )
    .await?;

    info!("Fetched {} candles", bin_candles.len());

    Ok(bin_candles
        .into_iter()
        .map(Into::into)
        .collect::<Vec<_>>()
        .into())
}

/// Same as [`try_fetch_candles`], but a failed request degrades to no candles.
pub async fn fetch_candles(input: FetchCandlesInput) -> Candles {
    let interval = input.interval.clone();
    match try_fetch_candles(input).await {
        Ok(candles) => candles,
        Err(e) => {
            error!(%interval, "Cannot fetch candles: {e}");
            Candles::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct BinanceCandles {
    api_host: Url,
    ticker: String,
}

impl BinanceCandles {
    pub fn new(api_host: Url) -> Self {
        Self {
            api_host,
            ticker: BTCUSDT.to_string(),
        }
    }
}

#[async_trait]
impl CandleSource for BinanceCandles {
    async fn fetch(&self, interval: &str, limit: u32) -> Candles {
        fetch_candles(FetchCandlesInput {
            api_host: self.api_host.clone(),
            ticker: self.ticker.clone(),
            interval: interval.to_string(),
            limit,
        })
        .await
    }
}

impl From<binance::spot::candle::Candle> for Candle {
    fn from(c: binance::spot::candle::Candle) -> Self {
        Self {
            time: c.open_time,
            open: c.open,
            high: c.high,
            low: c.low,
            close: c.close,
            volume: c.volume,
        }
    }
}
