use std::fmt;

use serde::{
    de::{self, Expected, IgnoredAny, SeqAccess, Visitor},
    Deserialize, Deserializer, Serialize,
};
use toolset::StringFloat;

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CandlesQuery {
    pub symbol: String,
    pub interval: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// One kline as returned by `/api/v3/klines`.
///
/// The exchange sends a positional array
/// `[openTime, open, high, low, close, volume, closeTime, ...]`; only the
/// first six fields are kept, anything after them is skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct Candle {
    /// Open time in milliseconds since the epoch.
    pub open_time: u64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

fn element<'de, A, T>(seq: &mut A, index: usize, expected: &dyn Expected) -> Result<T, A::Error>
where
    A: SeqAccess<'de>,
    T: Deserialize<'de>,
{
    seq.next_element()?
        .ok_or_else(|| de::Error::invalid_length(index, expected))
}

struct CandleVisitor;

impl<'de> Visitor<'de> for CandleVisitor {
    type Value = Candle;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("kline array [openTime, open, high, low, close, volume, ...]")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Candle, A::Error> {
        let open_time: u64 = element(&mut seq, 0, &self)?;
        let StringFloat(open) = element(&mut seq, 1, &self)?;
        let StringFloat(high) = element(&mut seq, 2, &self)?;
        let StringFloat(low) = element(&mut seq, 3, &self)?;
        let StringFloat(close) = element(&mut seq, 4, &self)?;
        let StringFloat(volume) = element(&mut seq, 5, &self)?;

        while seq.next_element::<IgnoredAny>()?.is_some() {}

        Ok(Candle {
            open_time,
            open,
            high,
            low,
            close,
            volume,
        })
    }
}

impl<'de> Deserialize<'de> for Candle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(CandleVisitor)
    }
}
