use std::slice;

use crate::candle::Candle;

/// Candles of one fetch, oldest first.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Candles(Vec<Candle>);

impl Candles {
    pub fn new(candles: Vec<Candle>) -> Self {
        Self(candles)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Candle> {
        self.0.iter()
    }

    pub fn last_close(&self) -> Option<f64> {
        self.0.last().map(|c| c.close)
    }

    /// Close of the second to last candle.
    pub fn previous_close(&self) -> Option<f64> {
        self.0.iter().rev().nth(1).map(|c| c.close)
    }
}

impl From<Vec<Candle>> for Candles {
    fn from(candles: Vec<Candle>) -> Self {
        Candles::new(candles)
    }
}

impl<'a> IntoIterator for &'a Candles {
    type Item = &'a Candle;
    type IntoIter = slice::Iter<'a, Candle>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
