use std::fmt;

use market_feed::candles::Candles;

/// Latest and second to latest close, unset until a fetch brought candles.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PriceTicker {
    current: Option<f64>,
    previous: Option<f64>,
}

impl PriceTicker {
    pub fn current(&self) -> Option<f64> {
        self.current
    }

    pub fn previous(&self) -> Option<f64> {
        self.previous
    }

    /// Takes the closes of the last two candles. A single candle only moves
    /// the current price. Returns `false` and changes nothing when there are
    /// no candles.
    pub fn update(&mut self, candles: &Candles) -> bool {
        let Some(last) = candles.last_close() else {
            return false;
        };
        self.current = Some(last);
        if let Some(previous) = candles.previous_close() {
            self.previous = Some(previous);
        }
        true
    }

    pub fn change(&self) -> Option<ChangeIndicator> {
        ChangeIndicator::new(self.current?, self.previous?)
    }

    pub fn price_label(&self) -> String {
        match self.current {
            Some(price) => format_price(price),
            None => "Loading...".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChangeIndicator {
    pub direction: Direction,
    pub percent: f64,
}

impl ChangeIndicator {
    pub fn new(current: f64, previous: f64) -> Option<Self> {
        if previous == 0.0 {
            return None;
        }
        let direction = if current >= previous {
            Direction::Up
        } else {
            Direction::Down
        };
        Some(Self {
            direction,
            percent: (current - previous) / previous * 100.0,
        })
    }

    pub fn glyph(&self) -> char {
        match self.direction {
            Direction::Up => '▲',
            Direction::Down => '▼',
        }
    }
}

impl fmt::Display for ChangeIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.2}%", self.glyph(), self.percent)
    }
}

/// `$67,123.45`
pub fn format_price(price: f64) -> String {
    let fixed = format!("{:.2}", price.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if price < 0.0 { "-" } else { "" };
    format!("{sign}${grouped}.{frac_part}")
}

#[cfg(test)]
mod tests {
    use crate::testing::candles;

    use super::*;

    #[test]
    fn indicator_up() {
        let indicator = ChangeIndicator::new(105.0, 100.0).unwrap();
        assert_eq!(indicator.direction, Direction::Up);
        assert_eq!(indicator.to_string(), "▲ 5.00%");
    }

    #[test]
    fn indicator_down() {
        let indicator = ChangeIndicator::new(95.0, 100.0).unwrap();
        assert_eq!(indicator.direction, Direction::Down);
        assert_eq!(indicator.to_string(), "▼ -5.00%");
    }

    #[test]
    fn unchanged_price_counts_as_up() {
        assert_eq!(ChangeIndicator::new(100.0, 100.0).unwrap().to_string(), "▲ 0.00%");
    }

    #[test]
    fn zero_previous_has_no_indicator() {
        assert_eq!(ChangeIndicator::new(100.0, 0.0), None);
    }

    #[test]
    fn single_candle_leaves_previous_unset() {
        let mut ticker = PriceTicker::default();
        assert!(ticker.update(&candles(&[(60_000, 101.0)])));
        assert_eq!(ticker.current(), Some(101.0));
        assert_eq!(ticker.previous(), None);
        assert_eq!(ticker.change(), None);
    }

    #[test]
    fn two_candles_set_both() {
        let mut ticker = PriceTicker::default();
        ticker.update(&candles(&[(0, 90.0), (60_000, 100.0), (120_000, 105.0)]));
        assert_eq!(ticker.current(), Some(105.0));
        assert_eq!(ticker.previous(), Some(100.0));
        assert_eq!(ticker.change().unwrap().to_string(), "▲ 5.00%");
    }

    #[test]
    fn empty_candles_change_nothing() {
        let mut ticker = PriceTicker::default();
        ticker.update(&candles(&[(0, 100.0), (60_000, 95.0)]));
        assert!(!ticker.update(&candles(&[])));
        assert_eq!(ticker.current(), Some(95.0));
        assert_eq!(ticker.previous(), Some(100.0));
    }

    #[test]
    fn price_labels() {
        assert_eq!(PriceTicker::default().price_label(), "Loading...");
        assert_eq!(format_price(67123.456), "$67,123.46");
        assert_eq!(format_price(1234567.0), "$1,234,567.00");
        assert_eq!(format_price(999.5), "$999.50");
        assert_eq!(format_price(0.0), "$0.00");
        assert_eq!(format_price(-1500.0), "-$1,500.00");
    }
}
