//! Boundary between the chart view and whatever draws the chart.

use market_feed::candle::Candle;

use crate::viewport::Size;

/// Candlestick series record, time in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandlePoint {
    pub time: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// Volume histogram record, time in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumePoint {
    pub time: f64,
    pub value: f64,
}

impl From<&Candle> for CandlePoint {
    fn from(c: &Candle) -> Self {
        Self {
            time: c.time_secs(),
            open: c.open,
            high: c.high,
            low: c.low,
            close: c.close,
        }
    }
}

impl From<&Candle> for VolumePoint {
    fn from(c: &Candle) -> Self {
        Self {
            time: c.time_secs(),
            value: c.volume,
        }
    }
}

/// Share of the vertical space kept free above and below a series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleMargins {
    pub top: f64,
    pub bottom: f64,
}

/// Placement of the two series on a surface. Both share the time axis; the
/// volume histogram has its own price scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesLayout {
    pub volume_margins: ScaleMargins,
}

impl Default for SeriesLayout {
    fn default() -> Self {
        Self {
            volume_margins: ScaleMargins {
                top: 0.7,
                bottom: 0.0,
            },
        }
    }
}

/// A live chart with a candlestick series and a volume histogram.
pub trait ChartSurface {
    /// Replaces the whole candlestick series.
    fn set_candle_series(&mut self, data: Vec<CandlePoint>);
    /// Replaces the whole volume series.
    fn set_volume_series(&mut self, data: Vec<VolumePoint>);
    fn resize(&mut self, size: Size);
    /// Releases the surface. Nothing is called on it afterwards.
    fn destroy(&mut self);
}

pub trait SurfaceFactory {
    type Surface: ChartSurface;

    /// Creates a surface with both series added and empty.
    fn create(&mut self, size: Size, layout: &SeriesLayout) -> Self::Surface;
}
