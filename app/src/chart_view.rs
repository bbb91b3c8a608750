//! Chart lifecycle: one surface and one size observer per mount, series
//! replaced wholesale on every fetch.

use market_feed::{candles::Candles, DEFAULT_LIMIT};
use tracing::{debug, error, info, warn};

use crate::{
    request::{CandlesRequest, Target},
    surface::{CandlePoint, ChartSurface, SeriesLayout, SurfaceFactory, VolumePoint},
    ticker::{ChangeIndicator, PriceTicker},
    viewport::{ObserverId, Size, Viewport},
};

pub const CHART_ERROR: &str = "Failed to load chart data";
pub const PRICE_ERROR: &str = "Failed to fetch the Bitcoin price";

/// The manual refresh always looks at the last two one-minute candles,
/// whatever interval the chart shows.
pub const REFRESH_INTERVAL: &str = "1m";
pub const REFRESH_LIMIT: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartState {
    Uninitialized,
    Loading,
    Loaded,
    Error,
}

struct Mounted<S> {
    surface: S,
    observer: ObserverId,
}

pub struct ChartView<F: SurfaceFactory> {
    factory: F,
    layout: SeriesLayout,
    limit: u32,
    mounted: Option<Mounted<F::Surface>>,
    state: ChartState,
    ticker: PriceTicker,
    error: Option<String>,
    refresh_error: Option<String>,
}

impl<F: SurfaceFactory> ChartView<F> {
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            layout: SeriesLayout::default(),
            limit: DEFAULT_LIMIT,
            mounted: None,
            state: ChartState::Uninitialized,
            ticker: PriceTicker::default(),
            error: None,
            refresh_error: None,
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Tears down any previous surface, creates a fresh one sized to the
    /// viewport and returns the fetch that will fill it.
    pub fn mount(&mut self, viewport: &mut Viewport, interval: &str) -> CandlesRequest {
        self.unmount(viewport);

        let surface = self.factory.create(viewport.size(), &self.layout);
        let observer = viewport.observe();
        self.mounted = Some(Mounted { surface, observer });
        self.state = ChartState::Loading;
        debug!(interval, ?observer, "Chart mounted");

        CandlesRequest {
            interval: interval.to_string(),
            limit: self.limit,
            target: Target::Chart,
        }
    }

    pub fn unmount(&mut self, viewport: &mut Viewport) {
        if let Some(Mounted {
            mut surface,
            observer,
        }) = self.mounted.take()
        {
            surface.destroy();
            viewport.disconnect(observer);
            self.state = ChartState::Uninitialized;
            debug!(?observer, "Chart unmounted");
        }
    }

    pub fn on_resize(&mut self, observer: ObserverId, size: Size) {
        match self.mounted.as_mut() {
            Some(mounted) if mounted.observer == observer => mounted.surface.resize(size),
            _ => debug!(?observer, "Resize for a disconnected observer"),
        }
    }

    pub fn apply_candles(&mut self, candles: Result<Candles, String>) {
        let Some(mounted) = self.mounted.as_mut() else {
            debug!("Chart is not mounted - drop candles");
            return;
        };

        match candles {
            Ok(candles) if !candles.is_empty() => {
                mounted
                    .surface
                    .set_candle_series(candles.iter().map(CandlePoint::from).collect());
                mounted
                    .surface
                    .set_volume_series(candles.iter().map(VolumePoint::from).collect());
                self.ticker.update(&candles);
                self.state = ChartState::Loaded;
                self.error = None;
                info!(count = candles.len(), "Chart loaded");
            }
            Ok(_) => {
                warn!("No candles for the chart");
                self.fail();
            }
            Err(reason) => {
                error!(%reason, "Chart fetch failed");
                self.fail();
            }
        }
    }

    fn fail(&mut self) {
        self.state = ChartState::Error;
        self.error = Some(CHART_ERROR.to_string());
    }

    pub fn refresh_request(&self) -> CandlesRequest {
        CandlesRequest {
            interval: REFRESH_INTERVAL.to_string(),
            limit: REFRESH_LIMIT,
            target: Target::Price,
        }
    }

    /// Updates the price display only, the series stay as they are.
    pub fn apply_refresh(&mut self, candles: Result<Candles, String>) {
        match candles {
            Ok(candles) => {
                if self.ticker.update(&candles) {
                    self.refresh_error = None;
                    debug!(ticker = ?self.ticker, "Price refreshed");
                } else {
                    warn!("No candles for the price refresh");
                    self.refresh_error = Some(PRICE_ERROR.to_string());
                }
            }
            Err(reason) => {
                error!(%reason, "Price refresh failed");
                self.refresh_error = Some(PRICE_ERROR.to_string());
            }
        }
    }

    pub fn state(&self) -> ChartState {
        self.state
    }

    pub fn ticker(&self) -> &PriceTicker {
        &self.ticker
    }

    pub fn change(&self) -> Option<ChangeIndicator> {
        self.ticker.change()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn refresh_error(&self) -> Option<&str> {
        self.refresh_error.as_deref()
    }

    pub fn surface(&self) -> Option<&F::Surface> {
        self.mounted.as_ref().map(|m| &m.surface)
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }
}
