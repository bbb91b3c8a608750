use serde::Deserialize;
use sources_common::interval::Interval;
use tracing::info;

use crate::{
    chart_view::ChartView,
    request::{CandlesRequest, CandlesResponse, Target},
    surface::SurfaceFactory,
    viewport::{Size, Viewport},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// UI state owned by the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Shell {
    pub interval: Interval,
    pub theme: Theme,
}

/// The page: shell state, the chart view and the container it is drawn in.
pub struct Page<F: SurfaceFactory> {
    shell: Shell,
    chart: ChartView<F>,
    viewport: Viewport,
}

impl<F: SurfaceFactory> Page<F> {
    pub fn new(shell: Shell, chart: ChartView<F>, size: Size) -> Self {
        Self {
            shell,
            chart,
            viewport: Viewport::new(size),
        }
    }

    pub fn mount(&mut self) -> CandlesRequest {
        self.chart
            .mount(&mut self.viewport, self.shell.interval.as_str())
    }

    pub fn unmount(&mut self) {
        self.chart.unmount(&mut self.viewport);
    }

    /// Switching to another interval rebuilds the chart; picking the current
    /// one does nothing.
    pub fn select_interval(&mut self, interval: Interval) -> Option<CandlesRequest> {
        if interval == self.shell.interval {
            return None;
        }
        info!(from = %self.shell.interval, to = %interval, "Switch interval");
        self.shell.interval = interval;
        Some(self.mount())
    }

    pub fn next_interval(&mut self) -> Option<CandlesRequest> {
        self.select_interval(self.shell.interval.next())
    }

    pub fn prev_interval(&mut self) -> Option<CandlesRequest> {
        self.select_interval(self.shell.interval.prev())
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.shell.theme = self.shell.theme.toggled();
        self.shell.theme
    }

    pub fn refresh(&self) -> CandlesRequest {
        self.chart.refresh_request()
    }

    pub fn resize(&mut self, size: Size) {
        for observer in self.viewport.resize(size) {
            self.chart.on_resize(observer, size);
        }
    }

    /// Responses are applied in arrival order, whichever request they answer.
    pub fn apply(&mut self, response: CandlesResponse) {
        match response.request.target {
            Target::Chart => self.chart.apply_candles(response.candles),
            Target::Price => self.chart.apply_refresh(response.candles),
        }
    }

    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    pub fn chart(&self) -> &ChartView<F> {
        &self.chart
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }
}
