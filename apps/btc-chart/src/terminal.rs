//! Chart surface drawn with ratatui's canvas: candles on top, volume below.

use std::{cell::Cell, rc::Rc};

use app::{
    surface::{CandlePoint, ChartSurface, SeriesLayout, SurfaceFactory, VolumePoint},
    viewport::Size,
};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    symbols::Marker,
    text::Span,
    widgets::{
        canvas::{Canvas, Line as CanvasLine},
        Paragraph, Widget,
    },
};
use tracing::debug;

use crate::ui::Palette;

/// Share of a candle slot taken by its body.
const BODY_WIDTH: f64 = 0.6;
const BODY_STROKES: u32 = 4;

#[derive(Debug)]
pub struct TerminalSurface {
    id: u64,
    size: Size,
    layout: SeriesLayout,
    candles: Vec<CandlePoint>,
    volumes: Vec<VolumePoint>,
    live: Rc<Cell<usize>>,
    destroyed: bool,
}

impl TerminalSurface {
    pub fn candles(&self) -> &[CandlePoint] {
        &self.candles
    }

    pub fn widget<'a>(&'a self, palette: &'a Palette) -> ChartWidget<'a> {
        ChartWidget {
            surface: self,
            palette,
        }
    }

    /// Horizontal distance between two candles, in seconds.
    fn step(&self) -> f64 {
        match (self.candles.first(), self.candles.last()) {
            (Some(first), Some(last)) if self.candles.len() > 1 => {
                (last.time - first.time) / (self.candles.len() - 1) as f64
            }
            _ => 60.0,
        }
    }

    fn time_bounds(&self) -> [f64; 2] {
        let half = self.step() / 2.0;
        match (self.candles.first(), self.candles.last()) {
            (Some(first), Some(last)) => [first.time - half, last.time + half],
            _ => [0.0, 1.0],
        }
    }

    fn price_bounds(&self) -> [f64; 2] {
        let low = self.candles.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
        let high = self
            .candles
            .iter()
            .map(|c| c.high)
            .fold(f64::NEG_INFINITY, f64::max);
        let pad = ((high - low) * 0.05).max(high.abs() * 1e-4).max(f64::EPSILON);
        [low - pad, high + pad]
    }

    fn volume_bounds(&self) -> [f64; 2] {
        let max = self.volumes.iter().map(|v| v.value).fold(0.0, f64::max);
        [0.0, if max > 0.0 { max } else { 1.0 }]
    }
}

impl ChartSurface for TerminalSurface {
    fn set_candle_series(&mut self, data: Vec<CandlePoint>) {
        self.candles = data;
    }

    fn set_volume_series(&mut self, data: Vec<VolumePoint>) {
        self.volumes = data;
    }

    fn resize(&mut self, size: Size) {
        debug!(id = self.id, ?size, "Resize chart surface");
        self.size = size;
    }

    fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.candles.clear();
        self.volumes.clear();
        self.live.set(self.live.get() - 1);
        debug!(id = self.id, "Destroy chart surface");
    }
}

#[derive(Debug, Default)]
pub struct TerminalSurfaceFactory {
    live: Rc<Cell<usize>>,
    next_id: u64,
}

impl TerminalSurfaceFactory {
    /// Surfaces created and not destroyed yet.
    pub fn live(&self) -> usize {
        self.live.get()
    }
}

impl SurfaceFactory for TerminalSurfaceFactory {
    type Surface = TerminalSurface;

    fn create(&mut self, size: Size, layout: &SeriesLayout) -> TerminalSurface {
        let id = self.next_id;
        self.next_id += 1;
        self.live.set(self.live.get() + 1);
        debug!(id, ?size, live = self.live.get(), "Create chart surface");

        TerminalSurface {
            id,
            size,
            layout: *layout,
            candles: Vec::new(),
            volumes: Vec::new(),
            live: self.live.clone(),
            destroyed: false,
        }
    }
}

pub struct ChartWidget<'a> {
    surface: &'a TerminalSurface,
    palette: &'a Palette,
}

impl ChartWidget<'_> {
    fn render_candles(&self, area: Rect, buf: &mut Buffer) {
        let surface = self.surface;
        let palette = self.palette;
        let [x_min, x_max] = surface.time_bounds();
        let [y_min, y_max] = surface.price_bounds();
        let body = surface.step() * BODY_WIDTH;

        Canvas::default()
            .background_color(palette.background)
            .marker(Marker::Braille)
            .x_bounds([x_min, x_max])
            .y_bounds([y_min, y_max])
            .paint(|ctx| {
                for c in &surface.candles {
                    let color = if c.close >= c.open {
                        palette.up
                    } else {
                        palette.down
                    };
                    ctx.draw(&CanvasLine::new(c.time, c.low, c.time, c.high, color));
                    for k in 0..=BODY_STROKES {
                        let x = c.time - body / 2.0 + body * k as f64 / BODY_STROKES as f64;
                        ctx.draw(&CanvasLine::new(x, c.open, x, c.close, color));
                    }
                }
                ctx.print(
                    x_min,
                    y_max,
                    Span::styled(format!("{y_max:.2}"), Style::default().fg(palette.muted)),
                );
                ctx.print(
                    x_min,
                    y_min,
                    Span::styled(format!("{y_min:.2}"), Style::default().fg(palette.muted)),
                );
            })
            .render(area, buf);
    }

    fn render_volumes(&self, area: Rect, buf: &mut Buffer) {
        let surface = self.surface;
        let palette = self.palette;
        let [x_min, x_max] = surface.time_bounds();
        let [y_min, y_max] = surface.volume_bounds();

        Canvas::default()
            .background_color(palette.background)
            .marker(Marker::HalfBlock)
            .x_bounds([x_min, x_max])
            .y_bounds([y_min, y_max])
            .paint(|ctx| {
                for v in &surface.volumes {
                    ctx.draw(&CanvasLine::new(v.time, 0.0, v.time, v.value, palette.volume));
                }
            })
            .render(area, buf);
    }
}

impl Widget for ChartWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let size = self.surface.size;
        let area = Rect {
            width: area.width.min(size.width),
            height: area.height.min(size.height),
            ..area
        };
        if area.is_empty() {
            return;
        }

        if self.surface.candles.is_empty() {
            Paragraph::new("No data")
                .style(Style::default().fg(self.palette.muted))
                .render(area, buf);
            return;
        }

        let margins = self.surface.layout.volume_margins;
        let volume_share = (1.0 - margins.top - margins.bottom).clamp(0.0, 1.0);
        let volume_height = (area.height as f64 * volume_share).round() as u16;
        let bottom_gap = (area.height as f64 * margins.bottom).round() as u16;
        let candle_height = area.height.saturating_sub(volume_height + bottom_gap);

        self.render_candles(Rect { height: candle_height, ..area }, buf);
        self.render_volumes(
            Rect {
                y: area.y + candle_height,
                height: volume_height,
                ..area
            },
            buf,
        );
    }
}
