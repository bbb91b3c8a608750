use app::{
    chart_view::ChartState,
    shell::{Page, Theme},
    ticker::Direction,
    viewport::Size,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use sources_common::interval::Interval;

use crate::terminal::TerminalSurfaceFactory;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub up: Color,
    pub down: Color,
    pub volume: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        let up = Color::Rgb(38, 166, 154);
        let down = Color::Rgb(239, 83, 80);
        let volume = Color::Rgb(0, 150, 136);
        match theme {
            Theme::Dark => Palette {
                background: Color::Rgb(11, 15, 25),
                text: Color::Rgb(255, 255, 255),
                muted: Color::Rgb(120, 126, 140),
                accent: Color::Rgb(59, 130, 246),
                up,
                down,
                volume,
            },
            Theme::Light => Palette {
                background: Color::Rgb(255, 255, 255),
                text: Color::Rgb(17, 24, 39),
                muted: Color::Rgb(107, 114, 128),
                accent: Color::Rgb(37, 99, 235),
                up,
                down,
                volume,
            },
        }
    }
}

fn layout(area: Rect) -> [Rect; 5] {
    let chunks = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(2),
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2], chunks[3], chunks[4]]
}

fn chart_block(title: String) -> Block<'static> {
    Block::default().title(title).borders(Borders::ALL)
}

/// Size of the chart container for a terminal of the given size.
pub fn viewport_size(area: Rect) -> Size {
    let inner = chart_block(String::new()).inner(layout(area)[3]);
    Size::new(inner.width, inner.height)
}

fn controls(page: &Page<TerminalSurfaceFactory>, palette: &Palette) -> Line<'static> {
    let shell = page.shell();
    let theme = match shell.theme {
        Theme::Dark => "☾ dark",
        Theme::Light => "☀ light",
    };

    let mut spans = vec![
        Span::styled("[t] ", Style::default().fg(palette.muted)),
        Span::raw(theme),
        Span::styled("   interval ", Style::default().fg(palette.muted)),
    ];
    for (n, interval) in Interval::ALL.iter().enumerate() {
        let style = if *interval == shell.interval {
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::REVERSED | Modifier::BOLD)
        } else {
            Style::default()
        };
        spans.push(Span::styled(format!("[{}] ", n + 1), Style::default().fg(palette.muted)));
        spans.push(Span::styled(interval.as_str(), style));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(
        "  [r] refresh price  [q] quit",
        Style::default().fg(palette.muted),
    ));
    Line::from(spans)
}

fn price_line(page: &Page<TerminalSurfaceFactory>, palette: &Palette) -> Line<'static> {
    let ticker = page.chart().ticker();
    let mut spans = vec![Span::styled(
        ticker.price_label(),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if let Some(change) = page.chart().change() {
        let color = match change.direction {
            Direction::Up => palette.up,
            Direction::Down => palette.down,
        };
        spans.push(Span::raw("   "));
        spans.push(Span::styled(change.to_string(), Style::default().fg(color)));
    }
    Line::from(spans)
}

pub fn draw(frame: &mut Frame, page: &Page<TerminalSurfaceFactory>) {
    let shell = page.shell();
    let palette = Palette::for_theme(shell.theme);
    let area = frame.area();
    let [title, controls_area, price_area, chart_area, errors_area] = layout(area);

    frame.render_widget(
        Block::default().style(Style::default().bg(palette.background).fg(palette.text)),
        area,
    );

    frame.render_widget(
        Paragraph::new("Bitcoin Chart")
            .alignment(Alignment::Center)
            .style(Style::default().add_modifier(Modifier::BOLD)),
        title,
    );
    frame.render_widget(Paragraph::new(controls(page, &palette)), controls_area);
    frame.render_widget(
        Paragraph::new(price_line(page, &palette))
            .block(Block::default().title("Bitcoin BTC").borders(Borders::ALL)),
        price_area,
    );

    let chart = page.chart();
    let count = chart.surface().map(|s| s.candles().len()).unwrap_or_default();
    let block = chart_block(format!(
        " BTCUSDT · {} · {count} candles ",
        shell.interval.label()
    ));
    let inner = block.inner(chart_area);
    frame.render_widget(block, chart_area);

    match (chart.state(), chart.surface()) {
        (ChartState::Loading, _) if count == 0 => frame.render_widget(
            Paragraph::new("Loading...").style(Style::default().fg(palette.muted)),
            inner,
        ),
        (_, Some(surface)) => frame.render_widget(surface.widget(&palette), inner),
        (_, None) => {}
    }

    let errors: Vec<Line> = [chart.error(), chart.refresh_error()]
        .into_iter()
        .flatten()
        .map(|e| Line::styled(e.to_string(), Style::default().fg(palette.down)))
        .collect();
    frame.render_widget(Paragraph::new(errors), errors_area);
}
