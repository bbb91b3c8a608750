use std::{fs::File, path::PathBuf, sync::Mutex};

use anyhow::Context;
use app::{
    chart_view::ChartView,
    mpsc,
    request::CandlesRequest,
    shell::{Page, Shell},
    surface::SurfaceFactory,
    worker::{FetchWorker, Worker},
    SinkExt, StreamExt,
};
use clap::Parser;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use market_feed::BinanceCandles;
use ratatui::{layout::Rect, DefaultTerminal};
use sources_common::interval::Interval;
use tracing::{info, Level};

use crate::{config::Config, terminal::TerminalSurfaceFactory};

mod config;
mod terminal;
mod ui;

#[derive(Parser)]
#[command(about = "Live BTCUSDT candles from Binance")]
struct Opts {
    #[arg(short, long)]
    config_file: Option<PathBuf>,

    /// One of 1m, 5m, 1h, 1d
    #[arg(short, long)]
    interval: Option<Interval>,

    #[arg(long)]
    light: bool,
}

#[derive(Debug, PartialEq)]
enum Action {
    Quit,
    Fetch(CandlesRequest),
    Redraw,
}

fn handle_key<F: SurfaceFactory>(page: &mut Page<F>, key: KeyEvent) -> Action {
    let interval_keys = ['1', '2', '3', '4'];
    let fetch_or_redraw = |request: Option<CandlesRequest>| match request {
        Some(request) => Action::Fetch(request),
        None => Action::Redraw,
    };

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char('t') => {
            let theme = page.toggle_theme();
            info!(?theme, "Theme toggled");
            Action::Redraw
        }
        KeyCode::Char('r') => Action::Fetch(page.refresh()),
        KeyCode::Char(c) if interval_keys.contains(&c) => {
            let n = interval_keys.iter().position(|k| *k == c).unwrap_or_default();
            fetch_or_redraw(page.select_interval(Interval::ALL[n]))
        }
        KeyCode::Tab => fetch_or_redraw(page.next_interval()),
        KeyCode::BackTab => fetch_or_redraw(page.prev_interval()),
        _ => Action::Redraw,
    }
}

fn init_logging(config: &Config) -> anyhow::Result<()> {
    let level: Level = config
        .log_level
        .parse()
        .with_context(|| format!("Unknown log level {}", config.log_level))?;
    let file = File::create(&config.log_file)
        .with_context(|| format!("Cannot create log file {}", config.log_file.display()))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .init();
    Ok(())
}

async fn run(terminal: &mut DefaultTerminal, config: Config) -> anyhow::Result<()> {
    let (mut request_tx, request_rx) = mpsc::channel(16);
    let (response_tx, mut response_rx) = mpsc::channel(16);
    let worker = Box::new(FetchWorker::new(BinanceCandles::new(config.api_host.clone())));
    tokio::spawn(worker.work(request_rx, response_tx));

    let size = terminal.size()?;
    let shell = Shell {
        interval: config.interval,
        theme: config.theme,
    };
    let chart = ChartView::new(TerminalSurfaceFactory::default()).with_limit(config.limit);
    let mut page = Page::new(
        shell,
        chart,
        ui::viewport_size(Rect::new(0, 0, size.width, size.height)),
    );
    request_tx.send(page.mount()).await?;

    let mut events = EventStream::new();
    loop {
        terminal.draw(|frame| ui::draw(frame, &page))?;

        tokio::select! {
            maybe_event = events.next() => {
                let Some(event) = maybe_event else {
                    info!("Terminal event stream finished");
                    break;
                };
                match event? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        match handle_key(&mut page, key) {
                            Action::Quit => break,
                            Action::Fetch(request) => request_tx.send(request).await?,
                            Action::Redraw => {}
                        }
                    }
                    Event::Resize(width, height) => {
                        page.resize(ui::viewport_size(Rect::new(0, 0, width, height)));
                    }
                    _ => {}
                }
            }
            Some(response) = response_rx.next() => page.apply(response),
        }
    }

    page.unmount();
    info!(live = page.chart().factory().live(), "Chart closed");
    Ok(())
}

async fn runner() -> anyhow::Result<()> {
    let cli_opts = Opts::parse();
    let mut config = Config::load(cli_opts.config_file.as_deref())?;
    if let Some(interval) = cli_opts.interval {
        config.interval = interval;
    }
    if cli_opts.light {
        config.theme = app::shell::Theme::Light;
    }
    init_logging(&config)?;

    info!(?config, "run btc-chart");
    let mut terminal = ratatui::init();
    let result = run(&mut terminal, config).await;
    ratatui::restore();
    result
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    runner().await
}
