use std::sync::Arc;

use futures::{channel::mpsc, future::BoxFuture, FutureExt, SinkExt, StreamExt};
use market_feed::CandleSource;
use tracing::{info, warn};

use crate::request::{CandlesRequest, CandlesResponse};

pub trait Worker<'f, Consumed, Produced> {
    fn work(
        self: Box<Self>,
        requests: mpsc::Receiver<Consumed>,
        responses: mpsc::Sender<Produced>,
    ) -> BoxFuture<'f, ()>;
}

/// Runs every request as its own task. Requests are neither deduplicated nor
/// cancelled, so responses come back in the order the fetches resolve.
pub struct FetchWorker<S> {
    source: Arc<S>,
}

impl<S> FetchWorker<S> {
    pub fn new(source: S) -> Self {
        Self {
            source: Arc::new(source),
        }
    }
}

impl<'f, S> Worker<'f, CandlesRequest, CandlesResponse> for FetchWorker<S>
where
    S: CandleSource + 'static,
{
    fn work(
        self: Box<Self>,
        mut requests: mpsc::Receiver<CandlesRequest>,
        responses: mpsc::Sender<CandlesResponse>,
    ) -> BoxFuture<'f, ()> {
        async move {
            while let Some(request) = requests.next().await {
                info!(?request, "Fetch candles");
                let source = self.source.clone();
                let mut responses = responses.clone();

                tokio::spawn(async move {
                    let fetch = {
                        let request = request.clone();
                        tokio::spawn(async move { source.fetch(&request.interval, request.limit).await })
                    };
                    let candles = fetch.await.map_err(|e| e.to_string());

                    if let Err(e) = responses.send(CandlesResponse { request, candles }).await {
                        warn!(?e, "Nobody waits for candles");
                    }
                });
            }
            info!("Request stream finished - exit fetch worker");
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, time::Duration};

    use async_trait::async_trait;
    use market_feed::candles::Candles;
    use sources_common::interval::Interval;

    use super::*;
    use crate::{
        chart_view::{ChartState, ChartView},
        request::Target,
        shell::{Page, Shell},
        testing::{candles, RecordingFactory},
        viewport::Size,
    };

    /// Answers each interval after its own delay.
    struct DelayedSource {
        delays: HashMap<&'static str, Duration>,
        answers: HashMap<&'static str, Candles>,
    }

    #[async_trait]
    impl CandleSource for DelayedSource {
        async fn fetch(&self, interval: &str, _limit: u32) -> Candles {
            if interval == "boom" {
                panic!("exchange exploded");
            }
            if let Some(delay) = self.delays.get(interval) {
                tokio::time::sleep(*delay).await;
            }
            self.answers.get(interval).cloned().unwrap_or_default()
        }
    }

    fn source() -> DelayedSource {
        DelayedSource {
            delays: HashMap::from([
                ("1m", Duration::from_millis(500)),
                ("1h", Duration::from_millis(100)),
            ]),
            answers: HashMap::from([
                ("1m", candles(&[(60_000, 100.0), (120_000, 101.0)])),
                ("1h", candles(&[(3_600_000, 200.0), (7_200_000, 210.0)])),
            ]),
        }
    }

    fn spawn_worker(
        source: DelayedSource,
    ) -> (mpsc::Sender<CandlesRequest>, mpsc::Receiver<CandlesResponse>) {
        let (request_tx, request_rx) = mpsc::channel(8);
        let (response_tx, response_rx) = mpsc::channel(8);
        tokio::spawn(Box::new(FetchWorker::new(source)).work(request_rx, response_tx));
        (request_tx, response_rx)
    }

    #[tokio::test(start_paused = true)]
    async fn late_response_wins() {
        let (mut requests, mut responses) = spawn_worker(source());
        let factory = RecordingFactory::default();
        let mut page = Page::new(Shell::default(), ChartView::new(factory.clone()), Size::new(80, 20));

        requests.send(page.mount()).await.unwrap();
        let request = page.select_interval(Interval::OneHour).unwrap();
        requests.send(request).await.unwrap();

        let first = responses.next().await.unwrap();
        assert_eq!(first.request.interval, "1h");
        page.apply(first);
        assert_eq!(factory.log.borrow().candles[0].close, 200.0);

        let second = responses.next().await.unwrap();
        assert_eq!(second.request.interval, "1m");
        page.apply(second);

        assert_eq!(page.shell().interval, Interval::OneHour);
        let closes: Vec<f64> = factory.log.borrow().candles.iter().map(|c| c.close).collect();
        assert_eq!(closes, vec![100.0, 101.0]);
        assert_eq!(page.chart().ticker().current(), Some(101.0));
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_interval_answers_empty() {
        let (mut requests, mut responses) = spawn_worker(source());
        requests
            .send(CandlesRequest {
                interval: "7m".into(),
                limit: 50,
                target: Target::Chart,
            })
            .await
            .unwrap();

        let response = responses.next().await.unwrap();
        assert_eq!(response.candles, Ok(Candles::default()));
    }

    #[tokio::test(start_paused = true)]
    async fn panicked_fetch_is_rejected() {
        let (mut requests, mut responses) = spawn_worker(source());
        let factory = RecordingFactory::default();
        let mut view = ChartView::new(factory);
        let mut viewport = crate::viewport::Viewport::new(Size::new(10, 10));
        let mut request = view.mount(&mut viewport, "1m");
        request.interval = "boom".into();
        requests.send(request).await.unwrap();

        let response = responses.next().await.unwrap();
        assert!(response.candles.is_err());
        view.apply_candles(response.candles);
        assert_eq!(view.state(), ChartState::Error);
    }

    #[tokio::test(start_paused = true)]
    async fn stops_when_requests_close() {
        let (request_tx, request_rx) = mpsc::channel(1);
        let (response_tx, _response_rx) = mpsc::channel(1);
        let worker = tokio::spawn(Box::new(FetchWorker::new(source())).work(request_rx, response_tx));

        drop(request_tx);
        worker.await.unwrap();
    }
}
