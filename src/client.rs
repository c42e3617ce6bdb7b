//! Consumer-side subscriber-count flow: a retrying HTTP client plus a
//! background watcher that keeps the latest count available to displays.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use reqwest_tracing::TracingMiddleware;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::app::count::schema::CountResponse;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_RETRIES: u32 = 3;
const MIN_RETRY_DELAY: Duration = Duration::from_secs(2);
const MAX_RETRY_DELAY: Duration = Duration::from_secs(8);
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

#[derive(thiserror::Error, Debug)]
pub enum CountError {
    #[error(transparent)]
    Request(#[from] reqwest_middleware::Error),
    #[error(transparent)]
    Response(#[from] reqwest::Error),
}

/// HTTP client for `GET /api/count`.
///
/// Transient failures (5xx, connection errors) are retried up to three times
/// with exponential backoff before an error is surfaced to the caller.
#[derive(Clone)]
pub struct CountClient {
    http_client: ClientWithMiddleware,
    base_url: String,
}

impl CountClient {
    pub fn new(base_url: String) -> Self {
        Self::with_retry_delays(base_url, MIN_RETRY_DELAY, MAX_RETRY_DELAY)
    }

    /// The retry delays are injectable so tests do not wait out the real
    /// backoff.
    pub fn with_retry_delays(base_url: String, min_delay: Duration, max_delay: Duration) -> Self {
        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(min_delay, max_delay)
            .build_with_max_retries(MAX_RETRIES);
        let http_client = ClientBuilder::new(
            reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("The reqwest client should build."),
        )
        .with(TracingMiddleware::default())
        .with(RetryTransientMiddleware::new_with_policy(retry_policy))
        .build();

        Self {
            http_client,
            base_url,
        }
    }

    pub async fn fetch_count(&self) -> Result<i64, CountError> {
        let url = format!("{}/api/count", self.base_url);
        let response = self.http_client.get(&url).send().await?;
        let body: CountResponse = response.error_for_status()?.json().await?;

        Ok(body.data.count)
    }
}

/// The watcher's view of the world, published on every completed poll.
#[derive(Debug, Clone, Default)]
pub struct CountState {
    pub count: Option<i64>,
    pub error: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
    pub is_loading: bool,
}

/// Polls the count endpoint on an interval and publishes [`CountState`]
/// through a watch channel.
///
/// A failed poll (its retries exhausted inside [`CountClient`]) surfaces an
/// error state but keeps the last known count; the retry budget is fresh
/// again on the next tick. Pausing suspends polling without tearing the
/// watcher down, mirroring a page going hidden.
pub struct CountWatcher {
    state: watch::Receiver<CountState>,
    paused: Arc<AtomicBool>,
    poll_task: JoinHandle<()>,
}

impl CountWatcher {
    pub fn spawn(client: CountClient) -> Self {
        Self::with_interval(client, DEFAULT_POLL_INTERVAL)
    }

    pub fn with_interval(client: CountClient, poll_interval: Duration) -> Self {
        let (tx, rx) = watch::channel(CountState {
            is_loading: true,
            ..CountState::default()
        });
        let paused = Arc::new(AtomicBool::new(false));
        let poll_task = tokio::spawn(poll_loop(client, tx, Arc::clone(&paused), poll_interval));

        Self {
            state: rx,
            paused,
            poll_task,
        }
    }

    pub fn state(&self) -> CountState {
        self.state.borrow().clone()
    }

    /// A receiver for callers that want to await state changes.
    pub fn subscribe(&self) -> watch::Receiver<CountState> {
        self.state.clone()
    }

    pub fn pause(&self) {
        self.paused.store(true, Ordering::Relaxed);
    }

    pub fn resume(&self) {
        self.paused.store(false, Ordering::Relaxed);
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Relaxed)
    }
}

impl Drop for CountWatcher {
    fn drop(&mut self) {
        self.poll_task.abort();
    }
}

async fn poll_loop(
    client: CountClient,
    tx: watch::Sender<CountState>,
    paused: Arc<AtomicBool>,
    poll_interval: Duration,
) {
    let mut ticker = tokio::time::interval(poll_interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        if paused.load(Ordering::Relaxed) {
            continue;
        }

        match client.fetch_count().await {
            Ok(count) => {
                let _ = tx.send(CountState {
                    count: Some(count),
                    error: None,
                    last_updated: Some(Utc::now()),
                    is_loading: false,
                });
            }
            Err(e) => {
                tracing::warn!(detail = e.to_string(), "failed to fetch the subscriber count");
                tx.send_modify(|state| {
                    state.error = Some(e.to_string());
                    state.last_updated = Some(Utc::now());
                    state.is_loading = false;
                });
            }
        }
    }
}
