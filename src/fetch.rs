//! HTTP retrieval with exponential backoff retry logic.
//!
//! # Architecture
//!
//! - [`FetchAsync`]: core trait for fetching a URL body
//! - [`HttpFetcher`]: a `reqwest` client configured from [`FetchConfig`]
//! - [`RetryFetch`]: decorator that adds retries to any `FetchAsync`
//!
//! # Retry Strategy
//!
//! ```text
//! delay = min(base_delay * 2^(attempt-1), max_delay) + random_jitter(0..=250ms)
//! ```
//!
//! `max_delay` is 30 seconds. After `max_retries` failed retries the call
//! gives up with [`NewsError::RetriesExhausted`].

use rand::{Rng, rng};
use std::fmt;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{debug, error, info, instrument, warn};

use crate::config::FetchConfig;
use crate::error::{NewsError, Result};

const MAX_DELAY: Duration = Duration::from_secs(30);
const MAX_JITTER: Duration = Duration::from_millis(250);

/// Fetch the body of a URL as text.
pub trait FetchAsync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Plain HTTP GET; non-success statuses are errors.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self { client })
    }
}

impl FetchAsync for HttpFetcher {
    #[instrument(level = "debug", skip_all, fields(url = %url))]
    async fn fetch(&self, url: &str) -> Result<String> {
        let t0 = Instant::now();
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), elapsed_ms = t0.elapsed().as_millis(), "Request rejected");
            return Err(NewsError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.text().await?;
        debug!(bytes = body.len(), elapsed_ms = t0.elapsed().as_millis(), "Fetched");
        Ok(body)
    }
}

/// Adds exponential backoff with jitter to any [`FetchAsync`].
pub struct RetryFetch<T> {
    inner: T,
    max_retries: usize,
    base_delay: Duration,
    max_delay: Duration,
    max_jitter: Duration,
}

impl<T: FetchAsync> RetryFetch<T> {
    pub fn new(inner: T, max_retries: usize, base_delay: Duration) -> Self {
        Self {
            inner,
            max_retries,
            base_delay,
            max_delay: MAX_DELAY,
            max_jitter: MAX_JITTER,
        }
    }

    /// Override the jitter ceiling.
    pub fn with_max_jitter(mut self, max_jitter: Duration) -> Self {
        self.max_jitter = max_jitter;
        self
    }

    fn backoff(&self, attempt: usize) -> Duration {
        let shift = (attempt.saturating_sub(1)).min(31) as u32;
        let delay = self.base_delay.saturating_mul(1 << shift).min(self.max_delay);
        let jitter_ms: u64 = rng().random_range(0..=self.max_jitter.as_millis() as u64);
        delay + Duration::from_millis(jitter_ms)
    }
}

impl<T> fmt::Debug for RetryFetch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryFetch")
            .field("max_retries", &self.max_retries)
            .field("base_delay", &self.base_delay)
            .field("max_delay", &self.max_delay)
            .finish()
    }
}

impl<T: FetchAsync> FetchAsync for RetryFetch<T> {
    #[instrument(level = "info", skip_all, fields(url = %url))]
    async fn fetch(&self, url: &str) -> Result<String> {
        let total_t0 = Instant::now();
        let mut attempt = 0usize;

        loop {
            let attempt_t0 = Instant::now();
            match self.inner.fetch(url).await {
                Ok(body) => return Ok(body),
                Err(e) => {
                    attempt += 1;
                    let elapsed_ms_attempt = attempt_t0.elapsed().as_millis();
                    let elapsed_ms_total = total_t0.elapsed().as_millis();

                    if attempt > self.max_retries {
                        error!(
                            attempt,
                            max = self.max_retries,
                            elapsed_ms_attempt,
                            elapsed_ms_total,
                            error = %e,
                            "fetch() exhausted retries"
                        );
                        return Err(NewsError::RetriesExhausted {
                            url: url.to_string(),
                            attempts: attempt,
                        });
                    }

                    let delay = self.backoff(attempt);
                    warn!(
                        attempt,
                        max = self.max_retries,
                        elapsed_ms_attempt,
                        elapsed_ms_total,
                        ?delay,
                        error = %e,
                        "fetch() attempt failed; backing off"
                    );
                    sleep(delay).await;
                }
            }
        }
    }
}

/// GET `url` with the retry policy from `config`.
#[instrument(level = "info", skip_all, fields(url = %url))]
pub async fn fetch_with_backoff(config: &FetchConfig, url: &str) -> Result<String> {
    let t0 = Instant::now();
    let fetcher = RetryFetch::new(HttpFetcher::new(config)?, config.max_retries, config.base_delay());
    let res = fetcher.fetch(url).await;
    let elapsed_ms_total = t0.elapsed().as_millis();

    match &res {
        Ok(body) => info!(elapsed_ms_total, bytes = body.len(), "fetch_with_backoff succeeded"),
        Err(e) => error!(elapsed_ms_total, error = %e, "fetch_with_backoff failed"),
    }
    res
}
