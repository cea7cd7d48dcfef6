//! Page fetching with retry and backoff
//!
//! A [`PageFetcher`] performs one bounded network request per page and
//! classifies the result into a [`PageOutcome`]. Transient failures (429,
//! retryable 5xx, timeouts, connection errors) are retried locally with the
//! waits defined by [`RetryPolicy`]; the caller only ever sees the final
//! classification. Each call is stateless apart from its own attempt counter.

use crate::config::ScrapeConfig;
use crate::decode::normalize_records;
use crate::error::Result;
use crate::headers;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, warn};

// ============================================================================
// Request / outcome types
// ============================================================================

/// One page request: which slice of the listing to ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Starting record number
    pub offset: u64,
    /// Records requested
    pub limit: u32,
}

/// Classified outcome of one page fetch, after local retries are exhausted
#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome {
    /// Page returned records, in the API's own order
    Success(Vec<Value>),
    /// Page returned no records (end-of-data signal, not an error)
    Empty,
    /// 429 persisted through the retry budget
    RateLimited,
    /// Retryable 5xx persisted through the retry budget
    ServerError(u16),
    /// Request timed out on every attempt
    Timeout,
    /// DNS/refused/reset on every attempt
    ConnectionFailure,
    /// Non-retryable status, returned immediately
    ClientError(u16),
    /// Unparseable body or unexpected transport error, returned immediately
    Unknown,
}

impl PageOutcome {
    /// True for every variant that counts toward the run's failure budget
    pub fn is_failure(&self) -> bool {
        !matches!(self, Self::Success(_) | Self::Empty)
    }

    /// Short label for logging
    pub fn label(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::Empty => "empty",
            Self::RateLimited => "rate_limited",
            Self::ServerError(_) => "server_error",
            Self::Timeout => "timeout",
            Self::ConnectionFailure => "connection_failure",
            Self::ClientError(_) => "client_error",
            Self::Unknown => "unknown",
        }
    }
}

// ============================================================================
// Retry policy
// ============================================================================

/// Waits and retry ceilings for the fetcher's local retry loop
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Base wait for 429 responses (doubles per attempt)
    pub rate_limit_base: Duration,
    /// Cap on the 429 wait
    pub rate_limit_cap: Duration,
    /// Retries allowed for 429 responses
    pub rate_limit_retries: u32,
    /// Wait step for retryable 5xx (grows linearly)
    pub server_error_step: Duration,
    /// Retries allowed for retryable 5xx
    pub server_error_retries: u32,
    /// Flat wait after a timeout
    pub timeout_wait: Duration,
    /// Retries allowed after timeouts
    pub timeout_retries: u32,
    /// Flat wait after a connection failure
    pub connect_wait: Duration,
    /// Retries allowed after connection failures
    pub connect_retries: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            rate_limit_base: Duration::from_secs(10),
            rate_limit_cap: Duration::from_secs(60),
            rate_limit_retries: 3,
            server_error_step: Duration::from_secs(5),
            server_error_retries: 2,
            timeout_wait: Duration::from_secs(2),
            timeout_retries: 2,
            connect_wait: Duration::from_secs(5),
            connect_retries: 2,
        }
    }
}

impl RetryPolicy {
    /// Same retry ceilings with all waits zeroed
    pub fn no_wait() -> Self {
        Self {
            rate_limit_base: Duration::ZERO,
            rate_limit_cap: Duration::ZERO,
            server_error_step: Duration::ZERO,
            timeout_wait: Duration::ZERO,
            connect_wait: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Exponential wait for a 429 at the given attempt, capped
    pub fn rate_limit_backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        std::cmp::min(self.rate_limit_base * factor, self.rate_limit_cap)
    }

    /// Linear wait for a retryable 5xx at the given attempt
    pub fn server_error_backoff(&self, attempt: u32) -> Duration {
        self.server_error_step * (attempt + 1)
    }
}

/// The 5xx statuses worth retrying
fn is_retryable_server_error(status: StatusCode) -> bool {
    matches!(status.as_u16(), 500 | 502 | 503 | 504)
}

// ============================================================================
// Fetcher
// ============================================================================

/// Seam between the pagination driver and the network, so the driver can be
/// exercised with scripted outcomes and no I/O.
#[async_trait::async_trait]
pub trait FetchPage: Send + Sync {
    /// Fetch one page, retrying transient failures internally
    async fn fetch_page(&self, request: PageRequest) -> PageOutcome;
}

/// HTTP page fetcher against the listing endpoint
pub struct PageFetcher {
    client: Client,
    base_url: String,
    record_field: String,
    policy: RetryPolicy,
}

impl PageFetcher {
    /// Build a fetcher from the run configuration
    pub fn new(config: &ScrapeConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .default_headers(headers::header_map())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            record_field: config.record_field.clone(),
            policy: RetryPolicy::default(),
        })
    }

    /// Replace the retry policy
    #[must_use]
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Classify a 2xx response body
    fn classify_body(&self, body: Value) -> PageOutcome {
        let records = normalize_records(body, &self.record_field);
        if records.is_empty() {
            PageOutcome::Empty
        } else {
            PageOutcome::Success(records)
        }
    }
}

impl std::fmt::Debug for PageFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageFetcher")
            .field("base_url", &self.base_url)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl FetchPage for PageFetcher {
    async fn fetch_page(&self, request: PageRequest) -> PageOutcome {
        let mut attempt: u32 = 0;

        loop {
            debug!(
                offset = request.offset,
                limit = request.limit,
                attempt,
                "fetching page"
            );

            let result = self
                .client
                .get(&self.base_url)
                .query(&[
                    ("offset", request.offset.to_string()),
                    ("limit", request.limit.to_string()),
                ])
                .send()
                .await;

            match result {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        return match response.json::<Value>().await {
                            Ok(body) => self.classify_body(body),
                            Err(e) => {
                                error!(offset = request.offset, error = %e, "body was not valid JSON");
                                PageOutcome::Unknown
                            }
                        };
                    }

                    if status == StatusCode::TOO_MANY_REQUESTS {
                        // The wait applies even when the budget is already
                        // spent, matching the server's cool-down expectation.
                        let wait = self.policy.rate_limit_backoff(attempt);
                        warn!(
                            offset = request.offset,
                            attempt,
                            wait_secs = wait.as_secs(),
                            "rate limited, backing off"
                        );
                        tokio::time::sleep(wait).await;
                        if attempt < self.policy.rate_limit_retries {
                            attempt += 1;
                            continue;
                        }
                        return PageOutcome::RateLimited;
                    }

                    if is_retryable_server_error(status) {
                        if attempt < self.policy.server_error_retries {
                            let wait = self.policy.server_error_backoff(attempt);
                            warn!(
                                offset = request.offset,
                                status = status.as_u16(),
                                attempt,
                                wait_secs = wait.as_secs(),
                                "server error, retrying"
                            );
                            tokio::time::sleep(wait).await;
                            attempt += 1;
                            continue;
                        }
                        error!(
                            offset = request.offset,
                            status = status.as_u16(),
                            "server error persisted through retries"
                        );
                        return PageOutcome::ServerError(status.as_u16());
                    }

                    error!(
                        offset = request.offset,
                        status = status.as_u16(),
                        "unexpected status"
                    );
                    return PageOutcome::ClientError(status.as_u16());
                }
                Err(e) if e.is_timeout() => {
                    if attempt < self.policy.timeout_retries {
                        warn!(offset = request.offset, attempt, "request timed out, retrying");
                        tokio::time::sleep(self.policy.timeout_wait).await;
                        attempt += 1;
                        continue;
                    }
                    error!(offset = request.offset, "request timed out");
                    return PageOutcome::Timeout;
                }
                Err(e) if e.is_connect() => {
                    if attempt < self.policy.connect_retries {
                        warn!(offset = request.offset, attempt, error = %e, "connection failed, retrying");
                        tokio::time::sleep(self.policy.connect_wait).await;
                        attempt += 1;
                        continue;
                    }
                    error!(offset = request.offset, error = %e, "connection failed");
                    return PageOutcome::ConnectionFailure;
                }
                Err(e) => {
                    error!(offset = request.offset, error = %e, "request failed unexpectedly");
                    return PageOutcome::Unknown;
                }
            }
        }
    }
}
