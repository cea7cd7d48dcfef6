//! Scrape run configuration
//!
//! A [`ScrapeConfig`] carries everything a run needs: the endpoint, the page
//! size, the fixed inter-page delay, the sizing estimate used to bound the
//! number of calls, and the two run-level stop thresholds. The defaults match
//! the balanced preset; `fast` and `small_batches` mirror the other two
//! operator presets.

use crate::error::{Error, Result};
use std::time::Duration;
use url::Url;

/// Default listing endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.blankethomes.com/narpm-members";

/// Estimated number of pages the directory serves (external estimate, the API
/// exposes no total-count field)
pub const ESTIMATED_TOTAL_PAGES: u32 = 456;

/// Estimated records per directory page
pub const RECORDS_PER_PAGE_ESTIMATE: u32 = 12;

/// Configuration for a scrape run
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Base URL of the listing endpoint
    pub base_url: String,
    /// Records requested per API call (the `limit` query parameter)
    pub limit: u32,
    /// Fixed delay between pages, independent of retry backoff
    pub delay: Duration,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Response field holding the record array
    pub record_field: String,
    /// Sizing estimate: total pages the source is believed to hold
    pub estimated_total_pages: u32,
    /// Sizing estimate: records per source page
    pub records_per_page_estimate: u32,
    /// Consecutive empty pages before the run is considered exhausted
    pub empty_streak_limit: u32,
    /// Cumulative failed calls before the run aborts
    pub max_failed_calls: u32,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            limit: 20,
            delay: Duration::from_millis(800),
            request_timeout: Duration::from_secs(30),
            record_field: "data".to_string(),
            estimated_total_pages: ESTIMATED_TOTAL_PAGES,
            records_per_page_estimate: RECORDS_PER_PAGE_ESTIMATE,
            empty_streak_limit: 3,
            max_failed_calls: 10,
        }
    }
}

impl ScrapeConfig {
    /// Balanced preset: limit 20, 0.8s delay
    pub fn balanced() -> Self {
        Self::default()
    }

    /// Fast preset: larger pages, fewer calls
    pub fn fast() -> Self {
        Self {
            limit: 100,
            delay: Duration::from_millis(1500),
            ..Self::default()
        }
    }

    /// Small-batch preset: matches the source's native page size
    pub fn small_batches() -> Self {
        Self {
            limit: 12,
            delay: Duration::from_millis(500),
            ..Self::default()
        }
    }

    /// Override the base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Total records the run is sized for
    pub fn estimated_total_records(&self) -> u64 {
        u64::from(self.estimated_total_pages) * u64::from(self.records_per_page_estimate)
    }

    /// Upper bound on API calls for one run (rounds up)
    pub fn max_calls(&self) -> u32 {
        let total = self.estimated_total_records();
        total.div_ceil(u64::from(self.limit)) as u32
    }

    /// Rough wall-clock estimate from the inter-page delay alone
    pub fn estimated_duration(&self) -> Duration {
        self.delay * self.max_calls()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.base_url)?;
        if self.limit == 0 {
            return Err(Error::config("limit must be positive"));
        }
        if self.empty_streak_limit == 0 {
            return Err(Error::config("empty_streak_limit must be positive"));
        }
        if self.max_failed_calls == 0 {
            return Err(Error::config("max_failed_calls must be positive"));
        }
        Ok(())
    }
}
