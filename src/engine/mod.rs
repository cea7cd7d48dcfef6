//! Scrape run orchestration
//!
//! # Overview
//!
//! The engine module provides:
//! - `ScrapeEngine` - walks the listing page by page and aggregates records
//! - `RunCounters` - the three run-level counters that decide termination
//! - `ScrapeReport` - the aggregated result handed to the exporters
//! - `ProgressSink` - narrow reporting seam so the loop runs with no terminal
//!
//! The engine never retries a page itself; retries live inside the fetcher
//! and are invisible here. A page that fails terminally leaves a gap in the
//! aggregate and the loop moves on, unless cumulative failures reach the
//! configured limit.

use crate::config::ScrapeConfig;
use crate::fetch::{FetchPage, PageOutcome, PageRequest};
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::info;

/// Emit a progress line every this many pages
const PROGRESS_INTERVAL: u32 = 20;

// ============================================================================
// Counters and report
// ============================================================================

/// Run-level counters, reset at the start of each run
#[derive(Debug, Clone, Copy, Default)]
pub struct RunCounters {
    /// Pages that returned records
    pub successful_calls: u32,
    /// Pages whose final classification was a failure
    pub failed_calls: u32,
    /// Empty pages since the last non-empty success
    pub consecutive_empty: u32,
}

impl RunCounters {
    fn record_success(&mut self) {
        self.successful_calls += 1;
        self.consecutive_empty = 0;
    }

    fn record_empty(&mut self) -> u32 {
        self.consecutive_empty += 1;
        self.consecutive_empty
    }

    fn record_failure(&mut self) -> u32 {
        self.failed_calls += 1;
        self.failed_calls
    }
}

/// Why the run loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Every budgeted call was issued
    BudgetExhausted,
    /// Consecutive empty pages reached the configured streak
    EmptyStreak,
    /// Cumulative failures reached the configured limit
    FailureLimit,
}

/// Result of one scrape run
#[derive(Debug)]
pub struct ScrapeReport {
    /// Aggregated records, in accepted-page order
    pub records: Vec<Value>,
    /// Final counters
    pub counters: RunCounters,
    /// Pages actually attempted (may be below the budget)
    pub pages_attempted: u32,
    /// What ended the loop
    pub stop_reason: StopReason,
    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

// ============================================================================
// Progress reporting
// ============================================================================

/// Per-page reporting seam. All methods default to no-ops so tests can run
/// the engine silently with `struct Quiet; impl ProgressSink for Quiet {}`.
#[allow(unused_variables)]
pub trait ProgressSink: Send + Sync {
    /// A page fetch is about to be issued
    fn page_started(&self, page: u32, max_calls: u32, offset: u64) {}
    /// A page was accepted into the aggregate
    fn page_succeeded(&self, added: usize, total_records: usize) {}
    /// A page came back empty
    fn page_empty(&self, streak: u32) {}
    /// A page failed terminally
    fn page_failed(&self, outcome: &'static str, failed_calls: u32) {}
    /// Periodic progress line
    fn progress(&self, pages_done: u32, max_calls: u32, total_records: usize) {}
}

/// Progress sink that forwards to tracing
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl ProgressSink for LogSink {
    fn page_started(&self, page: u32, max_calls: u32, offset: u64) {
        info!(page, of = max_calls, offset, "processing page");
    }

    fn page_succeeded(&self, added: usize, total_records: usize) {
        info!(added, total = total_records, "page accepted");
    }

    fn page_empty(&self, streak: u32) {
        info!(streak, "empty page, may have reached the end");
    }

    fn page_failed(&self, outcome: &'static str, failed_calls: u32) {
        info!(outcome, failed_calls, "page failed");
    }

    fn progress(&self, pages_done: u32, max_calls: u32, total_records: usize) {
        let pct = f64::from(pages_done) / f64::from(max_calls) * 100.0;
        info!(
            pages_done,
            of = max_calls,
            total_records,
            "progress: {pct:.1}%"
        );
    }
}

// ============================================================================
// Engine
// ============================================================================

/// Walks the listing with increasing offsets and aggregates accepted pages
#[derive(Debug)]
pub struct ScrapeEngine {
    config: ScrapeConfig,
    records: Vec<Value>,
    counters: RunCounters,
}

impl ScrapeEngine {
    /// Create an engine for one run
    pub fn new(config: ScrapeConfig) -> Self {
        Self {
            config,
            records: Vec::new(),
            counters: RunCounters::default(),
        }
    }

    /// Records aggregated so far
    pub fn records(&self) -> &[Value] {
        &self.records
    }

    /// Run the scrape to completion and hand over the aggregate.
    ///
    /// The loop issues at most `config.max_calls()` fetches, advancing the
    /// offset by `limit` each time, and stops early on the empty-page streak
    /// or the cumulative-failure limit. Between pages (except after the last
    /// budgeted one) it sleeps the fixed inter-page delay.
    pub async fn run(mut self, fetcher: &dyn FetchPage, sink: &dyn ProgressSink) -> ScrapeReport {
        let max_calls = self.config.max_calls();
        let start = Instant::now();

        info!(
            limit = self.config.limit,
            max_calls,
            target_records = self.config.estimated_total_records(),
            "starting scrape run"
        );

        let mut pages_attempted = 0;
        let mut stop_reason = StopReason::BudgetExhausted;

        for page in 0..max_calls {
            let offset = u64::from(page) * u64::from(self.config.limit);
            sink.page_started(page + 1, max_calls, offset);

            let outcome = fetcher
                .fetch_page(PageRequest {
                    offset,
                    limit: self.config.limit,
                })
                .await;
            pages_attempted += 1;

            match outcome {
                PageOutcome::Success(records) => {
                    let added = records.len();
                    self.records.extend(records);
                    self.counters.record_success();
                    sink.page_succeeded(added, self.records.len());
                }
                PageOutcome::Empty => {
                    let streak = self.counters.record_empty();
                    sink.page_empty(streak);
                    if streak >= self.config.empty_streak_limit {
                        stop_reason = StopReason::EmptyStreak;
                        break;
                    }
                }
                failure => {
                    let failed = self.counters.record_failure();
                    sink.page_failed(failure.label(), failed);
                    if failed >= self.config.max_failed_calls {
                        stop_reason = StopReason::FailureLimit;
                        break;
                    }
                }
            }

            if page + 1 < max_calls {
                tokio::time::sleep(self.config.delay).await;
            }

            if (page + 1) % PROGRESS_INTERVAL == 0 {
                sink.progress(page + 1, max_calls, self.records.len());
            }
        }

        let report = ScrapeReport {
            records: self.records,
            counters: self.counters,
            pages_attempted,
            stop_reason,
            elapsed: start.elapsed(),
        };

        info!(
            records = report.records.len(),
            successful_calls = report.counters.successful_calls,
            failed_calls = report.counters.failed_calls,
            stop_reason = ?report.stop_reason,
            "scrape run finished"
        );

        report
    }
}
