// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

//! # Roster Scraper
//!
//! Resilient scraper for offset-paginated member directory APIs.
//!
//! The directory endpoint serves pages of JSON records via `offset`/`limit`
//! query parameters, exposes no total count, and fails often enough that a
//! naive loop loses data. This crate walks it with a single sequential
//! fetcher that classifies every response, retries transient failures with
//! backoff, stops on an empty-page streak or a cumulative failure limit, and
//! exports whatever it collected to JSON and CSV.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐    ┌─────────────┐    ┌──────────┐    ┌──────────┐
//! │   CLI    │───▶│ ScrapeEngine│───▶│PageFetcher│──▶│ endpoint │
//! │ prompts  │    │ counters,   │    │ retry +   │   └──────────┘
//! └──────────┘    │ stop rules  │    │ backoff   │
//!                 └──────┬──────┘    └──────────┘
//!                        │ aggregate
//!                        ▼
//!                 ┌─────────────┐
//!                 │   export    │ JSON / CSV / summary
//!                 └─────────────┘
//! ```

#![warn(clippy::all)]

/// Error types
pub mod error;

/// Run configuration and presets
pub mod config;

/// Fixed request-header set
pub mod headers;

/// Response shape normalization
pub mod decode;

/// Page fetching with retry and backoff
pub mod fetch;

/// Scrape run orchestration
pub mod engine;

/// JSON/CSV export and summary statistics
pub mod export;

/// Command-line interface
pub mod cli;

pub use config::ScrapeConfig;
pub use engine::{ScrapeEngine, ScrapeReport, StopReason};
pub use error::{Error, Result};
pub use fetch::{FetchPage, PageFetcher, PageOutcome, PageRequest, RetryPolicy};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
