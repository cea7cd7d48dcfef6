//! CLI runner - wires config, engine, and exporters

use crate::cli::commands::{Cli, ExportFormat};
use crate::cli::prompts;
use crate::config::ScrapeConfig;
use crate::engine::{LogSink, ScrapeEngine, ScrapeReport};
use crate::error::Result;
use crate::export::{self, Summary};
use crate::fetch::{FetchPage, PageFetcher, PageOutcome, PageRequest};
use std::path::PathBuf;
use tracing::{error, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI
    pub async fn run(&self) -> Result<()> {
        if self.cli.probe {
            return self.probe().await;
        }
        self.scrape().await
    }

    /// Full scrape: prompt, confirm, run, export, summarize
    async fn scrape(&self) -> Result<()> {
        let preset = match self.cli.preset {
            Some(preset) => preset,
            None => prompts::choose_preset()?,
        };
        let format = match self.cli.format {
            Some(format) => format,
            None => prompts::choose_format()?,
        };

        let mut config = preset.config();
        if let Some(url) = &self.cli.base_url {
            config = config.with_base_url(url.clone());
        }
        config.validate()?;

        print_plan(&config);
        if !self.cli.yes && !prompts::confirm_start()? {
            println!("Scraping cancelled");
            return Ok(());
        }

        let fetcher = PageFetcher::new(&config)?;
        let report = ScrapeEngine::new(config.clone())
            .run(&fetcher, &LogSink)
            .await;

        if report.records.is_empty() {
            warn!("no records collected, nothing to export");
            println!("No data was scraped. Check the logs for details.");
            return Ok(());
        }

        let files = self.export(&report, &config, format);
        let summary = export::summarize(&report.records);
        print_summary(&report, &summary, &files);
        Ok(())
    }

    /// Write the requested export files. A failed write is logged and
    /// skipped; it never aborts the run.
    fn export(
        &self,
        report: &ScrapeReport,
        config: &ScrapeConfig,
        format: ExportFormat,
    ) -> Vec<PathBuf> {
        let mut files = Vec::new();

        if format.wants_json() {
            let path = self
                .cli
                .output_dir
                .join(export::timestamped_filename("members", "json"));
            match export::write_json(&path, &report.records, config) {
                Ok(()) => files.push(path),
                Err(e) => error!(path = %path.display(), error = %e, "JSON export failed"),
            }
        }

        if format.wants_csv() {
            let path = self
                .cli
                .output_dir
                .join(export::timestamped_filename("members", "csv"));
            match export::write_csv(&path, &report.records) {
                Ok(()) => files.push(path),
                Err(e) => error!(path = %path.display(), error = %e, "CSV export failed"),
            }
        }

        files
    }

    /// One-page connectivity probe against the endpoint
    async fn probe(&self) -> Result<()> {
        let mut config = ScrapeConfig {
            limit: 5,
            ..ScrapeConfig::default()
        };
        if let Some(url) = &self.cli.base_url {
            config = config.with_base_url(url.clone());
        }
        config.validate()?;

        println!("Running connectivity probe...");
        let fetcher = PageFetcher::new(&config)?;
        let outcome = fetcher
            .fetch_page(PageRequest {
                offset: 0,
                limit: config.limit,
            })
            .await;

        match outcome {
            PageOutcome::Success(records) => {
                println!("Probe succeeded: got {} sample records", records.len());
            }
            PageOutcome::Empty => {
                println!("Probe succeeded: endpoint answered with an empty page");
            }
            other => {
                println!("Probe failed: {}", other.label());
            }
        }
        Ok(())
    }
}

fn print_plan(config: &ScrapeConfig) {
    let minutes = config.estimated_duration().as_secs_f64() / 60.0;
    println!("\nScraping plan:");
    println!("  limit per request:   {}", config.limit);
    println!("  estimated API calls: {}", config.max_calls());
    println!("  estimated time:      {minutes:.1} minutes");
    println!("  target records:      ~{}", config.estimated_total_records());
}

fn print_summary(report: &ScrapeReport, summary: &Summary, files: &[PathBuf]) {
    let secs = report.elapsed.as_secs_f64();
    let rate = if secs > 0.0 {
        summary.total_records as f64 / secs
    } else {
        0.0
    };

    println!("\n{}", "=".repeat(60));
    println!("Scraping completed");
    println!("{}", "=".repeat(60));
    println!("Total records:    {}", summary.total_records);
    println!("Successful calls: {}", report.counters.successful_calls);
    println!("Failed calls:     {}", report.counters.failed_calls);
    println!("Total time:       {secs:.1}s ({rate:.1} records/s)");

    if files.is_empty() {
        println!("Files saved:      none");
    } else {
        for file in files {
            println!("Saved:            {}", file.display());
        }
    }

    if !summary.field_stats.is_empty() {
        println!("\nField statistics:");
        for stats in &summary.field_stats {
            println!(
                "  {}: {} distinct values (e.g. {})",
                stats.field,
                stats.distinct_values,
                stats.samples.join(", ")
            );
        }
    }

    if !summary.fields.is_empty() {
        println!("\nSample record fields ({} total):", summary.fields.len());
        for field in summary.fields.iter().take(10) {
            println!("  - {field}");
        }
        if summary.fields.len() > 10 {
            println!("  ... and {} more", summary.fields.len() - 10);
        }
    }
}
