//! CLI arguments and option enums

use crate::config::ScrapeConfig;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Member directory scraper CLI
#[derive(Parser, Debug)]
#[command(name = "roster-scraper")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Page-size/delay preset (prompted for when omitted)
    #[arg(short, long, value_enum)]
    pub preset: Option<Preset>,

    /// Export format (prompted for when omitted)
    #[arg(short, long, value_enum)]
    pub format: Option<ExportFormat>,

    /// Skip the confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Override the listing endpoint URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Directory for exported files
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Fetch a single small page to verify connectivity, then exit
    #[arg(long)]
    pub probe: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Page-size/delay presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// limit=20, 0.8s delay (balanced performance)
    Balanced,
    /// limit=100, 1.5s delay (fewer API calls)
    Fast,
    /// limit=12, 0.5s delay (the source's native page size)
    SmallBatches,
}

impl Preset {
    /// Build the scrape configuration for this preset
    pub fn config(self) -> ScrapeConfig {
        match self {
            Self::Balanced => ScrapeConfig::balanced(),
            Self::Fast => ScrapeConfig::fast(),
            Self::SmallBatches => ScrapeConfig::small_batches(),
        }
    }
}

/// Which export files to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// JSON document only
    Json,
    /// CSV table only
    Csv,
    /// Both JSON and CSV
    Both,
}

impl ExportFormat {
    /// Whether a JSON document should be written
    pub fn wants_json(self) -> bool {
        matches!(self, Self::Json | Self::Both)
    }

    /// Whether a CSV table should be written
    pub fn wants_csv(self) -> bool {
        matches!(self, Self::Csv | Self::Both)
    }
}
