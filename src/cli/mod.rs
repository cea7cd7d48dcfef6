//! CLI module
//!
//! Argument parsing, the interactive prompt flow, and the runner that wires
//! configuration, fetcher, engine, and exporters together.

mod commands;
mod prompts;
mod runner;

pub use commands::{Cli, ExportFormat, Preset};
pub use prompts::{choose_format, choose_preset, confirm_start};
pub use runner::Runner;
