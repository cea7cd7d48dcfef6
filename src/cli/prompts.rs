//! Interactive prompt flow
//!
//! Thin stdin/stdout wrappers around pure choice parsers. The engine never
//! touches these; they only run when the matching CLI flag is omitted.

use crate::cli::commands::{ExportFormat, Preset};
use crate::error::Result;
use std::io::{self, BufRead, Write};

/// Parse a preset menu choice; empty input takes the default
pub fn parse_preset_choice(input: &str) -> Preset {
    match input.trim() {
        "2" => Preset::Fast,
        "3" => Preset::SmallBatches,
        _ => Preset::Balanced,
    }
}

/// Parse an export-format menu choice; empty input takes the default
pub fn parse_format_choice(input: &str) -> ExportFormat {
    match input.trim() {
        "1" => ExportFormat::Json,
        "2" => ExportFormat::Csv,
        _ => ExportFormat::Both,
    }
}

/// Parse a yes/no answer; empty input counts as yes
pub fn parse_confirmation(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes" | "")
}

/// Prompt for the page-size/delay preset
pub fn choose_preset() -> Result<Preset> {
    println!("\nConfiguration options:");
    println!("  1. Balanced: limit=20 (default)");
    println!("  2. Fast: limit=100 (fewer API calls)");
    println!("  3. Small batches: limit=12 (native page size)");
    let input = ask("Choose option (1-3) or press Enter for default: ")?;
    Ok(parse_preset_choice(&input))
}

/// Prompt for the export format
pub fn choose_format() -> Result<ExportFormat> {
    println!("\nExport format:");
    println!("  1. JSON only");
    println!("  2. CSV only");
    println!("  3. Both JSON and CSV (default)");
    let input = ask("Choose format (1-3) or press Enter for both: ")?;
    Ok(parse_format_choice(&input))
}

/// Ask for a final go/no-go before the run starts
pub fn confirm_start() -> Result<bool> {
    let input = ask("\nStart scraping? (y/n): ")?;
    Ok(parse_confirmation(&input))
}

fn ask(prompt: &str) -> Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preset_choice() {
        assert_eq!(parse_preset_choice("1"), Preset::Balanced);
        assert_eq!(parse_preset_choice("2"), Preset::Fast);
        assert_eq!(parse_preset_choice("3"), Preset::SmallBatches);
        assert_eq!(parse_preset_choice(""), Preset::Balanced);
        assert_eq!(parse_preset_choice("  \n"), Preset::Balanced);
        assert_eq!(parse_preset_choice("nonsense"), Preset::Balanced);
    }

    #[test]
    fn test_parse_format_choice() {
        assert_eq!(parse_format_choice("1"), ExportFormat::Json);
        assert_eq!(parse_format_choice("2"), ExportFormat::Csv);
        assert_eq!(parse_format_choice("3"), ExportFormat::Both);
        assert_eq!(parse_format_choice(""), ExportFormat::Both);
    }

    #[test]
    fn test_parse_confirmation() {
        assert!(parse_confirmation("y"));
        assert!(parse_confirmation("YES\n"));
        assert!(parse_confirmation(""));
        assert!(!parse_confirmation("n"));
        assert!(!parse_confirmation("no"));
        assert!(!parse_confirmation("maybe"));
    }
}
