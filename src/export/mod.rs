//! Result export
//!
//! Pure, read-only transformations of the aggregated record set:
//! a JSON document with run metadata, a flat CSV table whose columns are the
//! union of all keys seen, and summary statistics for the operator. Exports
//! may run any number of times against the same snapshot and always produce
//! identical bytes for identical input (timestamps aside).

use crate::config::ScrapeConfig;
use crate::error::Result;
use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::info;

/// Fields worth profiling in the summary when present
pub const INTERESTING_FIELDS: [&str; 4] = ["state", "status", "type", "category"];

/// Sample values shown per profiled field
const SAMPLE_LIMIT: usize = 5;

// ============================================================================
// JSON document
// ============================================================================

/// Run settings echoed into the JSON document
#[derive(Debug, Clone, Serialize)]
pub struct ScraperSettings {
    /// Records per API call
    pub limit: u32,
    /// Inter-page delay in seconds
    pub delay: f64,
}

impl From<&ScrapeConfig> for ScraperSettings {
    fn from(config: &ScrapeConfig) -> Self {
        Self {
            limit: config.limit,
            delay: config.delay.as_secs_f64(),
        }
    }
}

#[derive(Serialize)]
struct ScrapeDocument<'a> {
    scraped_at: DateTime<Utc>,
    total_records: usize,
    scraper_config: ScraperSettings,
    data: &'a [Value],
}

/// Write the full data set plus metadata as pretty-printed JSON
pub fn write_json(path: &Path, records: &[Value], config: &ScrapeConfig) -> Result<()> {
    let document = ScrapeDocument {
        scraped_at: Utc::now(),
        total_records: records.len(),
        scraper_config: ScraperSettings::from(config),
        data: records,
    };

    let body = serde_json::to_string_pretty(&document)?;
    fs::write(path, &body)?;
    info!(path = %path.display(), bytes = body.len(), "JSON saved");
    Ok(())
}

// ============================================================================
// CSV table
// ============================================================================

/// Write the record set as a flat CSV table.
///
/// The header is the sorted union of keys across every object record; a
/// record missing a key renders that cell empty. Nested values render as
/// compact JSON. Repeated exports of the same snapshot are byte-identical.
pub fn write_csv(path: &Path, records: &[Value]) -> Result<()> {
    let columns = collect_columns(records);

    let mut out = String::new();
    if !columns.is_empty() {
        let header: Vec<String> = columns.iter().map(|c| escape_field(c)).collect();
        out.push_str(&header.join(","));
        out.push('\n');

        for record in records {
            let row: Vec<String> = columns
                .iter()
                .map(|column| {
                    record
                        .get(column)
                        .map(|v| escape_field(&render_value(v)))
                        .unwrap_or_default()
                })
                .collect();
            out.push_str(&row.join(","));
            out.push('\n');
        }
    }

    fs::write(path, &out)?;
    info!(path = %path.display(), bytes = out.len(), rows = records.len(), "CSV saved");
    Ok(())
}

/// Sorted union of keys across all object records
fn collect_columns(records: &[Value]) -> Vec<String> {
    let mut columns = BTreeSet::new();
    for record in records {
        if let Value::Object(map) = record {
            for key in map.keys() {
                columns.insert(key.clone());
            }
        }
    }
    columns.into_iter().collect()
}

/// Render a JSON value as a CSV cell
fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        // Display on Value is compact JSON, which also covers bool/number
        other => other.to_string(),
    }
}

/// Quote a field when it contains the delimiter, a quote, or a line break
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

// ============================================================================
// Summary statistics
// ============================================================================

/// Distinct-value profile of one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldStats {
    /// Field name
    pub field: String,
    /// Count of distinct non-empty values
    pub distinct_values: usize,
    /// Up to five sample values, in first-seen order
    pub samples: Vec<String>,
}

/// Summary of one scrape run's data
#[derive(Debug, Clone, Default)]
pub struct Summary {
    /// Total record count
    pub total_records: usize,
    /// Field names of the first record
    pub fields: Vec<String>,
    /// Profiles for the interesting fields present in the data
    pub field_stats: Vec<FieldStats>,
}

/// Profile the record set: total count, first-record field list, and
/// distinct-value statistics for the interesting fields.
pub fn summarize(records: &[Value]) -> Summary {
    let Some(Value::Object(first)) = records.first() else {
        return Summary {
            total_records: records.len(),
            ..Summary::default()
        };
    };

    let fields: Vec<String> = first.keys().cloned().collect();

    let field_stats = INTERESTING_FIELDS
        .iter()
        .filter(|name| fields.iter().any(|f| f == *name))
        .map(|name| profile_field(records, name))
        .collect();

    Summary {
        total_records: records.len(),
        fields,
        field_stats,
    }
}

fn profile_field(records: &[Value], field: &str) -> FieldStats {
    let mut seen: Vec<String> = Vec::new();
    for record in records {
        let Some(value) = record.get(field) else {
            continue;
        };
        let rendered = render_value(value);
        if rendered.is_empty() {
            continue;
        }
        if !seen.contains(&rendered) {
            seen.push(rendered);
        }
    }

    let distinct_values = seen.len();
    seen.truncate(SAMPLE_LIMIT);
    FieldStats {
        field: field.to_string(),
        distinct_values,
        samples: seen,
    }
}

// ============================================================================
// File naming
// ============================================================================

/// Timestamped export filename, e.g. `members_20250825_174501.csv`
pub fn timestamped_filename(prefix: &str, extension: &str) -> String {
    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    format!("{prefix}_{stamp}.{extension}")
}

#[cfg(test)]
mod tests;
