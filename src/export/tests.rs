//! Tests for export formats and summary statistics

use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;

fn sample_records() -> Vec<Value> {
    vec![
        json!({"name": "Alice", "state": "CA", "years": 4}),
        json!({"name": "Bob", "state": "TX"}),
        json!({"name": "Cara", "state": "CA", "category": "broker"}),
    ]
}

// ============================================================================
// JSON document
// ============================================================================

#[test]
fn test_write_json_document_shape() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.json");
    let records = sample_records();

    write_json(&path, &records, &ScrapeConfig::balanced()).unwrap();

    let document: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(document["total_records"], json!(3));
    assert_eq!(document["scraper_config"]["limit"], json!(20));
    assert_eq!(document["scraper_config"]["delay"], json!(0.8));
    assert_eq!(document["data"].as_array().unwrap().len(), 3);
    // Order survives the round trip
    assert_eq!(document["data"][0]["name"], json!("Alice"));
    assert!(document["scraped_at"].is_string());
}

#[test]
fn test_write_json_fails_on_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.json");

    let result = write_json(&path, &sample_records(), &ScrapeConfig::balanced());
    assert!(result.is_err());
}

// ============================================================================
// CSV table
// ============================================================================

#[test]
fn test_csv_header_is_sorted_key_union() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");

    write_csv(&path, &sample_records()).unwrap();

    let body = std::fs::read_to_string(&path).unwrap();
    let mut lines = body.lines();
    assert_eq!(lines.next(), Some("category,name,state,years"));
    assert_eq!(lines.next(), Some(",Alice,CA,4"));
    assert_eq!(lines.next(), Some(",Bob,TX,"));
    assert_eq!(lines.next(), Some("broker,Cara,CA,"));
    assert_eq!(lines.next(), None);
}

#[test]
fn test_csv_export_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("a.csv");
    let second = dir.path().join("b.csv");
    let records = sample_records();

    write_csv(&first, &records).unwrap();
    write_csv(&second, &records).unwrap();

    assert_eq!(
        std::fs::read(&first).unwrap(),
        std::fs::read(&second).unwrap()
    );
}

#[test]
fn test_csv_quoting() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    let records = vec![json!({
        "note": "says \"hi\", twice",
        "addr": "1 Main St\nSuite 2",
    })];

    write_csv(&path, &records).unwrap();

    let body = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        body,
        "addr,note\n\"1 Main St\nSuite 2\",\"says \"\"hi\"\", twice\"\n"
    );
}

#[test]
fn test_csv_nested_values_render_as_compact_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    let records = vec![json!({"tags": ["a", "b"], "active": true, "n": null})];

    write_csv(&path, &records).unwrap();

    let body = std::fs::read_to_string(&path).unwrap();
    assert_eq!(body, "active,n,tags\ntrue,,\"[\"\"a\"\",\"\"b\"\"]\"\n");
}

#[test]
fn test_csv_with_no_records_writes_empty_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");

    write_csv(&path, &[]).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
}

// ============================================================================
// Summary
// ============================================================================

#[test]
fn test_summary_counts_and_fields() {
    let summary = summarize(&sample_records());
    assert_eq!(summary.total_records, 3);
    assert_eq!(summary.fields, vec!["name", "state", "years"]);

    // Only interesting fields present in the first record get profiled
    assert_eq!(summary.field_stats.len(), 1);
    let state = &summary.field_stats[0];
    assert_eq!(state.field, "state");
    assert_eq!(state.distinct_values, 2);
    assert_eq!(state.samples, vec!["CA", "TX"]);
}

#[test]
fn test_summary_samples_capped_at_five() {
    let records: Vec<Value> = (0..20).map(|i| json!({"status": format!("s{i}")})).collect();
    let summary = summarize(&records);

    let status = &summary.field_stats[0];
    assert_eq!(status.distinct_values, 20);
    assert_eq!(status.samples.len(), 5);
    // First-seen order
    assert_eq!(status.samples[0], "s0");
    assert_eq!(status.samples[4], "s4");
}

#[test]
fn test_summary_skips_empty_values() {
    let records = vec![
        json!({"state": "CA"}),
        json!({"state": null}),
        json!({"state": ""}),
        json!({"state": "CA"}),
    ];
    let summary = summarize(&records);
    assert_eq!(summary.field_stats[0].distinct_values, 1);
}

#[test]
fn test_summary_of_empty_set() {
    let summary = summarize(&[]);
    assert_eq!(summary.total_records, 0);
    assert!(summary.fields.is_empty());
    assert!(summary.field_stats.is_empty());
}

// ============================================================================
// File naming
// ============================================================================

#[test]
fn test_timestamped_filename_shape() {
    let name = timestamped_filename("members", "json");
    assert!(name.starts_with("members_"));
    assert!(name.ends_with(".json"));
    // members_YYYYMMDD_HHMMSS.json
    assert_eq!(name.len(), "members_".len() + 15 + ".json".len());
}
