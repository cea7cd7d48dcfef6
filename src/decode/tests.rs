//! Tests for response normalization

use super::normalize_records;
use serde_json::json;

#[test]
fn test_object_with_data_field() {
    let body = json!({"data": [{"id": 1}, {"id": 2}], "meta": {"page": 0}});
    let records = normalize_records(body, "data");
    assert_eq!(records, vec![json!({"id": 1}), json!({"id": 2})]);
}

#[test]
fn test_bare_array() {
    let body = json!([{"id": 1}, {"id": 2}, {"id": 3}]);
    let records = normalize_records(body, "data");
    assert_eq!(records.len(), 3);
    assert_eq!(records[0], json!({"id": 1}));
}

#[test]
fn test_single_object_without_data_field() {
    let body = json!({"id": 7, "name": "single"});
    let records = normalize_records(body, "data");
    assert_eq!(records, vec![json!({"id": 7, "name": "single"})]);
}

#[test]
fn test_empty_shapes_yield_no_records() {
    assert!(normalize_records(json!({"data": []}), "data").is_empty());
    assert!(normalize_records(json!([]), "data").is_empty());
    assert!(normalize_records(json!(null), "data").is_empty());
    assert!(normalize_records(json!({}), "data").is_empty());
    assert!(normalize_records(json!({"data": null}), "data").is_empty());
}

#[test]
fn test_non_array_data_field_becomes_single_record() {
    let body = json!({"data": {"id": 1}});
    let records = normalize_records(body, "data");
    assert_eq!(records, vec![json!({"id": 1})]);
}

#[test]
fn test_custom_record_field() {
    let body = json!({"results": [{"id": 1}]});
    assert_eq!(normalize_records(body.clone(), "results").len(), 1);
    // Unknown field name: the whole mapping is one record
    assert_eq!(normalize_records(body, "data"), vec![json!({"results": [{"id": 1}]})]);
}

#[test]
fn test_within_page_order_preserved() {
    let body = json!({"data": [{"n": 3}, {"n": 1}, {"n": 2}]});
    let records = normalize_records(body, "data");
    let order: Vec<i64> = records.iter().map(|r| r["n"].as_i64().unwrap()).collect();
    assert_eq!(order, vec![3, 1, 2]);
}
