//! Response shape normalization
//!
//! The listing endpoint does not guarantee a response shape: most pages come
//! back as `{"data": [...]}`, but bare arrays and single objects have been
//! observed. Normalization happens exactly once, immediately after a
//! successful fetch, so downstream code only ever sees a flat record list.

use serde_json::Value;

/// Flatten a response body into a list of records.
///
/// - A mapping containing `record_field` yields that field's sequence
///   (a non-array field value becomes a single record).
/// - A bare array is used directly.
/// - Null and empty mappings yield no records.
/// - Anything else is treated as a single record.
pub fn normalize_records(body: Value, record_field: &str) -> Vec<Value> {
    match body {
        Value::Object(mut map) if map.contains_key(record_field) => {
            match map.remove(record_field) {
                Some(Value::Array(records)) => records,
                Some(Value::Null) | None => Vec::new(),
                Some(single) => vec![single],
            }
        }
        Value::Array(records) => records,
        Value::Null => Vec::new(),
        Value::Object(map) if map.is_empty() => Vec::new(),
        single => vec![single],
    }
}

#[cfg(test)]
mod tests;
