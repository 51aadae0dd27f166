//! Resume normalization.
//!
//! Cleans an uploaded resume before it is published to the search index so the
//! index mapping's field types hold regardless of what the uploader sent.

use serde_json::{Map, Value};

/// Fields mapped as keyword lists in the index.
pub const LIST_FIELDS: [&str; 5] = [
    "Skills",
    "Hobbies",
    "Languages",
    "Certifications",
    "Notable Companies",
];

/// Fields mapped as nested objects in the index.
pub const NESTED_FIELDS: [&str; 2] = ["Education", "Experience"];

/// Placeholder uploaders use for "no value".
const PLACEHOLDER: &str = "N/A";

/// Clean one resume object.
///
/// 1. List fields that are not arrays (strings included) become null.
/// 2. Nested fields keep only their object entries; no entries left, or a
///    non-array value, becomes null.
/// 3. Any top-level string equal to "N/A" (trimmed, case-insensitive) becomes null.
///
/// Absent fields stay absent. The function is idempotent.
pub fn normalize(mut record: Map<String, Value>) -> Map<String, Value> {
    for field in LIST_FIELDS {
        if let Some(value) = record.get_mut(field) {
            if !value.is_array() {
                *value = Value::Null;
            }
        }
    }

    for field in NESTED_FIELDS {
        if let Some(value) = record.get_mut(field) {
            *value = match value.take() {
                Value::Array(entries) => {
                    let objects: Vec<Value> = entries.into_iter().filter(Value::is_object).collect();
                    if objects.is_empty() {
                        Value::Null
                    } else {
                        Value::Array(objects)
                    }
                }
                _ => Value::Null,
            };
        }
    }

    for value in record.values_mut() {
        if is_placeholder(value) {
            *value = Value::Null;
        }
    }

    record
}

fn is_placeholder(value: &Value) -> bool {
    value
        .as_str()
        .is_some_and(|s| s.trim().eq_ignore_ascii_case(PLACEHOLDER))
}
