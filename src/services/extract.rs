// src/services/extract.rs

//! Field extractors for raw column values.
//!
//! Every extractor tolerates a missing or placeholder `text` and a missing,
//! malformed or non-JSON `value`. Parse failures fall back locally and are
//! only reported at trace level.

use serde_json::Value;

use crate::models::{PLACEHOLDER, RawColumn, Status};
use crate::utils::{clean_url, format_date};

/// Keys whose presence in a value marks it as mirrored from another board.
const LINKED_KEYS: &[&str] = &["linkedPulseIds", "changed_at", "mirrored_value"];

/// Decode a column's JSON value, if it has one.
pub fn value_json(column: &RawColumn) -> Option<Value> {
    let raw = column.raw_value()?;
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::trace!(column = %column.id, "Value is not JSON: {}", e);
            None
        }
    }
}

/// Whether the column mirrors data from another board.
pub fn is_linked(column: &RawColumn) -> bool {
    if column.kind().is_linked() {
        return true;
    }
    match value_json(column) {
        Some(Value::Object(map)) => LINKED_KEYS.iter().any(|k| map.contains_key(*k)),
        _ => false,
    }
}

/// Pre-format date string of a column, before display formatting.
///
/// Comparisons against "today" parse this string rather than the formatted
/// output.
pub fn extract_raw_date(column: &RawColumn) -> Option<String> {
    let json = value_json(column);

    if is_linked(column) {
        if let Some(Value::Object(map)) = &json {
            if let Some(mirrored) = non_empty_str(map.get("mirrored_value")) {
                return Some(mirrored.to_string());
            }
            if let Some(Value::Array(ids)) = map.get("linkedPulseIds") {
                if ids.is_empty() {
                    tracing::trace!(column = %column.id, "Linked column has no linked items");
                    return None;
                }
            }
        }
        column.display_text()?;
    }

    if let Some(text) = column.display_text() {
        return Some(text.to_string());
    }

    match json {
        Some(Value::Object(map)) => non_empty_str(map.get("date"))
            .or_else(|| non_empty_str(map.get("text")))
            .map(str::to_string),
        Some(Value::String(s)) if is_present(&s) => Some(s),
        Some(_) => None,
        None => column.raw_value().map(str::to_string),
    }
}

/// Formatted date of a column, or `-`.
pub fn extract_date(column: &RawColumn) -> String {
    extract_raw_date(column)
        .map(|raw| format_date(&raw))
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Status of a status-like column; defaults to `VALID`.
pub fn extract_status(column: &RawColumn) -> Status {
    if let Some(text) = column.display_text() {
        return Status::from_label(text);
    }

    match value_json(column) {
        Some(Value::Object(map)) => {
            if let Some(label) =
                non_empty_str(map.get("label")).or_else(|| non_empty_str(map.get("text")))
            {
                return Status::from_label(label);
            }
            match map.get("index") {
                Some(index) => index_of(index).map_or(Status::Unknown, Status::from_index),
                None => Status::Valid,
            }
        }
        // Valid JSON without a label or index, including bare strings.
        Some(_) => Status::Valid,
        None => column
            .raw_value()
            .map_or(Status::Valid, Status::from_label),
    }
}

/// Cleaned document link of a column, or `#`.
pub fn extract_link(column: &RawColumn) -> String {
    let raw = match column.display_text() {
        Some(text) => text.to_string(),
        None => match value_json(column) {
            Some(Value::Object(map)) => non_empty_str(map.get("url"))
                .unwrap_or_default()
                .to_string(),
            Some(Value::String(s)) => s,
            Some(_) => String::new(),
            None => column.raw_value().unwrap_or_default().to_string(),
        },
    };
    clean_url(&raw)
}

fn index_of(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| is_present(s))
}

fn is_present(s: &str) -> bool {
    !s.trim().is_empty() && s.trim() != PLACEHOLDER
}
