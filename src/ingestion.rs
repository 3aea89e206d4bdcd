use crate::error::{DatasetError, Result};
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Reads a dataset file holding either a bare JSON array or an object
/// wrapping the array under `data` or `entries`. The shape is validated in
/// one step before any record is deserialized; anything else is rejected
/// as [`DatasetError::UnrecognizedShape`].
pub fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&content).map_err(|source| {
        DatasetError::MalformedInput {
            path: path.display().to_string(),
            source,
        }
    })?;

    let array = extract_array(value).ok_or_else(|| DatasetError::UnrecognizedShape {
        path: path.display().to_string(),
    })?;

    let records: Vec<T> =
        serde_json::from_value(Value::Array(array)).map_err(|source| {
            DatasetError::MalformedInput {
                path: path.display().to_string(),
                source,
            }
        })?;

    debug!("Read {} records from {}", records.len(), path.display());
    Ok(records)
}

fn extract_array(value: Value) -> Option<Vec<Value>> {
    match value {
        Value::Array(array) => Some(array),
        Value::Object(mut map) => match map.remove("data").or_else(|| map.remove("entries")) {
            Some(Value::Array(array)) => Some(array),
            _ => None,
        },
        _ => None,
    }
}

/// Writes records as pretty-printed JSON with 2-space indentation, the
/// format every structured output uses.
pub fn write_pretty_json<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json)?;
    debug!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

/// Writes newline-separated text lines (the unique-pairs export format).
pub fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
    fs::write(path, lines.join("\n"))?;
    debug!("Wrote {} lines to {}", lines.len(), path.display());
    Ok(())
}

/// Key fields must be present and non-blank before they take part in a
/// join or dedup key. Empty-string fallbacks are not allowed anywhere.
pub(crate) fn require_key_field(value: &str, index: usize, name: &'static str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DatasetError::MissingRequiredField { index, name });
    }
    Ok(())
}
