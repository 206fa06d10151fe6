//! Diagnostic emission for API failures.
//!
//! Classification only logs; callers keep the original error and branch on
//! [`ApiError::status`].

use crate::error::ApiError;
use serde_json::Value;

/// Emit one diagnostic record per error entry carried by `error`
///
/// Returns the number of records emitted.
pub fn classify(error: &ApiError) -> usize {
    match error {
        ApiError::Status { status, url, body } => {
            log::error!("API request to {} failed with status {}", url, status);
            classify_payload(body)
        }
        other => {
            log::error!("----------------- API ERROR -----------------");
            log::error!("{}", other);
            log::error!("----------------- END ERROR -----------------");
            1
        }
    }
}

/// Emit diagnostics for a raw error payload
///
/// Arrays yield one record per element. Jira-style objects
/// (`errorMessages` / `errors`) yield one record per message. Anything
/// else is a single record.
pub fn classify_payload(payload: &Value) -> usize {
    let records = error_records(payload);
    for record in &records {
        log::error!("----------------- API ERROR -----------------");
        log::error!("{}", record);
        log::error!("----------------- END ERROR -----------------");
    }
    records.len()
}

/// Flatten a payload into printable error records
pub fn error_records(payload: &Value) -> Vec<String> {
    match payload {
        Value::Array(entries) => entries.iter().map(render_entry).collect(),
        Value::Object(map) if map.contains_key("errorMessages") || map.contains_key("errors") => {
            let mut records: Vec<String> = map
                .get("errorMessages")
                .and_then(Value::as_array)
                .map(|messages| messages.iter().map(render_entry).collect())
                .unwrap_or_default();

            if let Some(Value::Object(fields)) = map.get("errors") {
                records.extend(
                    fields
                        .iter()
                        .map(|(field, message)| format!("{}: {}", field, render_entry(message))),
                );
            }

            if records.is_empty() {
                records.push(payload.to_string());
            }
            records
        }
        other => vec![render_entry(other)],
    }
}

fn render_entry(entry: &Value) -> String {
    match entry {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
