//! Log-safe payload summaries.
//!
//! Personal fields are replaced by [`REDACTED`], long strings are cut at
//! [`MAX_LOG_VALUE_CHARS`], arrays keep their first [`MAX_LOG_ARRAY_ITEMS`]
//! entries and nesting stops at [`MAX_LOG_DEPTH`].

use serde_json::{Map, Value};

pub const REDACTED: &str = "[REDACTED]";
pub const TRUNCATED_DEPTH: &str = "[TRUNCATED_DEPTH]";
pub const MAX_LOG_VALUE_CHARS: usize = 120;
pub const MAX_LOG_ARRAY_ITEMS: usize = 10;
pub const MAX_LOG_DEPTH: usize = 4;

/// Keys whose values never reach the logs.
const REDACTED_KEYS: &[&str] = &[
    "email",
    "phone",
    "contact",
    "contact_name",
    "name",
    "description",
    "notes",
    "company",
    "linkedin",
    "csv",
    "csv_content",
];

fn should_redact(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    REDACTED_KEYS.contains(&key.as_str())
}

/// Cut `value` to [`MAX_LOG_VALUE_CHARS`] characters, marking the cut with `…`.
pub fn truncate_log_value(value: &str) -> String {
    if value.chars().count() > MAX_LOG_VALUE_CHARS {
        let truncated: String = value.chars().take(MAX_LOG_VALUE_CHARS).collect();
        format!("{truncated}…")
    } else {
        value.to_string()
    }
}

fn sanitize(key: &str, value: &Value, depth: usize) -> Value {
    if depth > MAX_LOG_DEPTH {
        return Value::String(TRUNCATED_DEPTH.to_string());
    }

    match value {
        Value::Object(map) => {
            let mut out = Map::new();
            for (child_key, item) in map {
                let sanitized = if should_redact(child_key) {
                    Value::String(REDACTED.to_string())
                } else {
                    sanitize(child_key, item, depth + 1)
                };
                out.insert(child_key.clone(), sanitized);
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(
            items
                .iter()
                .take(MAX_LOG_ARRAY_ITEMS)
                .map(|item| sanitize(key, item, depth + 1))
                .collect(),
        ),
        Value::String(_) if should_redact(key) => Value::String(REDACTED.to_string()),
        Value::String(text) => Value::String(truncate_log_value(text)),
        other => other.clone(),
    }
}

/// Build a compact, redacted JSON summary of named call arguments.
///
/// ```
/// use leadbook_core::log_redaction::build_payload_summary;
/// use serde_json::json;
///
/// let summary = build_payload_summary(&[("id", json!(4)), ("email", json!("a@b.co"))]);
/// assert_eq!(summary, r#"{"email":"[REDACTED]","id":4}"#);
/// ```
pub fn build_payload_summary(pairs: &[(&str, Value)]) -> String {
    let mut payload = Map::new();
    for (key, value) in pairs {
        let sanitized = if should_redact(key) {
            Value::String(REDACTED.to_string())
        } else {
            sanitize(key, value, 0)
        };
        payload.insert((*key).to_string(), sanitized);
    }
    truncate_log_value(&Value::Object(payload).to_string())
}
