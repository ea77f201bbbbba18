//! JSON output formatting.

use serde_json::json;

/// Format a value as a single JSON line.
pub fn format_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|error| json!({ "error": error.to_string() }).to_string())
}

/// Format an error as a JSON object.
pub fn format_error(error: &dyn std::error::Error) -> String {
    json!({ "error": error.to_string() }).to_string()
}
