//! JSON value helpers shared by the filters

use serde_json::Value as JsonValue;

/// Check whether a request value counts as empty.
///
/// Null, `""` and `false` are empty. Arrays and objects are empty when every
/// element is empty, recursively. Numbers are never empty, so `0` and `"0"`
/// are real values.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use search_filters::utils::value::is_blank;
///
/// assert!(is_blank(&json!(["", null, []])));
/// assert!(!is_blank(&json!("0")));
/// ```
pub fn is_blank(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => true,
        JsonValue::Bool(b) => !b,
        JsonValue::Number(_) => false,
        JsonValue::String(s) => s.is_empty(),
        JsonValue::Array(items) => items.iter().all(is_blank),
        JsonValue::Object(map) => map.values().all(is_blank),
    }
}

/// Arrays and objects both count as multi-valued input
pub fn is_array_shaped(value: &JsonValue) -> bool {
    matches!(value, JsonValue::Array(_) | JsonValue::Object(_))
}

/// Flatten an array-shaped value into its elements; scalars yield themselves
pub fn elements(value: &JsonValue) -> Vec<&JsonValue> {
    match value {
        JsonValue::Array(items) => items.iter().collect(),
        JsonValue::Object(map) => map.values().collect(),
        other => vec![other],
    }
}

/// Interpret a request value as a boolean flag.
///
/// Returns `None` for values that are neither a recognised true nor false
/// spelling.
pub fn parse_flag(value: &JsonValue) -> Option<bool> {
    match value {
        JsonValue::Bool(b) => Some(*b),
        JsonValue::Number(n) => match n.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        JsonValue::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Render a scalar for display (strings without quotes)
pub fn display_scalar(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}
