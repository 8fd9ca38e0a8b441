//! Descriptions of received values for violation reports.
//!
//! Descriptions are short and deterministic: long strings are cut to a
//! fixed number of characters and containers report only their size, so
//! a violation never echoes a whole payload back to the caller.

use serde_json::Value;

/// Longest string prefix echoed back in a description.
const MAX_ECHO_CHARS: usize = 32;

/// Returns the JSON type name of `value`.
#[must_use]
pub const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Describes a received value; `None` means the field was absent.
#[must_use]
pub fn describe(value: Option<&Value>) -> String {
    match value {
        None => "absent".to_owned(),
        Some(Value::Null) => "null".to_owned(),
        Some(Value::Bool(b)) => format!("boolean {b}"),
        Some(Value::Number(n)) => format!("number {n}"),
        Some(Value::String(s)) => describe_string(s),
        Some(Value::Array(items)) => format!("array of {} item(s)", items.len()),
        Some(Value::Object(map)) => format!("object with {} field(s)", map.len()),
    }
}

fn describe_string(s: &str) -> String {
    let mut chars = s.chars();
    let head: String = chars.by_ref().take(MAX_ECHO_CHARS).collect();
    if chars.next().is_some() {
        format!("string {head:?}…")
    } else {
        format!("string {head:?}")
    }
}
