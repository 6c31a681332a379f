//! Lenient field access over semi-structured feed records.
//!
//! Every getter returns `None` (or an empty/false value) when a path is
//! missing or has an unexpected type, so one absent sub-field never fails
//! the whole record. Numbers and numeric strings are interchangeable.

use serde_json::Value;

/// Walk an object path.
pub fn at<'a>(record: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(record, |value, key| value.get(key))
}

/// Non-blank text. Numbers are rendered as text.
pub fn text(record: &Value, path: &[&str]) -> Option<String> {
    match at(record, path)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Floating point value from a number or numeric string.
pub fn number(record: &Value, path: &[&str]) -> Option<f64> {
    match at(record, path)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Integer value from a number or numeric string. Fractions are truncated.
pub fn integer(record: &Value, path: &[&str]) -> Option<i64> {
    match at(record, path)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f as i64))
        }
        _ => None,
    }
}

/// Boolean flag; missing or malformed means `false`.
pub fn flag(record: &Value, path: &[&str]) -> bool {
    match at(record, path) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        _ => false,
    }
}

/// Array elements; anything else is empty.
pub fn array<'a>(record: &'a Value, path: &[&str]) -> &'a [Value] {
    match at(record, path) {
        Some(Value::Array(items)) => items.as_slice(),
        _ => &[],
    }
}
