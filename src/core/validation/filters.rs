//! Coercion filters
//!
//! Filters transform a field value before its validators run. A filter that
//! cannot make sense of its input reports the violation instead.

use super::validators::Violation;
use crate::core::error::IssueCode;
use crate::core::order::wire_date;
use chrono::{DateTime, Utc};
use serde_json::{Number, Value};

/// JSON type name used in "expected X, received Y" messages
pub fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub(crate) fn type_mismatch(expected: &str, value: &Value) -> Violation {
    (
        IssueCode::InvalidType,
        format!("expected {}, received {}", expected, kind(value)),
    )
}

/// Filter: coerce numeric-looking strings to numbers
pub fn to_number() -> impl Fn(Value) -> Result<Value, Violation> + Send + Sync + Clone {
    |value: Value| match value {
        Value::Number(_) => Ok(value),
        Value::String(ref s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| type_mismatch("number", &value)),
        other => Err(type_mismatch("number", &other)),
    }
}

/// Filter: parse a date and re-emit it in wire format
///
/// Strings must be RFC 3339. With `accept_millis`, numbers are read as
/// milliseconds since the Unix epoch.
pub fn to_date(accept_millis: bool) -> impl Fn(Value) -> Result<Value, Violation> + Send + Sync + Clone {
    move |value: Value| {
        let parsed: Option<DateTime<Utc>> = match &value {
            Value::String(s) => {
                let Ok(date) = DateTime::parse_from_rfc3339(s) else {
                    return Err((IssueCode::InvalidDate, "Invalid date".to_string()));
                };
                Some(date.with_timezone(&Utc))
            }
            Value::Number(n) if accept_millis => {
                n.as_i64().and_then(DateTime::<Utc>::from_timestamp_millis)
            }
            _ => return Err(type_mismatch("date", &value)),
        };

        parsed
            .map(|date| Value::String(wire_date::format(&date)))
            .ok_or_else(|| (IssueCode::InvalidDate, "Invalid date".to_string()))
    }
}
