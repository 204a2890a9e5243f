//! Reusable field validators
//!
//! These validators are attached to schema fields and run after the field
//! passed its type check (and any coercion filter).

use crate::core::error::IssueCode;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Issue code and message produced by a failed check
pub type Violation = (IssueCode, String);

/// Boxed validator as stored in a schema
pub type Check = Box<dyn Fn(&Value) -> Result<(), Violation> + Send + Sync>;

/// CPF format: 11 raw digits or the punctuated `000.000.000-00` form
pub const CPF_PATTERN: &str = r"^([0-9]{11}|[0-9]{3}\.[0-9]{3}\.[0-9]{3}-[0-9]{2})$";

/// Check a CPF against [`CPF_PATTERN`] (format only, no checksum)
pub fn is_valid_cpf(cpf: &str) -> bool {
    static CPF_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = CPF_REGEX.get_or_init(|| Regex::new(CPF_PATTERN).unwrap());
    regex.is_match(cpf)
}

/// Validator: number must be at least 1
pub fn positive(
    message: &'static str,
) -> impl Fn(&Value) -> Result<(), Violation> + Send + Sync + Clone {
    move |value: &Value| match value.as_f64() {
        Some(num) if num < 1.0 => Err((IssueCode::TooSmall, message.to_string())),
        _ => Ok(()),
    }
}

/// Validator: number must be a whole, non-negative identifier that fits `u64`
pub fn identifier() -> impl Fn(&Value) -> Result<(), Violation> + Send + Sync + Clone {
    |value: &Value| {
        if value.as_u64().is_some() {
            return Ok(());
        }
        let message = match value.as_f64() {
            Some(num) if num.fract() != 0.0 => "expected integer, received float",
            _ => "expected a non-negative integer identifier",
        };
        Err((IssueCode::InvalidType, message.to_string()))
    }
}

/// Validator: string must not be empty
pub fn non_empty(
    message: &'static str,
) -> impl Fn(&Value) -> Result<(), Violation> + Send + Sync + Clone {
    move |value: &Value| match value.as_str() {
        Some("") => Err((IssueCode::TooSmall, message.to_string())),
        _ => Ok(()),
    }
}

/// Validator: string must be a well-formed CPF
pub fn cpf() -> impl Fn(&Value) -> Result<(), Violation> + Send + Sync + Clone {
    |value: &Value| match value.as_str() {
        Some(s) if !is_valid_cpf(s) => Err((IssueCode::Custom, "invalid CPF".to_string())),
        _ => Ok(()),
    }
}

/// Validator: array must contain at least `min` elements
pub fn min_items(
    min: usize,
    message: &'static str,
) -> impl Fn(&Value) -> Result<(), Violation> + Send + Sync + Clone {
    move |value: &Value| match value.as_array() {
        Some(items) if items.len() < min => Err((IssueCode::TooSmall, message.to_string())),
        _ => Ok(()),
    }
}
