//! Declarative order schemas
//!
//! A [`Shape`] walks a JSON value, applies coercion filters, runs validators
//! and records every violation at its path. Unknown object keys are dropped.
//! Only when no issue was recorded is the normalized value deserialized into
//! the target type.

use super::filters::{self, type_mismatch};
use super::validators::{self, Check, Violation};
use crate::core::error::{IssueCode, PathSegment, ValidationError, ValidationIssue};
use crate::core::status::OrderStatus;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::OnceLock;

type Filter = Box<dyn Fn(Value) -> Result<Value, Violation> + Send + Sync>;

/// Shape of one node in a schema
pub enum Shape {
    Number { filter: Option<Filter>, checks: Vec<Check> },
    Text { checks: Vec<Check> },
    Date { filter: Filter },
    Status,
    Array { item: Box<Shape>, checks: Vec<Check> },
    Object(Vec<(&'static str, Shape)>),
}

impl Shape {
    /// Validate `value` and deserialize the normalized result
    pub fn parse<T: DeserializeOwned>(&self, value: &Value) -> Result<T, ValidationError> {
        let mut path = Vec::new();
        let mut issues = Vec::new();
        let normalized = self.check(Some(value), &mut path, &mut issues);

        match normalized {
            Some(normalized) if issues.is_empty() => serde_json::from_value(normalized)
                .map_err(|e| ValidationError::single(vec![], IssueCode::InvalidType, e.to_string())),
            _ => Err(ValidationError::new(issues)),
        }
    }

    fn check(
        &self,
        value: Option<&Value>,
        path: &mut Vec<PathSegment>,
        issues: &mut Vec<ValidationIssue>,
    ) -> Option<Value> {
        let Some(value) = value else {
            issues.push(ValidationIssue::new(
                path.clone(),
                IssueCode::InvalidType,
                "Required",
            ));
            return None;
        };

        let result = match self {
            Shape::Number { filter, checks } => {
                let value = match filter {
                    Some(filter) => filter(value.clone()),
                    None if value.is_number() => Ok(value.clone()),
                    None => Err(type_mismatch("number", value)),
                };
                value.and_then(|v| run_checks(checks, v))
            }
            Shape::Text { checks } => {
                if value.is_string() {
                    run_checks(checks, value.clone())
                } else {
                    Err(type_mismatch("string", value))
                }
            }
            Shape::Date { filter } => filter(value.clone()),
            Shape::Status => match value.as_str().map(str::parse::<OrderStatus>) {
                Some(Ok(_)) => Ok(value.clone()),
                _ => Err((
                    IssueCode::InvalidEnumValue,
                    format!(
                        "expected one of {}",
                        OrderStatus::ALL.map(OrderStatus::as_str).join(" | ")
                    ),
                )),
            },
            Shape::Array { item, checks } => {
                let Some(elements) = value.as_array() else {
                    return report(type_mismatch("array", value), path, issues);
                };
                // Length checks are reported alongside element issues
                if let Err(violation) = run_checks(checks, value.clone()) {
                    report(violation, path, issues);
                }

                let before = issues.len();
                let mut normalized = Vec::with_capacity(elements.len());
                for (index, element) in elements.iter().enumerate() {
                    path.push(index.into());
                    if let Some(v) = item.check(Some(element), path, issues) {
                        normalized.push(v);
                    }
                    path.pop();
                }
                if issues.len() > before {
                    return None;
                }
                Ok(Value::Array(normalized))
            }
            Shape::Object(fields) => {
                let Some(object) = value.as_object() else {
                    return report(type_mismatch("object", value), path, issues);
                };

                let before = issues.len();
                let mut normalized = Map::new();
                for (name, shape) in fields {
                    path.push(PathSegment::from(*name));
                    if let Some(v) = shape.check(object.get(*name), path, issues) {
                        normalized.insert((*name).to_string(), v);
                    }
                    path.pop();
                }
                if issues.len() > before {
                    return None;
                }
                Ok(Value::Object(normalized))
            }
        };

        match result {
            Ok(value) => Some(value),
            Err(violation) => report(violation, path, issues),
        }
    }
}

fn run_checks(checks: &[Check], value: Value) -> Result<Value, Violation> {
    for check in checks {
        check(&value)?;
    }
    Ok(value)
}

fn report(
    (code, message): Violation,
    path: &[PathSegment],
    issues: &mut Vec<ValidationIssue>,
) -> Option<Value> {
    issues.push(ValidationIssue::new(path.to_vec(), code, message));
    None
}

fn check(f: impl Fn(&Value) -> Result<(), Violation> + Send + Sync + 'static) -> Check {
    Box::new(f)
}

fn filter(f: impl Fn(Value) -> Result<Value, Violation> + Send + Sync + 'static) -> Filter {
    Box::new(f)
}

fn item_shape() -> Shape {
    Shape::Object(vec![
        ("description", Shape::Text { checks: vec![] }),
        (
            "ammount",
            Shape::Number {
                filter: Some(filter(filters::to_number())),
                checks: vec![],
            },
        ),
    ])
}

/// Schema for order creation input (before the server assigns id and status)
pub fn creation_order() -> &'static Shape {
    static SCHEMA: OnceLock<Shape> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        Shape::Object(vec![
            (
                "seller",
                Shape::Object(vec![
                    (
                        "id",
                        Shape::Number {
                            filter: None,
                            checks: vec![
                                check(validators::positive("seller id must be positive")),
                                check(validators::identifier()),
                            ],
                        },
                    ),
                    (
                        "cpf",
                        Shape::Text {
                            checks: vec![check(validators::cpf())],
                        },
                    ),
                    (
                        "name",
                        Shape::Text {
                            checks: vec![check(validators::non_empty(
                                "seller name must not be empty",
                            ))],
                        },
                    ),
                ]),
            ),
            (
                "date",
                Shape::Date {
                    filter: filter(filters::to_date(false)),
                },
            ),
            (
                "items",
                Shape::Array {
                    item: Box::new(item_shape()),
                    checks: vec![check(validators::min_items(
                        1,
                        "an order must have at least 1 item.",
                    ))],
                },
            ),
        ])
    })
}

/// Schema for a persisted order as returned by the API
pub fn order() -> &'static Shape {
    static SCHEMA: OnceLock<Shape> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        Shape::Object(vec![
            (
                "id",
                Shape::Number {
                    filter: None,
                    checks: vec![check(validators::identifier())],
                },
            ),
            (
                "seller",
                Shape::Object(vec![
                    (
                        "id",
                        Shape::Number {
                            filter: None,
                            checks: vec![check(validators::identifier())],
                        },
                    ),
                    ("cpf", Shape::Text { checks: vec![] }),
                    ("name", Shape::Text { checks: vec![] }),
                ]),
            ),
            (
                "date",
                Shape::Date {
                    filter: filter(filters::to_date(true)),
                },
            ),
            (
                "items",
                Shape::Array {
                    item: Box::new(item_shape()),
                    checks: vec![],
                },
            ),
            ("status", Shape::Status),
        ])
    })
}

/// Read a numeric order identifier from caller input
///
/// `missing` is the message reported when there is no value at all.
pub fn order_id(value: Option<&Value>, missing: &str) -> Result<u64, ValidationError> {
    let invalid = |message: String| ValidationError::single(vec![], IssueCode::InvalidType, message);

    match value {
        None | Some(Value::Null) => Err(invalid(missing.to_string())),
        Some(Value::Number(n)) => n
            .as_u64()
            .ok_or_else(|| invalid("expected a non-negative integer identifier".to_string())),
        Some(other) => Err(invalid(format!(
            "expected number, received {}",
            filters::kind(other)
        ))),
    }
}
