//! Typed error handling for the order client
//!
//! # Error Categories
//!
//! - [`ValidationError`]: input (or a response) failed the order schema; carries
//!   every individual [`ValidationIssue`]
//! - [`TransitionError`]: a status update is not a listed lifecycle transition
//! - [`OrderClientError`]: everything a client operation can fail with,
//!   including transport failures surfaced unchanged
//! - [`ApiError`]: errors returned by the in-memory fake API
//!
//! # Example
//!
//! ```rust,ignore
//! match client.update_status(&order, OrderStatus::Sent).await {
//!     Ok(order) => println!("now {}", order.status),
//!     Err(OrderClientError::Transition(e)) => eprintln!("{}", e),
//!     Err(OrderClientError::Validation(e)) => {
//!         for issue in e.issues() {
//!             eprintln!("{}: {}", issue.path_string(), issue.message);
//!         }
//!     }
//!     Err(e) => eprintln!("request failed: {}", e),
//! }
//! ```

use crate::core::status::OrderStatus;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Validation Errors
// =============================================================================

/// One step of a path into the validated structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Object key
    Key(String),
    /// Array index
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => f.write_str(key),
            PathSegment::Index(index) => write!(f, "{}", index),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// Machine-readable kind of a validation issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    /// Missing value or wrong JSON type
    InvalidType,
    /// Number or sequence below its minimum
    TooSmall,
    /// Failed a refinement (e.g. CPF format)
    Custom,
    /// String that is not a valid date
    InvalidDate,
    /// Value outside a fixed enumeration
    InvalidEnumValue,
}

impl IssueCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCode::InvalidType => "invalid_type",
            IssueCode::TooSmall => "too_small",
            IssueCode::Custom => "custom",
            IssueCode::InvalidDate => "invalid_date",
            IssueCode::InvalidEnumValue => "invalid_enum_value",
        }
    }
}

/// A single field violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Path into the input; empty for the root value
    pub path: Vec<PathSegment>,
    pub code: IssueCode,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: Vec<PathSegment>, code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            path,
            code,
            message: message.into(),
        }
    }

    /// Dot-joined path, e.g. `seller.cpf` or `items.0.ammount`
    pub fn path_string(&self) -> String {
        self.path
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path_string(), self.message)
        }
    }
}

/// Input failed schema checks; lists every violation found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    issues: Vec<ValidationIssue>,
}

impl ValidationError {
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        Self { issues }
    }

    /// Error with a single issue
    pub fn single(path: Vec<PathSegment>, code: IssueCode, message: impl Into<String>) -> Self {
        Self::new(vec![ValidationIssue::new(path, code, message)])
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<ValidationIssue> {
        self.issues
    }

    /// Find the first issue reported at `path` (dot-joined)
    pub fn issue_at(&self, path: &str) -> Option<&ValidationIssue> {
        self.issues.iter().find(|issue| issue.path_string() == path)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msgs: Vec<String> = self.issues.iter().map(ToString::to_string).collect();
        write!(f, "Invalid data: {}", msgs.join(", "))
    }
}

impl std::error::Error for ValidationError {}

// =============================================================================
// Transition Errors
// =============================================================================

/// Requested status is not an outgoing edge of the current status
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot update status from {from} to {to}")]
pub struct TransitionError {
    pub from: OrderStatus,
    pub to: OrderStatus,
}

// =============================================================================
// Client Errors
// =============================================================================

/// Errors returned by [`OrderService`](crate::core::service::OrderService) operations
#[derive(Debug, thiserror::Error)]
pub enum OrderClientError {
    /// Request data failed validation; no request was sent
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Illegal status transition; no request was sent
    #[error(transparent)]
    Transition(#[from] TransitionError),

    /// The server answered with something that is not an order
    #[error("invalid response from order API: {0}")]
    InvalidResponse(ValidationError),

    /// Caller input could not be encoded as JSON
    #[error("failed to encode request data: {0}")]
    Encode(#[from] serde_json::Error),

    /// Network or transport failure, unchanged
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl OrderClientError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            OrderClientError::Validation(_) => "VALIDATION_ERROR",
            OrderClientError::Transition(_) => "TRANSITION_ERROR",
            OrderClientError::InvalidResponse(_) => "INVALID_RESPONSE",
            OrderClientError::Encode(_) => "ENCODE_ERROR",
            OrderClientError::Transport(_) => "TRANSPORT_ERROR",
        }
    }

    /// Validation issues, for request or response validation failures
    pub fn issues(&self) -> Option<&[ValidationIssue]> {
        match self {
            OrderClientError::Validation(e) | OrderClientError::InvalidResponse(e) => {
                Some(e.issues())
            }
            _ => None,
        }
    }
}

/// A specialized Result type for order client operations
pub type OrderResult<T> = Result<T, OrderClientError>;

// =============================================================================
// Fake API Errors
// =============================================================================

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

/// Errors produced by the fake API handlers
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Order with id '{id}' not found")]
    NotFound { id: u64 },

    #[error("Invalid request body: {message}")]
    InvalidBody { message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::InvalidBody { .. } => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::NotFound { .. } => "ORDER_NOT_FOUND",
            ApiError::InvalidBody { .. } => "INVALID_BODY",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}
