//! Core module containing the order model, lifecycle, validation and errors

pub mod error;
pub mod order;
pub mod service;
pub mod status;
pub mod validation;

pub use error::{
    ApiError, IssueCode, OrderClientError, OrderResult, PathSegment, TransitionError,
    ValidationError, ValidationIssue,
};
pub use order::{CreationOrderData, Order, OrderItem, Seller};
pub use service::OrderService;
pub use status::OrderStatus;
