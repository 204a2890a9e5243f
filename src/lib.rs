//! # order-client
//!
//! A validating HTTP client for sales orders.
//!
//! ## Features
//!
//! - **Validated Requests**: caller input is checked against one shared schema
//!   before any request; every violated field is reported with its path
//! - **Lifecycle Enforcement**: status changes follow a fixed, one-directional
//!   transition table checked client-side
//! - **Trusted Responses**: server payloads are validated (with number and
//!   date coercion) before they reach the caller
//! - **Soft Lookups**: `get_by_id` turns a missing or malformed order into `None`
//! - **Fake API**: an in-memory axum server with the same three routes, for
//!   local development and end-to-end tests
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use order_client::prelude::*;
//!
//! let client = OrderClient::new("http://localhost:3000");
//!
//! let order = client
//!     .create(&CreationOrderData::new(
//!         Seller { id: 1, cpf: "123.456.789-01".into(), name: "John Doe".into() },
//!         Utc::now(),
//!         vec![OrderItem { description: "Item 1".into(), ammount: 2.0 }],
//!     ))
//!     .await?;
//! assert_eq!(order.status, OrderStatus::WaitingPayment);
//!
//! let order = client.update_status(&order, OrderStatus::PaymentApproved).await?;
//! let found = client.get_by_id(&order.id).await?;
//! ```

pub mod client;
pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        error::{
            ApiError, IssueCode, OrderClientError, OrderResult, PathSegment, TransitionError,
            ValidationError, ValidationIssue,
        },
        order::{CreationOrderData, Order, OrderItem, Seller},
        service::OrderService,
        status::OrderStatus,
        validation::{CPF_PATTERN, is_valid_cpf},
    };

    // === Client ===
    pub use crate::client::OrderClient;

    // === Config ===
    pub use crate::config::{AppConfig, ClientConfig, FakeApiConfig};

    // === Fake API ===
    pub use crate::server::FakeApiServer;
    pub use crate::storage::InMemoryOrderStore;

    // === External dependencies ===
    pub use chrono::{DateTime, Utc};
}
