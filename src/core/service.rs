//! Service trait for order operations

use crate::core::error::OrderResult;
use crate::core::order::Order;
use crate::core::status::OrderStatus;
use async_trait::async_trait;
use serde::Serialize;

/// Contract of the sales order service
///
/// Inputs are raw caller data: anything that serializes to JSON, typically a
/// [`CreationOrderData`](crate::core::order::CreationOrderData), an [`Order`],
/// or a `serde_json::Value` straight from a form. Implementations validate
/// the input before doing any I/O.
#[async_trait]
pub trait OrderService: Send + Sync {
    /// Create an order
    ///
    /// The new order always starts as [`OrderStatus::WaitingPayment`].
    async fn create<T>(&self, data: &T) -> OrderResult<Order>
    where
        T: Serialize + Sync + ?Sized;

    /// Move an order to `updated_status`
    ///
    /// Permitted changes:
    /// - `WAITING_PAYMENT` -> `PAYMENT_APPROVED`
    /// - `WAITING_PAYMENT` -> `CANCELED`
    /// - `PAYMENT_APPROVED` -> `SENT`
    /// - `PAYMENT_APPROVED` -> `CANCELED`
    /// - `SENT` -> `DELIVERED`
    async fn update_status<T>(&self, order: &T, updated_status: OrderStatus) -> OrderResult<Order>
    where
        T: Serialize + Sync + ?Sized;

    /// Look up an order by its identifier
    ///
    /// A missing or malformed order yields `Ok(None)`; only an invalid `id`
    /// or a transport failure is an error.
    async fn get_by_id<I>(&self, id: &I) -> OrderResult<Option<Order>>
    where
        I: Serialize + Sync + ?Sized;
}
