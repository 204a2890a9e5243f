//! HTTP implementation of [`OrderService`]
//!
//! Every operation validates its input first and sends at most one request.
//! There is no retry, queueing or extra timeout: transport failures are
//! returned to the caller unchanged.

use crate::config::ClientConfig;
use crate::core::error::{
    IssueCode, OrderClientError, OrderResult, TransitionError, ValidationError,
};
use crate::core::order::{CreationOrderData, Order};
use crate::core::service::OrderService;
use crate::core::status::OrderStatus;
use crate::core::validation::schema;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde_json::Value;

/// Message reported when an update targets an order without identifier
pub const MISSING_ORDER_ID: &str = "sale identifier not found";

/// Body of `POST /orders`
#[derive(Serialize)]
struct CreateOrderRequest<'a> {
    #[serde(flatten)]
    data: &'a CreationOrderData,
    status: OrderStatus,
}

/// Order API client over HTTP
///
/// Cheap to clone; clones share the underlying connection pool.
///
/// # Example
///
/// ```rust,ignore
/// let client = OrderClient::new("http://localhost:3000");
/// let order = client.create(&data).await?;
/// let order = client.update_status(&order, OrderStatus::PaymentApproved).await?;
/// ```
#[derive(Debug, Clone)]
pub struct OrderClient {
    base_url: String,
    http: reqwest::Client,
}

impl OrderClient {
    /// Create a client for the API rooted at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(base_url, reqwest::Client::new())
    }

    /// Create a client reusing an existing `reqwest::Client`
    pub fn with_http_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn orders_url(&self) -> String {
        format!("{}/orders", self.base_url)
    }

    fn order_url(&self, id: u64) -> String {
        format!("{}/orders/{}", self.base_url, id)
    }
}

/// Read a response body as JSON and validate it as an order
async fn read_order(response: reqwest::Response) -> OrderResult<Order> {
    let status = response.status();
    let body = response.bytes().await?;

    let value: Value = serde_json::from_slice(&body).map_err(|e| {
        OrderClientError::InvalidResponse(ValidationError::single(
            vec![],
            IssueCode::InvalidType,
            format!("response body is not JSON (HTTP {}): {}", status, e),
        ))
    })?;

    Order::parse(&value).map_err(|e| {
        tracing::warn!(http_status = %status, error = %e, "Order API returned an invalid order");
        OrderClientError::InvalidResponse(e)
    })
}

#[async_trait]
impl OrderService for OrderClient {
    async fn create<T>(&self, data: &T) -> OrderResult<Order>
    where
        T: Serialize + Sync + ?Sized,
    {
        let input = serde_json::to_value(data)?;
        let data = CreationOrderData::parse(&input)?;

        let body = CreateOrderRequest {
            data: &data,
            status: OrderStatus::INITIAL,
        };

        tracing::debug!(seller_id = data.seller.id, items = data.items.len(), "Creating order");

        let response = self.http.post(self.orders_url()).json(&body).send().await?;
        let order = read_order(response).await?;

        tracing::info!(order_id = order.id, "Order created");
        Ok(order)
    }

    async fn update_status<T>(&self, order: &T, updated_status: OrderStatus) -> OrderResult<Order>
    where
        T: Serialize + Sync + ?Sized,
    {
        let mut payload = serde_json::to_value(order)?;

        let id = schema::order_id(payload.get("id"), MISSING_ORDER_ID)?;

        let current = match payload.get("status") {
            Some(Value::String(name)) => name.parse::<OrderStatus>().map_err(|e| {
                ValidationError::single(
                    vec!["status".into()],
                    IssueCode::InvalidEnumValue,
                    e.to_string(),
                )
            })?,
            _ => {
                return Err(ValidationError::single(
                    vec!["status".into()],
                    IssueCode::InvalidType,
                    "Required",
                )
                .into());
            }
        };

        if !current.can_transition_to(updated_status) {
            return Err(TransitionError {
                from: current,
                to: updated_status,
            }
            .into());
        }

        if let Value::Object(fields) = &mut payload {
            fields.insert("status".to_string(), serde_json::to_value(updated_status)?);
        }

        tracing::debug!(order_id = id, from = %current, to = %updated_status, "Updating order status");

        let response = self.http.put(self.order_url(id)).json(&payload).send().await?;
        read_order(response).await
    }

    async fn get_by_id<I>(&self, id: &I) -> OrderResult<Option<Order>>
    where
        I: Serialize + Sync + ?Sized,
    {
        let id = serde_json::to_value(id)?;
        let id = schema::order_id(Some(&id), "Required")?;

        let response = self
            .http
            .get(self.order_url(id))
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(order_id = id, http_status = %status, "Order not found");
            return Ok(None);
        }

        let body = response.bytes().await?;
        let order = serde_json::from_slice::<Value>(&body)
            .ok()
            .and_then(|value| match Order::parse(&value) {
                Ok(order) => Some(order),
                Err(e) => {
                    tracing::warn!(order_id = id, error = %e, "Ignoring malformed order");
                    None
                }
            });

        Ok(order)
    }
}
