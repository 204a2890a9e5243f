//! Order HTTP handlers for the fake API

use crate::core::error::ApiError;
use crate::storage::{InMemoryOrderStore, OrderDocument};
use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::Value;

/// Shared state for the order handlers
#[derive(Clone)]
pub struct OrderAppState {
    pub store: InMemoryOrderStore,
}

fn into_document(payload: Value) -> Result<OrderDocument, ApiError> {
    match payload {
        Value::Object(document) => Ok(document),
        other => Err(ApiError::InvalidBody {
            message: format!("expected a JSON object, got {}", other),
        }),
    }
}

/// POST /orders
pub async fn create_order(
    State(state): State<OrderAppState>,
    Json(payload): Json<Value>,
) -> Result<Json<OrderDocument>, ApiError> {
    let order = state.store.insert(into_document(payload)?)?;

    tracing::debug!(order_id = %order["id"], "Stored new order");
    Ok(Json(order))
}

/// GET /orders/{id}
pub async fn get_order(
    State(state): State<OrderAppState>,
    Path(id): Path<u64>,
) -> Result<Json<OrderDocument>, ApiError> {
    state
        .store
        .get(id)?
        .map(Json)
        .ok_or(ApiError::NotFound { id })
}

/// PUT /orders/{id}
pub async fn update_order(
    State(state): State<OrderAppState>,
    Path(id): Path<u64>,
    Json(payload): Json<Value>,
) -> Result<Json<OrderDocument>, ApiError> {
    let order = state
        .store
        .merge(id, into_document(payload)?)?
        .ok_or(ApiError::NotFound { id })?;

    tracing::debug!(order_id = id, status = ?order.get("status"), "Updated order");
    Ok(Json(order))
}
