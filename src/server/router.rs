//! Router builder for the fake order API

use super::handlers::{OrderAppState, create_order, get_order, update_order};
use crate::config::FakeApiConfig;
use anyhow::{Context, Result};
use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the order routes
///
/// - POST /orders - Create an order (server assigns the id)
/// - GET /orders/{id} - Get an order, 404 when unknown
/// - PUT /orders/{id} - Merge the body over a stored order
pub fn build_order_routes(state: OrderAppState) -> Router {
    Router::new()
        .route("/orders", post(create_order))
        .route("/orders/{id}", get(get_order).put(update_order))
        .with_state(state)
}

/// CORS policy for browser front-ends listed in `allowed_origins`
pub fn cors_layer(config: &FakeApiConfig) -> Result<CorsLayer> {
    let origins = config
        .allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .with_context(|| format!("Invalid CORS origin '{}'", origin))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_headers(Any)
        .allow_methods([
            Method::PUT,
            Method::POST,
            Method::GET,
            Method::DELETE,
            Method::OPTIONS,
            Method::PATCH,
        ]))
}

/// Order routes wrapped with CORS and request tracing
pub fn build_router(state: OrderAppState, config: &FakeApiConfig) -> Result<Router> {
    Ok(build_order_routes(state)
        .layer(cors_layer(config)?)
        .layer(TraceLayer::new_for_http()))
}
