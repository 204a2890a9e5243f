//! Shared helpers for integration tests
//!
//! [`StubApi`] is a local HTTP server that records every request it receives
//! and answers with queued canned responses, so tests can assert exactly
//! which calls the client made.

#![allow(dead_code)]

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use order_client::prelude::*;
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// A request received by the stub
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub content_type: Option<String>,
    pub body: Option<Value>,
}

#[derive(Default)]
struct StubState {
    requests: Vec<RecordedRequest>,
    responses: VecDeque<(StatusCode, String)>,
}

#[derive(Clone)]
pub struct StubApi {
    pub base_url: String,
    state: Arc<Mutex<StubState>>,
}

impl StubApi {
    /// Start the stub on an ephemeral local port
    pub async fn start() -> Self {
        let state = Arc::new(Mutex::new(StubState::default()));

        let app = Router::new().fallback(record).with_state(state.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn client(&self) -> OrderClient {
        OrderClient::new(self.base_url.clone())
    }

    /// Queue a JSON response
    pub fn respond_json(&self, status: StatusCode, body: Value) {
        self.respond_raw(status, body.to_string());
    }

    /// Queue a raw response body
    pub fn respond_raw(&self, status: StatusCode, body: impl Into<String>) {
        self.state
            .lock()
            .unwrap()
            .responses
            .push_back((status, body.into()));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }
}

async fn record(
    State(state): State<Arc<Mutex<StubState>>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let mut state = state.lock().unwrap();

    state.requests.push(RecordedRequest {
        method,
        path: uri.path().to_string(),
        content_type: headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from),
        body: serde_json::from_slice(&body).ok(),
    });

    let (status, body) = state
        .responses
        .pop_front()
        .unwrap_or((StatusCode::INTERNAL_SERVER_ERROR, String::new()));

    (status, [(CONTENT_TYPE, "application/json")], body).into_response()
}

/// An address nothing listens on
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub fn seller_json() -> Value {
    json!({"id": 1, "cpf": "123.456.789-01", "name": "John Doe"})
}

pub fn creation_json(date: &str) -> Value {
    json!({
        "seller": seller_json(),
        "date": date,
        "items": [{"description": "Item 1", "ammount": 2}]
    })
}

/// A persisted order as the API would return it
pub fn persisted_json(id: u64, status: OrderStatus, date: &str) -> Value {
    json!({
        "id": id,
        "seller": seller_json(),
        "date": date,
        "items": [{"description": "Item 1", "ammount": 2}],
        "status": status
    })
}

pub fn persisted_order(id: u64, status: OrderStatus, date: DateTime<Utc>) -> Order {
    Order {
        id,
        seller: Seller {
            id: 1,
            cpf: "123.456.789-01".to_string(),
            name: "John Doe".to_string(),
        },
        date,
        items: vec![OrderItem {
            description: "Item 1".to_string(),
            ammount: 2.0,
        }],
        status,
    }
}
