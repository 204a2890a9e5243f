//! In-memory order store backing the fake API
//!
//! Orders are kept as raw JSON objects: the fake API stores whatever body it
//! receives, exactly like the mock server the client is developed against.

use anyhow::{Result, anyhow};
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

/// Stored order document
pub type OrderDocument = Map<String, Value>;

/// In-memory order store
///
/// Uses RwLock for thread-safe access. Clones share the same data.
#[derive(Clone)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<BTreeMap<u64, OrderDocument>>>,
    next_id: Arc<AtomicU64>,
}

impl InMemoryOrderStore {
    /// Create an empty store; the first order gets id 1
    pub fn new() -> Self {
        Self {
            orders: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Create a store holding the sample order (id 1); the next id is 2
    pub fn seeded() -> Result<Self> {
        let store = Self::new();
        let seed = json!({
            "seller": {
                "id": 5,
                "cpf": "355.222.222-55",
                "name": "Jacqueline Alves Palheiro"
            },
            "date": "2023-05-12T02:49:57.401Z",
            "items": [{"description": "Cosmético", "ammount": 1}],
            "status": "WAITING_PAYMENT"
        });
        if let Value::Object(document) = seed {
            store.insert(document)?;
        }
        Ok(store)
    }

    /// Store a new order, assigning the next id
    pub fn insert(&self, mut document: OrderDocument) -> Result<OrderDocument> {
        let mut orders = self
            .orders
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        document.insert("id".to_string(), json!(id));
        orders.insert(id, document.clone());

        Ok(document)
    }

    pub fn get(&self, id: u64) -> Result<Option<OrderDocument>> {
        let orders = self
            .orders
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(orders.get(&id).cloned())
    }

    /// Shallow-merge `patch` over the stored order
    ///
    /// The stored id always wins. Returns `None` when the id is unknown.
    pub fn merge(&self, id: u64, patch: OrderDocument) -> Result<Option<OrderDocument>> {
        let mut orders = self
            .orders
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let Some(document) = orders.get_mut(&id) else {
            return Ok(None);
        };

        document.extend(patch);
        document.insert("id".to_string(), json!(id));

        Ok(Some(document.clone()))
    }

    pub fn len(&self) -> Result<usize> {
        let orders = self
            .orders
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(orders.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl Default for InMemoryOrderStore {
    fn default() -> Self {
        Self::new()
    }
}
