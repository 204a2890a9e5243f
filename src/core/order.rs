//! Sales order data model

use crate::core::error::ValidationError;
use crate::core::status::OrderStatus;
use crate::core::validation::schema;
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Seller of an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seller {
    pub id: u64,
    /// Brazilian taxpayer id, `00000000000` or `000.000.000-00`
    pub cpf: String,
    pub name: String,
}

/// One line of an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub description: String,
    /// Quantity (the API spells it `ammount`)
    pub ammount: f64,
}

/// Data needed to create an order; the server assigns `id`, the client `status`
///
/// Build it with [`CreationOrderData::new`], which truncates `date` to the
/// millisecond precision of the wire format. A struct literal keeps the full
/// precision locally, but only the truncated instant is ever sent, so the
/// order the server echoes back carries `date.trunc_subsecs(3)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreationOrderData {
    pub seller: Seller,
    #[serde(with = "wire_date")]
    pub date: DateTime<Utc>,
    pub items: Vec<OrderItem>,
}

/// A persisted sale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    pub seller: Seller,
    #[serde(with = "wire_date")]
    pub date: DateTime<Utc>,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
}

impl CreationOrderData {
    /// Build creation data; `date` is truncated to the wire precision
    pub fn new(seller: Seller, date: DateTime<Utc>, items: Vec<OrderItem>) -> Self {
        Self {
            seller,
            date: date.trunc_subsecs(3),
            items,
        }
    }

    /// Validate raw input against the creation schema
    ///
    /// This is the single validator for creation data: forms can call it
    /// before submitting and [`OrderClient::create`](crate::client::OrderClient)
    /// runs it again before any request.
    pub fn parse(value: &Value) -> Result<Self, ValidationError> {
        schema::creation_order().parse(value)
    }
}

impl Order {
    /// Validate an API payload against the full order schema
    pub fn parse(value: &Value) -> Result<Self, ValidationError> {
        schema::order().parse(value)
    }

    /// Total quantity across all items
    pub fn total_items(&self) -> f64 {
        self.items.iter().map(|item| item.ammount).sum()
    }
}

/// Wire encoding of dates: RFC 3339, millisecond precision, `Z` suffix
pub mod wire_date {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn format(date: &DateTime<Utc>) -> String {
        date.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn parse(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        DateTime::parse_from_rfc3339(s).map(|date| date.with_timezone(&Utc))
    }

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse(&s).map_err(serde::de::Error::custom)
    }
}
