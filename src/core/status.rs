//! Order status lifecycle
//!
//! The lifecycle is a fixed, one-directional state machine:
//!
//! ```text
//! WAITING_PAYMENT ──► PAYMENT_APPROVED ──► SENT ──► DELIVERED
//!        │                    │
//!        └────► CANCELED ◄────┘
//! ```
//!
//! `DELIVERED` and `CANCELED` are terminal. Self-transitions are never allowed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status of a sale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Waiting for payment (initial status)
    WaitingPayment,
    /// Payment approved
    PaymentApproved,
    /// Shipped to the buyer
    Sent,
    /// Delivered (terminal)
    Delivered,
    /// Canceled (terminal)
    Canceled,
}

impl OrderStatus {
    /// Every status, in lifecycle order
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::WaitingPayment,
        OrderStatus::PaymentApproved,
        OrderStatus::Sent,
        OrderStatus::Delivered,
        OrderStatus::Canceled,
    ];

    /// Status assigned to every newly created order
    pub const INITIAL: OrderStatus = OrderStatus::WaitingPayment;

    /// Statuses reachable in one step from `self`
    pub const fn next_statuses(self) -> &'static [OrderStatus] {
        match self {
            OrderStatus::WaitingPayment => {
                &[OrderStatus::PaymentApproved, OrderStatus::Canceled]
            }
            OrderStatus::PaymentApproved => &[OrderStatus::Sent, OrderStatus::Canceled],
            OrderStatus::Sent => &[OrderStatus::Delivered],
            OrderStatus::Delivered => &[],
            OrderStatus::Canceled => &[],
        }
    }

    /// Check whether moving from `self` to `to` is a listed transition
    pub fn can_transition_to(self, to: OrderStatus) -> bool {
        self.next_statuses().contains(&to)
    }

    /// A terminal status has no outgoing transitions
    pub fn is_terminal(self) -> bool {
        self.next_statuses().is_empty()
    }

    /// Wire name (e.g. `PAYMENT_APPROVED`)
    pub const fn as_str(self) -> &'static str {
        match self {
            OrderStatus::WaitingPayment => "WAITING_PAYMENT",
            OrderStatus::PaymentApproved => "PAYMENT_APPROVED",
            OrderStatus::Sent => "SENT",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Canceled => "CANCELED",
        }
    }

    /// Human-readable label for display
    pub const fn label(self) -> &'static str {
        match self {
            OrderStatus::WaitingPayment => "Waiting payment",
            OrderStatus::PaymentApproved => "Payment approved",
            OrderStatus::Sent => "Sent",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Canceled => "Canceled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown status name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown order status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}
