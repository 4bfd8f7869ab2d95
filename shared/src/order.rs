//! Order status types and transition rules
//!
//! The order lifecycle is a small forward-only state machine:
//!
//! ```text
//! Pending → Processing → Ready → Completed
//!     └──────────┴─────────┘
//!            Cancelled (from any non-terminal state)
//! ```
//!
//! `Completed` and `Cancelled` are terminal. Advancing may skip intermediate
//! states (a small outlet often goes `Pending → Ready` directly) but never
//! moves backward.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Order status enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Processing,
    Ready,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Terminal orders are immutable
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Position on the forward path. `Cancelled` is off-path.
    fn rank(self) -> Option<u8> {
        match self {
            OrderStatus::Pending => Some(0),
            OrderStatus::Processing => Some(1),
            OrderStatus::Ready => Some(2),
            OrderStatus::Completed => Some(3),
            OrderStatus::Cancelled => None,
        }
    }

    /// Whether a transition from `self` to `next` is allowed.
    ///
    /// Forward-only along the rank order; `Cancelled` is reachable from any
    /// non-terminal state; terminal states accept nothing.
    pub fn can_advance_to(self, next: OrderStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        match next {
            OrderStatus::Cancelled => true,
            _ => match (self.rank(), next.rank()) {
                (Some(from), Some(to)) => to > from,
                _ => false,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Ready => "Ready",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment status, tracked independently of the order status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Completed,
    Failed,
}

/// How the customer pays
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Upi,
    Online,
}

impl PaymentMethod {
    /// Initial payment status for a new order: cash is collected on
    /// fulfillment, everything else is captured up front.
    pub fn initial_payment_status(self) -> PaymentStatus {
        match self {
            PaymentMethod::Cash => PaymentStatus::Pending,
            PaymentMethod::Upi | PaymentMethod::Online => PaymentStatus::Paid,
        }
    }
}

/// Fulfillment mode
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FulfillmentMode {
    #[serde(rename = "Dine-in")]
    DineIn,
    Delivery,
    Takeaway,
}

impl Default for FulfillmentMode {
    fn default() -> Self {
        FulfillmentMode::DineIn
    }
}

/// One entry of the append-only status history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusEntry {
    pub status: OrderStatus,
    pub timestamp: DateTime<Utc>,
}

/// Reason a customer or staff member gave when cancelling
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CancellationReport {
    pub reason: String,
    pub reported_at: DateTime<Utc>,
}

/// One line item of an order, denormalized at checkout time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItemLine {
    pub name: String,
    pub unit_price: f64,
    pub quantity: u32,
}

impl OrderItemLine {
    pub fn line_total(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_transitions_allowed() {
        use OrderStatus::*;
        assert!(Pending.can_advance_to(Processing));
        assert!(Processing.can_advance_to(Ready));
        assert!(Ready.can_advance_to(Completed));
        // Skipping intermediate states is fine
        assert!(Pending.can_advance_to(Ready));
        assert!(Pending.can_advance_to(Completed));
    }

    #[test]
    fn backward_transitions_rejected() {
        use OrderStatus::*;
        assert!(!Ready.can_advance_to(Processing));
        assert!(!Processing.can_advance_to(Pending));
        assert!(!Ready.can_advance_to(Ready));
    }

    #[test]
    fn cancelled_reachable_from_non_terminal_only() {
        use OrderStatus::*;
        assert!(Pending.can_advance_to(Cancelled));
        assert!(Processing.can_advance_to(Cancelled));
        assert!(Ready.can_advance_to(Cancelled));
        assert!(!Completed.can_advance_to(Cancelled));
        assert!(!Cancelled.can_advance_to(Cancelled));
    }

    #[test]
    fn terminal_states_accept_nothing() {
        use OrderStatus::*;
        for next in [Pending, Processing, Ready, Completed, Cancelled] {
            assert!(!Completed.can_advance_to(next));
            assert!(!Cancelled.can_advance_to(next));
        }
    }

    #[test]
    fn payment_status_follows_method() {
        assert_eq!(
            PaymentMethod::Cash.initial_payment_status(),
            PaymentStatus::Pending
        );
        assert_eq!(
            PaymentMethod::Upi.initial_payment_status(),
            PaymentStatus::Paid
        );
        assert_eq!(
            PaymentMethod::Online.initial_payment_status(),
            PaymentStatus::Paid
        );
    }

    #[test]
    fn status_serializes_to_wire_names() {
        let json = serde_json::to_string(&OrderStatus::Pending).unwrap();
        assert_eq!(json, "\"Pending\"");
        let mode = serde_json::to_string(&FulfillmentMode::DineIn).unwrap();
        assert_eq!(mode, "\"Dine-in\"");
        let method = serde_json::to_string(&PaymentMethod::Cash).unwrap();
        assert_eq!(method, "\"cash\"");
    }
}
