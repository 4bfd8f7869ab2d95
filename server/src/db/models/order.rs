//! Order model
//!
//! The status field and its append-only history are owned by the lifecycle
//! operations in [`crate::orders`]; nothing else mutates them.

use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::order::{
    CancellationReport, FulfillmentMode, OrderItemLine, OrderStatus, PaymentMethod, PaymentStatus,
    StatusEntry,
};
use surrealdb::RecordId;

/// Order ID type
pub type OrderId = RecordId;

/// Free-form customer details captured at checkout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerDetails {
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub table_number: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

/// A customer order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<OrderId>,
    /// Absent for guest checkouts
    #[serde(default)]
    pub user: Option<String>,
    #[serde(with = "serde_helpers::record_id")]
    pub outlet: RecordId,
    pub items: Vec<OrderItemLine>,
    /// Sum of unit_price x quantity at creation time; never recomputed
    pub total: f64,
    #[serde(default)]
    pub mode: FulfillmentMode,
    #[serde(default)]
    pub details: CustomerDetails,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub status: OrderStatus,
    /// Append-only; exactly one entry per status change
    pub status_history: Vec<StatusEntry>,
    #[serde(default)]
    pub report: Option<CancellationReport>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
