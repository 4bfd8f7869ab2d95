//! Shared types for the Savora storefront
//!
//! Plain data types used by the server and by client crates: order status
//! enums, status history entries, and the auth API DTOs.

pub mod client;
pub mod order;

// Re-exports
pub use order::{
    CancellationReport, FulfillmentMode, OrderItemLine, OrderStatus, PaymentMethod, PaymentStatus,
    StatusEntry,
};
