//! Order lifecycle operations
//!
//! Checkout, status advancement and cancellation are pure functions over the
//! [`Order`] document; handlers load, mutate, save. All transition rules live
//! here and in [`shared::order::OrderStatus`], nowhere else.

use chrono::{DateTime, Utc};
use shared::order::{
    CancellationReport, FulfillmentMode, OrderItemLine, OrderStatus, PaymentMethod, PaymentStatus,
    StatusEntry,
};
use surrealdb::RecordId;
use thiserror::Error;

use crate::db::models::{CustomerDetails, Order};
use crate::utils::AppError;

/// Lifecycle rule violations
#[derive(Debug, Error, PartialEq)]
pub enum LifecycleError {
    #[error("Order must contain at least one item")]
    EmptyOrder,

    #[error("Item '{0}' has zero quantity")]
    ZeroQuantity(String),

    #[error("Item '{0}' has a negative price")]
    NegativePrice(String),

    #[error("Cannot change a {0} order")]
    Terminal(OrderStatus),

    #[error("Cannot move an order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },
}

impl From<LifecycleError> for AppError {
    fn from(err: LifecycleError) -> Self {
        match err {
            LifecycleError::EmptyOrder
            | LifecycleError::ZeroQuantity(_)
            | LifecycleError::NegativePrice(_) => AppError::validation(err.to_string()),
            LifecycleError::Terminal(_) | LifecycleError::InvalidTransition { .. } => {
                AppError::business_rule(err.to_string())
            }
        }
    }
}

impl Order {
    /// Build a new order from checkout input.
    ///
    /// The total and per-line prices are frozen here; later menu edits never
    /// touch placed orders. `user` is `None` for guest checkouts.
    pub fn from_checkout(
        outlet: RecordId,
        user: Option<String>,
        items: Vec<OrderItemLine>,
        mode: FulfillmentMode,
        details: CustomerDetails,
        payment_method: PaymentMethod,
        now: DateTime<Utc>,
    ) -> Result<Order, LifecycleError> {
        if items.is_empty() {
            return Err(LifecycleError::EmptyOrder);
        }
        for line in &items {
            if line.quantity == 0 {
                return Err(LifecycleError::ZeroQuantity(line.name.clone()));
            }
            if line.unit_price < 0.0 {
                return Err(LifecycleError::NegativePrice(line.name.clone()));
            }
        }

        let total = items.iter().map(OrderItemLine::line_total).sum();

        Ok(Order {
            id: None,
            user,
            outlet,
            items,
            total,
            mode,
            details,
            payment_method,
            payment_status: payment_method.initial_payment_status(),
            status: OrderStatus::Pending,
            status_history: vec![StatusEntry {
                status: OrderStatus::Pending,
                timestamp: now,
            }],
            report: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Move the order forward to `next`, appending one history entry.
    pub fn advance(&mut self, next: OrderStatus, now: DateTime<Utc>) -> Result<(), LifecycleError> {
        if next == OrderStatus::Cancelled {
            return Err(LifecycleError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        self.transition(next, now)?;

        // Cash is collected when the order is handed over
        if next == OrderStatus::Completed && self.payment_status == PaymentStatus::Pending {
            self.payment_status = PaymentStatus::Paid;
        }
        Ok(())
    }

    /// Cancel a non-terminal order, recording who-said-what in the report.
    pub fn cancel(&mut self, reason: String, now: DateTime<Utc>) -> Result<(), LifecycleError> {
        self.transition(OrderStatus::Cancelled, now)?;
        self.report = Some(CancellationReport {
            reason,
            reported_at: now,
        });
        Ok(())
    }

    fn transition(&mut self, next: OrderStatus, now: DateTime<Utc>) -> Result<(), LifecycleError> {
        if self.status.is_terminal() {
            return Err(LifecycleError::Terminal(self.status));
        }
        if !self.status.can_advance_to(next) {
            return Err(LifecycleError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }

        // History timestamps never run backward, even if the clock does
        let timestamp = self
            .status_history
            .last()
            .map(|entry| entry.timestamp.max(now))
            .unwrap_or(now);

        self.status = next;
        self.status_history.push(StatusEntry {
            status: next,
            timestamp,
        });
        Ok(())
    }
}
