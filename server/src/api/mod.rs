//! API route modules
//!
//! # Structure
//!
//! - [`health`] - liveness check
//! - [`auth`] - login and password reset
//! - [`users`] - customer accounts
//! - [`outlets`] - outlet tenants
//! - [`menu`] - per-outlet menus
//! - [`orders`] - checkout, tracking and fulfillment
//! - [`ratings`] - post-completion reviews
//! - [`payment`] - online payment gateway delegation

pub mod auth;
pub mod health;
pub mod menu;
pub mod orders;
pub mod outlets;
pub mod payment;
pub mod ratings;
pub mod users;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};
