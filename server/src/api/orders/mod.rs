//! Order API module
//!
//! The `/track/` routes are the guest-facing surface: checkout hands the
//! customer an order id, and that id alone is enough to follow or cancel
//! the order. Everything else requires a session.

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::checkout))
        .route("/track/{id}", get(handler::track))
        .route("/track/{id}/cancel", put(handler::track_cancel))
        .route("/by-user/{user_id}", get(handler::list_by_user))
        .route("/by-outlet/{outlet_id}", get(handler::list_by_outlet))
        .route("/{id}/status", put(handler::update_status))
        .route("/{id}/payment", put(handler::update_payment))
}
