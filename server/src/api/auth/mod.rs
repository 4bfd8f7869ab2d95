//! Authentication API module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/auth", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/login", post(handler::login))
        .route("/send-otp", post(handler::send_otp))
        .route("/verify-otp", post(handler::verify_otp))
        .route("/reset-password", post(handler::reset_password))
        .route("/me", get(handler::me))
}
