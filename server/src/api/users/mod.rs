//! Customer account API module

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/users", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::signup))
        .route("/password", put(handler::change_password))
        .route("/{id}", get(handler::get_by_id))
}
