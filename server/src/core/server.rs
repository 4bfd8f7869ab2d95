//! HTTP server assembly and lifecycle

use axum::{Router, middleware};
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;

use crate::auth::require_auth;
use crate::core::ServerState;
use crate::utils::AppError;

/// HTTP request log middleware
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let status = response.status();

    tracing::info!(target: "http_access", "{} {} {}", method, uri, status);

    response
}

/// Build the axum router (without state)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(crate::api::health::router())
        .merge(crate::api::auth::router())
        .merge(crate::api::users::router())
        .merge(crate::api::outlets::router())
        .merge(crate::api::menu::router())
        .merge(crate::api::orders::router())
        .merge(crate::api::ratings::router())
        .merge(crate::api::payment::router())
}

/// Build the router and wire in state and middleware.
///
/// `require_auth` sits at router level and skips the public routes itself,
/// so every other route gets a [`crate::auth::CurrentUser`] for free.
pub fn build_router(state: ServerState) -> Router {
    build_app()
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(log_request))
}

/// HTTP server
pub struct Server {
    state: ServerState,
}

impl Server {
    pub fn new(state: ServerState) -> Self {
        Self { state }
    }

    pub async fn run(&self) -> Result<(), AppError> {
        let app = build_router(self.state.clone());

        let addr = SocketAddr::from(([0, 0, 0, 0], self.state.config.http_port));
        tracing::info!("Storefront server starting on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Shutting down...");
            })
            .await
            .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

        Ok(())
    }
}
