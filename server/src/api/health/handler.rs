//! Health check handler

use axum::{Json, extract::State};
use serde::Serialize;

use crate::core::ServerState;
use crate::utils::{AppResponse, ok};

#[derive(Serialize)]
pub struct HealthInfo {
    pub status: &'static str,
    pub version: &'static str,
    pub environment: String,
}

/// GET /api/health
pub async fn health(State(state): State<ServerState>) -> Json<AppResponse<HealthInfo>> {
    ok(HealthInfo {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        environment: state.config.environment.clone(),
    })
}
