//! Payment handlers
//!
//! Thin delegation to the online gateway: the client gets a gateway order to
//! open the payment widget with, then posts the capture signature back for
//! verification. Both routes are public, they carry no account data.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::core::ServerState;
use crate::payment::GatewayOrder;
use crate::security_log;
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    /// Major currency units
    pub amount: f64,
    pub receipt: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateOrderResponse {
    pub order: GatewayOrder,
    /// Public key id for the client-side payment widget
    pub key_id: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
}

fn gateway(state: &ServerState) -> Result<&crate::payment::PaymentGateway, AppError> {
    state
        .gateway
        .as_deref()
        .ok_or_else(|| AppError::invalid("Online payments are not enabled"))
}

/// POST /api/payment/create-order
pub async fn create_order(
    State(state): State<ServerState>,
    Json(req): Json<CreateOrderRequest>,
) -> AppResult<Json<AppResponse<CreateOrderResponse>>> {
    let gateway = gateway(&state)?;
    let currency = state
        .config
        .gateway
        .as_ref()
        .map(|g| g.currency.clone())
        .unwrap_or_else(|| "INR".to_string());

    let receipt = req
        .receipt
        .unwrap_or_else(|| format!("rcpt_{}", Uuid::new_v4().simple()));

    let order = gateway.create_order(req.amount, &currency, &receipt).await?;
    Ok(ok(CreateOrderResponse {
        order,
        key_id: gateway.key_id().to_string(),
    }))
}

/// POST /api/payment/verify
pub async fn verify(
    State(state): State<ServerState>,
    Json(req): Json<VerifyRequest>,
) -> AppResult<Json<AppResponse<serde_json::Value>>> {
    let gateway = gateway(&state)?;

    if !gateway.verify_signature(&req.order_id, &req.payment_id, &req.signature) {
        security_log!(
            "WARN",
            "payment_signature_invalid",
            order_id = req.order_id.clone(),
            payment_id = req.payment_id.clone()
        );
        return Err(AppError::invalid("Invalid payment signature"));
    }

    Ok(ok_with_message(
        json!({ "verified": true }),
        "Payment verified",
    ))
}
