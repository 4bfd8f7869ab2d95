//! Online payment gateway client
//!
//! Creates gateway orders over HTTPS and verifies the callback signature the
//! gateway sends after a capture. The signature is an HMAC-SHA256 over
//! `"{order_id}|{payment_id}"`, hex encoded with the merchant secret as key.

use ring::hmac;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::config::GatewayConfig;
use crate::utils::AppError;

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("Gateway request failed: {0}")]
    Http(String),

    #[error("Gateway rejected the request: {0}")]
    Rejected(String),

    #[error("Invalid payment amount: {0}")]
    Amount(f64),
}

impl From<PaymentError> for AppError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::Amount(_) => AppError::validation(err.to_string()),
            PaymentError::Http(_) | PaymentError::Rejected(_) => AppError::internal(err.to_string()),
        }
    }
}

/// Order as created on the gateway side
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayOrder {
    pub id: String,
    /// Minor currency units (paise)
    pub amount: i64,
    pub currency: String,
    #[serde(default)]
    pub receipt: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Serialize)]
struct CreateOrderBody<'a> {
    amount: i64,
    currency: &'a str,
    receipt: &'a str,
    payment_capture: u8,
}

pub struct PaymentGateway {
    http: reqwest::Client,
    key_id: String,
    key_secret: String,
    base_url: String,
}

impl PaymentGateway {
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            key_id: config.key_id.clone(),
            key_secret: config.key_secret.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The public key id, safe to hand to the storefront client.
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Create a gateway order for `amount` in major units.
    pub async fn create_order(
        &self,
        amount: f64,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder, PaymentError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(PaymentError::Amount(amount));
        }
        let minor = (amount * 100.0).round() as i64;

        let response = self
            .http
            .post(format!("{}/v1/orders", self.base_url))
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&CreateOrderBody {
                amount: minor,
                currency,
                receipt,
                payment_capture: 1,
            })
            .send()
            .await
            .map_err(|e| PaymentError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PaymentError::Rejected(format!("{status}: {body}")));
        }

        response
            .json::<GatewayOrder>()
            .await
            .map_err(|e| PaymentError::Http(e.to_string()))
    }

    /// Check the capture callback signature.
    pub fn verify_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> bool {
        verify_signature(&self.key_secret, order_id, payment_id, signature)
    }
}

/// HMAC-SHA256 over `"{order_id}|{payment_id}"`, compared in constant time
/// against the hex `signature`.
pub fn verify_signature(secret: &str, order_id: &str, payment_id: &str, signature: &str) -> bool {
    let key = hmac::Key::new(hmac::HMAC_SHA256, secret.as_bytes());
    let payload = format!("{order_id}|{payment_id}");
    let expected = hex::encode(hmac::sign(&key, payload.as_bytes()).as_ref());

    ring::constant_time::verify_slices_are_equal(expected.as_bytes(), signature.as_bytes()).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign(secret: &str, order_id: &str, payment_id: &str) -> String {
        let key = hmac::Key::new(hmac::HMAC_SHA256, secret.as_bytes());
        let payload = format!("{order_id}|{payment_id}");
        hex::encode(hmac::sign(&key, payload.as_bytes()).as_ref())
    }

    #[test]
    fn valid_signature_accepted() {
        let sig = sign("secret", "order_abc", "pay_xyz");
        assert!(verify_signature("secret", "order_abc", "pay_xyz", &sig));
    }

    #[test]
    fn tampered_fields_rejected() {
        let sig = sign("secret", "order_abc", "pay_xyz");
        assert!(!verify_signature("secret", "order_abc", "pay_other", &sig));
        assert!(!verify_signature("secret", "order_other", "pay_xyz", &sig));
        assert!(!verify_signature("wrong-secret", "order_abc", "pay_xyz", &sig));
    }

    #[test]
    fn malformed_signature_rejected() {
        assert!(!verify_signature("secret", "order_abc", "pay_xyz", ""));
        assert!(!verify_signature("secret", "order_abc", "pay_xyz", "zz"));
    }
}
