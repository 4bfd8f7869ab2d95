//! Shared helpers for HTTP-level integration tests
//!
//! Every test drives the real router over an in-memory database with
//! `tower::ServiceExt::oneshot`, so the full middleware stack is exercised
//! without binding a port.

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use savora_server::auth::JwtConfig;
use savora_server::{Config, ServerState, build_router};

pub const ADMIN_EMAIL: &str = "admin@savora.test";

pub fn test_config() -> Config {
    Config {
        http_port: 0,
        data_dir: ".".into(),
        environment: "test".into(),
        jwt: JwtConfig {
            secret: "integration-test-secret-key-0123456789".into(),
            expiration_minutes: 60,
            issuer: "savora-server".into(),
            audience: "savora-clients".into(),
        },
        otp_expiry_minutes: 10,
        master_admin_email: Some(ADMIN_EMAIL.into()),
        smtp: None,
        gateway: None,
    }
}

pub async fn test_app() -> Router {
    let state = ServerState::in_memory(test_config())
        .await
        .expect("in-memory state");
    build_router(state)
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Register a customer and log in; returns (token, user_id)
pub async fn customer(app: &Router, email: &str) -> (String, String) {
    let (status, _) = send(
        app,
        "POST",
        "/api/users",
        None,
        Some(json!({
            "name": "Test Customer",
            "email": email,
            "phone": "9876543210",
            "password": "secret123",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    login(app, email, "secret123", "customer").await
}

/// Register an outlet and log in; returns (token, outlet_id)
pub async fn outlet(app: &Router, email: &str) -> (String, String) {
    let (status, _) = send(
        app,
        "POST",
        "/api/outlets",
        None,
        Some(json!({
            "name": "Chai Point",
            "owner_name": "Owner",
            "email": email,
            "phone": "9876500000",
            "address": "12 Market Road",
            "password": "secret123",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    login(app, email, "secret123", "outlet").await
}

pub async fn login(app: &Router, email: &str, password: &str, account: &str) -> (String, String) {
    let (status, body) = send(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": password, "account": account })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");

    let token = body["data"]["token"].as_str().unwrap().to_string();
    let id = body["data"]["account"]["id"].as_str().unwrap().to_string();
    (token, id)
}

/// Add one dish to the outlet's menu; returns the menu item id
pub async fn menu_item(app: &Router, token: &str, name: &str, price: f64) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/menu",
        Some(token),
        Some(json!({
            "name": name,
            "price": price,
            "category": "Beverages",
            "is_veg": true,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "menu create failed: {body}");
    body["data"]["id"].as_str().unwrap().to_string()
}
