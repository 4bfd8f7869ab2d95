//! End-to-end order flow over the HTTP surface

mod common;

use common::{customer, menu_item, outlet, send, test_app};
use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn guest_checkout_to_completion() {
    let app = test_app().await;
    let (staff_token, outlet_id) = outlet(&app, "owner@chai.test").await;
    let tea = menu_item(&app, &staff_token, "Tea", 20.0).await;

    // Guest checkout, no token
    let (status, body) = send(
        &app,
        "POST",
        "/api/orders",
        None,
        Some(json!({
            "outlet_id": outlet_id,
            "items": [{ "menu_item_id": tea, "quantity": 2 }],
            "mode": "Dine-in",
            "details": { "table_number": "4" },
            "payment_method": "cash",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "checkout failed: {body}");

    let order = &body["data"];
    let order_id = order["id"].as_str().unwrap().to_string();
    assert_eq!(order["total"], json!(40.0));
    assert_eq!(order["status"], "Pending");
    assert_eq!(order["payment_status"], "pending");
    assert_eq!(order["status_history"].as_array().unwrap().len(), 1);
    assert!(order["user"].is_null());

    // Public tracking works without a session
    let (status, body) = send(&app, "GET", &format!("/api/orders/track/{order_id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "Pending");

    // Staff advance straight to Ready (skipping Processing is allowed)
    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/orders/{order_id}/status"),
        Some(&staff_token),
        Some(json!({ "status": "Ready" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "advance failed: {body}");
    assert_eq!(body["data"]["status"], "Ready");
    assert_eq!(body["data"]["status_history"].as_array().unwrap().len(), 2);

    // Backward move is rejected
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/orders/{order_id}/status"),
        Some(&staff_token),
        Some(json!({ "status": "Processing" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // Completing a cash order settles the payment
    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/orders/{order_id}/status"),
        Some(&staff_token),
        Some(json!({ "status": "Completed" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["payment_status"], "paid");

    // Terminal orders are immutable
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/orders/track/{order_id}/cancel"),
        None,
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn checkout_rejects_bad_carts() {
    let app = test_app().await;
    let (staff_token, outlet_id) = outlet(&app, "owner@cart.test").await;
    let tea = menu_item(&app, &staff_token, "Tea", 20.0).await;

    // Empty cart
    let (status, _) = send(
        &app,
        "POST",
        "/api/orders",
        None,
        Some(json!({
            "outlet_id": outlet_id,
            "items": [],
            "payment_method": "cash",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Zero quantity
    let (status, _) = send(
        &app,
        "POST",
        "/api/orders",
        None,
        Some(json!({
            "outlet_id": outlet_id,
            "items": [{ "menu_item_id": tea, "quantity": 0 }],
            "payment_method": "cash",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Item from another outlet
    let (other_token, _) = outlet(&app, "owner@other.test").await;
    let other_item = menu_item(&app, &other_token, "Coffee", 30.0).await;
    let (status, _) = send(
        &app,
        "POST",
        "/api/orders",
        None,
        Some(json!({
            "outlet_id": outlet_id,
            "items": [{ "menu_item_id": other_item, "quantity": 1 }],
            "payment_method": "cash",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn guest_cancellation_records_report() {
    let app = test_app().await;
    let (staff_token, outlet_id) = outlet(&app, "owner@cancel.test").await;
    let tea = menu_item(&app, &staff_token, "Tea", 20.0).await;

    let (_, body) = send(
        &app,
        "POST",
        "/api/orders",
        None,
        Some(json!({
            "outlet_id": outlet_id,
            "items": [{ "menu_item_id": tea, "quantity": 1 }],
            "payment_method": "cash",
        })),
    )
    .await;
    let order_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/orders/track/{order_id}/cancel"),
        None,
        Some(json!({ "reason": "Ordered by mistake" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "Cancelled");
    assert_eq!(body["data"]["report"]["reason"], "Ordered by mistake");

    // Payment cannot be settled on a cancelled order
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/orders/{order_id}/payment"),
        Some(&staff_token),
        Some(json!({ "payment_status": "paid" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn order_listings_are_scoped_by_role() {
    let app = test_app().await;
    let (staff_token, outlet_id) = outlet(&app, "owner@scope.test").await;
    let tea = menu_item(&app, &staff_token, "Tea", 20.0).await;
    let (customer_token, user_id) = customer(&app, "asha@scope.test").await;

    // Logged-in checkout attaches the order to the account
    let (status, body) = send(
        &app,
        "POST",
        "/api/orders",
        Some(&customer_token),
        Some(json!({
            "outlet_id": outlet_id,
            "items": [{ "menu_item_id": tea, "quantity": 1 }],
            "payment_method": "upi",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"], json!(user_id));
    assert_eq!(body["data"]["payment_status"], "paid");

    // Customers see their own history
    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/orders/by-user/{user_id}"),
        Some(&customer_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    // ...but not the outlet's queue
    let (status, _) = send(
        &app,
        "GET",
        &format!("/api/orders/by-outlet/{outlet_id}"),
        Some(&customer_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Staff see their queue
    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/orders/by-outlet/{outlet_id}"),
        Some(&staff_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    // The platform-wide listing needs the master admin
    let (status, _) = send(&app, "GET", "/api/orders", Some(&staff_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // And no listing works anonymously
    let (status, _) = send(&app, "GET", "/api/orders", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn ratings_require_completed_own_order() {
    let app = test_app().await;
    let (staff_token, outlet_id) = outlet(&app, "owner@rate.test").await;
    let tea = menu_item(&app, &staff_token, "Tea", 20.0).await;
    let (customer_token, _) = customer(&app, "asha@rate.test").await;

    let (_, body) = send(
        &app,
        "POST",
        "/api/orders",
        Some(&customer_token),
        Some(json!({
            "outlet_id": outlet_id,
            "items": [{ "menu_item_id": tea, "quantity": 1 }],
            "payment_method": "cash",
        })),
    )
    .await;
    let order_id = body["data"]["id"].as_str().unwrap().to_string();

    // Not completed yet
    let (status, _) = send(
        &app,
        "POST",
        "/api/ratings",
        Some(&customer_token),
        Some(json!({ "order_id": order_id, "rating": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/orders/{order_id}/status"),
        Some(&staff_token),
        Some(json!({ "status": "Completed" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // First rating passes
    let (status, _) = send(
        &app,
        "POST",
        "/api/ratings",
        Some(&customer_token),
        Some(json!({ "order_id": order_id, "rating": 5, "comment": "Great chai" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Second rating on the same order conflicts
    let (status, _) = send(
        &app,
        "POST",
        "/api/ratings",
        Some(&customer_token),
        Some(json!({ "order_id": order_id, "rating": 4 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // A stranger cannot rate someone else's order
    let (other_token, _) = customer(&app, "ravi@rate.test").await;
    let (status, _) = send(
        &app,
        "POST",
        "/api/ratings",
        Some(&other_token),
        Some(json!({ "order_id": order_id, "rating": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Public summary reflects the single rating
    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/ratings/by-outlet/{outlet_id}"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_ratings"], json!(1));
    assert_eq!(body["data"]["average_rating"], json!(5.0));
}

#[tokio::test]
async fn menu_visibility_follows_activation() {
    let app = test_app().await;
    let (staff_token, outlet_id) = outlet(&app, "owner@menu.test").await;
    let tea = menu_item(&app, &staff_token, "Tea", 20.0).await;

    // Deactivate the dish
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/menu/{tea}"),
        Some(&staff_token),
        Some(json!({ "is_active": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Anonymous browsing no longer sees it
    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/menu/by-outlet/{outlet_id}"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].as_array().unwrap().is_empty());

    // The owning outlet still does
    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/menu/by-outlet/{outlet_id}"),
        Some(&staff_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    // And checkout refuses the deactivated dish
    let (status, _) = send(
        &app,
        "POST",
        "/api/orders",
        None,
        Some(json!({
            "outlet_id": outlet_id,
            "items": [{ "menu_item_id": tea, "quantity": 1 }],
            "payment_method": "cash",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
