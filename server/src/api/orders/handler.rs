//! Order handlers
//!
//! Checkout never trusts client-side prices: the lines are rebuilt from the
//! stored menu, so the frozen totals always reflect what the outlet actually
//! charges.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use serde::Deserialize;
use shared::order::{FulfillmentMode, OrderItemLine, OrderStatus, PaymentMethod, PaymentStatus};

use crate::auth::{CurrentUser, Role};
use crate::core::ServerState;
use crate::db::models::{CustomerDetails, Order};
use crate::db::repository::{MenuItemRepository, OrderRepository, OutletRepository};
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text,
};
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};

#[derive(Debug, Deserialize)]
pub struct OrderItemRequest {
    pub menu_item_id: String,
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub outlet_id: String,
    pub items: Vec<OrderItemRequest>,
    #[serde(default)]
    pub mode: FulfillmentMode,
    #[serde(default)]
    pub details: CustomerDetails,
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Deserialize)]
pub struct CancelRequest {
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: OrderStatus,
    /// Only read when `status` is `Cancelled`
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PaymentUpdateRequest {
    pub payment_status: PaymentStatus,
}

fn validate_details(details: &CustomerDetails) -> Result<(), AppError> {
    validate_optional_text(&details.customer_name, "customer_name", MAX_NAME_LEN)?;
    validate_optional_text(&details.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&details.address, "address", MAX_ADDRESS_LEN)?;
    validate_optional_text(&details.table_number, "table_number", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&details.note, "note", MAX_NOTE_LEN)?;
    Ok(())
}

/// POST /api/orders - checkout (public; guests included)
pub async fn checkout(
    State(state): State<ServerState>,
    viewer: Option<CurrentUser>,
    Json(req): Json<CheckoutRequest>,
) -> AppResult<Json<AppResponse<Order>>> {
    validate_details(&req.details)?;

    let outlet = OutletRepository::new(state.get_db())
        .find_by_id(&req.outlet_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Outlet {} not found", req.outlet_id)))?;
    let outlet_id = outlet
        .id
        .ok_or_else(|| AppError::internal("Outlet record without id"))?;

    let menu_repo = MenuItemRepository::new(state.get_db());
    let mut lines = Vec::with_capacity(req.items.len());
    for item_req in &req.items {
        let item = menu_repo
            .find_by_id(&item_req.menu_item_id)
            .await?
            .filter(|item| item.outlet == outlet_id && item.is_active)
            .ok_or_else(|| {
                AppError::validation(format!(
                    "Menu item {} is not available at this outlet",
                    item_req.menu_item_id
                ))
            })?;
        lines.push(OrderItemLine {
            name: item.name,
            unit_price: item.price,
            quantity: item_req.quantity,
        });
    }

    // Guests check out without a session; logged-in customers get the order
    // attached to their account
    let user = viewer
        .filter(|u| u.role == Role::Customer)
        .map(|u| u.id);

    let order = Order::from_checkout(
        outlet_id,
        user,
        lines,
        req.mode,
        req.details,
        req.payment_method,
        Utc::now(),
    )?;

    let created = OrderRepository::new(state.get_db()).create(order).await?;
    Ok(ok_with_message(created, "Order placed"))
}

/// GET /api/orders/track/{id} - public order tracking
///
/// The order id is handed out at checkout and works as a bearer reference.
pub async fn track(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Order>>> {
    let order = OrderRepository::new(state.get_db())
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;
    Ok(ok(order))
}

/// PUT /api/orders/track/{id}/cancel - customer-side cancellation (public)
pub async fn track_cancel(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(req): Json<CancelRequest>,
) -> AppResult<Json<AppResponse<Order>>> {
    let repo = OrderRepository::new(state.get_db());
    let mut order = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;

    validate_optional_text(&req.reason, "reason", MAX_NOTE_LEN)?;
    let reason = req
        .reason
        .filter(|r| !r.trim().is_empty())
        .unwrap_or_else(|| "Cancelled by customer".to_string());
    order.cancel(reason, Utc::now())?;

    let saved = repo.save(order).await?;
    Ok(ok_with_message(saved, "Order cancelled"))
}

/// GET /api/orders - every order on the platform (master admin only)
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<AppResponse<Vec<Order>>>> {
    user.ensure_master_admin()?;
    let orders = OrderRepository::new(state.get_db()).find_all().await?;
    Ok(ok(orders))
}

/// GET /api/orders/by-user/{user_id} - a customer's own history
pub async fn list_by_user(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(user_id): Path<String>,
) -> AppResult<Json<AppResponse<Vec<Order>>>> {
    user.ensure_customer(&user_id)?;
    let orders = OrderRepository::new(state.get_db())
        .find_by_user(&user_id)
        .await?;
    Ok(ok(orders))
}

/// GET /api/orders/by-outlet/{outlet_id} - an outlet's incoming orders
pub async fn list_by_outlet(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(outlet_id): Path<String>,
) -> AppResult<Json<AppResponse<Vec<Order>>>> {
    user.ensure_outlet(&outlet_id)?;
    let orders = OrderRepository::new(state.get_db())
        .find_by_outlet(&outlet_id)
        .await?;
    Ok(ok(orders))
}

/// PUT /api/orders/{id}/status - staff-side status change
pub async fn update_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(req): Json<StatusUpdateRequest>,
) -> AppResult<Json<AppResponse<Order>>> {
    let repo = OrderRepository::new(state.get_db());
    let mut order = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;
    user.ensure_outlet(&order.outlet.to_string())?;

    if req.status == OrderStatus::Cancelled {
        validate_optional_text(&req.reason, "reason", MAX_NOTE_LEN)?;
        let reason = req
            .reason
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| "Cancelled by outlet".to_string());
        order.cancel(reason, Utc::now())?;
    } else {
        order.advance(req.status, Utc::now())?;
    }

    let saved = repo.save(order).await?;
    Ok(ok(saved))
}

/// PUT /api/orders/{id}/payment - staff-side payment settlement
pub async fn update_payment(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(req): Json<PaymentUpdateRequest>,
) -> AppResult<Json<AppResponse<Order>>> {
    let repo = OrderRepository::new(state.get_db());
    let mut order = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;
    user.ensure_outlet(&order.outlet.to_string())?;

    if order.status == OrderStatus::Cancelled {
        return Err(AppError::business_rule(
            "Cannot update payment on a cancelled order",
        ));
    }

    order.payment_status = req.payment_status;
    let saved = repo.save(order).await?;
    Ok(ok(saved))
}
