//! Rating handlers
//!
//! A rating is tied to a completed order: only the customer who placed the
//! order may leave one, and only once.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use shared::order::OrderStatus;
use validator::Validate;

use crate::auth::{CurrentUser, Role};
use crate::core::ServerState;
use crate::db::models::{Rating, RatingCreate, RatingSummary};
use crate::db::repository::{OrderRepository, RatingRepository};
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};

/// GET /api/ratings/by-outlet/{outlet_id} - public rating summary
pub async fn summary_by_outlet(
    State(state): State<ServerState>,
    Path(outlet_id): Path<String>,
) -> AppResult<Json<AppResponse<RatingSummary>>> {
    let ratings = RatingRepository::new(state.get_db())
        .find_by_outlet(&outlet_id)
        .await?;
    Ok(ok(RatingSummary::from_ratings(ratings)))
}

/// POST /api/ratings - rate a completed order
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<RatingCreate>,
) -> AppResult<Json<AppResponse<Rating>>> {
    if user.role != Role::Customer {
        return Err(AppError::forbidden("Only customers can rate orders"));
    }
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let order = OrderRepository::new(state.get_db())
        .find_by_id(&payload.order_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", payload.order_id)))?;

    if order.user.as_deref() != Some(user.id.as_str()) {
        return Err(AppError::forbidden("You can only rate your own orders"));
    }
    if order.status != OrderStatus::Completed {
        return Err(AppError::business_rule(
            "Only completed orders can be rated",
        ));
    }

    let rating_repo = RatingRepository::new(state.get_db());
    if rating_repo
        .find_by_order_and_user(&payload.order_id, &user.id)
        .await?
        .is_some()
    {
        return Err(AppError::conflict("This order has already been rated"));
    }

    let order_id = order
        .id
        .ok_or_else(|| AppError::internal("Order record without id"))?;

    let rating = rating_repo
        .create(Rating {
            id: None,
            outlet: order.outlet,
            user: user.id,
            order: order_id,
            rating: payload.rating,
            comment: payload.comment,
            created_at: Utc::now(),
        })
        .await?;

    Ok(ok_with_message(rating, "Thanks for the feedback"))
}
