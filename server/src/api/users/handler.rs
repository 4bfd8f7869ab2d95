//! Customer account handlers

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::{CurrentUser, Role};
use crate::core::ServerState;
use crate::db::models::{User, UserCreate};
use crate::db::repository::{OutletRepository, UserRepository};
use crate::security_log;
use crate::utils::validation::MIN_PASSWORD_LEN;
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};
use shared::client::ChangePasswordRequest;

/// POST /api/users - customer signup (public)
pub async fn signup(
    State(state): State<ServerState>,
    Json(payload): Json<UserCreate>,
) -> AppResult<Json<AppResponse<User>>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let user = UserRepository::new(state.get_db()).create(payload).await?;
    Ok(ok_with_message(user, "Account created"))
}

/// GET /api/users - all customers (master admin only)
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<AppResponse<Vec<User>>>> {
    user.ensure_master_admin()?;
    let users = UserRepository::new(state.get_db()).find_all().await?;
    Ok(ok(users))
}

/// PUT /api/users/password - change own password (any signed-in account)
///
/// Requires the current password, so a stolen token alone cannot rotate
/// the credential.
pub async fn change_password(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<ChangePasswordRequest>,
) -> AppResult<Json<AppResponse<()>>> {
    if req.new_password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }

    let stored_hash = match user.role {
        Role::Customer => UserRepository::new(state.get_db())
            .find_by_id(&user.id)
            .await?
            .map(|u| u.hash_pass),
        Role::Outlet | Role::MasterAdmin => OutletRepository::new(state.get_db())
            .find_by_id(&user.id)
            .await?
            .map(|o| o.hash_pass),
    }
    .ok_or_else(|| AppError::not_found("Account not found"))?;

    let valid = verify_password(&req.current_password, &stored_hash)
        .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;
    if !valid {
        security_log!("WARN", "password_change_rejected", email = user.email.clone());
        return Err(AppError::validation("Current password is incorrect"));
    }

    let new_hash = hash_password(&req.new_password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?;

    match user.role {
        Role::Customer => {
            UserRepository::new(state.get_db())
                .update_password(&user.email, &new_hash)
                .await?
        }
        Role::Outlet | Role::MasterAdmin => {
            OutletRepository::new(state.get_db())
                .update_password(&user.email, &new_hash)
                .await?
        }
    }

    security_log!("INFO", "password_changed", email = user.email);
    Ok(ok_with_message((), "Password updated"))
}

/// GET /api/users/{id} - one account (self or master admin)
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<User>>> {
    user.ensure_customer(&id)?;
    let found = UserRepository::new(state.get_db())
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {} not found", id)))?;
    Ok(ok(found))
}
