//! Menu handlers
//!
//! Reads are public: customers browse an outlet's menu straight from the QR
//! link without an account. Deactivated items stay visible to the owning
//! outlet and the master admin only.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use validator::Validate;

use crate::auth::{CurrentUser, Role};
use crate::core::ServerState;
use crate::db::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use crate::db::repository::MenuItemRepository;
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};

fn manages_outlet(viewer: &Option<CurrentUser>, outlet_id: &str) -> bool {
    viewer
        .as_ref()
        .is_some_and(|user| user.ensure_outlet(outlet_id).is_ok())
}

/// GET /api/menu - all menu items (active only for anonymous viewers)
pub async fn list(
    State(state): State<ServerState>,
    viewer: Option<CurrentUser>,
) -> AppResult<Json<AppResponse<Vec<MenuItem>>>> {
    let mut items = MenuItemRepository::new(state.get_db()).find_all().await?;

    if !viewer.as_ref().is_some_and(CurrentUser::is_master_admin) {
        items.retain(|item| item.is_active);
    }
    Ok(ok(items))
}

/// GET /api/menu/by-outlet/{outlet_id} - one outlet's menu
pub async fn list_by_outlet(
    State(state): State<ServerState>,
    viewer: Option<CurrentUser>,
    Path(outlet_id): Path<String>,
) -> AppResult<Json<AppResponse<Vec<MenuItem>>>> {
    let mut items = MenuItemRepository::new(state.get_db())
        .find_by_outlet(&outlet_id)
        .await?;

    if !manages_outlet(&viewer, &outlet_id) {
        items.retain(|item| item.is_active);
    }
    Ok(ok(items))
}

/// GET /api/menu/{id} - one menu item
pub async fn get_by_id(
    State(state): State<ServerState>,
    viewer: Option<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<MenuItem>>> {
    let item = MenuItemRepository::new(state.get_db())
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Menu item {} not found", id)))?;

    // Deactivated items look deleted to everyone but their managers
    if !item.is_active && !manages_outlet(&viewer, &item.outlet.to_string()) {
        return Err(AppError::not_found(format!("Menu item {} not found", id)));
    }
    Ok(ok(item))
}

/// Create payload; `outlet_id` is only honored for the master admin,
/// outlet staff always write to their own menu
#[derive(Debug, Deserialize)]
pub struct CreateMenuItemRequest {
    pub outlet_id: Option<String>,
    #[serde(flatten)]
    pub item: MenuItemCreate,
}

/// POST /api/menu - add a dish
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<CreateMenuItemRequest>,
) -> AppResult<Json<AppResponse<MenuItem>>> {
    payload
        .item
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let outlet_id = match user.role {
        Role::Outlet => user.id.clone(),
        Role::MasterAdmin => payload
            .outlet_id
            .clone()
            .ok_or_else(|| AppError::validation("outlet_id is required"))?,
        Role::Customer => return Err(AppError::forbidden("Outlet access required")),
    };

    let item = MenuItemRepository::new(state.get_db())
        .create(&outlet_id, payload.item)
        .await?;
    Ok(ok_with_message(item, "Menu item created"))
}

/// PUT /api/menu/{id} - update a dish (owning outlet or master admin)
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<AppResponse<MenuItem>>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let repo = MenuItemRepository::new(state.get_db());
    let item = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Menu item {} not found", id)))?;
    user.ensure_outlet(&item.outlet.to_string())?;

    let updated = repo.update(&id, payload).await?;
    Ok(ok(updated))
}

/// DELETE /api/menu/{id} - remove a dish (owning outlet or master admin)
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    let repo = MenuItemRepository::new(state.get_db());
    let item = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Menu item {} not found", id)))?;
    user.ensure_outlet(&item.outlet.to_string())?;

    let deleted = repo.delete(&id).await?;
    Ok(ok(deleted))
}
