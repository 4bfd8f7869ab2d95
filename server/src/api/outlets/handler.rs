//! Outlet handlers
//!
//! Reads are public, but the settlement fields (UPI id, bank details) only
//! appear for the master admin or the outlet reading its own profile;
//! everyone else gets [`Outlet::public_view`].

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Outlet, OutletCreate, OutletUpdate};
use crate::db::repository::OutletRepository;
use crate::security_log;
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};

fn sees_settlement(viewer: &Option<CurrentUser>, outlet: &Outlet) -> bool {
    match viewer {
        Some(user) if user.is_master_admin() => true,
        Some(user) => outlet.id.as_ref().is_some_and(|id| id.to_string() == user.id),
        None => false,
    }
}

/// POST /api/outlets - outlet signup (public)
pub async fn signup(
    State(state): State<ServerState>,
    Json(payload): Json<OutletCreate>,
) -> AppResult<Json<AppResponse<Outlet>>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let outlet = OutletRepository::new(state.get_db()).create(payload).await?;
    Ok(ok_with_message(outlet, "Outlet registered"))
}

/// GET /api/outlets - all outlets (public; settlement fields stripped
/// unless the viewer is the master admin)
pub async fn list(
    State(state): State<ServerState>,
    viewer: Option<CurrentUser>,
) -> AppResult<Response> {
    let outlets = OutletRepository::new(state.get_db()).find_all().await?;

    if viewer.as_ref().is_some_and(CurrentUser::is_master_admin) {
        return Ok(ok(outlets).into_response());
    }

    let public: Vec<_> = outlets.iter().map(Outlet::public_view).collect();
    Ok(ok(public).into_response())
}

/// GET /api/outlets/{id} - one outlet profile
pub async fn get_by_id(
    State(state): State<ServerState>,
    viewer: Option<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let outlet = OutletRepository::new(state.get_db())
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Outlet {} not found", id)))?;

    if sees_settlement(&viewer, &outlet) {
        Ok(ok(outlet).into_response())
    } else {
        Ok(ok(outlet.public_view()).into_response())
    }
}

/// PUT /api/outlets/{id} - update profile and settings (self or master admin)
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<OutletUpdate>,
) -> AppResult<Json<AppResponse<Outlet>>> {
    user.ensure_outlet(&id)?;
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    if payload.touches_settlement() {
        security_log!(
            "INFO",
            "settlement_update",
            outlet = id.clone(),
            actor = user.email.clone()
        );
    }

    let outlet = OutletRepository::new(state.get_db())
        .update(&id, payload)
        .await?;
    Ok(ok(outlet))
}
