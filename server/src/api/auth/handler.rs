//! Authentication handlers
//!
//! Login plus the three-step password reset (send code, verify, reset).
//! Both account collections (customers and outlets) authenticate here; the
//! request says which one the credential belongs to.

use std::time::Duration;

use axum::{Json, extract::State};
use serde_json::json;

use crate::AppError;
use crate::auth::CurrentUser;
use crate::auth::Role;
use crate::auth::password::{hash_password, verify_password};
use crate::core::ServerState;
use crate::db::repository::{OutletRepository, UserRepository};
use crate::security_log;
use crate::utils::validation::MIN_PASSWORD_LEN;
use crate::utils::{AppResponse, AppResult, ok, ok_with_message};
use shared::client::{
    AccountInfo, AccountKind, LoginRequest, LoginResponse, ResetPasswordRequest, SendOtpRequest,
    VerifyOtpRequest,
};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// One authenticated account, regardless of which collection it lives in
struct Credential {
    id: String,
    email: String,
    name: String,
    hash_pass: String,
    role: Role,
}

async fn find_credential(
    state: &ServerState,
    email: &str,
    account: AccountKind,
) -> Result<Option<Credential>, AppError> {
    match account {
        AccountKind::Customer => {
            let user = UserRepository::new(state.get_db())
                .find_by_email(email)
                .await?;
            Ok(user.and_then(|u| {
                let id = u.id.as_ref()?.to_string();
                Some(Credential {
                    id,
                    email: u.email,
                    name: u.name,
                    hash_pass: u.hash_pass,
                    role: Role::Customer,
                })
            }))
        }
        AccountKind::Outlet => {
            let outlet = OutletRepository::new(state.get_db())
                .find_by_email(email)
                .await?;
            Ok(outlet.and_then(|o| {
                let id = o.id.as_ref()?.to_string();
                let role = if state.is_master_admin_email(&o.email) {
                    Role::MasterAdmin
                } else {
                    Role::Outlet
                };
                Some(Credential {
                    id,
                    email: o.email,
                    name: o.name,
                    hash_pass: o.hash_pass,
                    role,
                })
            }))
        }
    }
}

/// POST /api/auth/login
///
/// Unified error message and fixed delay, so a failed login leaks neither
/// which field was wrong nor whether the account exists.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<AppResponse<LoginResponse>>> {
    let credential = find_credential(&state, &req.email, req.account).await?;

    // Fixed delay before checking the result
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let credential = match credential {
        Some(c) => c,
        None => {
            security_log!("WARN", "login_failed", email = req.email.clone());
            return Err(AppError::invalid_credentials());
        }
    };

    let valid = verify_password(&req.password, &credential.hash_pass)
        .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;
    if !valid {
        security_log!("WARN", "login_failed", email = req.email.clone());
        return Err(AppError::invalid_credentials());
    }

    let token = state
        .get_jwt_service()
        .generate_token(
            &credential.id,
            &credential.email,
            &credential.name,
            credential.role,
        )
        .map_err(|e| AppError::internal(format!("Token generation failed: {}", e)))?;

    security_log!(
        "INFO",
        "login_success",
        email = credential.email.clone(),
        role = credential.role.as_str()
    );

    Ok(ok(LoginResponse {
        token,
        account: AccountInfo {
            id: credential.id,
            email: credential.email,
            name: credential.name,
            role: credential.role.as_str().to_string(),
        },
    }))
}

/// GET /api/auth/me - the account behind the presented token
pub async fn me(user: CurrentUser) -> AppResult<Json<AppResponse<AccountInfo>>> {
    Ok(ok(AccountInfo {
        id: user.id,
        email: user.email,
        name: user.name,
        role: user.role.as_str().to_string(),
    }))
}

/// Whether any account (customer or outlet) exists for this email
async fn account_exists(state: &ServerState, email: &str) -> Result<bool, AppError> {
    if UserRepository::new(state.get_db())
        .find_by_email(email)
        .await?
        .is_some()
    {
        return Ok(true);
    }
    Ok(OutletRepository::new(state.get_db())
        .find_by_email(email)
        .await?
        .is_some())
}

/// POST /api/auth/send-otp
///
/// Without an SMTP relay configured (development), the code is returned in
/// the response body instead of being mailed.
pub async fn send_otp(
    State(state): State<ServerState>,
    Json(req): Json<SendOtpRequest>,
) -> AppResult<Json<AppResponse<serde_json::Value>>> {
    let email = req.email.trim().to_lowercase();

    if !account_exists(&state, &email).await? {
        return Err(AppError::not_found("No account with this email"));
    }

    let record = state.otp_service().issue(&email).await?;

    match &state.mailer {
        Some(mailer) => {
            mailer
                .send_otp(&email, &record.code, state.config.otp_expiry_minutes)
                .await?;
            security_log!("INFO", "otp_sent", email = email);
            Ok(ok_with_message(json!({}), "OTP sent"))
        }
        None if !state.config.is_production() => {
            tracing::warn!("SMTP not configured, returning OTP inline");
            Ok(ok_with_message(json!({ "otp": record.code }), "OTP generated"))
        }
        None => Err(AppError::internal("Mail is not configured")),
    }
}

/// POST /api/auth/verify-otp
///
/// Checks the code without consuming it; the reset step re-verifies.
pub async fn verify_otp(
    State(state): State<ServerState>,
    Json(req): Json<VerifyOtpRequest>,
) -> AppResult<Json<AppResponse<()>>> {
    let email = req.email.trim().to_lowercase();
    state.otp_service().verify(&email, &req.otp).await?;
    Ok(ok_with_message((), "OTP verified"))
}

/// POST /api/auth/reset-password
///
/// Verifies and burns the code, then replaces the stored hash. A prior
/// verify-otp call is never trusted on its own.
pub async fn reset_password(
    State(state): State<ServerState>,
    Json(req): Json<ResetPasswordRequest>,
) -> AppResult<Json<AppResponse<()>>> {
    if req.new_password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }

    let email = req.email.trim().to_lowercase();
    state.otp_service().consume(&email, &req.otp).await?;

    let new_hash = hash_password(&req.new_password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?;

    match req.account {
        AccountKind::Customer => {
            UserRepository::new(state.get_db())
                .update_password(&email, &new_hash)
                .await?
        }
        AccountKind::Outlet => {
            OutletRepository::new(state.get_db())
                .update_password(&email, &new_hash)
                .await?
        }
    }

    security_log!("INFO", "password_reset", email = email);
    Ok(ok_with_message((), "Password reset successful"))
}
