//! Customer account model

use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

/// User ID type
pub type UserId = RecordId;

/// Customer account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<UserId>,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// PBKDF2 salt:hash, never serialized back to clients
    #[serde(skip_serializing)]
    pub hash_pass: String,
    pub created_at: DateTime<Utc>,
}

/// Signup payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UserCreate {
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(custom(function = super::validate_phone))]
    pub phone: String,
    #[validate(length(min = 6, max = 100))]
    pub password: String,
}
