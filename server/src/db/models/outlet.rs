//! Outlet (restaurant tenant) model
//!
//! The settlement fields are restricted: only the master admin and the
//! outlet itself ever see them. [`Outlet::public_view`] strips them for
//! everyone else.

use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

/// Outlet ID type
pub type OutletId = RecordId;

/// Outlet profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outlet {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<OutletId>,
    pub name: String,
    pub owner_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    #[serde(default)]
    pub opening_hours: Option<String>,
    #[serde(default)]
    pub delivery_enabled: bool,
    /// Path of the uploaded UPI payment QR image
    #[serde(default)]
    pub payment_qr_image: Option<String>,
    // ── Settlement fields (master admin / self only) ────────────────
    #[serde(default)]
    pub upi_id: Option<String>,
    #[serde(default)]
    pub account_holder_name: Option<String>,
    #[serde(default)]
    pub bank_account_number: Option<String>,
    #[serde(default)]
    pub ifsc_code: Option<String>,
    #[serde(default)]
    pub bank_name: Option<String>,
    /// PBKDF2 salt:hash, never serialized back to clients
    #[serde(skip_serializing)]
    pub hash_pass: String,
    pub created_at: DateTime<Utc>,
}

/// Outlet profile without settlement fields
#[derive(Debug, Clone, Serialize)]
pub struct OutletPublic {
    #[serde(skip_serializing_if = "Option::is_none", with = "serde_helpers::option_record_id")]
    pub id: Option<OutletId>,
    pub name: String,
    pub owner_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub opening_hours: Option<String>,
    pub delivery_enabled: bool,
    pub payment_qr_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Outlet {
    /// Strip the settlement fields for non-privileged viewers
    pub fn public_view(&self) -> OutletPublic {
        OutletPublic {
            id: self.id.clone(),
            name: self.name.clone(),
            owner_name: self.owner_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            opening_hours: self.opening_hours.clone(),
            delivery_enabled: self.delivery_enabled,
            payment_qr_image: self.payment_qr_image.clone(),
            created_at: self.created_at,
        }
    }
}

/// Outlet signup payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OutletCreate {
    #[validate(length(min = 2, max = 200))]
    pub name: String,
    #[validate(length(min = 2, max = 100))]
    pub owner_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(custom(function = super::validate_phone))]
    pub phone: String,
    #[validate(length(min = 1, max = 500))]
    pub address: String,
    pub opening_hours: Option<String>,
    #[serde(default)]
    pub delivery_enabled: bool,
    #[validate(length(min = 6, max = 100))]
    pub password: String,
}

/// Outlet settings update payload (all fields optional)
#[derive(Debug, Clone, Deserialize, Serialize, Default, Validate)]
pub struct OutletUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 2, max = 200))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_qr_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upi_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_holder_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_account_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ifsc_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
}

impl OutletUpdate {
    /// Whether the update touches any settlement field
    pub fn touches_settlement(&self) -> bool {
        self.upi_id.is_some()
            || self.account_holder_name.is_some()
            || self.bank_account_number.is_some()
            || self.ifsc_code.is_some()
            || self.bank_name.is_some()
    }
}
