//! Menu item model

use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

/// Menu item ID type
pub type MenuItemId = RecordId;

/// One dish on an outlet's menu
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<MenuItemId>,
    #[serde(with = "serde_helpers::record_id")]
    pub outlet: RecordId,
    pub name: String,
    pub price: f64,
    pub category: String,
    /// Dietary flag (veg / non-veg)
    #[serde(default)]
    pub is_veg: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

/// Create payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MenuItemCreate {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    #[serde(default)]
    pub is_veg: bool,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    pub image: Option<String>,
}

/// Update payload (all fields optional)
#[derive(Debug, Clone, Deserialize, Serialize, Default, Validate)]
pub struct MenuItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_veg: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
