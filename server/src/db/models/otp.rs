//! OTP record model
//!
//! One record per email (the record key IS the email), giving the upsert
//! semantics the reset flow needs: issuing a new code replaces the old one.

use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// A pending one-time passcode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpRecord {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    pub email: String,
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

impl OtpRecord {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}
