//! OTP Repository
//!
//! The record key is the (lowercased) email address, so issuing a new code
//! for an address overwrites any outstanding one.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::OtpRecord;
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "otp";

#[derive(Clone)]
pub struct OtpRepository {
    base: BaseRepository,
}

impl OtpRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn key(email: &str) -> RecordId {
        RecordId::from_table_key(TABLE, email.trim().to_lowercase())
    }

    /// Insert or replace the pending code for an email
    pub async fn upsert(&self, record: OtpRecord) -> RepoResult<OtpRecord> {
        let key = Self::key(&record.email);
        let stored: Option<OtpRecord> = self.base.db().upsert(key).content(record).await?;
        stored.ok_or_else(|| RepoError::Database("Failed to store OTP".to_string()))
    }

    /// The pending code for an email, if any
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<OtpRecord>> {
        let record: Option<OtpRecord> = self.base.db().select(Self::key(email)).await?;
        Ok(record)
    }

    /// Remove the pending code for an email (expiry or successful use)
    pub async fn delete(&self, email: &str) -> RepoResult<()> {
        let _: Option<OtpRecord> = self.base.db().delete(Self::key(email)).await?;
        Ok(())
    }
}
