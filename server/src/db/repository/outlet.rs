//! Outlet Repository

use super::{BaseRepository, RepoError, RepoResult, parse_id};
use crate::auth::password::hash_password;
use crate::db::models::{Outlet, OutletCreate, OutletUpdate};
use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "outlet";

#[derive(Clone)]
pub struct OutletRepository {
    base: BaseRepository,
}

impl OutletRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all outlets
    pub async fn find_all(&self) -> RepoResult<Vec<Outlet>> {
        let outlets: Vec<Outlet> = self
            .base
            .db()
            .query("SELECT * FROM outlet ORDER BY name")
            .await?
            .take(0)?;
        Ok(outlets)
    }

    /// Find outlet by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Outlet>> {
        let record_id = parse_id(TABLE, id)?;
        let outlet: Option<Outlet> = self.base.db().select(record_id).await?;
        Ok(outlet)
    }

    /// Find outlet by email (emails are stored lowercased)
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<Outlet>> {
        let email = email.trim().to_lowercase();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM outlet WHERE email = $email LIMIT 1")
            .bind(("email", email))
            .await?;
        let outlets: Vec<Outlet> = result.take(0)?;
        Ok(outlets.into_iter().next())
    }

    /// Register a new outlet
    pub async fn create(&self, data: OutletCreate) -> RepoResult<Outlet> {
        let email = data.email.trim().to_lowercase();

        if self.find_by_email(&email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Email '{}' already exists",
                email
            )));
        }

        let hash_pass = hash_password(&data.password)
            .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?;

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE outlet SET
                    name = $name,
                    owner_name = $owner_name,
                    email = $email,
                    phone = $phone,
                    address = $address,
                    opening_hours = $opening_hours,
                    delivery_enabled = $delivery_enabled,
                    hash_pass = $hash_pass,
                    created_at = $created_at
                RETURN AFTER"#,
            )
            .bind(("name", data.name))
            .bind(("owner_name", data.owner_name))
            .bind(("email", email))
            .bind(("phone", data.phone))
            .bind(("address", data.address))
            .bind(("opening_hours", data.opening_hours))
            .bind(("delivery_enabled", data.delivery_enabled))
            .bind(("hash_pass", hash_pass))
            .bind(("created_at", Utc::now()))
            .await?;

        let created: Option<Outlet> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create outlet".to_string()))
    }

    /// Merge profile/settings fields into an outlet
    pub async fn update(&self, id: &str, data: OutletUpdate) -> RepoResult<Outlet> {
        let record_id = parse_id(TABLE, id)?;

        self.base
            .db()
            .query("UPDATE $outlet MERGE $data")
            .bind(("outlet", record_id))
            .bind(("data", data))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Outlet {} not found", id)))
    }

    /// Replace the stored password hash for an email
    pub async fn update_password(&self, email: &str, new_hash: &str) -> RepoResult<()> {
        let email = email.trim().to_lowercase();
        let mut result = self
            .base
            .db()
            .query("UPDATE outlet SET hash_pass = $hash WHERE email = $email RETURN AFTER")
            .bind(("hash", new_hash.to_string()))
            .bind(("email", email.clone()))
            .await?;

        let updated: Vec<Outlet> = result.take(0)?;
        if updated.is_empty() {
            return Err(RepoError::NotFound(format!("Outlet {} not found", email)));
        }
        Ok(())
    }
}
