//! User Repository

use super::{BaseRepository, RepoError, RepoResult, parse_id};
use crate::auth::password::hash_password;
use crate::db::models::{User, UserCreate};
use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "user";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all users
    pub async fn find_all(&self) -> RepoResult<Vec<User>> {
        let users: Vec<User> = self
            .base
            .db()
            .query("SELECT * FROM user ORDER BY created_at")
            .await?
            .take(0)?;
        Ok(users)
    }

    /// Find user by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        let record_id = parse_id(TABLE, id)?;
        let user: Option<User> = self.base.db().select(record_id).await?;
        Ok(user)
    }

    /// Find user by email (emails are stored lowercased)
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let email = email.trim().to_lowercase();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE email = $email LIMIT 1")
            .bind(("email", email))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Create a new user account
    pub async fn create(&self, data: UserCreate) -> RepoResult<User> {
        let email = data.email.trim().to_lowercase();

        // Check duplicate email
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
                r#"CREATE user SET
                    name = $name,
                    email = $email,
                    phone = $phone,
                    hash_pass = $hash_pass,
                    created_at = $created_at
                RETURN AFTER"#,
            )
            .bind(("name", data.name))
            .bind(("email", email))
            .bind(("phone", data.phone))
            .bind(("hash_pass", hash_pass))
            .bind(("created_at", Utc::now()))
            .await?;

        let created: Option<User> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    /// Replace the stored password hash for an email
    pub async fn update_password(&self, email: &str, new_hash: &str) -> RepoResult<()> {
        let email = email.trim().to_lowercase();
        let mut result = self
            .base
            .db()
            .query("UPDATE user SET hash_pass = $hash WHERE email = $email RETURN AFTER")
            .bind(("hash", new_hash.to_string()))
            .bind(("email", email.clone()))
            .await?;

        let updated: Vec<User> = result.take(0)?;
        if updated.is_empty() {
            return Err(RepoError::NotFound(format!("User {} not found", email)));
        }
        Ok(())
    }
}
