//! Repository module
//!
//! One repository per collection over a shared [`BaseRepository`].
//!
//! ID convention: the full stack uses the `"table:key"` string form.
//! `RecordId` handles both directions:
//!   - parse: `let id: RecordId = "order:abc".parse()?;`
//!   - build: `RecordId::from_table_key("order", "abc")`
//!   - CRUD: `db.select(id)` / `db.delete(id)` take the RecordId directly

pub mod menu_item;
pub mod order;
pub mod otp;
pub mod outlet;
pub mod rating;
pub mod user;

pub use menu_item::MenuItemRepository;
pub use order::OrderRepository;
pub use otp::OtpRepository;
pub use outlet::OutletRepository;
pub use rating::RatingRepository;
pub use user::UserRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

use crate::utils::AppError;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::not_found(msg),
            RepoError::Duplicate(msg) => AppError::conflict(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

/// Parse a `"table:key"` id, validating the table prefix
pub(crate) fn parse_id(table: &str, id: &str) -> RepoResult<surrealdb::RecordId> {
    let record_id: surrealdb::RecordId = id
        .parse()
        .map_err(|_| RepoError::Validation(format!("Invalid ID format: {}", id)))?;
    if record_id.table() != table {
        return Err(RepoError::Validation(format!(
            "Expected a {} id, got: {}",
            table, id
        )));
    }
    Ok(record_id)
}
