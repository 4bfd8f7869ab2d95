//! Database module
//!
//! Embedded SurrealDB: RocksDB on disk in production, in-memory engine for
//! tests. Both land on the same `Surreal<Db>` handle.

pub mod models;
pub mod repository;

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "savora";
const DATABASE: &str = "storefront";

/// Open the on-disk database under the configured data directory
pub async fn connect(data_dir: &str) -> Result<Surreal<Db>, AppError> {
    let path = Path::new(data_dir).join("storefront.db");
    let db = Surreal::new::<RocksDb>(path)
        .await
        .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
    db.use_ns(NAMESPACE)
        .use_db(DATABASE)
        .await
        .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

    tracing::info!(data_dir, "Database connection established (embedded RocksDB)");
    Ok(db)
}

/// Open an in-memory database (tests)
pub async fn connect_memory() -> Result<Surreal<Db>, AppError> {
    let db = Surreal::new::<Mem>(())
        .await
        .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;
    db.use_ns(NAMESPACE)
        .use_db(DATABASE)
        .await
        .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;
    Ok(db)
}
