//! Order Repository
//!
//! Orders are written whole: lifecycle operations mutate an in-memory
//! [`Order`] and `save` persists the full document. Partial merges would let
//! the status and its history drift apart.

use super::{BaseRepository, RepoError, RepoResult, parse_id};
use crate::db::models::Order;
use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "order";
const OUTLET_TABLE: &str = "outlet";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All orders, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM order ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Find order by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let record_id = parse_id(TABLE, id)?;
        let order: Option<Order> = self.base.db().select(record_id).await?;
        Ok(order)
    }

    /// Orders placed by one registered user, newest first
    pub async fn find_by_user(&self, user_id: &str) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM order WHERE user = $user ORDER BY created_at DESC")
            .bind(("user", user_id.to_string()))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Orders received by one outlet, newest first
    pub async fn find_by_outlet(&self, outlet_id: &str) -> RepoResult<Vec<Order>> {
        let outlet = parse_id(OUTLET_TABLE, outlet_id)?;
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM order WHERE outlet = $outlet ORDER BY created_at DESC")
            .bind(("outlet", outlet.to_string()))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Persist a freshly built order
    pub async fn create(&self, order: Order) -> RepoResult<Order> {
        let created: Option<Order> = self.base.db().create(TABLE).content(order).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Replace the stored document with the given state
    pub async fn save(&self, mut order: Order) -> RepoResult<Order> {
        // The id names the target row; it must not appear in the content
        let id = order
            .id
            .take()
            .ok_or_else(|| RepoError::Validation("Cannot save an order without an id".to_string()))?;

        order.updated_at = Utc::now();

        let updated: Option<Order> = self.base.db().update(id).content(order).await?;
        updated.ok_or_else(|| RepoError::NotFound("Order not found".to_string()))
    }
}
