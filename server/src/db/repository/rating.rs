//! Rating Repository

use super::{BaseRepository, RepoError, RepoResult, parse_id};
use crate::db::models::Rating;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "rating";
const OUTLET_TABLE: &str = "outlet";
const ORDER_TABLE: &str = "order";

#[derive(Clone)]
pub struct RatingRepository {
    base: BaseRepository,
}

impl RatingRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All ratings for an outlet, newest first
    pub async fn find_by_outlet(&self, outlet_id: &str) -> RepoResult<Vec<Rating>> {
        let outlet = parse_id(OUTLET_TABLE, outlet_id)?;
        let ratings: Vec<Rating> = self
            .base
            .db()
            .query("SELECT * FROM rating WHERE outlet = $outlet ORDER BY created_at DESC")
            .bind(("outlet", outlet.to_string()))
            .await?
            .take(0)?;
        Ok(ratings)
    }

    /// The rating one user left on one order, if any
    pub async fn find_by_order_and_user(
        &self,
        order_id: &str,
        user_id: &str,
    ) -> RepoResult<Option<Rating>> {
        let order = parse_id(ORDER_TABLE, order_id)?;
        let mut result = self
            .base
            .db()
            // `order` is a keyword, so the field name needs escaping here
            .query("SELECT * FROM rating WHERE `order` = $order AND user = $user LIMIT 1")
            .bind(("order", order.to_string()))
            .bind(("user", user_id.to_string()))
            .await?;
        let ratings: Vec<Rating> = result.take(0)?;
        Ok(ratings.into_iter().next())
    }

    /// Store a rating; the caller has already checked for duplicates
    pub async fn create(&self, rating: Rating) -> RepoResult<Rating> {
        let created: Option<Rating> = self.base.db().create(TABLE).content(rating).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create rating".to_string()))
    }
}
