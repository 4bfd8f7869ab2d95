//! Menu Item Repository

use super::{BaseRepository, RepoError, RepoResult, parse_id};
use crate::db::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "menu_item";
const OUTLET_TABLE: &str = "outlet";

#[derive(Clone)]
pub struct MenuItemRepository {
    base: BaseRepository,
}

impl MenuItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all menu items across outlets
    pub async fn find_all(&self) -> RepoResult<Vec<MenuItem>> {
        let items: Vec<MenuItem> = self
            .base
            .db()
            .query("SELECT * FROM menu_item ORDER BY category, name")
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Find the active menu of one outlet
    ///
    /// Record references are stored in their string form, so the binding is
    /// the canonical `"table:key"` string.
    pub async fn find_by_outlet(&self, outlet_id: &str) -> RepoResult<Vec<MenuItem>> {
        let outlet = parse_id(OUTLET_TABLE, outlet_id)?;
        let items: Vec<MenuItem> = self
            .base
            .db()
            .query("SELECT * FROM menu_item WHERE outlet = $outlet ORDER BY category, name")
            .bind(("outlet", outlet.to_string()))
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Find menu item by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<MenuItem>> {
        let record_id = parse_id(TABLE, id)?;
        let item: Option<MenuItem> = self.base.db().select(record_id).await?;
        Ok(item)
    }

    /// Create a menu item for an outlet
    pub async fn create(&self, outlet_id: &str, data: MenuItemCreate) -> RepoResult<MenuItem> {
        let outlet = parse_id(OUTLET_TABLE, outlet_id)?;
        let now = Utc::now();

        let item = MenuItem {
            id: None,
            outlet,
            name: data.name,
            price: data.price,
            category: data.category,
            is_veg: data.is_veg,
            description: data.description,
            image: data.image,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let created: Option<MenuItem> = self.base.db().create(TABLE).content(item).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create menu item".to_string()))
    }

    /// Merge update fields into a menu item
    pub async fn update(&self, id: &str, data: MenuItemUpdate) -> RepoResult<MenuItem> {
        let record_id = parse_id(TABLE, id)?;

        self.base
            .db()
            .query("UPDATE $item MERGE $data")
            .query("UPDATE $item SET updated_at = $now")
            .bind(("item", record_id))
            .bind(("data", data))
            .bind(("now", Utc::now()))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))
    }

    /// Hard delete a menu item
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let record_id = parse_id(TABLE, id)?;
        let deleted: Option<MenuItem> = self.base.db().delete(record_id).await?;
        Ok(deleted.is_some())
    }
}
