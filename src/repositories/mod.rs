use crate::entities::inventory_item::{ItemCondition, Model as InventoryItem};
use crate::errors::ServiceError;
use crate::models::NewInventoryItem;
use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

pub mod inventory_repository;

pub use inventory_repository::SeaOrmInventoryRepository;

/// Repository trait for common database operations
pub trait Repository {
    fn get_db(&self) -> &DatabaseConnection;
}

#[derive(Debug, Clone)]
pub struct BaseRepository {
    db: Arc<DatabaseConnection>,
}

impl BaseRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl Repository for BaseRepository {
    fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }
}

/// Store interface for inventory items.
///
/// Every write runs in its own transaction. Reads never mutate.
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    /// Persists a validated item and returns it with its assigned id
    async fn create(&self, item: NewInventoryItem) -> Result<InventoryItem, ServiceError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<InventoryItem>, ServiceError>;

    /// All items in insertion order
    async fn find_all(&self) -> Result<Vec<InventoryItem>, ServiceError>;

    /// Writes every field of `item` over the stored row with the same id
    async fn update(&self, item: InventoryItem) -> Result<InventoryItem, ServiceError>;

    /// Returns whether a row was removed
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;

    async fn find_by_name(&self, name: &str) -> Result<Vec<InventoryItem>, ServiceError>;

    async fn find_by_product_id(&self, product_id: i32)
        -> Result<Vec<InventoryItem>, ServiceError>;

    async fn find_by_condition(
        &self,
        condition: ItemCondition,
    ) -> Result<Vec<InventoryItem>, ServiceError>;

    /// Items whose quantity is strictly below their restock level
    async fn find_below_restock_level(&self) -> Result<Vec<InventoryItem>, ServiceError>;

    /// Round-trips to the store
    async fn ping(&self) -> Result<(), ServiceError>;
}
