use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::sync::Arc;
use tracing::debug;

use crate::entities::inventory_item::{
    ActiveModel as InventoryActiveModel, Column, Entity as Inventory, ItemCondition,
    Model as InventoryItem,
};
use crate::errors::ServiceError;
use crate::models::NewInventoryItem;

use super::{BaseRepository, InventoryRepository, Repository};

/// sea-orm backed inventory store
#[derive(Debug, Clone)]
pub struct SeaOrmInventoryRepository {
    base: BaseRepository,
}

impl SeaOrmInventoryRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    async fn find_where<F>(&self, filter: F) -> Result<Vec<InventoryItem>, ServiceError>
    where
        F: sea_orm::sea_query::IntoCondition + Send,
    {
        Inventory::find()
            .filter(filter)
            .order_by_asc(Column::Id)
            .all(self.base.get_db())
            .await
            .map_err(ServiceError::DatabaseError)
    }
}

#[async_trait]
impl InventoryRepository for SeaOrmInventoryRepository {
    async fn create(&self, item: NewInventoryItem) -> Result<InventoryItem, ServiceError> {
        let active = InventoryActiveModel {
            id: ActiveValue::NotSet,
            name: Set(item.name),
            product_id: Set(item.product_id),
            quantity: Set(item.quantity),
            condition: Set(item.condition),
            restock_level: Set(item.restock_level),
        };

        let txn = self.base.get_db().begin().await?;
        let created = active.insert(&txn).await?;
        txn.commit().await?;

        debug!(id = created.id, "inventory row inserted");
        Ok(created)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<InventoryItem>, ServiceError> {
        Inventory::find_by_id(id)
            .one(self.base.get_db())
            .await
            .map_err(ServiceError::DatabaseError)
    }

    async fn find_all(&self) -> Result<Vec<InventoryItem>, ServiceError> {
        Inventory::find()
            .order_by_asc(Column::Id)
            .all(self.base.get_db())
            .await
            .map_err(ServiceError::DatabaseError)
    }

    async fn update(&self, item: InventoryItem) -> Result<InventoryItem, ServiceError> {
        let id = item.id;
        let active = InventoryActiveModel {
            id: ActiveValue::Unchanged(item.id),
            name: Set(item.name),
            product_id: Set(item.product_id),
            quantity: Set(item.quantity),
            condition: Set(item.condition),
            restock_level: Set(item.restock_level),
        };

        let txn = self.base.get_db().begin().await?;
        let updated = match active.update(&txn).await {
            Ok(model) => model,
            // Dropping the transaction rolls it back
            Err(DbErr::RecordNotUpdated) | Err(DbErr::RecordNotFound(_)) => {
                return Err(ServiceError::NotFound(format!(
                    "Inventory item with id {} not found",
                    id
                )))
            }
            Err(e) => return Err(ServiceError::DatabaseError(e)),
        };
        txn.commit().await?;

        debug!(id, "inventory row updated");
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let txn = self.base.get_db().begin().await?;
        let result = Inventory::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        debug!(id, rows = result.rows_affected, "inventory delete executed");
        Ok(result.rows_affected > 0)
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<InventoryItem>, ServiceError> {
        self.find_where(Column::Name.eq(name)).await
    }

    async fn find_by_product_id(
        &self,
        product_id: i32,
    ) -> Result<Vec<InventoryItem>, ServiceError> {
        self.find_where(Column::ProductId.eq(product_id)).await
    }

    async fn find_by_condition(
        &self,
        condition: ItemCondition,
    ) -> Result<Vec<InventoryItem>, ServiceError> {
        self.find_where(Column::Condition.eq(condition)).await
    }

    async fn find_below_restock_level(&self) -> Result<Vec<InventoryItem>, ServiceError> {
        self.find_where(Expr::col(Column::Quantity).lt(Expr::col(Column::RestockLevel)))
            .await
    }

    async fn ping(&self) -> Result<(), ServiceError> {
        crate::db::check_connection(self.base.get_db()).await
    }
}
