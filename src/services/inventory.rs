use crate::{
    entities::inventory_item::Model as InventoryItem,
    errors::ServiceError,
    models::{parse_restock_amount, plan_restock, InventoryDraft, InventoryFilter},
    repositories::InventoryRepository,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// Body returned by the restock action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestockReport {
    pub message: String,
    pub new_stock: i32,
}

pub(crate) fn not_found(id: i32) -> ServiceError {
    ServiceError::NotFound(format!("Inventory item not found (id {})", id))
}

/// Service for managing inventory
#[derive(Clone)]
pub struct InventoryService {
    repository: Arc<dyn InventoryRepository>,
}

impl InventoryService {
    /// Creates a new inventory service instance
    pub fn new(repository: Arc<dyn InventoryRepository>) -> Self {
        Self { repository }
    }

    /// Validates a JSON payload and stores it as a new item
    #[instrument(skip(self, payload))]
    pub async fn create(&self, payload: &Value) -> Result<InventoryItem, ServiceError> {
        let item = InventoryDraft::from_value(payload)?.validate()?;
        let created = self.repository.create(item).await?;
        info!(id = created.id, name = %created.name, "Inventory item created");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<InventoryItem, ServiceError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Lists items matching one filter
    #[instrument(skip(self))]
    pub async fn list(&self, filter: &InventoryFilter) -> Result<Vec<InventoryItem>, ServiceError> {
        let items = match filter {
            InventoryFilter::All => self.repository.find_all().await?,
            InventoryFilter::Name(name) => self.repository.find_by_name(name).await?,
            InventoryFilter::ProductId(product_id) => {
                self.repository.find_by_product_id(*product_id).await?
            }
            InventoryFilter::Condition(condition) => {
                self.repository.find_by_condition(*condition).await?
            }
            InventoryFilter::BelowRestockLevel => self.repository.find_below_restock_level().await?,
        };
        debug!(count = items.len(), "Inventory items listed");
        Ok(items)
    }

    /// Merges `payload` onto `existing`, validates, and stores the result
    #[instrument(skip(self, existing, payload), fields(id = existing.id))]
    pub async fn update(
        &self,
        existing: InventoryItem,
        payload: &Value,
    ) -> Result<InventoryItem, ServiceError> {
        let merged = InventoryDraft::merged(&existing, payload)?
            .validate()?
            .apply_to(existing);
        let updated = self.repository.update(merged).await?;
        info!(id = updated.id, "Inventory item updated");
        Ok(updated)
    }

    /// Deletes an item. Missing ids are not an error.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if self.repository.delete(id).await? {
            info!(id, "Inventory item deleted");
        } else {
            debug!(id, "Delete requested for missing inventory item");
        }
        Ok(())
    }

    /// Applies the restock rule to `existing`.
    ///
    /// With a `quantity` the amount is added. Without one, an item below its
    /// restock level is raised to it; otherwise nothing changes.
    #[instrument(skip(self, existing, payload), fields(id = existing.id))]
    pub async fn restock(
        &self,
        existing: InventoryItem,
        payload: &Value,
    ) -> Result<RestockReport, ServiceError> {
        let amount = parse_restock_amount(payload)?;
        let action = plan_restock(existing.quantity, existing.restock_level, amount)?;

        if let Some(new_quantity) = action.new_quantity() {
            let id = existing.id;
            let item = InventoryItem {
                quantity: new_quantity,
                ..existing
            };
            self.repository.update(item).await.map_err(|e| match e {
                missing @ ServiceError::NotFound(_) => missing,
                ServiceError::DatabaseError(db) => {
                    error!(id, error = %db, "Restock could not be persisted");
                    ServiceError::InternalError(db.to_string())
                }
                other => {
                    error!(id, error = %other, "Restock could not be persisted");
                    ServiceError::InternalError(other.to_string())
                }
            })?;
            info!(id, new_stock = new_quantity, "Inventory restocked");
        } else {
            debug!(id = existing.id, "Restock not needed");
        }

        Ok(RestockReport {
            message: action.message().to_string(),
            new_stock: action.stock(),
        })
    }

    /// Checks that the store answers
    pub async fn health(&self) -> Result<(), ServiceError> {
        self.repository.ping().await
    }
}
