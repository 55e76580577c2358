//! Typed draft of an inventory item and the validation that turns it into a
//! storable record.
//!
//! Payloads arrive as arbitrary JSON. [`InventoryDraft::from_value`] checks the
//! shape and types of every known field, [`InventoryDraft::validate`] applies
//! the business rules. Neither panics; both return a [`DraftError`].

use crate::entities::inventory_item::{ItemCondition, Model};
use crate::errors::ServiceError;
use serde_json::{Map, Value};
use std::str::FromStr;
use thiserror::Error;

pub const MAX_NAME_LEN: usize = 63;
pub const DEFAULT_QUANTITY: i32 = 0;
pub const DEFAULT_RESTOCK_LEVEL: i32 = 10;

/// A fully validated item that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInventoryItem {
    pub name: String,
    pub product_id: i32,
    pub quantity: i32,
    pub condition: ItemCondition,
    pub restock_level: i32,
}

impl NewInventoryItem {
    /// Applies the validated values onto an existing record, keeping its id
    pub fn apply_to(self, existing: Model) -> Model {
        Model {
            id: existing.id,
            name: self.name,
            product_id: self.product_id,
            quantity: self.quantity,
            condition: self.condition,
            restock_level: self.restock_level,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("Invalid inventory data: expected a JSON object")]
    NotAnObject,

    #[error("Invalid inventory data: {field} {reason}")]
    InvalidField {
        field: &'static str,
        reason: &'static str,
    },

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Name exceeds 63-character limit")]
    NameTooLong,

    #[error("Quantity cannot be negative")]
    NegativeQuantity,

    #[error("Restock level cannot be negative")]
    NegativeRestockLevel,

    #[error("Invalid condition: {0}")]
    InvalidCondition(String),
}

impl From<DraftError> for ServiceError {
    fn from(err: DraftError) -> Self {
        ServiceError::ValidationError(err.to_string())
    }
}

/// Every field optional; unknown keys in the source payload are dropped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryDraft {
    pub name: Option<String>,
    pub product_id: Option<i32>,
    pub quantity: Option<i32>,
    pub condition: Option<String>,
    pub restock_level: Option<i32>,
}

impl InventoryDraft {
    /// Reads the known fields out of a JSON payload.
    ///
    /// Present fields must carry the right JSON type; `null` counts as wrong.
    pub fn from_value(value: &Value) -> Result<Self, DraftError> {
        let object = value.as_object().ok_or(DraftError::NotAnObject)?;
        Self::from_object(object)
    }

    /// Overlays `payload` onto the stored fields of `existing`.
    ///
    /// Keys missing from the payload keep their stored value. The id never
    /// comes from the payload.
    pub fn merged(existing: &Model, payload: &Value) -> Result<Self, DraftError> {
        let patch = payload.as_object().ok_or(DraftError::NotAnObject)?;

        let mut base = Map::new();
        base.insert("name".into(), Value::from(existing.name.clone()));
        base.insert("product_id".into(), Value::from(existing.product_id));
        base.insert("quantity".into(), Value::from(existing.quantity));
        base.insert("condition".into(), Value::from(existing.condition.to_string()));
        base.insert("restock_level".into(), Value::from(existing.restock_level));

        for (key, value) in patch {
            base.insert(key.clone(), value.clone());
        }

        Self::from_object(&base)
    }

    fn from_object(object: &Map<String, Value>) -> Result<Self, DraftError> {
        Ok(Self {
            name: string_field(object, "name")?,
            product_id: int_field(object, "product_id")?,
            quantity: int_field(object, "quantity")?,
            condition: string_field(object, "condition")?,
            restock_level: int_field(object, "restock_level")?,
        })
    }

    /// Applies the business rules, first failure wins.
    pub fn validate(self) -> Result<NewInventoryItem, DraftError> {
        let name = self.name.ok_or(DraftError::MissingField("name"))?;
        let product_id = self.product_id.ok_or(DraftError::MissingField("product_id"))?;
        let condition = self.condition.ok_or(DraftError::MissingField("condition"))?;

        if name.is_empty() {
            return Err(DraftError::EmptyName);
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(DraftError::NameTooLong);
        }

        let quantity = self.quantity.unwrap_or(DEFAULT_QUANTITY);
        if quantity < 0 {
            return Err(DraftError::NegativeQuantity);
        }

        let restock_level = self.restock_level.unwrap_or(DEFAULT_RESTOCK_LEVEL);
        if restock_level < 0 {
            return Err(DraftError::NegativeRestockLevel);
        }

        let condition = ItemCondition::from_str(&condition)
            .map_err(|_| DraftError::InvalidCondition(condition.clone()))?;

        Ok(NewInventoryItem {
            name,
            product_id,
            quantity,
            condition,
            restock_level,
        })
    }
}

fn string_field(
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<String>, DraftError> {
    match object.get(field) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(DraftError::InvalidField {
            field,
            reason: "must be a string",
        }),
    }
}

fn int_field(object: &Map<String, Value>, field: &'static str) -> Result<Option<i32>, DraftError> {
    match object.get(field) {
        None => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|v| i32::try_from(v).ok())
            .map(Some)
            .ok_or(DraftError::InvalidField {
                field,
                reason: "must be a 32-bit integer",
            }),
        Some(_) => Err(DraftError::InvalidField {
            field,
            reason: "must be an integer",
        }),
    }
}
