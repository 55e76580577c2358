use crate::entities::inventory_item::ItemCondition;
use crate::errors::ServiceError;
use std::collections::HashMap;
use std::str::FromStr;
use thiserror::Error;

const KNOWN_KEYS: [&str; 4] = ["name", "product_id", "condition", "below_restock_level"];

/// The single predicate applied to a list request.
///
/// Only one filter is ever applied. When several are supplied the priority
/// is name, product_id, condition, then below_restock_level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryFilter {
    All,
    Name(String),
    ProductId(i32),
    Condition(ItemCondition),
    BelowRestockLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("Invalid query parameters: {}", .0.join(", "))]
    UnknownKeys(Vec<String>),

    #[error("Invalid product_id: {0}")]
    InvalidProductId(String),

    #[error("Invalid condition: {0}")]
    InvalidCondition(String),

    #[error("Invalid below_restock_level: {0}")]
    InvalidFlag(String),
}

impl From<FilterError> for ServiceError {
    fn from(err: FilterError) -> Self {
        ServiceError::ValidationError(err.to_string())
    }
}

impl InventoryFilter {
    /// Selects the filter for a set of query parameters.
    ///
    /// Unknown keys are rejected before any value is looked at.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, FilterError> {
        let mut unknown: Vec<String> = params
            .keys()
            .filter(|key| !KNOWN_KEYS.contains(&key.as_str()))
            .cloned()
            .collect();
        if !unknown.is_empty() {
            unknown.sort();
            return Err(FilterError::UnknownKeys(unknown));
        }

        if let Some(name) = params.get("name") {
            return Ok(Self::Name(name.clone()));
        }

        if let Some(raw) = params.get("product_id") {
            return raw
                .trim()
                .parse::<i32>()
                .map(Self::ProductId)
                .map_err(|_| FilterError::InvalidProductId(raw.clone()));
        }

        if let Some(raw) = params.get("condition") {
            return ItemCondition::from_str(raw)
                .map(Self::Condition)
                .map_err(|_| FilterError::InvalidCondition(raw.clone()));
        }

        if let Some(raw) = params.get("below_restock_level") {
            return match raw.to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => Ok(Self::BelowRestockLevel),
                "false" | "0" | "no" => Ok(Self::All),
                _ => Err(FilterError::InvalidFlag(raw.clone())),
            };
        }

        Ok(Self::All)
    }
}
