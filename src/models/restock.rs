use crate::errors::ServiceError;
use serde_json::Value;
use thiserror::Error;

pub const MSG_STOCK_UPDATED: &str = "Stock level updated";
pub const MSG_RESTOCKED: &str = "Stock level updated to restock level";
pub const MSG_NO_ACTION: &str = "Stock level is above the restock threshold. No action needed.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RestockError {
    #[error("Invalid payload: expected a JSON object")]
    NotAnObject,

    #[error("Invalid quantity provided")]
    InvalidQuantity,

    #[error("Stock level cannot become negative ({current} + {amount})")]
    NegativeResult { current: i32, amount: i32 },

    #[error("Stock level out of range ({current} + {amount})")]
    Overflow { current: i32, amount: i32 },
}

impl From<RestockError> for ServiceError {
    fn from(err: RestockError) -> Self {
        ServiceError::ValidationError(err.to_string())
    }
}

/// Outcome of the restock rule for one item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestockAction {
    /// Explicit amount added; the new quantity must be stored
    Adjust { new_stock: i32 },
    /// Below threshold without an amount; quantity raised to the restock level
    RaiseToRestockLevel { new_stock: i32 },
    /// At or above threshold without an amount; nothing changes
    NoActionNeeded { current_stock: i32 },
}

impl RestockAction {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Adjust { .. } => MSG_STOCK_UPDATED,
            Self::RaiseToRestockLevel { .. } => MSG_RESTOCKED,
            Self::NoActionNeeded { .. } => MSG_NO_ACTION,
        }
    }

    pub fn stock(&self) -> i32 {
        match *self {
            Self::Adjust { new_stock } | Self::RaiseToRestockLevel { new_stock } => new_stock,
            Self::NoActionNeeded { current_stock } => current_stock,
        }
    }

    /// Quantity to persist, if any
    pub fn new_quantity(&self) -> Option<i32> {
        match *self {
            Self::Adjust { new_stock } | Self::RaiseToRestockLevel { new_stock } => Some(new_stock),
            Self::NoActionNeeded { .. } => None,
        }
    }
}

/// Extracts the optional restock amount from a payload.
///
/// Accepts a JSON integer or a string holding one. `null`, floats and
/// booleans are rejected.
pub fn parse_restock_amount(payload: &Value) -> Result<Option<i32>, RestockError> {
    let object = payload.as_object().ok_or(RestockError::NotAnObject)?;

    match object.get("quantity") {
        None => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|v| i32::try_from(v).ok())
            .map(Some)
            .ok_or(RestockError::InvalidQuantity),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i32>()
            .map(Some)
            .map_err(|_| RestockError::InvalidQuantity),
        Some(_) => Err(RestockError::InvalidQuantity),
    }
}

/// Decides what a restock request does to an item with the given stock.
pub fn plan_restock(
    quantity: i32,
    restock_level: i32,
    amount: Option<i32>,
) -> Result<RestockAction, RestockError> {
    match amount {
        Some(amount) => {
            let new_stock = quantity.checked_add(amount).ok_or(RestockError::Overflow {
                current: quantity,
                amount,
            })?;
            if new_stock < 0 {
                return Err(RestockError::NegativeResult {
                    current: quantity,
                    amount,
                });
            }
            Ok(RestockAction::Adjust { new_stock })
        }
        None if quantity < restock_level => Ok(RestockAction::RaiseToRestockLevel {
            new_stock: restock_level,
        }),
        None => Ok(RestockAction::NoActionNeeded {
            current_stock: quantity,
        }),
    }
}
