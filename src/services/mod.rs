// Core services
pub mod inventory;

pub use inventory::{InventoryService, RestockReport};
