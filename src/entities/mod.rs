pub mod inventory_item;

pub use inventory_item::{ItemCondition, Model as InventoryItem};
