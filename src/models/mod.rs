// Inventory domain models
pub mod inventory_draft;
pub mod inventory_filter;
pub mod restock;

pub use inventory_draft::{DraftError, InventoryDraft, NewInventoryItem};
pub use inventory_filter::{FilterError, InventoryFilter};
pub use restock::{parse_restock_amount, plan_restock, RestockAction, RestockError};
