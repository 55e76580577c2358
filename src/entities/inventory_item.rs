use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A stocked item. Serializes to exactly the six public fields.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub product_id: i32,
    pub quantity: i32,
    pub condition: ItemCondition,
    pub restock_level: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_below_restock_level(&self) -> bool {
        self.quantity < self.restock_level
    }
}

/// Physical state of an item
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    DeriveActiveEnum,
    Display,
    EnumString,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(63))")]
pub enum ItemCondition {
    #[sea_orm(string_value = "New")]
    New,
    #[sea_orm(string_value = "Opened")]
    Opened,
    #[sea_orm(string_value = "Used")]
    Used,
    #[sea_orm(string_value = "Refurbished")]
    Refurbished,
}
