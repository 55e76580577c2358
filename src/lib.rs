//! Inventory Service Library
//!
//! REST service for inventory items: CRUD endpoints plus a restock action,
//! backed by a relational table through sea-orm.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod api;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod middleware_helpers;
pub mod migrator;
pub mod models;
pub mod repositories;
pub mod services;
pub mod tracing;

use std::sync::Arc;

use handlers::inventory::InventoryHandlerState;
use repositories::{InventoryRepository, SeaOrmInventoryRepository};
use sea_orm::DatabaseConnection;
use services::inventory::InventoryService;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub config: config::AppConfig,
    pub inventory_service: InventoryService,
}

impl AppState {
    /// Wires the sea-orm repository into the service layer
    pub fn new(config: config::AppConfig, db: Arc<DatabaseConnection>) -> Self {
        let repository: Arc<dyn InventoryRepository> = Arc::new(SeaOrmInventoryRepository::new(db));
        Self::with_repository(config, repository)
    }

    /// Builds state around any repository implementation
    pub fn with_repository(
        config: config::AppConfig,
        repository: Arc<dyn InventoryRepository>,
    ) -> Self {
        Self {
            config,
            inventory_service: InventoryService::new(repository),
        }
    }
}

impl InventoryHandlerState for AppState {
    fn inventory_service(&self) -> &InventoryService {
        &self.inventory_service
    }
}
