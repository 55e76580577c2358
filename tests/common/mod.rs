#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Method, Request},
    response::Response,
    Router,
};
use inventory_service::{
    api,
    config::AppConfig,
    db,
    entities::inventory_item::{ItemCondition, Model as InventoryItem},
    errors::ServiceError,
    models::NewInventoryItem,
    repositories::{InventoryRepository, SeaOrmInventoryRepository},
    AppState,
};
use sea_orm::DbErr;
use serde_json::Value;
use tower::ServiceExt;

/// Helper harness for spinning up the application backed by an in-memory SQLite database.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        let (cfg, repository) = Self::sqlite_repository().await;
        Self::from_repository(cfg, repository)
    }

    /// Same as [`TestApp::new`] but every update fails with a store error.
    pub async fn with_failing_updates() -> Self {
        let (cfg, repository) = Self::sqlite_repository().await;
        let faulty = FaultyRepository {
            inner: repository,
            fail_updates: true,
            fail_ping: false,
        };
        Self::from_repository(cfg, Arc::new(faulty))
    }

    /// Same as [`TestApp::new`] but the store never answers a ping.
    pub async fn with_unreachable_store() -> Self {
        let (cfg, repository) = Self::sqlite_repository().await;
        let faulty = FaultyRepository {
            inner: repository,
            fail_updates: false,
            fail_ping: true,
        };
        Self::from_repository(cfg, Arc::new(faulty))
    }

    async fn sqlite_repository() -> (AppConfig, Arc<SeaOrmInventoryRepository>) {
        // A single connection keeps the in-memory database alive and shared.
        let mut cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            "127.0.0.1".to_string(),
            18_080,
            "development".to_string(),
        );
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        (cfg, Arc::new(SeaOrmInventoryRepository::new(Arc::new(pool))))
    }

    fn from_repository(cfg: AppConfig, repository: Arc<dyn InventoryRepository>) -> Self {
        let state = AppState::with_repository(cfg, repository);
        let router = api::app_router(state.clone()).expect("failed to build router");
        Self { router, state }
    }

    /// Send a request, with a JSON body when one is given.
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> Response {
        match body {
            Some(json) => {
                let raw = serde_json::to_string(&json).expect("failed to serialize json body");
                self.request_raw(method, uri, Some("application/json"), &raw)
                    .await
            }
            None => self.request_raw(method, uri, None, "").await,
        }
    }

    /// Send a request with an arbitrary content type and body.
    pub async fn request_raw(
        &self,
        method: Method,
        uri: &str,
        content_type: Option<&str>,
        body: &str,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(ct) = content_type {
            builder = builder.header("content-type", ct);
        }
        let request = builder
            .body(Body::from(body.to_string()))
            .expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    /// Create an item through the API and return its JSON representation.
    pub async fn create_item(&self, payload: Value) -> Value {
        let response = self
            .request(Method::POST, "/api/inventory", Some(payload))
            .await;
        assert_eq!(response.status(), 201, "item creation failed");
        response_json(response).await
    }
}

/// Reads a response body as JSON.
pub async fn response_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    serde_json::from_slice(&bytes).expect("response body is not JSON")
}

/// Reads a response body as raw bytes.
pub async fn response_bytes(response: Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body")
        .to_vec()
}

/// Delegates to SQLite except for the operations switched to fail.
pub struct FaultyRepository {
    inner: Arc<SeaOrmInventoryRepository>,
    fail_updates: bool,
    fail_ping: bool,
}

#[async_trait]
impl InventoryRepository for FaultyRepository {
    async fn create(&self, item: NewInventoryItem) -> Result<InventoryItem, ServiceError> {
        self.inner.create(item).await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<InventoryItem>, ServiceError> {
        self.inner.find_by_id(id).await
    }

    async fn find_all(&self) -> Result<Vec<InventoryItem>, ServiceError> {
        self.inner.find_all().await
    }

    async fn update(&self, item: InventoryItem) -> Result<InventoryItem, ServiceError> {
        if self.fail_updates {
            return Err(ServiceError::DatabaseError(DbErr::Custom(
                "Forced update failure".to_string(),
            )));
        }
        self.inner.update(item).await
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        self.inner.delete(id).await
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<InventoryItem>, ServiceError> {
        self.inner.find_by_name(name).await
    }

    async fn find_by_product_id(
        &self,
        product_id: i32,
    ) -> Result<Vec<InventoryItem>, ServiceError> {
        self.inner.find_by_product_id(product_id).await
    }

    async fn find_by_condition(
        &self,
        condition: ItemCondition,
    ) -> Result<Vec<InventoryItem>, ServiceError> {
        self.inner.find_by_condition(condition).await
    }

    async fn find_below_restock_level(&self) -> Result<Vec<InventoryItem>, ServiceError> {
        self.inner.find_below_restock_level().await
    }

    async fn ping(&self) -> Result<(), ServiceError> {
        if self.fail_ping {
            return Err(ServiceError::DatabaseError(DbErr::Conn(
                sea_orm::RuntimeErr::Internal("connection refused".to_string()),
            )));
        }
        self.inner.ping().await
    }
}
