use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde_json::json;
use std::time::Instant;
use tracing::{debug, error};

use crate::handlers::inventory::InventoryHandlerState;

/// Liveness probe against the store
async fn health_check<S>(State(state): State<S>) -> impl IntoResponse
where
    S: InventoryHandlerState,
{
    let start = Instant::now();
    match state.inventory_service().health().await {
        Ok(()) => {
            debug!(latency_ms = start.elapsed().as_millis() as u64, "Health check passed");
            (StatusCode::OK, Json(json!({ "status": "OK" })))
        }
        Err(e) => {
            error!(error = %e, "Health check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "status": "ERROR", "message": e.response_message() })),
            )
        }
    }
}

/// Service description served at the root path
async fn index() -> impl IntoResponse {
    Json(json!({
        "service": "Inventory Management API",
        "version": "1.0",
        "status": "running",
        "description": "A REST API for managing inventory items.",
    }))
}

/// Lists the public endpoints
async fn metadata() -> impl IntoResponse {
    Json(json!({
        "service": "inventory-service",
        "version": "1.0",
        "endpoints": [
            "/api/inventory",
            "/api/inventory/{id}",
            "/api/inventory/{id}/restock_level",
            "/health"
        ],
    }))
}

/// Creates the router for the health probe and service information
pub fn health_routes<S>() -> Router<S>
where
    S: InventoryHandlerState,
{
    Router::new()
        .route("/", get(index))
        .route("/metadata", get(metadata))
        .route("/health", get(health_check::<S>))
}
