use crate::errors::ServiceError;
use crate::handlers::common::{
    created_response, json_payload, no_content_response, parse_item_id, require_json,
    success_response,
};
use crate::models::InventoryFilter;
use crate::services::inventory::InventoryService;
use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::HeaderMap,
    response::Response,
    routing::{get, post},
    Router,
};
use std::collections::HashMap;
use tracing::info;

/// Path under which the inventory router is canonically mounted
pub const INVENTORY_BASE_PATH: &str = "/api/inventory";

// Trait for inventory handler state that provides access to inventory service
pub trait InventoryHandlerState: Clone + Send + Sync + 'static {
    fn inventory_service(&self) -> &InventoryService;
}

/// Creates the router for inventory endpoints
pub fn inventory_routes<S>() -> Router<S>
where
    S: InventoryHandlerState,
{
    Router::new()
        .route("/", get(list_inventory::<S>).post(create_inventory::<S>))
        .route(
            "/:id",
            get(get_inventory::<S>)
                .put(update_inventory::<S>)
                .delete(delete_inventory::<S>),
        )
        .route("/:id/restock_level", post(restock_inventory::<S>))
}

/// List inventory items, optionally narrowed by one filter
pub async fn list_inventory<S>(
    State(state): State<S>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, ServiceError>
where
    S: InventoryHandlerState,
{
    let filter = InventoryFilter::from_params(&params)?;
    let items = state.inventory_service().list(&filter).await?;
    Ok(success_response(items))
}

/// Create new inventory item
pub async fn create_inventory<S>(
    State(state): State<S>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ServiceError>
where
    S: InventoryHandlerState,
{
    info!("Request to create an inventory item");
    let payload = require_json(&headers, &body)?;
    let created = state.inventory_service().create(&payload).await?;
    let location = format!("{}/{}", INVENTORY_BASE_PATH, created.id);
    Ok(created_response(location, created))
}

/// Get specific inventory item
pub async fn get_inventory<S>(
    State(state): State<S>,
    Path(id): Path<String>,
) -> Result<Response, ServiceError>
where
    S: InventoryHandlerState,
{
    let id = parse_item_id(&id)?;
    let item = state.inventory_service().get(id).await?;
    Ok(success_response(item))
}

/// Partially update an inventory item
pub async fn update_inventory<S>(
    State(state): State<S>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ServiceError>
where
    S: InventoryHandlerState,
{
    let service = state.inventory_service();
    let existing = service.get(parse_item_id(&id)?).await?;
    let payload = json_payload(&headers, &body)?;
    let updated = service.update(existing, &payload).await?;
    Ok(success_response(updated))
}

/// Delete an inventory item; missing ids also answer 204
pub async fn delete_inventory<S>(
    State(state): State<S>,
    Path(id): Path<String>,
) -> Result<Response, ServiceError>
where
    S: InventoryHandlerState,
{
    // A non-numeric id cannot exist, so there is nothing to delete
    if let Ok(id) = id.parse::<i32>() {
        state.inventory_service().delete(id).await?;
    }
    Ok(no_content_response())
}

/// Restock action: add an amount, or raise to the restock level
pub async fn restock_inventory<S>(
    State(state): State<S>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ServiceError>
where
    S: InventoryHandlerState,
{
    let service = state.inventory_service();
    let existing = service.get(parse_item_id(&id)?).await?;
    let payload = json_payload(&headers, &body)?;
    let report = service.restock(existing, &payload).await?;
    Ok(success_response(report))
}
