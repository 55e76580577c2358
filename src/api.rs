use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    http::{Method, Uri},
    Router,
};
use http::HeaderValue;
use thiserror::Error;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
};
use tracing::{error, info};

use crate::{
    config::AppConfig,
    errors::ServiceError,
    handlers::{health::health_routes, inventory::inventory_routes},
    middleware_helpers::request_id_middleware,
    AppState,
};

#[derive(Debug, Error)]
pub enum RouterBuildError {
    #[error("Missing CORS configuration: set APP__CORS_ALLOWED_ORIGINS or APP__CORS_ALLOW_ANY_ORIGIN=true")]
    MissingCors,
}

/// Routes for the inventory resource and the service probes, without layers
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health_routes())
        .nest("/api/inventory", inventory_routes())
        .nest("/inventory", inventory_routes())
        // Only covers routes registered above
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(route_not_found)
}

async fn route_not_found(uri: Uri) -> ServiceError {
    ServiceError::NotFound(format!("No route for {}", uri.path()))
}

async fn method_not_allowed(method: Method, uri: Uri) -> ServiceError {
    ServiceError::MethodNotAllowed(format!("{} is not supported on {}", method, uri.path()))
}

/// Builds the CORS layer from explicit origins or the permissive fallback
pub fn cors_layer(cfg: &AppConfig) -> Result<CorsLayer, RouterBuildError> {
    let configured_origins: Option<Vec<HeaderValue>> = cfg
        .cors_allowed_origins
        .as_ref()
        .map(|raw| {
            raw.split(',')
                .filter_map(|origin| {
                    let trimmed = origin.trim();
                    if trimmed.is_empty() {
                        None
                    } else {
                        HeaderValue::from_str(trimmed).ok()
                    }
                })
                .collect::<Vec<_>>()
        })
        .filter(|origins| !origins.is_empty());

    if let Some(origins) = configured_origins {
        Ok(CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any))
    } else if cfg.should_allow_permissive_cors() {
        info!(
            "Using permissive CORS because explicit origins were not configured ({})",
            if cfg.is_development() {
                "development environment"
            } else {
                "explicit override enabled"
            }
        );
        Ok(CorsLayer::permissive())
    } else {
        error!("Missing CORS configuration detected; set APP__CORS_ALLOWED_ORIGINS or APP__CORS_ALLOW_ANY_ORIGIN=true");
        Err(RouterBuildError::MissingCors)
    }
}

/// Full application router with the HTTP middleware stack applied
pub fn app_router(state: AppState) -> Result<Router, RouterBuildError> {
    let cfg = &state.config;
    let cors = cors_layer(cfg)?;
    let timeout = Duration::from_secs(cfg.request_timeout_secs);
    let body_limit = cfg.max_body_size;

    Ok(api_routes()
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TimeoutLayer::new(timeout))
        .layer(crate::tracing::configure_http_tracing())
        .layer(cors)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .with_state(state))
}
