/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. Health check (`GET /api/v1/health`)
 * 2. User routes (`/api/v1/users`, partly public)
 * 3. Protected resource routes (videos, tweets, comments, likes,
 *    subscriptions, playlists, dashboard)
 * 4. Static files (`/static`)
 * 5. Fallback handler (404 envelope)
 *
 * # Layers
 *
 * Request tracing, CORS and the request body limit wrap every route,
 * including the fallback.
 */

use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::{protected_routes, user_routes};
use crate::backend::server::state::AppState;
use crate::shared::ApiResponse;

/// Path prefix for every API route
pub const API_PREFIX: &str = "/api/v1";

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Database pool and server configuration
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    let config = app_state.config.clone();

    let api = Router::new()
        .route("/health", get(health_check))
        .nest("/users", user_routes(&app_state))
        .merge(protected_routes(&app_state));

    let layers = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_origin))
        .layer(DefaultBodyLimit::max(config.body_limit));

    Router::new()
        .nest(API_PREFIX, api)
        .nest_service("/static", ServeDir::new(&config.static_dir))
        .fallback(api_not_found)
        .layer(layers)
        .with_state(app_state)
}

/// Health check handler
async fn health_check() -> ApiResponse<Option<()>> {
    ApiResponse::ok(None, "Welcome to backend API")
}

/// Fallback for unknown routes
async fn api_not_found() -> BackendError {
    BackendError::not_found("API not found")
}

/// CORS policy for the configured origin
///
/// `*` allows any origin without credentials. A concrete origin is allowed
/// with credentials. An origin that is not a valid header value falls back
/// to `*` with a warning.
fn cors_layer(origin: &str) -> CorsLayer {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
    ];

    if origin.trim() == "*" {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any);
    }

    match HeaderValue::from_str(origin.trim()) {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(methods)
            .allow_headers([AUTHORIZATION, CONTENT_TYPE])
            .allow_credentials(true),
        Err(e) => {
            tracing::warn!("Invalid CORS_ORIGIN {:?} ({}), allowing any origin", origin, e);
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(methods)
                .allow_headers(Any)
        }
    }
}
