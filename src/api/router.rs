use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::assets;
use super::auth;
use super::health;
use super::providers;
use super::state::AppState;

/// Create a minimal router without state (for probes only)
pub fn create_router() -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        .layer(TraceLayer::new_for_http())
}

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Authentication endpoints
        .nest("/auth", auth::create_auth_router())
        // Provider management
        .route("/providers", post(providers::register_provider))
        .route("/providers", get(providers::list_providers))
        .route("/providers/{username}", get(providers::get_provider))
        .route("/providers/{id}/suspend", post(providers::suspend_provider))
        .route(
            "/providers/{id}/activate",
            post(providers::activate_provider),
        )
        // Asset ingestion and history
        .route("/assets", post(assets::ingest_asset))
        .route("/assets", get(assets::list_assets))
        .route("/assets/{uuid}", get(assets::get_asset))
        .route("/assets/{uuid}", delete(assets::delete_asset))
        .route("/assets/{uuid}/events", post(assets::add_asset_event))
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
