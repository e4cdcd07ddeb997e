//! Router configuration for the dashboard server.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;
use crate::routes::{dashboard, filters, pages};

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // The JSON API is read-only, so any origin may call it
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Pages
        .route(pages::INDEX, get(handlers::index))
        .route(pages::NAVIGATE, post(handlers::navigate))
        .route(pages::LOGO_ASSET, get(handlers::logo))
        .route(pages::HEALTH, get(handlers::health_check))
        // JSON API
        .route(filters::GET_FILTER_OPTIONS, get(handlers::get_filter_options))
        .route(dashboard::GET_DASHBOARD_DATA, get(handlers::get_dashboard))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;

    #[test]
    fn test_router_creation() {
        let state = AppState::new(DashboardConfig::default());
        let _router = create_router(state);
        // If we got here, router was created successfully
    }
}
