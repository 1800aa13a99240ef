//! REST API exposure
//!
//! Turns the registered entity descriptors, the settings endpoints and any
//! custom routes into one Axum `Router`, wrapped in CORS and request tracing
//! and falling back to the static frontend for unmatched paths.

use crate::server::entity_registry::EntityRegistry;
use crate::server::handlers::settings;
use crate::server::state::AppState;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use std::path::Path;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Name reported by the health endpoints
pub const SERVICE_NAME: &str = "invoicer";

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router
    ///
    /// Returns a router with:
    /// - Health check routes
    /// - Entity routes from `registry`
    /// - Settings routes
    /// - Custom routes
    /// - A static file fallback when `static_dir` is set
    pub fn build_router(
        state: AppState,
        registry: &EntityRegistry,
        custom_routes: Vec<Router>,
        static_dir: Option<&Path>,
    ) -> Router {
        let mut app = Self::health_routes()
            .merge(registry.build_routes(state.clone()))
            .merge(Self::settings_routes(state));

        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        if let Some(dir) = static_dir {
            app = app.fallback_service(ServeDir::new(dir));
        }

        app.layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
    }

    fn settings_routes(state: AppState) -> Router {
        Router::new()
            .route(
                "/api/settings",
                get(settings::get_settings).post(settings::update_settings),
            )
            .with_state(state)
    }

    /// Build health check routes
    fn health_routes() -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    /// Health check endpoint handler
    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": SERVICE_NAME
        }))
    }
}
