//! ServerBuilder for fluent API to build HTTP servers

use super::entity_registry::EntityRegistry;
use super::exposure::RestExposure;
use super::state::AppState;
use crate::core::ledger::Ledger;
use anyhow::Result;
use axum::Router;
use std::path::PathBuf;
use tokio::net::TcpListener;

/// Builder for creating the HTTP server
///
/// # Example
///
/// ```ignore
/// let ledger = Ledger::open(JsonFileStorage::new("data"), config.default_settings());
///
/// ServerBuilder::new()
///     .with_ledger(ledger)
///     .with_static_dir("static")
///     .serve("0.0.0.0:8080")
///     .await?;
/// ```
pub struct ServerBuilder {
    state: Option<AppState>,
    entity_registry: EntityRegistry,
    static_dir: Option<PathBuf>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            state: None,
            entity_registry: EntityRegistry::standard(),
            static_dir: None,
            custom_routes: Vec::new(),
        }
    }

    /// Serve the given ledger (required)
    pub fn with_ledger(self, ledger: Ledger) -> Self {
        self.with_state(AppState::new(ledger))
    }

    /// Serve an existing shared state
    pub fn with_state(mut self, state: AppState) -> Self {
        self.state = Some(state);
        self
    }

    /// Serve files from `dir` for every path no route matches
    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }

    /// Add custom routes to the server
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the final REST router
    pub fn build(self) -> Result<Router> {
        let state = self
            .state
            .ok_or_else(|| anyhow::anyhow!("Ledger is required. Call .with_ledger()"))?;

        Ok(RestExposure::build_router(
            state,
            &self.entity_registry,
            self.custom_routes,
            self.static_dir.as_deref(),
        ))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self, addr: &str) -> Result<()> {
        for (method, path) in self.entity_registry.route_table() {
            tracing::debug!("{} {}", method, path);
        }
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
