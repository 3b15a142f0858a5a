//! Formwork HTTP API Server
//!
//! REST endpoints for the template metadata repository: templates, elements
//! and fields, each independently addressable, with decomposition of nested
//! submissions handled by the formwork core.

use axum::{Router, extract::DefaultBodyLimit, response::Json, routing::get};
use formwork::{Authorizer, OpenAccess, Registry, ResourceKind, StoreSet};
use serde_json::{Value, json};
use std::{net::SocketAddr, sync::Arc};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

mod auth;
mod config;
mod error;
mod models;
mod routes;

use config::ServerConfig;
use error::Result;

/// Main application state
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<Registry>,
    pub authorizer: Arc<dyn Authorizer>,
    pub config: ServerConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "formwork_server=debug,tower_http=debug".to_string()),
        )
        .init();

    // Load configuration
    let config = ServerConfig::from_env()?;
    info!(
        "Starting Formwork Server on {}:{}",
        config.host, config.port
    );

    // Create the repository over the bundled in-memory backend
    let registry = Arc::new(Registry::new(
        StoreSet::in_memory(),
        Arc::new(config.service.clone()),
    ));

    // Create application state
    let state = AppState {
        registry,
        authorizer: Arc::new(OpenAccess),
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        error::ApiError::Internal(format!("failed to bind {addr}: {e}"))
    })?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| error::ApiError::Internal(e.to_string()))?;

    Ok(())
}

/// Create the main application router
fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // One resource router per kind
        .nest("/templates", routes::resources::router(ResourceKind::Template))
        .nest("/elements", routes::resources::router(ResourceKind::Element))
        .nest("/fields", routes::resources::router(ResourceKind::Field))
        // Middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(16 * 1024 * 1024)),
        )
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> Result<Json<Value>> {
    Ok(Json(json!({
        "status": "healthy",
        "service": "formwork-server",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": time::OffsetDateTime::now_utc()
    })))
}
