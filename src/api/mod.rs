//! Sextant REST API
//!
//! HTTP API layer for Sextant, built with Axum.
//!
//! # Endpoints
//!
//! ## Patterns
//! - `GET /api/v1/patterns` - List all patterns
//! - `GET /api/v1/patterns/:id` - Get a pattern
//! - `POST /api/v1/patterns/:id/_resolve` - Resolve a pattern to indices
//!
//! ## Fields
//! - `POST /api/v1/patterns/:id/scripted_fields` - Add a scripted field
//! - `DELETE /api/v1/patterns/:id/scripted_fields/:name` - Remove a scripted field
//! - `POST /api/v1/patterns/:id/fields/:name/_popularize` - Bump popularity
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use sextant::api::{serve, AppState};
//! use sextant::backend::ElasticsearchClient;
//! use sextant::config::Config;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let client = Arc::new(ElasticsearchClient::new(config.backend.client_config())?);
//!
//!     let state = AppState::new(client, config.patterns.clone(), config.api.clone());
//!     serve(state, &config.api).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ApiConfig;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Pattern routes
        .route("/patterns", get(routes::patterns::list_patterns))
        .route("/patterns/:id", get(routes::patterns::get_pattern))
        .route("/patterns/:id/_resolve", post(routes::patterns::resolve_pattern))
        // Field routes
        .route(
            "/patterns/:id/scripted_fields",
            post(routes::patterns::add_scripted_field),
        )
        .route(
            "/patterns/:id/scripted_fields/:name",
            delete(routes::patterns::remove_scripted_field),
        )
        .route(
            "/patterns/:id/fields/:name/_popularize",
            post(routes::patterns::popularize_field),
        );

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Sextant API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Sextant API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
