//! Sextant API Server
//!
//! Run with: cargo run --bin sextant-api
//!
//! # Configuration
//!
//! Config file path: `SEXTANT_CONFIG`, otherwise the standard locations
//! (`$CONFIG/sextant/config.toml`, `/etc/sextant/config.toml`, `./config.toml`).
//!
//! Environment variables:
//! - `SEXTANT_BACKEND_URL`: Search backend URL (default: http://localhost:9200)
//! - `SEXTANT_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `SEXTANT_API_PORT`: Port to listen on (default: 8086)
//! - `SEXTANT_LOG_LEVEL`: Log level (default: info)
//! - `SEXTANT_LOG_FORMAT`: pretty or json (default: pretty)
//! - `SEXTANT_MAX_INDICES`: Most names one interval pattern may expand to (default: 10000)
//! - `RUST_LOG`: Full filter, overrides the log level

use sextant::api::{serve, AppState};
use sextant::backend::{ElasticsearchClient, FieldStatsClient};
use sextant::config::Config;
use sextant::resolve::Resolver;
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::var("SEXTANT_CONFIG") {
        Ok(path) => Config::load_with_env(&PathBuf::from(path))?,
        Err(_) => Config::load_default(),
    };

    // Initialize tracing
    config.logging.init();

    tracing::info!("Starting Sextant API server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Search backend: {}", config.backend.url);
    tracing::info!("Loaded {} index patterns", config.patterns.len());

    let client = Arc::new(ElasticsearchClient::new(config.backend.client_config())?);

    // Check backend availability
    match client.ping().await {
        Ok(()) => tracing::info!("Search backend connection verified"),
        Err(e) => tracing::warn!(
            "Search backend not available: {} (only interval and literal patterns will resolve)",
            e
        ),
    }

    let resolver = Resolver::with_client(client.clone()).max_indices(config.resolve.max_indices);
    let state = AppState::with_resolver(
        resolver,
        client,
        config.patterns.clone(),
        config.api.clone(),
    );

    // Run server
    tracing::info!("Starting server on {}:{}", config.api.host, config.api.port);
    serve(state, &config.api).await?;

    tracing::info!("Sextant API server stopped");

    Ok(())
}
