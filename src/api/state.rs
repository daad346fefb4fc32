//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

use crate::backend::FieldStatsClient;
use crate::config::ApiConfig;
use crate::pattern::IndexPattern;
use crate::resolve::Resolver;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Resolver for index patterns
    pub resolver: Arc<Resolver>,
    /// Backend, for readiness checks
    pub backend: Arc<dyn FieldStatsClient>,
    /// Known index patterns by id
    pub patterns: Arc<RwLock<HashMap<String, IndexPattern>>>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create state around a backend and the configured patterns
    pub fn new(
        backend: Arc<dyn FieldStatsClient>,
        patterns: Vec<IndexPattern>,
        config: ApiConfig,
    ) -> Self {
        let resolver = Resolver::with_client(Arc::clone(&backend));
        Self::with_resolver(resolver, backend, patterns, config)
    }

    /// Create state with a preconfigured resolver
    pub fn with_resolver(
        resolver: Resolver,
        backend: Arc<dyn FieldStatsClient>,
        patterns: Vec<IndexPattern>,
        config: ApiConfig,
    ) -> Self {
        let patterns = patterns.into_iter().map(|p| (p.id.clone(), p)).collect();

        Self {
            resolver: Arc::new(resolver),
            backend,
            patterns: Arc::new(RwLock::new(patterns)),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Snapshot of a pattern
    pub async fn pattern(&self, id: &str) -> Option<IndexPattern> {
        self.patterns.read().await.get(id).cloned()
    }
}
