//! In-memory field statistics backend
//!
//! Serves a fixed set of per-index statistics and records every request it
//! receives. Used by tests and for offline resolution.

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::backend::error::{BackendError, BackendResult};
use crate::backend::field_stats::{
    FieldStatsRequest, FieldStatsResponse, IndexConstraint, IndexFieldStats, IndexStats,
};
use crate::backend::FieldStatsClient;

#[derive(Debug, Clone)]
enum Failure {
    Unavailable,
    Api { status: u16, message: String },
}

/// Fixed-response field statistics backend
pub struct StaticFieldStats {
    indices: IndexStats,
    failure: Option<Failure>,
    requests: Mutex<Vec<FieldStatsRequest>>,
}

impl StaticFieldStats {
    /// Serve the given statistics
    pub fn new(indices: IndexStats) -> Self {
        Self {
            indices,
            failure: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Fail every call as if the backend were down
    pub fn unavailable() -> Self {
        Self {
            failure: Some(Failure::Unavailable),
            ..Self::new(IndexStats::new())
        }
    }

    /// Fail every call with an API error
    pub fn failing(status: u16, message: impl Into<String>) -> Self {
        Self {
            failure: Some(Failure::Api {
                status,
                message: message.into(),
            }),
            ..Self::new(IndexStats::new())
        }
    }

    /// All requests received so far
    pub async fn requests(&self) -> Vec<FieldStatsRequest> {
        self.requests.lock().await.clone()
    }

    /// Most recent request
    pub async fn last_request(&self) -> Option<FieldStatsRequest> {
        self.requests.lock().await.last().cloned()
    }

    /// Number of requests received
    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }
}

/// Whether an index survives the constraints the way the backend applies them
///
/// Only numeric bounds are evaluated; anything else is left to the backend.
fn satisfies(stats: &IndexFieldStats, field: &str, constraint: &IndexConstraint) -> bool {
    let Some(field_stats) = stats.get(field) else {
        return constraint.is_empty();
    };

    let max_ok = match (&constraint.max_value, &field_stats.max_value) {
        (Some(bound), Some(max)) => match (as_number(&bound.gte), as_number(max)) {
            (Some(gte), Some(max)) => max >= gte,
            _ => true,
        },
        _ => true,
    };
    let min_ok = match (&constraint.min_value, &field_stats.min_value) {
        (Some(bound), Some(min)) => match (as_number(&bound.lte), as_number(min)) {
            (Some(lte), Some(min)) => min <= lte,
            _ => true,
        },
        _ => true,
    };

    max_ok && min_ok
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

#[async_trait]
impl FieldStatsClient for StaticFieldStats {
    async fn fetch_field_stats(
        &self,
        request: &FieldStatsRequest,
    ) -> BackendResult<FieldStatsResponse> {
        self.requests.lock().await.push(request.clone());

        match &self.failure {
            Some(Failure::Unavailable) => return Err(BackendError::Unavailable),
            Some(Failure::Api { status, message }) => {
                return Err(BackendError::ApiError {
                    status: *status,
                    message: message.clone(),
                })
            }
            None => {}
        }

        let mut matched = IndexStats::new();
        for (name, stats) in self.indices.iter() {
            let keep = request.body.fields.iter().all(|field| match request.constraint(field) {
                Some(constraint) => satisfies(stats, field, constraint),
                None => true,
            });
            if keep {
                matched.push(name, stats.clone());
            }
        }

        Ok(FieldStatsResponse::new(matched))
    }

    async fn ping(&self) -> BackendResult<()> {
        match self.failure {
            Some(Failure::Unavailable) => Err(BackendError::Unavailable),
            _ => Ok(()),
        }
    }
}
