//! Search Backend
//!
//! The only remote capability the resolver needs is per-index field
//! statistics. It sits behind [`FieldStatsClient`] so the HTTP client can be
//! swapped for the in-memory [`StaticFieldStats`].
//!
//! - **ElasticsearchClient**: REST client for `/{index}/_field_stats`
//! - **StaticFieldStats**: fixed responses, records requests

mod client;
mod error;
mod field_stats;
mod memory;

pub use client::{ClientConfig, ElasticsearchClient};
pub use error::{BackendError, BackendResult};
pub use field_stats::{
    FieldStats, FieldStatsBody, FieldStatsRequest, FieldStatsResponse, IndexConstraint,
    IndexFieldStats, IndexStats, LowerBound, UpperBound, LEVEL_INDICES,
};
pub use memory::StaticFieldStats;

use async_trait::async_trait;

/// Field statistics capability of the search backend
#[async_trait]
pub trait FieldStatsClient: Send + Sync {
    /// Fetch index-level statistics for the request's fields
    async fn fetch_field_stats(
        &self,
        request: &FieldStatsRequest,
    ) -> BackendResult<FieldStatsResponse>;

    /// Check that the backend answers at all
    async fn ping(&self) -> BackendResult<()>;
}
