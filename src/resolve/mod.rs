//! Index Resolution
//!
//! Turns an index pattern plus a time range into the concrete indices a
//! search must hit.
//!
//! # Architecture
//!
//! ```text
//! Resolver::to_index_list(pattern, start, stop, sort)
//!        ↓
//! interval?            → IntervalCalculator  (pure, local)
//! wildcard + time?     → IndexCalculator     (field stats via backend)
//! otherwise            → pattern id
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use sextant::backend::{ClientConfig, ElasticsearchClient};
//! use sextant::pattern::{Field, IndexPattern};
//! use sextant::resolve::{Resolver, SortOrder, TimeBound};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Arc::new(ElasticsearchClient::new(ClientConfig::default())?);
//!     let resolver = Resolver::with_client(client);
//!
//!     let pattern = IndexPattern::new("logstash-*")
//!         .time_field("@timestamp")
//!         .fields(vec![Field::new("@timestamp", "date")]);
//!
//!     let start = TimeBound::from(chrono::Utc::now() - chrono::Duration::days(1));
//!     let indices = resolver
//!         .to_index_list(&pattern, Some(&start), None, Some(SortOrder::Desc))
//!         .await?;
//!
//!     println!("Searching {}", indices.to_path());
//!     Ok(())
//! }
//! ```

mod calculate;
mod error;
mod facade;
mod types;

pub use calculate::{sort_index_stats, IndexCalculator};
pub use error::{ResolveError, ResolveResult};
pub use facade::{Resolver, Strategy};
pub use types::{IndexList, SortOrder, TimeBound};
