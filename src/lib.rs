//! # Sextant
//!
//! Index pattern resolution: turns a user-facing index pattern and a time
//! range into the concrete indices a search has to hit.
//!
//! ## Features
//!
//! - **Rollover expansion**: hourly/daily/weekly/monthly/yearly index names
//!   generated locally from a date template
//! - **Field-stats pruning**: wildcard patterns narrowed to the indices
//!   whose time field overlaps the range, optionally sorted by it
//! - **Pattern fields**: scripted fields and popularity counts
//! - **REST API**: resolve and edit patterns over HTTP
//!
//! ## Modules
//!
//! - [`interval`]: Rollover intervals and index name templates
//! - [`backend`]: Field statistics client for the search backend
//! - [`pattern`]: Index patterns and their fields
//! - [`resolve`]: Resolution facade and constraint resolver
//! - [`api`]: REST API server with Axum
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sextant::interval::IntervalCalculator;
//! use chrono::{TimeZone, Utc};
//!
//! let calculator = IntervalCalculator::new();
//! let indices = calculator
//!     .to_index_list(
//!         "[logstash-]YYYY.MM.DD",
//!         "days",
//!         Some(Utc.with_ymd_and_hms(2015, 9, 20, 0, 0, 0).unwrap()),
//!         Some(Utc.with_ymd_and_hms(2015, 9, 22, 0, 0, 0).unwrap()),
//!     )
//!     .unwrap();
//!
//! assert_eq!(indices.len(), 3);
//! ```

pub mod api;
pub mod backend;
pub mod config;
pub mod interval;
pub mod pattern;
pub mod resolve;

// Re-export top-level types for convenience
pub use interval::{Interval, IntervalCalculator, IntervalError};

pub use backend::{BackendError, ClientConfig, ElasticsearchClient, FieldStatsClient};

pub use pattern::{Field, FieldCollection, IndexPattern, PatternError};

pub use resolve::{IndexList, ResolveError, Resolver, SortOrder, TimeBound};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{ApiConfig, BackendConfig, Config, ConfigError, LoggingConfig, ResolveConfig};
