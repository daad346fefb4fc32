//! Resolution error types

use thiserror::Error;

use crate::backend::BackendError;
use crate::interval::IntervalError;

/// Errors that can occur while resolving an index pattern
#[derive(Error, Debug)]
pub enum ResolveError {
    /// Malformed rollover interval or index name template
    #[error("Configuration error: {0}")]
    Configuration(#[from] IntervalError),

    /// Field statistics call failed; carried unchanged
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// A raw time bound could not be read as an instant
    #[error("Invalid time bound: {0}")]
    InvalidTimeBound(String),
}

/// Result type for resolution
pub type ResolveResult<T> = Result<T, ResolveError>;
