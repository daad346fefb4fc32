//! Interval error types

use thiserror::Error;

/// Errors raised while expanding a rollover interval
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntervalError {
    /// Interval name is not one of the known rollover steps
    #[error("Unknown interval '{0}': must be one of hours, days, weeks, months, years")]
    UnknownInterval(String),

    /// Index name template could not be parsed
    #[error("Invalid index name template '{0}': unterminated '['")]
    InvalidTemplate(String),

    /// A bound lies too close to the edge of the representable calendar
    #[error("Time bound out of range: {0}")]
    OutOfRange(String),

    /// The range expands to more index names than allowed
    #[error("Range covers {count} indices, more than the limit of {limit}")]
    TooManyIndices { count: u64, limit: usize },
}

/// Result type alias for interval operations
pub type IntervalResult<T> = Result<T, IntervalError>;
