//! API Error Types
//!
//! Defines error types for the API layer and implements conversion
//! to HTTP responses with appropriate status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::backend::BackendError;
use crate::interval::IntervalError;
use crate::pattern::PatternError;
use crate::resolve::ResolveError;

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request validation failed
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Index pattern resolution failed
    #[error("Resolve error: {0}")]
    Resolve(#[from] ResolveError),

    /// Field operation on a pattern failed
    #[error("Pattern error: {0}")]
    Pattern(#[from] PatternError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    pub request_id: String,
}

/// Error details
#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Resolve(ResolveError::Configuration(IntervalError::OutOfRange(_))) => {
                (StatusCode::BAD_REQUEST, "TIME_BOUND_OUT_OF_RANGE")
            }
            ApiError::Resolve(ResolveError::Configuration(IntervalError::TooManyIndices {
                ..
            })) => (StatusCode::BAD_REQUEST, "TOO_MANY_INDICES"),
            ApiError::Resolve(ResolveError::Configuration(_)) => {
                (StatusCode::BAD_REQUEST, "INVALID_INTERVAL")
            }
            ApiError::Resolve(ResolveError::InvalidTimeBound(_)) => {
                (StatusCode::BAD_REQUEST, "INVALID_TIME_BOUND")
            }
            ApiError::Resolve(ResolveError::Backend(BackendError::Timeout)) => {
                (StatusCode::GATEWAY_TIMEOUT, "BACKEND_TIMEOUT")
            }
            ApiError::Resolve(ResolveError::Backend(_)) => (StatusCode::BAD_GATEWAY, "BACKEND_ERROR"),
            ApiError::Pattern(PatternError::DuplicateField(_)) => {
                (StatusCode::CONFLICT, "DUPLICATE_FIELD")
            }
            ApiError::Pattern(PatternError::FieldNotFound(_)) => {
                (StatusCode::NOT_FOUND, "FIELD_NOT_FOUND")
            }
            ApiError::Pattern(PatternError::NotScripted(_)) => {
                (StatusCode::BAD_REQUEST, "FIELD_NOT_SCRIPTED")
            }
            ApiError::Pattern(PatternError::Mapper(_)) => (StatusCode::BAD_GATEWAY, "MAPPER_ERROR"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let request_id = uuid::Uuid::new_v4().to_string();

        // Log the error
        tracing::error!(
            request_id = %request_id,
            error_code = %code,
            error_message = %self,
            "API error occurred"
        );

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.to_string(),
            },
            request_id,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let err = ApiError::from(ResolveError::from(BackendError::Unavailable));
        assert_eq!(err.status_and_code().0, StatusCode::BAD_GATEWAY);

        let err = ApiError::from(ResolveError::from(IntervalError::UnknownInterval(
            "x".to_string(),
        )));
        assert_eq!(err.status_and_code(), (StatusCode::BAD_REQUEST, "INVALID_INTERVAL"));

        let err = ApiError::from(ResolveError::from(IntervalError::OutOfRange(
            "-262143-01-01T00:00:00+00:00".to_string(),
        )));
        assert_eq!(
            err.status_and_code(),
            (StatusCode::BAD_REQUEST, "TIME_BOUND_OUT_OF_RANGE")
        );

        let err = ApiError::from(ResolveError::from(IntervalError::TooManyIndices {
            count: 4,
            limit: 3,
        }));
        assert_eq!(err.status_and_code(), (StatusCode::BAD_REQUEST, "TOO_MANY_INDICES"));

        let err = ApiError::from(PatternError::DuplicateField("bytes".to_string()));
        assert_eq!(err.status_and_code().0, StatusCode::CONFLICT);
    }
}
