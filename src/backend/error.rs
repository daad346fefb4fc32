//! Backend error types

use thiserror::Error;

/// Errors that can occur when talking to the search backend
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Search backend unavailable")]
    Unavailable,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Request timeout")]
    Timeout,

    #[error("Invalid response: {0}")]
    Decode(String),
}

impl BackendError {
    /// Classify a transport error the way every call site needs it
    pub(crate) fn from_transport(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            BackendError::Timeout
        } else if e.is_connect() {
            BackendError::Unavailable
        } else if e.is_decode() {
            BackendError::Decode(e.to_string())
        } else {
            BackendError::Request(e)
        }
    }
}

/// Result type alias for backend calls
pub type BackendResult<T> = Result<T, BackendError>;
