//! Index pattern error types

use thiserror::Error;

/// Errors raised by index pattern field operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// A field with this name already exists
    #[error("Duplicate field: {0}")]
    DuplicateField(String),

    /// No field with this name
    #[error("Field not found: {0}")]
    FieldNotFound(String),

    /// The field exists but is mapped, not scripted
    #[error("Field is not scripted: {0}")]
    NotScripted(String),

    /// Field mapping lookup failed
    #[error("Mapper error: {0}")]
    Mapper(String),
}

/// Result type alias for pattern operations
pub type PatternResult<T> = Result<T, PatternError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PatternError::DuplicateField("bytes".to_string());
        assert_eq!(err.to_string(), "Duplicate field: bytes");
    }
}
