//! Domain error types

use thiserror::Error;

/// Domain-level errors raised while validating credentials or payloads.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The client key or secret is empty or cannot be encoded.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A payload field failed validation.
    #[error("invalid field '{field}': {reason}")]
    InvalidField {
        /// Wire name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl DomainError {
    /// Creates an invalid field error.
    pub fn invalid_field(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
