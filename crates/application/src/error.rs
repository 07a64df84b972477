//! Application error types

use mpesa_domain::DomainError;
use thiserror::Error;

use crate::ports::TransportError;

/// Errors surfaced by the client.
///
/// The four `Invalid*` variants are classified from the provider's
/// `resultCode`; everything else the provider or the network can produce is
/// an [`MpesaError::Api`].
#[derive(Debug, Error)]
pub enum MpesaError {
    /// The client key is not recognized (`999991`).
    #[error("invalid client ID (HTTP {status}): {message}")]
    InvalidClientId {
        /// HTTP status code.
        status: u16,
        /// Provider description.
        message: String,
    },

    /// The authentication scheme was rejected (`999996`).
    #[error("invalid authentication (HTTP {status}): {message}")]
    InvalidAuthentication {
        /// HTTP status code.
        status: u16,
        /// Provider description.
        message: String,
    },

    /// The secret is wrong or the header is malformed (`999997`).
    #[error("invalid authorization header (HTTP {status}): {message}")]
    InvalidAuthorizationHeader {
        /// HTTP status code.
        status: u16,
        /// Provider description.
        message: String,
    },

    /// The grant type was rejected (`999998`).
    #[error("invalid grant type (HTTP {status}): {message}")]
    InvalidGrantType {
        /// HTTP status code.
        status: u16,
        /// Provider description.
        message: String,
    },

    /// Any other failure: unexpected status, network error, timeout or an
    /// unparseable body.
    #[error("API error{}: {message}", status_suffix(.status))]
    Api {
        /// HTTP status code, if a response was received.
        status: Option<u16>,
        /// What went wrong.
        message: String,
        /// True when the request hit the configured timeout.
        timed_out: bool,
    },

    /// A precondition on credentials, URLs or payload fields failed.
    #[error("validation error: {0}")]
    Validation(#[from] DomainError),

    /// Required configuration is missing or unusable.
    #[error("configuration error: {0}")]
    Config(String),

    /// A payload could not be encoded.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[allow(clippy::ref_option)]
fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {s})")).unwrap_or_default()
}

impl MpesaError {
    /// Creates a generic API error for a response that was received.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status: Some(status),
            message: message.into(),
            timed_out: false,
        }
    }

    /// HTTP status code of the failed response, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::InvalidClientId { status, .. }
            | Self::InvalidAuthentication { status, .. }
            | Self::InvalidAuthorizationHeader { status, .. }
            | Self::InvalidGrantType { status, .. } => Some(*status),
            Self::Api { status, .. } => *status,
            Self::Validation(_) | Self::Config(_) | Self::Json(_) => None,
        }
    }

    /// Returns true if the request timed out.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Api { timed_out: true, .. })
    }

    /// Suggested fix for the classified authentication failures.
    #[must_use]
    pub const fn mitigation(&self) -> Option<&'static str> {
        match self {
            Self::InvalidClientId { .. } => Some("Ensure the correct client ID is used."),
            Self::InvalidAuthentication { .. } => {
                Some("Ensure the authentication type is 'Basic Auth'.")
            }
            Self::InvalidAuthorizationHeader { .. } => {
                Some("Ensure the authorization header is correctly formatted.")
            }
            Self::InvalidGrantType { .. } => Some("Use 'client_credentials' as the grant type."),
            _ => None,
        }
    }
}

impl From<TransportError> for MpesaError {
    fn from(error: TransportError) -> Self {
        let timed_out = matches!(error, TransportError::Timeout { .. });
        Self::Api {
            status: None,
            message: error.to_string(),
            timed_out,
        }
    }
}

/// Result type alias for client operations.
pub type MpesaResult<T> = Result<T, MpesaError>;
