//! Response normalization shared by every operation.
//!
//! Success bodies are decoded as JSON. Error bodies are classified by the
//! provider's `resultCode`; bodies that are not JSON become
//! [`MpesaError::Api`] carrying the status and a snippet of the text.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{MpesaError, MpesaResult};
use crate::ports::TransportResponse;

/// Result code for an unknown client id.
pub const INVALID_CLIENT_ID: &str = "999991";
/// Result code for a rejected authentication scheme.
pub const INVALID_AUTHENTICATION: &str = "999996";
/// Result code for a bad secret or malformed header.
pub const INVALID_AUTHORIZATION_HEADER: &str = "999997";
/// Result code for a rejected grant type.
pub const INVALID_GRANT_TYPE: &str = "999998";

const BODY_SNIPPET_LEN: usize = 200;

/// Error body shapes returned by the provider.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(rename = "resultCode", alias = "errorCode", default)]
    result_code: Option<Code>,
    #[serde(rename = "resultDesc", alias = "errorMessage", default)]
    result_desc: Option<String>,
}

/// Codes arrive as strings or numbers depending on the endpoint.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Code {
    Text(String),
    Number(i64),
}

impl Code {
    fn into_string(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Number(n) => n.to_string(),
        }
    }
}

/// Decodes a response, classifying any non-2xx status.
///
/// # Errors
///
/// Returns the classified error for a non-2xx status, or
/// [`MpesaError::Api`] if a 2xx body does not decode as `T`.
pub fn decode<T: DeserializeOwned>(response: &TransportResponse) -> MpesaResult<T> {
    if !response.is_success() {
        return Err(classify_error(response.status, &response.body));
    }
    serde_json::from_str(&response.body).map_err(|e| {
        MpesaError::api(
            response.status,
            format!(
                "unparseable response body: {e}: {}",
                snippet(&response.body)
            ),
        )
    })
}

/// Maps an error response onto the error taxonomy.
#[must_use]
pub fn classify_error(status: u16, body: &str) -> MpesaError {
    let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) else {
        let message = if body.trim().is_empty() {
            "empty response body".to_string()
        } else {
            snippet(body)
        };
        return MpesaError::api(status, message);
    };

    let code = parsed.result_code.map(Code::into_string);
    let message = parsed
        .result_desc
        .unwrap_or_else(|| "No description provided".to_string());

    match code.as_deref() {
        Some(INVALID_CLIENT_ID) => MpesaError::InvalidClientId { status, message },
        Some(INVALID_AUTHENTICATION) => MpesaError::InvalidAuthentication { status, message },
        Some(INVALID_AUTHORIZATION_HEADER) => {
            MpesaError::InvalidAuthorizationHeader { status, message }
        }
        Some(INVALID_GRANT_TYPE) => MpesaError::InvalidGrantType { status, message },
        Some(other) => {
            tracing::error!(status, code = other, "unknown API error");
            MpesaError::api(status, format!("unknown API error {other}: {message}"))
        }
        None => {
            tracing::error!(status, "API error without result code");
            MpesaError::api(status, format!("unknown API error: {}", snippet(body)))
        }
    }
}

fn snippet(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() > BODY_SNIPPET_LEN {
        let cut: String = trimmed.chars().take(BODY_SNIPPET_LEN).collect();
        format!("{cut}...")
    } else {
        trimmed.to_string()
    }
}
