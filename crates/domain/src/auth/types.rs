//! Client credentials and access tokens

use std::fmt;

use base64::Engine;
use chrono::{DateTime, TimeDelta, Utc};

use crate::error::{DomainError, DomainResult};

/// Client key and secret issued by the provider portal.
///
/// The pair is validated on construction and never changes afterwards.
/// `Debug` output redacts the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    client_key: String,
    client_secret: String,
}

impl Credentials {
    /// Creates a validated credential pair.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidCredentials`] if either part is blank,
    /// or if the key contains `:` (it would split the Basic auth pair).
    pub fn new(client_key: impl Into<String>, client_secret: impl Into<String>) -> DomainResult<Self> {
        let client_key = client_key.into();
        let client_secret = client_secret.into();

        if client_key.trim().is_empty() {
            return Err(DomainError::InvalidCredentials(
                "client key must not be empty".to_string(),
            ));
        }
        if client_key.contains(':') {
            return Err(DomainError::InvalidCredentials(
                "client key must not contain ':'".to_string(),
            ));
        }
        if client_secret.trim().is_empty() {
            return Err(DomainError::InvalidCredentials(
                "client secret must not be empty".to_string(),
            ));
        }

        Ok(Self {
            client_key,
            client_secret,
        })
    }

    /// Returns the client key.
    #[must_use]
    pub fn client_key(&self) -> &str {
        &self.client_key
    }

    /// Returns the client secret.
    #[must_use]
    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// Returns the `Authorization` header value for HTTP Basic auth.
    #[must_use]
    pub fn basic_auth_header(&self) -> String {
        let pair = format!("{}:{}", self.client_key, self.client_secret);
        let encoded = base64::engine::general_purpose::STANDARD.encode(pair.as_bytes());
        format!("Basic {encoded}")
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_key", &self.client_key)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Bearer token returned by the token endpoint.
///
/// Each successful authentication produces a fresh value. Nothing renews it;
/// callers use [`AccessToken::is_expired`] to decide when to fetch again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    /// The bearer token string.
    pub token: String,
    /// Lifetime in seconds, as reported by the provider.
    pub expires_in: u64,
    /// When the token was received.
    pub issued_at: DateTime<Utc>,
}

impl AccessToken {
    /// Creates a token issued now.
    #[must_use]
    pub fn new(token: impl Into<String>, expires_in: u64) -> Self {
        Self::issued_at(token, expires_in, Utc::now())
    }

    /// Creates a token with an explicit issue time.
    #[must_use]
    pub fn issued_at(token: impl Into<String>, expires_in: u64, issued_at: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            expires_in,
            issued_at,
        }
    }

    /// Instant after which the provider will reject the token.
    ///
    /// Lifetimes beyond chrono's range saturate to `DateTime::<Utc>::MAX_UTC`.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        let secs = i64::try_from(self.expires_in).unwrap_or(i64::MAX);
        offset_saturating(self.issued_at, secs)
    }

    /// Check if the token is expired or will expire within the given buffer.
    #[must_use]
    pub fn is_expired_or_expiring(&self, buffer_seconds: i64) -> bool {
        offset_saturating(Utc::now(), buffer_seconds) >= self.expires_at()
    }

    /// Returns true once the token lifetime has elapsed.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_or_expiring(0)
    }

    /// Seconds until expiry; negative once expired.
    #[must_use]
    pub fn seconds_until_expiry(&self) -> i64 {
        self.expires_at().signed_duration_since(Utc::now()).num_seconds()
    }

    /// Returns the `Authorization` header value for bearer auth.
    #[must_use]
    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Adds `secs` to `at`, clamping to the representable range.
fn offset_saturating(at: DateTime<Utc>, secs: i64) -> DateTime<Utc> {
    let bound = if secs < 0 {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    };
    TimeDelta::try_seconds(secs)
        .and_then(|delta| at.checked_add_signed(delta))
        .unwrap_or(bound)
}
