//! Token acquisition against the token-generate endpoint.

use std::sync::Arc;
use std::time::Duration;

use mpesa_domain::{AccessToken, Credentials};
use serde::Deserialize;
use url::Url;

use crate::config::{Endpoints, MpesaConfig, join_url};
use crate::error::{MpesaError, MpesaResult};
use crate::ports::{HttpTransport, TransportRequest};
use crate::response;

/// Grant type sent with every token request.
pub const GRANT_TYPE: &str = "client_credentials";

/// Token endpoint response body.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: ExpiresIn,
}

/// `expires_in` is a number on some deployments and a string on others.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ExpiresIn {
    Seconds(u64),
    Text(String),
}

impl ExpiresIn {
    fn seconds(&self) -> Option<u64> {
        match self {
            Self::Seconds(s) => Some(*s),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Obtains access tokens for one credential pair.
///
/// # Example
///
/// ```ignore
/// let transport = Arc::new(ReqwestTransport::new()?);
/// let auth = Auth::new(transport, &config)?;
/// let token = auth.get_token().await?;
/// ```
pub struct Auth<T: HttpTransport> {
    transport: Arc<T>,
    credentials: Credentials,
    token_url: Url,
    timeout: Duration,
}

impl<T: HttpTransport> Auth<T> {
    /// Creates an authenticator from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`MpesaError::Config`] if credentials are unset, or
    /// [`MpesaError::Validation`] if they or the base URL are malformed.
    pub fn new(transport: Arc<T>, config: &MpesaConfig) -> MpesaResult<Self> {
        let credentials = config.credentials()?;
        let token_url = config.url_for(&config.endpoints.token_generate)?;
        Ok(Self {
            transport,
            credentials,
            token_url,
            timeout: config.timeout,
        })
    }

    /// Creates an authenticator for an explicit base URL, using the default
    /// token endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`MpesaError::Validation`] if the base URL is malformed.
    pub fn with_credentials(
        transport: Arc<T>,
        base_url: &str,
        credentials: Credentials,
        timeout: Duration,
    ) -> MpesaResult<Self> {
        let token_url = join_url(base_url, &Endpoints::default().token_generate)?;
        Ok(Self {
            transport,
            credentials,
            token_url,
            timeout,
        })
    }

    /// Returns the credentials this instance authenticates with.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the token endpoint URL (without the grant type).
    #[must_use]
    pub const fn token_url(&self) -> &Url {
        &self.token_url
    }

    /// Fetches a new access token.
    ///
    /// Performs exactly one request; nothing is cached or retried.
    ///
    /// # Errors
    ///
    /// Returns the classified [`MpesaError`] for a rejected credential pair,
    /// or [`MpesaError::Api`] for any other status, network failure,
    /// timeout or malformed body.
    pub async fn get_token(&self) -> MpesaResult<AccessToken> {
        let mut url = self.token_url.clone();
        url.query_pairs_mut().append_pair("grant_type", GRANT_TYPE);

        let request = TransportRequest::get(url, self.timeout)
            .with_header("Authorization", self.credentials.basic_auth_header());

        tracing::debug!(url = %self.token_url, "requesting access token");

        let result = self.fetch(request).await;
        match &result {
            Ok(token) => tracing::info!(
                expires_in = token.expires_in,
                "Access token successfully retrieved."
            ),
            Err(e) => tracing::error!(error = %e, "access token request failed"),
        }
        result
    }

    async fn fetch(&self, request: TransportRequest) -> MpesaResult<AccessToken> {
        let response = self.transport.send(request).await?;
        let body: TokenResponse = response::decode(&response)?;

        let expires_in = body.expires_in.seconds().ok_or_else(|| {
            MpesaError::api(
                response.status,
                "unparseable response body: expires_in is not a number of seconds",
            )
        })?;
        if body.access_token.trim().is_empty() {
            return Err(MpesaError::api(
                response.status,
                "unparseable response body: access_token is empty",
            ));
        }

        Ok(AccessToken::new(body.access_token, expires_in))
    }
}
