//! Customer-to-business URL registration.

use std::sync::Arc;
use std::time::Duration;

use mpesa_domain::{DomainError, RegisterUrlRequest};
use url::Url;

use super::post_json;
use crate::config::MpesaConfig;
use crate::error::MpesaResult;
use crate::ports::HttpTransport;

/// Registers validation and confirmation URLs for C2B payments.
///
/// This endpoint authenticates with an `apikey` query parameter rather than
/// a bearer token.
pub struct C2b<T: HttpTransport> {
    transport: Arc<T>,
    url: Url,
    timeout: Duration,
}

impl<T: HttpTransport> C2b<T> {
    /// Creates the use case.
    ///
    /// # Errors
    ///
    /// Returns [`crate::MpesaError::Validation`] if the endpoint URL is malformed.
    pub fn new(transport: Arc<T>, config: &MpesaConfig) -> MpesaResult<Self> {
        Ok(Self {
            transport,
            url: config.url_for(&config.endpoints.c2b_register_url)?,
            timeout: config.timeout,
        })
    }

    /// Validates the request and registers the URLs.
    ///
    /// # Errors
    ///
    /// Returns [`crate::MpesaError::Validation`] if `api_key` is blank or the
    /// request is invalid, otherwise the classified response error.
    pub async fn register_url(
        &self,
        api_key: &str,
        request: &RegisterUrlRequest,
    ) -> MpesaResult<serde_json::Value> {
        if api_key.trim().is_empty() {
            return Err(DomainError::invalid_field("apikey", "must not be empty").into());
        }
        request.validate()?;

        let mut url = self.url.clone();
        url.query_pairs_mut().append_pair("apikey", api_key);
        let response =
            post_json(self.transport.as_ref(), url, None, request, self.timeout).await;
        match &response {
            Ok(_) => tracing::info!(
                short_code = %request.short_code,
                "Successfully registered C2B URLs."
            ),
            Err(e) => tracing::error!(error = %e, "Failed to register C2B URLs"),
        }
        response
    }
}
