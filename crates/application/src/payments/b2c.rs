//! Business-to-customer payments.

use std::sync::Arc;
use std::time::Duration;

use mpesa_domain::{AccessToken, B2cPaymentRequest};
use url::Url;

use super::{bearer_header, post_json};
use crate::config::MpesaConfig;
use crate::error::MpesaResult;
use crate::ports::HttpTransport;

/// Pays out from a business shortcode to customer wallets.
pub struct B2c<T: HttpTransport> {
    transport: Arc<T>,
    url: Url,
    authorization: String,
    timeout: Duration,
}

impl<T: HttpTransport> B2c<T> {
    /// Creates the use case for an access token obtained from `Auth`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::MpesaError::Validation`] if the token is empty or the
    /// endpoint URL is malformed.
    pub fn new(
        transport: Arc<T>,
        config: &MpesaConfig,
        access_token: &AccessToken,
    ) -> MpesaResult<Self> {
        Ok(Self {
            transport,
            url: config.url_for(&config.endpoints.b2c_payment_request)?,
            authorization: bearer_header(access_token)?,
            timeout: config.timeout,
        })
    }

    /// Validates the request and initiates the payment.
    ///
    /// # Errors
    ///
    /// Returns [`crate::MpesaError::Validation`] before any request if the
    /// payload is invalid, otherwise the classified response error.
    pub async fn make_payment(
        &self,
        request: &B2cPaymentRequest,
    ) -> MpesaResult<serde_json::Value> {
        request.validate()?;
        tracing::info!(endpoint = %self.url, "Initiating B2C payment");

        let response = post_json(
            self.transport.as_ref(),
            self.url.clone(),
            Some(self.authorization.as_str()),
            request,
            self.timeout,
        )
        .await;
        match &response {
            Ok(_) => tracing::info!("Payment request successful."),
            Err(e) => tracing::error!(error = %e, "B2C payment request failed"),
        }
        response
    }
}
