//! STK push initiation.

use std::sync::Arc;
use std::time::Duration;

use mpesa_domain::{AccessToken, StkPushPayload};
use url::Url;

use super::{bearer_header, post_json};
use crate::config::MpesaConfig;
use crate::error::MpesaResult;
use crate::ports::HttpTransport;

/// Sends STK push requests, prompting customers to authorize payments.
pub struct StkPush<T: HttpTransport> {
    transport: Arc<T>,
    url: Url,
    authorization: String,
    timeout: Duration,
}

impl<T: HttpTransport> StkPush<T> {
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
            url: config.url_for(&config.endpoints.stk_push)?,
            authorization: bearer_header(access_token)?,
            timeout: config.timeout,
        })
    }

    /// Validates the payload and submits it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::MpesaError::Validation`] before any request if the
    /// payload is invalid, otherwise the classified response error.
    pub async fn send_stk_push(
        &self,
        payload: &StkPushPayload,
    ) -> MpesaResult<serde_json::Value> {
        payload.validate()?;
        tracing::info!("Payload validation successful.");

        let response = post_json(
            self.transport.as_ref(),
            self.url.clone(),
            Some(self.authorization.as_str()),
            payload,
            self.timeout,
        )
        .await;
        match &response {
            Ok(_) => tracing::info!(
                merchant_request_id = %payload.merchant_request_id,
                "STK Push request sent successfully."
            ),
            Err(e) => tracing::error!(error = %e, "STK Push request failed"),
        }
        response
    }
}
