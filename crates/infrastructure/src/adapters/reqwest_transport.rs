//! HTTP transport implementation using reqwest.
//!
//! This adapter implements the `HttpTransport` port using the reqwest library.
//! It handles all HTTP communication for the client.

use std::future::Future;

use mpesa_application::ports::{
    HttpMethod, HttpTransport, TransportError, TransportRequest, TransportResponse,
};
use reqwest::{Client, Method};

/// Redirects followed before giving up.
const MAX_REDIRECTS: usize = 10;

/// HTTP transport implementation using reqwest.
///
/// Wraps a pooled `reqwest::Client`. Share one instance (behind `Arc`)
/// between `Auth` and the payment use cases.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport with default settings.
    ///
    /// Default configuration:
    /// - Follow redirects: up to 10
    /// - TLS verification: enabled
    /// - User-Agent: "mpesa-sdk/<version>"
    ///
    /// Timeouts are applied per request from `TransportRequest::timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(concat!("mpesa-sdk/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;

        Ok(Self { client })
    }

    /// Creates a transport with a custom reqwest client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Converts the port `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        }
    }

    /// Maps reqwest errors to `TransportError`.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> TransportError {
        if error.is_timeout() {
            return TransportError::Timeout { timeout_ms };
        }

        if error.is_connect() {
            return TransportError::Connection(error.to_string());
        }

        if error.is_redirect() {
            return TransportError::TooManyRedirects;
        }

        if error.is_builder() {
            return TransportError::InvalidRequest(error.to_string());
        }

        TransportError::Other(error.to_string())
    }
}

impl HttpTransport for ReqwestTransport {
    fn send(
        &self,
        request: TransportRequest,
    ) -> impl Future<Output = Result<TransportResponse, TransportError>> + Send {
        async move {
            let timeout_ms = u64::try_from(request.timeout.as_millis()).unwrap_or(u64::MAX);

            let mut builder = self
                .client
                .request(Self::to_reqwest_method(request.method), request.url)
                .timeout(request.timeout);

            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }

            if let Some(body) = &request.body {
                builder = builder.json(body);
            }

            let response = builder
                .send()
                .await
                .map_err(|e| Self::map_error(&e, timeout_ms))?;

            let status = response.status().as_u16();

            let body = response
                .text()
                .await
                .map_err(|e| Self::map_error(&e, timeout_ms))?;

            tracing::debug!(status, bytes = body.len(), "response received");

            Ok(TransportResponse::new(status, body))
        }
    }
}
