//! Shared test transport.

#![allow(dead_code, clippy::unwrap_used)]

use std::future::Future;
use std::sync::{Arc, Mutex};

use mpesa_application::{
    HttpTransport, MpesaConfig, TransportError, TransportRequest, TransportResponse,
};

pub const BASE_URL: &str = "https://sandbox.safaricom.et";
pub const CLIENT_KEY: &str = "test_client_key";
pub const CLIENT_SECRET: &str = "test_client_secret";

/// Returns the same outcome for every request and records what was sent.
pub struct MockTransport {
    outcome: Result<TransportResponse, TransportError>,
    requests: Mutex<Vec<TransportRequest>>,
}

impl MockTransport {
    pub fn respond(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(TransportResponse::new(status, body)),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn fail(error: TransportError) -> Arc<Self> {
        Arc::new(Self {
            outcome: Err(error),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> TransportRequest {
        self.requests().pop().unwrap()
    }
}

impl HttpTransport for MockTransport {
    fn send(
        &self,
        request: TransportRequest,
    ) -> impl Future<Output = Result<TransportResponse, TransportError>> + Send {
        self.requests.lock().unwrap().push(request);
        let outcome = self.outcome.clone();
        async move { outcome }
    }
}

pub fn config() -> MpesaConfig {
    MpesaConfig::default()
        .with_base_url(BASE_URL)
        .with_credentials(CLIENT_KEY, CLIENT_SECRET)
}

pub fn error_body(code: &str, desc: &str) -> String {
    format!(r#"{{"resultCode":"{code}","resultDesc":"{desc}"}}"#)
}
