//! Payment operation use cases.
//!
//! Each use case validates its payload, POSTs it as JSON and normalizes the
//! response the same way token requests are normalized.

mod b2c;
mod c2b;
mod stk_push;

pub use b2c::B2c;
pub use c2b::C2b;
pub use stk_push::StkPush;

use std::time::Duration;

use mpesa_domain::{AccessToken, DomainError};
use serde::Serialize;
use url::Url;

use crate::error::MpesaResult;
use crate::ports::{HttpTransport, TransportRequest};
use crate::response;

fn bearer_header(access_token: &AccessToken) -> MpesaResult<String> {
    if access_token.token.trim().is_empty() {
        return Err(
            DomainError::InvalidCredentials("access token must not be empty".to_string()).into(),
        );
    }
    Ok(access_token.bearer_header())
}

async fn post_json<T, B>(
    transport: &T,
    url: Url,
    authorization: Option<&str>,
    body: &B,
    timeout: Duration,
) -> MpesaResult<serde_json::Value>
where
    T: HttpTransport,
    B: Serialize + Sync,
{
    let mut request = TransportRequest::post_json(url, serde_json::to_value(body)?, timeout)
        .with_header("Content-Type", "application/json");
    if let Some(authorization) = authorization {
        request = request.with_header("Authorization", authorization);
    }
    let response = transport.send(request).await?;
    response::decode(&response)
}
