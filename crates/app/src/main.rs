//! M-Pesa SDK - Main Entry Point
//!
//! Loads configuration from `.env` and the process environment, installs
//! logging, then requests an access token to verify the credentials and
//! endpoint. The token value itself is never printed.

use std::sync::Arc;

use mpesa_application::Auth;
use mpesa_infrastructure::{ReqwestTransport, load_config, logging};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    let _logger = logging::init(&config)?;
    tracing::info!(environment = %config.environment, base_url = %config.base_url, "starting");

    let transport = Arc::new(ReqwestTransport::new()?);
    let auth = Auth::new(transport, &config)?;

    match auth.get_token().await {
        Ok(token) => {
            println!(
                "Access token acquired; expires in {}s (at {}).",
                token.expires_in,
                token.expires_at().to_rfc3339()
            );
            Ok(())
        }
        Err(e) => {
            if let Some(hint) = e.mitigation() {
                eprintln!("Hint: {hint}");
            }
            Err(e.into())
        }
    }
}
