//! Environment-backed configuration.
//!
//! Reads an optional `.env` file from the working directory (values already
//! in the process environment win), then builds an [`MpesaConfig`] from the
//! variables below. Unset or empty variables keep their defaults.
//!
//! | Variable | Field |
//! |----------|-------|
//! | `BASE_URL` | `base_url` |
//! | `TOKEN_GENERATE_ENDPOINT` | `endpoints.token_generate` |
//! | `STK_PUSH_ENDPOINT` | `endpoints.stk_push` |
//! | `C2B_REGISTER_URL_ENDPOINT` | `endpoints.c2b_register_url` |
//! | `C2B_PAYMENTS_ENDPOINT` | `endpoints.c2b_payments` |
//! | `B2C_PAYMENT_REQUEST_ENDPOINT` | `endpoints.b2c_payment_request` |
//! | `CLIENT_KEY` / `CLIENT_SECRET` | credentials |
//! | `TIMEOUT` | `timeout`, in seconds |
//! | `MPESA_LOG_DIR` | `log_dir` |
//! | `LOG_LEVEL` | `log_level` |
//! | `ENVIRONMENT` | `environment` |

use std::time::Duration;

use mpesa_application::{MpesaConfig, MpesaError, MpesaResult};

/// Loads `.env` (if present) and reads the process environment.
///
/// # Errors
///
/// Returns [`MpesaError::Config`] if `.env` exists but cannot be parsed, or
/// if a variable holds an unusable value.
pub fn load_config() -> MpesaResult<MpesaConfig> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env file"),
        Err(e) if e.not_found() => {}
        Err(e) => return Err(MpesaError::Config(format!("failed to read .env: {e}"))),
    }
    config_from_lookup(|key| std::env::var(key).ok())
}

/// Builds a configuration from an arbitrary variable lookup.
///
/// # Errors
///
/// Returns [`MpesaError::Config`] if `TIMEOUT` is not a positive number of
/// seconds or `ENVIRONMENT` is not recognized.
pub fn config_from_lookup<F>(lookup: F) -> MpesaResult<MpesaConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
    let mut config = MpesaConfig::default();

    if let Some(base_url) = get("BASE_URL") {
        config.base_url = base_url;
    }

    let endpoints = &mut config.endpoints;
    for (key, slot) in [
        ("TOKEN_GENERATE_ENDPOINT", &mut endpoints.token_generate),
        ("STK_PUSH_ENDPOINT", &mut endpoints.stk_push),
        ("C2B_REGISTER_URL_ENDPOINT", &mut endpoints.c2b_register_url),
        ("C2B_PAYMENTS_ENDPOINT", &mut endpoints.c2b_payments),
        ("B2C_PAYMENT_REQUEST_ENDPOINT", &mut endpoints.b2c_payment_request),
    ] {
        if let Some(value) = get(key) {
            *slot = value;
        }
    }

    config.client_key = get("CLIENT_KEY");
    config.client_secret = get("CLIENT_SECRET");

    if let Some(timeout) = get("TIMEOUT") {
        config.timeout = parse_timeout(&timeout)?;
    }
    if let Some(log_dir) = get("MPESA_LOG_DIR") {
        config.log_dir = log_dir.into();
    }
    if let Some(log_level) = get("LOG_LEVEL") {
        config.log_level = log_level.trim().to_ascii_lowercase();
    }
    if let Some(environment) = get("ENVIRONMENT") {
        config.environment = environment.parse()?;
    }

    Ok(config)
}

fn parse_timeout(value: &str) -> MpesaResult<Duration> {
    let seconds: f64 = value
        .trim()
        .parse()
        .map_err(|_| MpesaError::Config(format!("TIMEOUT must be a number of seconds, got '{value}'")))?;
    if seconds <= 0.0 {
        return Err(MpesaError::Config(format!(
            "TIMEOUT must be positive, got '{value}'"
        )));
    }
    Duration::try_from_secs_f64(seconds)
        .map_err(|e| MpesaError::Config(format!("TIMEOUT out of range: {e}")))
}
