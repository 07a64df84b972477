//! Client configuration.
//!
//! [`MpesaConfig`] is an explicit value handed to each component's
//! constructor. The infrastructure crate populates it from the environment;
//! callers may override any field with the `with_*` methods.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use mpesa_domain::{Credentials, parse_http_url};
use url::Url;

use crate::error::{MpesaError, MpesaResult};

/// Sandbox base URL.
pub const DEFAULT_BASE_URL: &str = "https://apisandbox.safaricom.et";
/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Deployment environment flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Local development.
    #[default]
    Development,
    /// Automated tests; console logging is disabled.
    Test,
    /// Live traffic.
    Production,
}

impl Environment {
    /// Returns the canonical upper-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "DEV",
            Self::Test => "TEST",
            Self::Production => "PRODUCTION",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = MpesaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEV" | "DEVELOPMENT" => Ok(Self::Development),
            "TEST" => Ok(Self::Test),
            "PROD" | "PRODUCTION" => Ok(Self::Production),
            other => Err(MpesaError::Config(format!("unknown environment '{other}'"))),
        }
    }
}

/// Endpoint paths, relative to the base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Token generation.
    pub token_generate: String,
    /// STK push process request.
    pub stk_push: String,
    /// C2B URL registration.
    pub c2b_register_url: String,
    /// C2B payments.
    pub c2b_payments: String,
    /// B2C payment request.
    pub b2c_payment_request: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            token_generate: "/v1/token/generate".to_string(),
            stk_push: "/mpesa/stkpush/v3/processrequest".to_string(),
            c2b_register_url: "/v1/c2b-register-url/register".to_string(),
            c2b_payments: "/v1/c2b/payments".to_string(),
            b2c_payment_request: "/mpesa/b2c/v1/paymentrequest".to_string(),
        }
    }
}

/// Settings read by every operation component.
#[derive(Clone, PartialEq, Eq)]
pub struct MpesaConfig {
    /// Base URL of the provider API.
    pub base_url: String,
    /// Endpoint paths.
    pub endpoints: Endpoints,
    /// Client key (consumer key).
    pub client_key: Option<String>,
    /// Client secret (consumer secret).
    pub client_secret: Option<String>,
    /// Per-request network timeout.
    pub timeout: Duration,
    /// Directory for log files.
    pub log_dir: PathBuf,
    /// Log level or filter directive.
    pub log_level: String,
    /// Deployment environment.
    pub environment: Environment,
}

impl Default for MpesaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoints: Endpoints::default(),
            client_key: None,
            client_secret: None,
            timeout: DEFAULT_TIMEOUT,
            log_dir: PathBuf::from("logs"),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            environment: Environment::default(),
        }
    }
}

impl fmt::Debug for MpesaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MpesaConfig")
            .field("base_url", &self.base_url)
            .field("endpoints", &self.endpoints)
            .field("client_key", &self.client_key)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("log_dir", &self.log_dir)
            .field("log_level", &self.log_level)
            .field("environment", &self.environment)
            .finish()
    }
}

impl MpesaConfig {
    /// Overrides the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the client key and secret.
    #[must_use]
    pub fn with_credentials(
        mut self,
        client_key: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        self.client_key = Some(client_key.into());
        self.client_secret = Some(client_secret.into());
        self
    }

    /// Overrides the endpoint paths.
    #[must_use]
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Overrides the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Overrides the log directory.
    #[must_use]
    pub fn with_log_dir(mut self, log_dir: impl Into<PathBuf>) -> Self {
        self.log_dir = log_dir.into();
        self
    }

    /// Overrides the log level.
    #[must_use]
    pub fn with_log_level(mut self, log_level: impl Into<String>) -> Self {
        self.log_level = log_level.into();
        self
    }

    /// Overrides the environment flag.
    #[must_use]
    pub const fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Returns validated credentials.
    ///
    /// # Errors
    ///
    /// Returns [`MpesaError::Config`] if either part is unset, or
    /// [`MpesaError::Validation`] if the pair is malformed.
    pub fn credentials(&self) -> MpesaResult<Credentials> {
        let key = self
            .client_key
            .as_deref()
            .ok_or_else(|| MpesaError::Config("CLIENT_KEY is not set".to_string()))?;
        let secret = self
            .client_secret
            .as_deref()
            .ok_or_else(|| MpesaError::Config("CLIENT_SECRET is not set".to_string()))?;
        Ok(Credentials::new(key, secret)?)
    }

    /// Resolves an endpoint path against the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`MpesaError::Validation`] if the result is not an http(s) URL.
    pub fn url_for(&self, endpoint: &str) -> MpesaResult<Url> {
        join_url(&self.base_url, endpoint)
    }
}

/// Appends `endpoint` to `base_url`, keeping any path prefix on the base.
pub(crate) fn join_url(base_url: &str, endpoint: &str) -> MpesaResult<Url> {
    parse_http_url(base_url)?;
    let base = base_url.trim().trim_end_matches('/');
    let full = if endpoint.starts_with('/') {
        format!("{base}{endpoint}")
    } else {
        format!("{base}/{endpoint}")
    };
    Ok(parse_http_url(&full)?)
}
