//! Customer-to-business URL registration.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::validation;

const REGISTER_URL_COMMAND: &str = "RegisterURL";

/// What the provider does when the validation URL is unreachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseType {
    /// Complete the transaction anyway.
    Completed,
    /// Cancel the transaction.
    Cancelled,
}

/// Registers the validation and confirmation URLs for a shortcode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RegisterUrlRequest {
    /// Pay bill or till number, at least 6 digits.
    pub short_code: String,
    /// Fallback when validation cannot be reached.
    pub response_type: ResponseType,
    /// Always `RegisterURL`.
    #[serde(rename = "CommandID")]
    pub command_id: String,
    /// Receives the confirmation once a payment completes.
    #[serde(rename = "ConfirmationURL")]
    pub confirmation_url: String,
    /// Receives the validation request when a payment is submitted.
    #[serde(rename = "ValidationURL")]
    pub validation_url: String,
}

impl RegisterUrlRequest {
    /// Creates a request with the fixed `RegisterURL` command.
    #[must_use]
    pub fn new(
        short_code: impl Into<String>,
        response_type: ResponseType,
        confirmation_url: impl Into<String>,
        validation_url: impl Into<String>,
    ) -> Self {
        Self {
            short_code: short_code.into(),
            response_type,
            command_id: REGISTER_URL_COMMAND.to_string(),
            confirmation_url: confirmation_url.into(),
            validation_url: validation_url.into(),
        }
    }

    /// Checks every field against the provider's rules.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidField`] naming the first field that fails.
    pub fn validate(&self) -> DomainResult<()> {
        validation::digits("ShortCode", &self.short_code, 6, usize::MAX)?;
        if self.command_id != REGISTER_URL_COMMAND {
            return Err(DomainError::invalid_field(
                "CommandID",
                format!("must be '{REGISTER_URL_COMMAND}'"),
            ));
        }
        validation::http_url("ConfirmationURL", &self.confirmation_url)?;
        validation::http_url("ValidationURL", &self.validation_url)?;
        Ok(())
    }
}
