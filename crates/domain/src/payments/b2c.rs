//! Business-to-customer payment request.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::validation;

/// B2C transaction type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum B2cCommand {
    /// Salary disbursement.
    SalaryPayment,
    /// Generic business payment.
    BusinessPayment,
    /// Promotional payout.
    PromotionPayment,
}

/// Sends money from a business shortcode to a customer's wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct B2cPaymentRequest {
    /// API operator created by the business administrator.
    pub initiator_name: String,
    /// Encrypted initiator password.
    pub security_credential: String,
    /// Transaction type.
    #[serde(rename = "CommandID")]
    pub command_id: B2cCommand,
    /// Amount sent to the customer; must not be negative.
    pub amount: Decimal,
    /// Sending organization's shortcode.
    pub party_a: u32,
    /// Customer phone number (`2517XXXXXXXX`).
    pub party_b: String,
    /// Comment, at most 100 characters.
    pub remarks: String,
    /// Notified if the request times out in the provider's queue.
    #[serde(rename = "QueueTimeOutURL")]
    pub queue_timeout_url: String,
    /// Notified with the processing result.
    #[serde(rename = "ResultURL")]
    pub result_url: String,
    /// Optional comment, at most 100 characters. The provider spells it this way.
    #[serde(rename = "Occassion", default, skip_serializing_if = "Option::is_none")]
    pub occasion: Option<String>,
}

impl B2cPaymentRequest {
    /// Checks every field against the provider's rules.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidField`] naming the first field that fails.
    pub fn validate(&self) -> DomainResult<()> {
        validation::non_empty("InitiatorName", &self.initiator_name)?;
        validation::non_empty("SecurityCredential", &self.security_credential)?;
        if self.amount < Decimal::ZERO {
            return Err(DomainError::invalid_field("Amount", "must not be negative"));
        }
        validation::shortcode_number("PartyA", self.party_a)?;
        validation::phone_number("PartyB", &self.party_b)?;
        validation::max_chars("Remarks", &self.remarks, 100)?;
        validation::http_url("QueueTimeOutURL", &self.queue_timeout_url)?;
        validation::http_url("ResultURL", &self.result_url)?;
        if let Some(occasion) = &self.occasion {
            validation::max_chars("Occassion", occasion, 100)?;
        }
        Ok(())
    }
}
