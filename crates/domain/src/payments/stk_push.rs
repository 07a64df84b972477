//! STK push (USSD payment prompt) request body.

use base64::Engine;
use chrono::{DateTime, TimeZone};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::validation;

/// Kind of STK push transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    /// Pay bill (shortcode + account number).
    CustomerPayBillOnline,
    /// Buy goods (till number).
    CustomerBuyGoodsOnline,
}

/// Key/value pair attached to a transaction as reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReferenceItem {
    /// Reference key.
    pub key: String,
    /// Reference value.
    pub value: String,
}

impl ReferenceItem {
    /// Creates a reference item.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Body of an STK push request, prompting a customer to authorize a payment
/// on their handset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StkPushPayload {
    /// Globally unique identifier for this payment request.
    #[serde(rename = "MerchantRequestID")]
    pub merchant_request_id: String,
    /// Business shortcode, exactly 6 digits.
    pub business_short_code: String,
    /// Base64 password, see [`stk_password`].
    pub password: String,
    /// `YYYYMMDDHHMMSS`, see [`stk_timestamp`].
    pub timestamp: String,
    /// Pay bill or buy goods.
    pub transaction_type: TransactionType,
    /// Amount to charge; must be positive.
    pub amount: Decimal,
    /// Phone number sending the money (`2517XXXXXXXX`).
    pub party_a: String,
    /// Receiving organization's shortcode.
    pub party_b: u32,
    /// Phone number that receives the PIN prompt (`2517XXXXXXXX`).
    pub phone_number: String,
    /// Short comment, at most 13 characters.
    pub transaction_desc: String,
    /// URL that receives the payment result.
    #[serde(rename = "CallBackURL")]
    pub callback_url: String,
    /// Account identifier, at most 12 characters.
    pub account_reference: String,
    /// Extra key/value details.
    #[serde(default)]
    pub reference_data: Vec<ReferenceItem>,
}

impl StkPushPayload {
    /// Checks every field against the provider's rules.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidField`] naming the first field that fails.
    pub fn validate(&self) -> DomainResult<()> {
        validation::non_empty("MerchantRequestID", &self.merchant_request_id)?;
        validation::digits("BusinessShortCode", &self.business_short_code, 6, 6)?;
        validation::non_empty("Password", &self.password)?;
        validation::digits("Timestamp", &self.timestamp, 14, 14)?;
        if self.amount <= Decimal::ZERO {
            return Err(DomainError::invalid_field(
                "Amount",
                "must be greater than zero",
            ));
        }
        validation::phone_number("PartyA", &self.party_a)?;
        validation::shortcode_number("PartyB", self.party_b)?;
        validation::phone_number("PhoneNumber", &self.phone_number)?;
        validation::max_chars("TransactionDesc", &self.transaction_desc, 13)?;
        validation::http_url("CallBackURL", &self.callback_url)?;
        validation::max_chars("AccountReference", &self.account_reference, 12)?;
        Ok(())
    }
}

/// Builds the STK push password: base64 of shortcode, passkey and timestamp.
#[must_use]
pub fn stk_password(business_short_code: &str, passkey: &str, timestamp: &str) -> String {
    let raw = format!("{business_short_code}{passkey}{timestamp}");
    base64::engine::general_purpose::STANDARD.encode(raw.as_bytes())
}

/// Formats a time as the `YYYYMMDDHHMMSS` timestamp the API expects.
#[must_use]
pub fn stk_timestamp<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    at.format("%Y%m%d%H%M%S").to_string()
}

/// Generates a fresh, time-ordered merchant request id.
#[must_use]
pub fn generate_merchant_request_id() -> String {
    uuid::Uuid::now_v7().to_string()
}
