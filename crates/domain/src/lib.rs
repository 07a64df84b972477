//! M-Pesa Domain - Core business types
//!
//! This crate defines the domain model for the M-Pesa client library:
//! credentials, access tokens and the payment request payloads.
//! All types here are pure Rust with no I/O dependencies.

pub mod auth;
pub mod error;
pub mod payments;
pub mod validation;

pub use auth::{AccessToken, Credentials};
pub use error::{DomainError, DomainResult};
pub use payments::{
    B2cCommand, B2cPaymentRequest, ReferenceItem, RegisterUrlRequest, ResponseType,
    StkPushPayload, TransactionType, generate_merchant_request_id, stk_password, stk_timestamp,
};
pub use validation::parse_http_url;
