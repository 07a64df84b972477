//! Request payloads for the payment operations.
//!
//! Every payload serializes to the provider's wire field names and exposes a
//! `validate` method that rejects malformed values before any network call.

mod b2c;
mod c2b;
mod stk_push;

pub use b2c::{B2cCommand, B2cPaymentRequest};
pub use c2b::{RegisterUrlRequest, ResponseType};
pub use stk_push::{
    ReferenceItem, StkPushPayload, TransactionType, generate_merchant_request_id, stk_password,
    stk_timestamp,
};
