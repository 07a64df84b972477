//! Authentication module.
//!
//! Exchanges client credentials for a bearer token using HTTP Basic auth.
//! Tokens are never cached here; each call performs one request.

mod service;

pub use service::{Auth, GRANT_TYPE};
