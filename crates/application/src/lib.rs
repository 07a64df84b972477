//! M-Pesa Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - Client configuration
//! - Port traits (interfaces for external dependencies)
//! - Token acquisition and payment use cases
//! - Application-level error handling and response classification

pub mod auth;
pub mod config;
pub mod error;
pub mod payments;
pub mod ports;
pub mod response;

pub use auth::{Auth, GRANT_TYPE};
pub use config::{Endpoints, Environment, MpesaConfig};
pub use error::{MpesaError, MpesaResult};
pub use payments::{B2c, C2b, StkPush};
pub use ports::{HttpMethod, HttpTransport, TransportError, TransportRequest, TransportResponse};
