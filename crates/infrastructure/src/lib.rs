//! M-Pesa Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus the process-level concerns
//! (environment configuration and logging) a binary needs at startup.

pub mod adapters;
pub mod config;
pub mod logging;

pub use adapters::ReqwestTransport;
pub use config::{config_from_lookup, load_config};
pub use logging::{LoggerError, LoggerGuard};
