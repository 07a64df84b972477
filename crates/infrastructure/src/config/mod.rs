//! Configuration loading.

mod env;

pub use env::{config_from_lookup, load_config};
