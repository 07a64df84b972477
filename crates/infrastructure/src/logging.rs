//! Logging setup.
//!
//! Installs a global `tracing` subscriber with a rolling file layer under
//! [`MpesaConfig::log_dir`] and, outside the test environment, a compact
//! console layer. `RUST_LOG` refines the configured level when it is a plain
//! level name.

use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use mpesa_application::{Environment, MpesaConfig};
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Prefix of every log file name.
pub const LOG_FILE_PREFIX: &str = "mpesa";
const LOG_FILE_SUFFIX: &str = "log";
const MAX_LOG_FILES: usize = 5;

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum LoggerError {
    /// The log directory could not be created.
    #[error("failed to create log directory {path}: {source}")]
    CreateDir {
        /// Directory that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The rolling file appender could not be built.
    #[error("failed to open log file: {0}")]
    Appender(#[from] tracing_appender::rolling::InitError),

    /// `LOG_LEVEL` is neither a level nor a valid filter directive.
    #[error("invalid log filter '{filter}': {message}")]
    Filter {
        /// Rejected filter text.
        filter: String,
        /// Parser message.
        message: String,
    },

    /// A global subscriber is already installed.
    #[error("failed to install subscriber: {0}")]
    Subscriber(#[from] tracing_subscriber::util::TryInitError),
}

/// Keeps the background log writer alive.
///
/// Buffered lines are flushed when this guard is dropped, so hold it for the
/// lifetime of the program.
#[must_use = "dropping the guard stops the background log writer"]
#[derive(Debug)]
pub struct LoggerGuard {
    _guard: WorkerGuard,
}

/// Installs the global subscriber described by `config`.
///
/// # Errors
///
/// See [`LoggerError`].
pub fn init(config: &MpesaConfig) -> Result<LoggerGuard, LoggerError> {
    let env_filter = build_env_filter(&config.log_level)?;

    fs::create_dir_all(&config.log_dir).map_err(|source| LoggerError::CreateDir {
        path: config.log_dir.clone(),
        source,
    })?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix(LOG_FILE_SUFFIX)
        .max_log_files(MAX_LOG_FILES)
        .build(&config.log_dir)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let mut layers = vec![layer().with_writer(non_blocking).with_ansi(false).boxed()];
    if config.environment != Environment::Test {
        layers.push(layer().compact().with_ansi(true).boxed());
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layers)
        .try_init()?;

    tracing::debug!(
        log_dir = %config.log_dir.display(),
        environment = %config.environment,
        "logging initialized"
    );
    Ok(LoggerGuard { _guard: guard })
}

fn build_env_filter(log_level: &str) -> Result<EnvFilter, LoggerError> {
    let log_level = log_level.trim();
    if let Ok(level) = LevelFilter::from_str(log_level) {
        return Ok(EnvFilter::builder()
            .with_default_directive(level.into())
            .from_env_lossy());
    }
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse(log_level)
        .map_err(|e| LoggerError::Filter {
            filter: log_level.to_string(),
            message: e.to_string(),
        })
}
