//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for tscatalog.

use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use crate::config::LoggingConfig;
use crate::utils::errors::{CatalogError, ErrorSeverity, Result};

/// Initialize logging based on configuration.
///
/// Log lines go to stderr so command output on stdout stays clean. The
/// returned guard flushes the file appender and must be held until exit.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| CatalogError::Config(format!("Invalid log level '{}': {}", config.level, e)))?;

    let (file_writer, guard) = match &config.file_path {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "tscatalog.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            (Some(non_blocking), Some(guard))
        }
        None => (None, None),
    };

    let stderr_layer = if config.json {
        fmt::layer().json().with_writer(std::io::stderr).boxed()
    } else {
        fmt::layer().with_writer(std::io::stderr).boxed()
    };
    let file_layer = file_writer.map(|writer| fmt::layer().with_ansi(false).with_writer(writer).boxed());

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| CatalogError::Config(format!("Failed to initialize logging: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log a catalog error at the level matching its severity
pub fn log_catalog_error(err: &CatalogError, operation: &str) {
    match err.severity() {
        ErrorSeverity::Info | ErrorSeverity::Warning => {
            warn!(operation = operation, error = %err, severity = %err.severity(), "Catalog operation failed");
        }
        ErrorSeverity::Error | ErrorSeverity::Critical => {
            error!(operation = operation, error = %err, severity = %err.severity(), "Catalog operation failed");
        }
    }
}
