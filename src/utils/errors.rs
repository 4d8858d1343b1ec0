//! Error handling for tscatalog
//!
//! This module defines the error type used throughout the crate and a
//! severity classification used by the command-line tool when reporting.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for catalog operations
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Translation file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Parse error at byte {position}: {message}")]
    Parse { message: String, position: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Locale not loaded: {0}")]
    LocaleNotLoaded(String),

    #[error("Catalog construction error: {0}")]
    Duplicate(#[from] crate::catalog::DuplicateEntry),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

impl CatalogError {
    /// Build a parse error at a byte offset of the input
    pub fn parse(message: impl Into<String>, position: u64) -> Self {
        CatalogError::Parse {
            message: message.into(),
            position,
        }
    }

    /// Whether the error came from malformed input rather than the environment
    pub fn is_parse_error(&self) -> bool {
        matches!(self, CatalogError::Parse { .. })
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CatalogError::NotFound { .. } => ErrorSeverity::Error,
            CatalogError::Parse { .. } => ErrorSeverity::Error,
            CatalogError::Io(_) => ErrorSeverity::Critical,
            CatalogError::Config(_) => ErrorSeverity::Critical,
            CatalogError::LocaleNotLoaded(_) => ErrorSeverity::Warning,
            CatalogError::Duplicate(_) => ErrorSeverity::Error,
            CatalogError::Serialization(_) => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
