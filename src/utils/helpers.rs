//! Helper functions and utilities
//!
//! Locale name handling shared by the registry and the command-line tool.

use std::path::{Path, PathBuf};

/// Extension of Qt Linguist source files
pub const TS_EXTENSION: &str = "ts";

/// Language part of a locale name (`da_DK` -> `da`, `en-US` -> `en`)
pub fn language_part(locale: &str) -> &str {
    locale.split(['_', '-']).next().unwrap_or(locale)
}

/// Normalize a BCP 47 style tag to the underscore form Qt uses (`en-US` -> `en_US`)
pub fn normalize_locale(locale: &str) -> String {
    locale.trim().replace('-', "_")
}

/// Path of the `.ts` file for a locale inside a translations directory
pub fn catalog_path(dir: &Path, locale: &str) -> PathBuf {
    dir.join(format!("{}.{}", locale, TS_EXTENSION))
}
