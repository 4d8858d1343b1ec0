//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{CatalogError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_catalog_config(&settings.catalog)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate catalog configuration
fn validate_catalog_config(config: &super::CatalogConfig) -> Result<()> {
    if config.translations_dir.as_os_str().is_empty() {
        return Err(CatalogError::Config(
            "Translations directory is required".to_string()
        ));
    }

    if config.default_locale.is_empty() {
        return Err(CatalogError::Config(
            "Default locale is required".to_string()
        ));
    }

    if config.supported_locales.is_empty() {
        return Err(CatalogError::Config(
            "At least one supported locale is required".to_string()
        ));
    }

    if !config.supported_locales.contains(&config.default_locale) {
        return Err(CatalogError::Config(
            "Default locale must be in supported locales list".to_string()
        ));
    }

    if let Some(bad) = config.supported_locales.iter().find(|l| !is_locale_name(l)) {
        return Err(CatalogError::Config(
            format!("Invalid locale name: '{}'", bad)
        ));
    }

    Ok(())
}

/// Locale names double as file stems, so keep them to `ll`, `ll_CC` or `ll-CC` shapes
fn is_locale_name(locale: &str) -> bool {
    !locale.is_empty()
        && locale
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(CatalogError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(CatalogError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_locale_must_be_supported() {
        let mut settings = Settings::default();
        settings.catalog.default_locale = "fr".to_string();
        let err = validate_settings(&settings).unwrap_err();
        assert!(err.to_string().contains("supported locales"));
    }

    #[test]
    fn test_locale_names_are_file_stems() {
        let mut settings = Settings::default();
        settings.catalog.supported_locales.push("../etc/passwd".to_string());
        assert!(validate_settings(&settings).is_err());

        settings.catalog.supported_locales = vec!["da_DK".into(), "en-US".into(), "de".into()];
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut settings = Settings::default();
        settings.logging.level = "verbose".to_string();
        assert!(validate_settings(&settings).is_err());
    }
}
