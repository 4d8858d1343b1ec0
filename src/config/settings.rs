//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

/// Prefix of environment variables, e.g. `TSCATALOG_CATALOG__DEFAULT_LOCALE`
const ENV_PREFIX: &str = "TSCATALOG";

/// Main application configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

/// Translation catalog configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Directory holding `<locale>.ts` files
    pub translations_dir: PathBuf,
    pub default_locale: String,
    pub supported_locales: Vec<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for daily rolling log files; stderr only when unset
    pub file_path: Option<PathBuf>,
    pub json: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            translations_dir: PathBuf::from("translations"),
            default_locale: "da_DK".to_string(),
            supported_locales: vec!["da_DK".to_string()],
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file_path: None,
            json: false,
        }
    }
}

impl Settings {
    /// Load settings from an optional `config` file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(Self::environment())
            .build()?;

        settings.try_deserialize()
    }

    /// Load settings from an explicit file, still honoring environment overrides
    pub fn from_path(path: &Path) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(true))
            .add_source(Self::environment())
            .build()?;

        settings.try_deserialize()
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("catalog.supported_locales")
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::CatalogError> {
        super::validation::validate_settings(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.catalog.default_locale, "da_DK");
    }

    #[test]
    fn test_from_path_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            "[catalog]\ntranslations_dir = \"translate\"\ndefault_locale = \"en\"\nsupported_locales = [\"en\", \"da_DK\"]\n"
        )
        .unwrap();

        let settings = Settings::from_path(file.path()).unwrap();
        assert_eq!(settings.catalog.translations_dir, PathBuf::from("translate"));
        assert_eq!(settings.catalog.supported_locales, vec!["en", "da_DK"]);
        assert_eq!(settings.logging.level, "warn");
    }
}
