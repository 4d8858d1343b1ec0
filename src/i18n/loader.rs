//! Per-locale catalog registry
//!
//! Loads one catalog per supported locale from the translations directory
//! and resolves requested locales against what was loaded: exact name
//! first, then the bare language (`da_DK` -> `da`), then the default.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::catalog::Catalog;
use crate::config::CatalogConfig;
use crate::utils::errors::{CatalogError, Result};
use crate::utils::helpers::{catalog_path, language_part, normalize_locale};

/// Catalogs for every loaded locale
#[derive(Debug, Clone)]
pub struct Translations {
    /// Loaded catalogs by locale name
    catalogs: HashMap<String, Arc<Catalog>>,
    /// Source file of each loaded catalog
    files: HashMap<String, PathBuf>,
    translations_dir: PathBuf,
    default_locale: String,
    supported_locales: Vec<String>,
}

impl Translations {
    /// Create an empty registry; nothing is read until [`load_translations`](Self::load_translations)
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            catalogs: HashMap::new(),
            files: HashMap::new(),
            translations_dir: config.translations_dir.clone(),
            default_locale: normalize_locale(&config.default_locale),
            supported_locales: config.supported_locales.clone(),
        }
    }

    /// Load the `.ts` file of every supported locale.
    ///
    /// Catalogs are keyed by normalized locale name (`en-US` -> `en_US`).
    /// Failing to load the default locale is fatal and leaves the
    /// previously loaded catalogs in place; other locales are logged and
    /// skipped.
    pub async fn load_translations(&mut self) -> Result<()> {
        let mut catalogs = HashMap::new();
        let mut files = HashMap::new();

        for locale in &self.supported_locales {
            let key = normalize_locale(locale);
            let path = catalog_path(&self.translations_dir, locale);

            match Catalog::load_async(&path).await {
                Ok(catalog) => {
                    info!(locale = %key, messages = catalog.len(), "Loaded translations for locale");
                    catalogs.insert(key.clone(), Arc::new(catalog));
                    files.insert(key, path);
                }
                Err(e) if key == self.default_locale => {
                    error!(locale = %key, error = %e, "Failed to load default locale translations");
                    return Err(e);
                }
                Err(CatalogError::NotFound { path }) => {
                    warn!(locale = %key, path = %path.display(), "Translation file not found");
                }
                Err(e) => {
                    error!(locale = %key, error = %e, "Failed to load translations");
                }
            }
        }

        self.catalogs = catalogs;
        self.files = files;
        Ok(())
    }

    /// Load every catalog again from disk, keeping the current ones on failure
    pub async fn reload_translations(&mut self) -> Result<()> {
        self.load_translations().await
    }

    /// Register an already built catalog under a locale name
    pub fn insert(&mut self, locale: &str, catalog: Catalog) {
        self.catalogs.insert(normalize_locale(locale), Arc::new(catalog));
    }

    /// File a loaded locale was read from
    pub fn catalog_file(&self, locale: &str) -> Option<&Path> {
        self.files.get(&normalize_locale(locale)).map(PathBuf::as_path)
    }

    /// Pick the loaded locale that best serves `requested`
    pub fn resolve_locale(&self, requested: Option<&str>) -> String {
        if let Some(requested) = requested {
            let normalized = normalize_locale(requested);
            if self.catalogs.contains_key(&normalized) {
                return normalized;
            }

            let language = language_part(&normalized);
            if self.catalogs.contains_key(language) {
                debug!(requested = %requested, resolved = %language, "Using language-only catalog");
                return language.to_string();
            }
        }

        self.default_locale.clone()
    }

    /// Catalog of the resolved locale
    pub fn catalog(&self, locale: &str) -> Option<&Arc<Catalog>> {
        self.catalogs.get(&self.resolve_locale(Some(locale)))
    }

    /// Catalog of a resolved locale, failing when nothing is loaded for it
    pub fn require(&self, locale: Option<&str>) -> Result<Arc<Catalog>> {
        let resolved = self.resolve_locale(locale);
        self.catalogs
            .get(&resolved)
            .cloned()
            .ok_or(CatalogError::LocaleNotLoaded(resolved))
    }

    /// Translate through the catalog of `locale`, falling back to `source`
    pub fn t<'a>(&'a self, locale: &str, context: &str, source: &'a str) -> &'a str {
        match self.catalog(locale) {
            Some(catalog) => catalog.lookup(context, source),
            None => source,
        }
    }

    /// Locale names with a loaded catalog
    pub fn loaded_locales(&self) -> Vec<&str> {
        let mut locales: Vec<&str> = self.catalogs.keys().map(String::as_str).collect();
        locales.sort_unstable();
        locales
    }

    /// Get supported locales
    pub fn supported_locales(&self) -> &[String] {
        &self.supported_locales
    }

    /// Get default locale
    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// Get translation statistics
    pub fn get_stats(&self) -> TranslationStats {
        let mut locales: Vec<LocaleStats> = self
            .catalogs
            .iter()
            .map(|(code, catalog)| {
                let stats = catalog.stats();
                LocaleStats {
                    code: code.clone(),
                    message_count: stats.total,
                    translated_count: stats.translated,
                }
            })
            .collect();
        locales.sort_by(|a, b| a.code.cmp(&b.code));

        TranslationStats {
            total_messages: locales.iter().map(|l| l.message_count).sum(),
            locales,
        }
    }
}

/// Translation statistics
#[derive(Debug, Clone, Serialize)]
pub struct TranslationStats {
    pub locales: Vec<LocaleStats>,
    pub total_messages: usize,
}

/// Locale-specific statistics
#[derive(Debug, Clone, Serialize)]
pub struct LocaleStats {
    pub code: String,
    pub message_count: usize,
    pub translated_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogBuilder, Message};

    fn create_test_config() -> CatalogConfig {
        CatalogConfig {
            translations_dir: PathBuf::from("translations"),
            default_locale: "en".to_string(),
            supported_locales: vec!["en".to_string(), "da".to_string()],
        }
    }

    fn danish() -> Catalog {
        let mut builder = CatalogBuilder::new();
        builder.language("da");
        builder.add_message("app", Message::new("Part", "Emne")).unwrap();
        builder.build()
    }

    #[test]
    fn test_locale_resolution() {
        let mut translations = Translations::new(&create_test_config());
        translations.insert("en", CatalogBuilder::new().build());
        translations.insert("da", danish());

        assert_eq!(translations.resolve_locale(Some("da")), "da");
        assert_eq!(translations.resolve_locale(Some("da_DK")), "da");
        assert_eq!(translations.resolve_locale(Some("da-DK")), "da");
        assert_eq!(translations.resolve_locale(Some("fr")), "en"); // fallback
        assert_eq!(translations.resolve_locale(None), "en"); // fallback
    }

    #[test]
    fn test_translate_through_registry() {
        let mut translations = Translations::new(&create_test_config());
        translations.insert("da", danish());

        assert_eq!(translations.t("da_DK", "app", "Part"), "Emne");
        assert_eq!(translations.t("da", "app", "Sketch"), "Sketch");
        // default locale has no catalog loaded
        assert_eq!(translations.t("fr", "app", "Part"), "Part");
        assert!(translations.require(Some("fr")).is_err());
        assert!(translations.require(Some("da")).is_ok());
    }

    #[test]
    fn test_hyphenated_locales_are_normalized() {
        let mut translations = Translations::new(&create_test_config());
        translations.insert("da-DK", danish());

        assert_eq!(translations.loaded_locales(), vec!["da_DK"]);
        assert_eq!(translations.resolve_locale(Some("da-DK")), "da_DK");
        assert_eq!(translations.t("da_DK", "app", "Part"), "Emne");
    }

    #[test]
    fn test_stats() {
        let mut translations = Translations::new(&create_test_config());
        translations.insert("da", danish());
        translations.insert("en", CatalogBuilder::new().build());

        let stats = translations.get_stats();
        assert_eq!(stats.total_messages, 1);
        assert_eq!(stats.locales[0].code, "da");
        assert_eq!(stats.locales[0].translated_count, 1);
        assert_eq!(translations.loaded_locales(), vec!["da", "en"]);
    }
}
