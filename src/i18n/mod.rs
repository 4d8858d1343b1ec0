//! Internationalization module
//!
//! Locale-level services on top of the catalog: a registry of per-locale
//! catalogs with locale resolution, and a recorder that collects the strings
//! an application actually requests.

pub mod loader;
pub mod recorder;

// Re-export commonly used i18n components
pub use loader::{Translations, TranslationStats, LocaleStats};
pub use recorder::Recorder;
