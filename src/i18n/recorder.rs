//! Usage recording
//!
//! A [`Recorder`] answers lookups from a shared catalog and remembers each
//! context/source pair the application asked for, together with the text it
//! got back. The recorded set can be exported as a new catalog, giving
//! translators a file that lists exactly the strings the UI uses.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::catalog::{Catalog, CatalogBuilder, Message};
use crate::utils::errors::Result;

const SOURCE_LANGUAGE: &str = "en";
const FORMAT_VERSION: &str = "2.0";

#[derive(Debug, Default)]
struct Recorded {
    seen: HashSet<(String, String)>,
    /// Context name and message in first-use order
    entries: Vec<(String, Message)>,
}

/// Catalog wrapper that records every lookup
#[derive(Debug)]
pub struct Recorder {
    catalog: Arc<Catalog>,
    recorded: Mutex<Recorded>,
}

impl Recorder {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            recorded: Mutex::new(Recorded::default()),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Translate and record the pair
    pub fn tr(&self, context: &str, source: &str) -> String {
        let value = self.catalog.lookup(context, source).to_string();

        let mut recorded = self.recorded.lock();
        if recorded.seen.insert((context.to_string(), source.to_string())) {
            debug!(context = context, source = source, "Recorded new UI string");
            recorded
                .entries
                .push((context.to_string(), Message::new(source, value.clone())));
        }

        value
    }

    /// Number of distinct pairs recorded so far
    pub fn recorded_count(&self) -> usize {
        self.recorded.lock().entries.len()
    }

    /// Build a catalog of the recorded pairs for `language` (e.g. `da_DK`)
    ///
    /// The header always names English as the source language and format
    /// version 2.0.
    pub fn to_catalog(&self, language: &str) -> Result<Catalog> {
        let recorded = self.recorded.lock();

        let mut builder = CatalogBuilder::new();
        builder
            .language(language)
            .source_language(SOURCE_LANGUAGE)
            .version(FORMAT_VERSION);
        for (context, message) in &recorded.entries {
            builder.add_message(context, message.clone())?;
        }

        Ok(builder.build())
    }

    /// Export the recorded pairs as a `.ts` file
    pub fn write(&self, path: impl AsRef<Path>, language: &str) -> Result<()> {
        self.to_catalog(language)?.write(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Arc<Catalog> {
        let mut builder = CatalogBuilder::new();
        builder.language("da_DK").source_language("en").version("2.0");
        builder.add_message("ribbon", Message::new("Part", "Emne")).unwrap();
        builder.add_message("ribbon", Message::new("Unused", "Ubrugt")).unwrap();
        Arc::new(builder.build())
    }

    #[test]
    fn test_records_first_use_order() {
        let recorder = Recorder::new(catalog());
        assert_eq!(recorder.tr("app", "Application"), "Application");
        assert_eq!(recorder.tr("ribbon", "Part"), "Emne");
        assert_eq!(recorder.tr("app", "Application"), "Application");
        assert_eq!(recorder.recorded_count(), 2);

        let exported = recorder.to_catalog("de_DE").unwrap();
        assert_eq!(exported.contexts().collect::<Vec<_>>(), vec!["app", "ribbon"]);
        assert_eq!(exported.lookup("ribbon", "Part"), "Emne");
        assert!(exported.get("ribbon", "Unused").is_none());
        assert_eq!(exported.get("app", "Application").unwrap().translation(), "Application");
        assert_eq!(exported.language(), Some("de_DE"));
        assert_eq!(exported.header().source_language.as_deref(), Some("en"));
        assert_eq!(exported.header().version.as_deref(), Some("2.0"));
    }

    #[test]
    fn test_header_does_not_depend_on_wrapped_catalog() {
        let recorder = Recorder::new(Arc::new(CatalogBuilder::new().build()));
        recorder.tr("app", "Part");

        let exported = recorder.to_catalog("da_DK").unwrap();
        assert!(exported
            .to_ts_string()
            .contains("<TS language=\"da_DK\" sourcelanguage=\"en\" version=\"2.0\">"));
    }

    #[test]
    fn test_shared_between_threads() {
        let recorder = Arc::new(Recorder::new(catalog()));
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let recorder = Arc::clone(&recorder);
                std::thread::spawn(move || {
                    recorder.tr("ribbon", "Part");
                    recorder.tr("model", &format!("Item {}", i));
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(recorder.recorded_count(), 5);
    }
}
