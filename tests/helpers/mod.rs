//! Test helpers module
//!
//! Shared fixtures for the integration tests: the shipped Danish catalog,
//! a small hand-written catalog and temporary translation directories.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Once;

use tscatalog::config::CatalogConfig;

static INIT: Once = Once::new();

/// Initialize test environment
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

/// Path of the Danish catalog shipped with the crate
pub fn danish_catalog_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("translations")
        .join("da_DK.ts")
}

/// A small catalog in canonical layout
pub fn sample_ts() -> &'static str {
    "<?xml version='1.0' encoding='UTF-8'?>\n<!DOCTYPE TS>\n\
<TS language=\"da_DK\" sourcelanguage=\"en\" version=\"2.0\">\n\
    <context>\n\
        <name>ribbon</name>\n\
        <message>\n\
            <source>Extrude&#xA;Area</source>\n\
            <translation>Ekstruder&#xA;område</translation>\n\
        </message>\n\
        <message>\n\
            <source>Part</source>\n\
            <translation>Emne</translation>\n\
        </message>\n\
    </context>\n\
    <context>\n\
        <name>app</name>\n\
        <message>\n\
            <source>Part</source>\n\
            <translation>Emne</translation>\n\
        </message>\n\
        <message>\n\
            <source>Create nurbs surface</source>\n\
            <translation>Create nurbs surface</translation>\n\
        </message>\n\
    </context>\n\
</TS>"
}

/// Temporary translations directory with the given `<locale>.ts` files
pub struct TranslationsDir {
    pub dir: tempfile::TempDir,
}

impl TranslationsDir {
    pub fn new(files: &[(&str, &str)]) -> std::io::Result<Self> {
        init_test_env();

        let dir = tempfile::tempdir()?;
        for (locale, content) in files {
            std::fs::write(dir.path().join(format!("{}.ts", locale)), content)?;
        }
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn config(&self, default_locale: &str, supported: &[&str]) -> CatalogConfig {
        CatalogConfig {
            translations_dir: self.path().to_path_buf(),
            default_locale: default_locale.to_string(),
            supported_locales: supported.iter().map(|s| s.to_string()).collect(),
        }
    }
}
