//! tscatalog
//!
//! Loader, lookup and writer for Qt Linguist translation source (`.ts`)
//! files. A [`Catalog`] maps (context, source text) to a translated string
//! and falls back to the source text when no translation exists, so UI code
//! always has something to display.
//!
//! ```
//! use tscatalog::Catalog;
//!
//! let catalog = Catalog::parse(
//!     "<TS language=\"da_DK\"><context><name>app</name>\
//!      <message><source>Part</source><translation>Emne</translation></message>\
//!      </context></TS>",
//! ).unwrap();
//!
//! assert_eq!(catalog.lookup("app", "Part"), "Emne");
//! assert_eq!(catalog.lookup("app", "NonexistentKey"), "NonexistentKey");
//! ```

pub mod config;
pub mod catalog;
pub mod i18n;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{CatalogError, Result};

// Re-export main components for easy access
pub use catalog::{Catalog, CatalogBuilder, Message};
pub use i18n::{Recorder, Translations};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
