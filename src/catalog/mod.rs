//! Translation catalog
//!
//! This module holds the in-memory form of a Qt Linguist `.ts` file:
//! contexts of source/translation pairs with O(1) lookup and a fallback
//! to the source text, together with the loader and the writer.

pub mod model;
pub mod parser;
pub mod writer;

pub use model::{
    Catalog, CatalogBuilder, CatalogStats, Context, ContextStats, DuplicateEntry, Header, Message,
    TranslationState,
};
