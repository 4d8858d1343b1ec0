//! Catalog data model
//!
//! A catalog is an ordered list of contexts, each an ordered list of
//! messages. Order is kept for serialization; lookups go through hash
//! indexes built once during construction.

use std::collections::HashMap;
use serde::Serialize;
use thiserror::Error;
use tracing::trace;

/// State carried by the `type` attribute of a `<translation>` element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationState {
    /// No `type` attribute
    #[default]
    Finished,
    Unfinished,
    Obsolete,
    Vanished,
}

impl TranslationState {
    /// Parse the value of a `type` attribute
    pub fn from_attr(value: &str) -> Option<Self> {
        match value {
            "unfinished" => Some(TranslationState::Unfinished),
            "obsolete" => Some(TranslationState::Obsolete),
            "vanished" => Some(TranslationState::Vanished),
            _ => None,
        }
    }

    /// Attribute value to emit, `None` for finished translations
    pub fn as_attr(&self) -> Option<&'static str> {
        match self {
            TranslationState::Finished => None,
            TranslationState::Unfinished => Some("unfinished"),
            TranslationState::Obsolete => Some("obsolete"),
            TranslationState::Vanished => Some("vanished"),
        }
    }

    /// Whether lookups may use a translation in this state
    pub fn is_live(&self) -> bool {
        matches!(self, TranslationState::Finished | TranslationState::Unfinished)
    }
}

/// A single source/translation pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    source: String,
    translation: String,
    state: TranslationState,
}

impl Message {
    pub fn new(source: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            translation: translation.into(),
            state: TranslationState::Finished,
        }
    }

    pub fn with_state(mut self, state: TranslationState) -> Self {
        self.state = state;
        self
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn translation(&self) -> &str {
        &self.translation
    }

    pub fn state(&self) -> TranslationState {
        self.state
    }

    /// Whether this entry provides a translation lookups should return.
    ///
    /// Empty translations and obsolete/vanished entries count as untranslated.
    pub fn is_translated(&self) -> bool {
        !self.translation.is_empty() && self.state.is_live()
    }
}

/// A named group of messages with unique sources
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    name: String,
    messages: Vec<Message>,
    index: HashMap<String, usize>,
}

impl Context {
    fn new(name: String) -> Self {
        Self {
            name,
            messages: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Messages in document order
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn get(&self, source: &str) -> Option<&Message> {
        self.index.get(source).map(|&i| &self.messages[i])
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    fn push(&mut self, message: Message) -> std::result::Result<(), DuplicateEntry> {
        if self.index.contains_key(message.source()) {
            return Err(DuplicateEntry::Source {
                context: self.name.clone(),
                source_text: message.source,
            });
        }
        self.index.insert(message.source.clone(), self.messages.len());
        self.messages.push(message);
        Ok(())
    }
}

/// Attributes of the `<TS>` root element
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Header {
    pub language: Option<String>,
    pub source_language: Option<String>,
    pub version: Option<String>,
}

/// Uniqueness violations found while building a catalog
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DuplicateEntry {
    #[error("duplicate context '{0}'")]
    Context(String),

    #[error("duplicate source '{source_text}' in context '{context}'")]
    Source { context: String, source_text: String },
}

/// Immutable translation catalog
///
/// Built once by the parser or a [`CatalogBuilder`] and never mutated
/// afterwards, so a shared reference can be used from any thread.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    header: Header,
    contexts: Vec<Context>,
    index: HashMap<String, usize>,
}

impl Catalog {
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Target language of the catalog, e.g. `da_DK`
    pub fn language(&self) -> Option<&str> {
        self.header.language.as_deref()
    }

    /// Context names in document order
    pub fn contexts(&self) -> impl Iterator<Item = &str> + '_ {
        self.contexts.iter().map(Context::name)
    }

    pub fn context(&self, name: &str) -> Option<&Context> {
        self.index.get(name).map(|&i| &self.contexts[i])
    }

    /// All contexts in document order
    pub fn iter(&self) -> std::slice::Iter<'_, Context> {
        self.contexts.iter()
    }

    /// Raw entry for a context/source pair
    pub fn get(&self, context: &str, source: &str) -> Option<&Message> {
        self.context(context)?.get(source)
    }

    /// Translate `source` within `context`.
    ///
    /// Falls back to `source` itself when there is no usable translation.
    pub fn lookup<'a>(&'a self, context: &str, source: &'a str) -> &'a str {
        match self.get(context, source) {
            Some(message) if message.is_translated() => message.translation(),
            _ => {
                trace!(context = context, source = source, "No translation, using source text");
                source
            }
        }
    }

    /// Total number of messages across all contexts
    pub fn len(&self) -> usize {
        self.contexts.iter().map(Context::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Translation coverage per context
    pub fn stats(&self) -> CatalogStats {
        let contexts: Vec<ContextStats> = self.contexts.iter().map(ContextStats::of).collect();

        CatalogStats {
            language: self.header.language.clone(),
            total: contexts.iter().map(|c| c.total).sum(),
            translated: contexts.iter().map(|c| c.translated).sum(),
            contexts,
        }
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Context;
    type IntoIter = std::slice::Iter<'a, Context>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Catalog statistics
#[derive(Debug, Clone, Serialize)]
pub struct CatalogStats {
    pub language: Option<String>,
    pub total: usize,
    pub translated: usize,
    pub contexts: Vec<ContextStats>,
}

/// Context-specific statistics
#[derive(Debug, Clone, Serialize)]
pub struct ContextStats {
    pub name: String,
    pub total: usize,
    pub translated: usize,
    pub unfinished: usize,
    /// Entries whose translation equals the source text
    pub identical: usize,
}

impl ContextStats {
    fn of(context: &Context) -> Self {
        let messages = context.messages();
        Self {
            name: context.name().to_string(),
            total: messages.len(),
            translated: messages.iter().filter(|m| m.is_translated()).count(),
            unfinished: messages
                .iter()
                .filter(|m| m.state() == TranslationState::Unfinished)
                .count(),
            identical: messages.iter().filter(|m| m.source() == m.translation()).count(),
        }
    }
}

/// Incremental catalog construction enforcing the uniqueness rules
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    catalog: Catalog,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn language(&mut self, language: impl Into<String>) -> &mut Self {
        self.catalog.header.language = Some(language.into());
        self
    }

    pub fn source_language(&mut self, source_language: impl Into<String>) -> &mut Self {
        self.catalog.header.source_language = Some(source_language.into());
        self
    }

    pub fn version(&mut self, version: impl Into<String>) -> &mut Self {
        self.catalog.header.version = Some(version.into());
        self
    }

    pub fn header(&mut self, header: Header) -> &mut Self {
        self.catalog.header = header;
        self
    }

    /// Open a new context; fails if the name was already used
    pub fn add_context(&mut self, name: impl Into<String>) -> std::result::Result<(), DuplicateEntry> {
        let name = name.into();
        if self.catalog.index.contains_key(&name) {
            return Err(DuplicateEntry::Context(name));
        }
        self.catalog.index.insert(name.clone(), self.catalog.contexts.len());
        self.catalog.contexts.push(Context::new(name));
        Ok(())
    }

    /// Append a message, creating the context on first use
    pub fn add_message(&mut self, context: &str, message: Message) -> std::result::Result<(), DuplicateEntry> {
        let position = match self.catalog.index.get(context) {
            Some(&i) => i,
            None => {
                self.add_context(context)?;
                self.catalog.contexts.len() - 1
            }
        };
        self.catalog.contexts[position].push(message)
    }

    pub fn build(self) -> Catalog {
        self.catalog
    }
}
