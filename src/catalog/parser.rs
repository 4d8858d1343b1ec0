//! `.ts` file loading
//!
//! Pull-parses the Qt Linguist XML layout with quick-xml:
//!
//! ```text
//! <TS language=".." sourcelanguage=".." version="..">
//!   <context>
//!     <name>..</name>
//!     <message>
//!       <source>..</source>
//!       <translation type="..">..</translation>
//!     </message>
//!   </context>
//! </TS>
//! ```
//!
//! Escaped line breaks (`&#xA;`) are unescaped to `\n` here; the writer
//! restores them. Unknown elements are skipped, except inside `<name>`,
//! `<source>` and `<translation>`, which must hold plain text.

use std::path::Path;
use std::str::FromStr;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::{debug, info};

use super::model::{Catalog, CatalogBuilder, Header, Message, TranslationState};
use crate::utils::errors::{CatalogError, Result};

impl Catalog {
    /// Load a catalog from a `.ts` file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| read_error(path, e))?;
        let catalog = Self::parse(&decode(bytes)?)?;

        info!(
            path = %path.display(),
            contexts = catalog.iter().len(),
            messages = catalog.len(),
            "Loaded translation catalog"
        );
        Ok(catalog)
    }

    /// Load a catalog without blocking the async runtime
    pub async fn load_async(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| read_error(path, e))?;
        let catalog = Self::parse(&decode(bytes)?)?;

        info!(
            path = %path.display(),
            contexts = catalog.iter().len(),
            messages = catalog.len(),
            "Loaded translation catalog"
        );
        Ok(catalog)
    }

    /// Parse a catalog from `.ts` text
    pub fn parse(input: &str) -> Result<Self> {
        Parser::new(input).run()
    }
}

impl FromStr for Catalog {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        Catalog::parse(s)
    }
}

fn read_error(path: &Path, error: std::io::Error) -> CatalogError {
    if error.kind() == std::io::ErrorKind::NotFound {
        CatalogError::NotFound {
            path: path.to_path_buf(),
        }
    } else {
        CatalogError::Io(error)
    }
}

/// File contents must be UTF-8; anything else is a malformed catalog
fn decode(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|e| {
        let error = e.utf8_error();
        CatalogError::parse(
            format!("file is not valid UTF-8: {}", error),
            error.valid_up_to() as u64,
        )
    })
}

#[derive(Debug, Default)]
struct PendingMessage {
    source: Option<String>,
    translation: Option<String>,
    state: TranslationState,
}

struct Parser<'a> {
    reader: Reader<&'a [u8]>,
    builder: CatalogBuilder,
    /// Open element names, outermost first
    stack: Vec<String>,
    seen_root: bool,
    context: Option<String>,
    message: Option<PendingMessage>,
    /// Inside `<name>`, `<source>` or `<translation>`
    capturing: bool,
    text: String,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        let mut reader = Reader::from_str(input);
        reader.config_mut().expand_empty_elements = true;

        Self {
            reader,
            builder: CatalogBuilder::new(),
            stack: Vec::new(),
            seen_root: false,
            context: None,
            message: None,
            capturing: false,
            text: String::new(),
        }
    }

    fn error(&self, message: impl Into<String>) -> CatalogError {
        CatalogError::parse(message, self.reader.buffer_position() as u64)
    }

    fn run(mut self) -> Result<Catalog> {
        loop {
            let event = self
                .reader
                .read_event()
                .map_err(|e| self.error(e.to_string()))?;

            match event {
                Event::Start(start) => self.start(&start)?,
                Event::End(end) => {
                    let name = element_name(end.name().as_ref()).map_err(|m| self.error(m))?;
                    self.end(&name)?;
                }
                Event::Text(text) => {
                    if self.capturing {
                        let unescaped = text.unescape().map_err(|e| self.error(e.to_string()))?;
                        self.text.push_str(&unescaped);
                    }
                }
                Event::CData(data) => {
                    if self.capturing {
                        let bytes = data.into_inner();
                        let decoded = std::str::from_utf8(&bytes)
                            .map_err(|e| self.error(format!("invalid UTF-8 in CDATA: {}", e)))?;
                        self.text.push_str(decoded);
                    }
                }
                Event::Eof => break,
                // Declaration, doctype, comments and processing instructions carry no data
                _ => {}
            }
        }

        if let Some(open) = self.stack.last() {
            return Err(self.error(format!("unexpected end of document inside <{}>", open)));
        }
        if !self.seen_root {
            return Err(self.error("missing <TS> root element"));
        }

        Ok(self.builder.build())
    }

    fn parent(&self) -> Option<&str> {
        self.stack.last().map(String::as_str)
    }

    fn start(&mut self, start: &BytesStart<'_>) -> Result<()> {
        let name = element_name(start.name().as_ref()).map_err(|m| self.error(m))?;

        // Text fields hold plain text only; plural <numerusform> lists are unsupported
        if self.capturing {
            let parent = self.parent().unwrap_or_default();
            return Err(self.error(format!("unexpected <{}> inside <{}>", name, parent)));
        }

        match (self.parent(), name.as_str()) {
            (None, "TS") => {
                if self.seen_root {
                    return Err(self.error("multiple <TS> root elements"));
                }
                self.seen_root = true;
                let header = self.header(start)?;
                self.builder.header(header);
            }
            (None, other) => {
                return Err(self.error(format!("unexpected root element <{}>", other)));
            }
            (Some("TS"), "context") => {
                self.context = None;
            }
            (Some("context"), "name") => {
                if self.context.is_some() {
                    return Err(self.error("context has more than one <name>"));
                }
                self.begin_field();
            }
            (Some("context"), "message") => {
                if self.context.is_none() {
                    return Err(self.error("<message> before the context <name>"));
                }
                self.message = Some(PendingMessage::default());
            }
            (Some("message"), "source") => self.begin_field(),
            (Some("message"), "translation") => {
                let state = self.translation_state(start)?;
                if let Some(message) = self.message.as_mut() {
                    message.state = state;
                }
                self.begin_field();
            }
            (parent, other) => {
                debug!(element = other, parent = ?parent, "Skipping unsupported element");
            }
        }

        self.stack.push(name);
        Ok(())
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.stack.pop();

        match (self.parent(), name) {
            (Some("context"), "name") => {
                let context = self.end_field();
                self.builder
                    .add_context(context.clone())
                    .map_err(|e| self.error(e.to_string()))?;
                self.context = Some(context);
            }
            (Some("message"), "source") => {
                let source = self.end_field();
                if let Some(message) = self.message.as_mut() {
                    message.source = Some(source);
                }
            }
            (Some("message"), "translation") => {
                let translation = self.end_field();
                if let Some(message) = self.message.as_mut() {
                    message.translation = Some(translation);
                }
            }
            (Some("context"), "message") => self.finish_message()?,
            (Some("TS"), "context") => {
                if self.context.take().is_none() {
                    return Err(self.error("context without <name>"));
                }
            }
            _ => {}
        }

        Ok(())
    }

    fn finish_message(&mut self) -> Result<()> {
        let pending = self.message.take().unwrap_or_default();
        let source = pending
            .source
            .ok_or_else(|| self.error("message without <source>"))?;
        let translation = pending
            .translation
            .ok_or_else(|| self.error(format!("message '{}' without <translation>", source)))?;
        let context = self
            .context
            .clone()
            .ok_or_else(|| self.error("<message> outside a named context"))?;

        self.builder
            .add_message(&context, Message::new(source, translation).with_state(pending.state))
            .map_err(|e| self.error(e.to_string()))
    }

    fn begin_field(&mut self) {
        self.capturing = true;
        self.text.clear();
    }

    fn end_field(&mut self) -> String {
        self.capturing = false;
        std::mem::take(&mut self.text)
    }

    fn header(&self, start: &BytesStart<'_>) -> Result<Header> {
        let mut header = Header::default();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| self.error(e.to_string()))?;
            let value = attr
                .unescape_value()
                .map_err(|e| self.error(e.to_string()))?
                .into_owned();
            match attr.key.as_ref() {
                b"language" => header.language = Some(value),
                b"sourcelanguage" => header.source_language = Some(value),
                b"version" => header.version = Some(value),
                _ => {}
            }
        }
        Ok(header)
    }

    fn translation_state(&self, start: &BytesStart<'_>) -> Result<TranslationState> {
        for attr in start.attributes() {
            let attr = attr.map_err(|e| self.error(e.to_string()))?;
            if attr.key.as_ref() == b"type" {
                let value = attr.unescape_value().map_err(|e| self.error(e.to_string()))?;
                return TranslationState::from_attr(&value)
                    .ok_or_else(|| self.error(format!("unknown translation type '{}'", value)));
            }
        }
        Ok(TranslationState::Finished)
    }
}

fn element_name(raw: &[u8]) -> std::result::Result<String, String> {
    std::str::from_utf8(raw)
        .map(str::to_string)
        .map_err(|e| format!("invalid UTF-8 in element name: {}", e))
}
