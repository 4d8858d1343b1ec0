//! `.ts` file serialization
//!
//! Emits the layout Qt Linguist files use, with four spaces per nesting
//! level and no newline after the closing `</TS>`, so that a canonical file
//! survives a load/write cycle byte for byte.

use std::borrow::Cow;
use std::fmt;
use std::path::Path;

use quick_xml::escape::{escape, partial_escape};
use tracing::info;

use super::model::{Catalog, Message};
use crate::utils::errors::Result;

const PROLOG: &str = "<?xml version='1.0' encoding='UTF-8'?>\n<!DOCTYPE TS>\n";
const INDENT: &str = "    ";

impl Catalog {
    /// Serialize to `.ts` text
    pub fn to_ts_string(&self) -> String {
        self.to_string()
    }

    /// Write the catalog to a `.ts` file, replacing any existing file
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = self.to_ts_string();
        std::fs::write(path, text.as_bytes())?;

        info!(
            path = %path.display(),
            messages = self.len(),
            bytes = text.len(),
            "Wrote translation catalog"
        );
        Ok(())
    }
}

impl fmt::Display for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(PROLOG)?;

        f.write_str("<TS")?;
        let header = self.header();
        let attributes = [
            ("language", &header.language),
            ("sourcelanguage", &header.source_language),
            ("version", &header.version),
        ];
        for (name, value) in attributes {
            if let Some(value) = value {
                write!(f, " {}=\"{}\"", name, escape(value.as_str()))?;
            }
        }
        f.write_str(">\n")?;

        for context in self {
            writeln!(f, "{INDENT}<context>")?;
            writeln!(f, "{INDENT}{INDENT}<name>{}</name>", escape_text(context.name()))?;
            for message in context.messages() {
                write_message(f, message)?;
            }
            writeln!(f, "{INDENT}</context>")?;
        }

        f.write_str("</TS>")
    }
}

fn write_message(f: &mut fmt::Formatter<'_>, message: &Message) -> fmt::Result {
    let indent = INDENT.repeat(2);
    let inner = INDENT.repeat(3);

    writeln!(f, "{indent}<message>")?;
    writeln!(f, "{inner}<source>{}</source>", escape_text(message.source()))?;

    write!(f, "{inner}<translation")?;
    if let Some(state) = message.state().as_attr() {
        write!(f, " type=\"{}\"", state)?;
    }
    writeln!(f, ">{}</translation>", escape_text(message.translation()))?;
    writeln!(f, "{indent}</message>")
}

/// Escape element text: markup characters plus line breaks as character references
fn escape_text(text: &str) -> Cow<'_, str> {
    let escaped = partial_escape(text);
    if !escaped.contains(['\n', '\r']) {
        return escaped;
    }
    Cow::Owned(escaped.replace('\n', "&#xA;").replace('\r', "&#xD;"))
}
