//! Readers for the two input documents.
//!
//! - [`artifacts`] - the artifact inventory (`<artifact>` entries with a
//!   `Title (group:artifact)` label and a declared license).
//! - [`catalog`] - the license catalog (`<license>` entries with scopes, names,
//!   synonyms and the full text).

use std::path::Path;

use anyhow::{Context, Result};
use quick_xml::events::BytesText;
use quick_xml::name::QName;

use crate::error::NoticeError;

pub mod artifacts;
pub mod catalog;

/// An XML document provider producing in-memory records.
pub trait Source {
    type Item;

    /// Human readable name of the document, used in errors and console output.
    const KIND: &'static str;

    /// Parse an already loaded document. `origin` is only used in errors.
    fn parse(&self, xml: &str, origin: &Path) -> Result<Vec<Self::Item>, NoticeError>;

    /// Load and parse the document at `path`, failing before any read if it is missing.
    fn load(&self, path: &Path) -> Result<Vec<Self::Item>> {
        if !path.exists() {
            return Err(NoticeError::MissingInput {
                kind: Self::KIND,
                path: path.to_path_buf(),
            }
            .into());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {} {}", Self::KIND, path.display()))?;
        Ok(self.parse(&content, path)?)
    }
}

fn local_name(name: QName<'_>) -> String {
    String::from_utf8_lossy(name.local_name().as_ref()).into_owned()
}

fn unescape(text: &BytesText<'_>, origin: &Path) -> Result<String, NoticeError> {
    text.unescape()
        .map(|t| t.into_owned())
        .map_err(|e| malformed(origin, e))
}

fn malformed(origin: &Path, reason: impl std::fmt::Display) -> NoticeError {
    NoticeError::MalformedInput {
        path: origin.to_path_buf(),
        reason: reason.to_string(),
    }
}
