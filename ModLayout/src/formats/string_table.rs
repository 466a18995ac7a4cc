//! Dialog string table (decoded `dialog.tlk`)
//!
//! The TLK converter emits `{"entries": [{"id": 5, "text": "Animals"}, ...]}`.
//! Entries without text (sound-only rows) load as empty strings.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

#[derive(Debug, Deserialize)]
struct TlkJson {
    #[serde(default)]
    entries: Vec<TlkJsonEntry>,
}

#[derive(Debug, Deserialize)]
struct TlkJsonEntry {
    id: u32,
    #[serde(default)]
    text: String,
}

/// Immutable id → text mapping
#[derive(Debug, Clone, Default)]
pub struct StringTable {
    strings: HashMap<u32, String>,
}

impl StringTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a converted TLK JSON file from disk
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be opened and
    /// [`Error::JsonError`] if it is not TLK JSON.
    ///
    /// [`Error::Io`]: crate::Error::Io
    /// [`Error::JsonError`]: crate::Error::JsonError
    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let doc: TlkJson = serde_json::from_reader(reader)?;
        Ok(doc.entries.into_iter().map(|e| (e.id, e.text)).collect())
    }

    /// Parse TLK JSON from a string
    pub fn parse_json(json: &str) -> Result<Self> {
        let doc: TlkJson = serde_json::from_str(json)?;
        Ok(doc.entries.into_iter().map(|e| (e.id, e.text)).collect())
    }

    /// Text for `strref`, if present
    #[must_use]
    pub fn get(&self, strref: u32) -> Option<&str> {
        self.strings.get(&strref).map(String::as_str)
    }

    /// Text for `strref`, failing with [`Error::MissingStringTableEntry`]
    pub fn resolve(&self, strref: u32) -> Result<&str> {
        self.get(strref)
            .ok_or(Error::MissingStringTableEntry { strref })
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl FromIterator<(u32, String)> for StringTable {
    /// Later duplicates of an id replace earlier ones.
    fn from_iter<I: IntoIterator<Item = (u32, String)>>(iter: I) -> Self {
        Self {
            strings: iter.into_iter().collect(),
        }
    }
}

impl<const N: usize> From<[(u32, &str); N]> for StringTable {
    fn from(entries: [(u32, &str); N]) -> Self {
        entries
            .into_iter()
            .map(|(id, text)| (id, text.to_string()))
            .collect()
    }
}
