//! Row definition
//!
//! One record of the notes file, keyed by header field names.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Field holding the group key of a row
pub const TITLE_FIELD: &str = "title";

/// Field holding the note text
pub const NOTE_FIELD: &str = "note";

/// Field holding the creation timestamp, when the file has one
pub const DATE_FIELD: &str = "date";

/// A single note row
///
/// Rows built in memory may carry only a subset of the file's fields;
/// missing fields are written as empty values. Rows loaded from disk
/// always carry every header field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    fields: BTreeMap<String, String>,
}

impl Row {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field setter
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Set a field, replacing any previous value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Get a field value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// The row's title, empty when unset
    pub fn title(&self) -> &str {
        self.get(TITLE_FIELD).unwrap_or_default()
    }

    /// The row's note text, empty when unset
    pub fn note(&self) -> &str {
        self.get(NOTE_FIELD).unwrap_or_default()
    }

    /// The row's timestamp, if the field is present and non-empty
    pub fn date(&self) -> Option<&str> {
        self.get(DATE_FIELD).filter(|d| !d.is_empty())
    }

    /// Field names present on this row
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Values laid out in `header` order, empty for missing fields
    pub fn values_for<'a>(&'a self, header: &'a [String]) -> impl Iterator<Item = &'a str> {
        header.iter().map(move |column| self.get(column).unwrap_or_default())
    }
}
