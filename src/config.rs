//! Configuration for tsvnotes
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Column set used for newly created notes files
pub const DEFAULT_COLUMNS: [&str; 3] = ["date", "title", "note"];

/// Six-column layout used by older notes files
pub const LEGACY_COLUMNS: [&str; 6] = ["theme", "date", "subtheme", "title", "chapter", "note"];

/// File name used when none is given
pub const DEFAULT_NOTES_FILE: &str = "default.tsv";

/// Main configuration for a notes session
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the tab-separated notes file
    pub notes_file: PathBuf,

    /// Header written when the notes file is first created.
    /// An existing file keeps whatever header it already has.
    pub columns: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            notes_file: PathBuf::from(DEFAULT_NOTES_FILE),
            columns: DEFAULT_COLUMNS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the notes file path
    pub fn notes_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.notes_file = path.into();
        self
    }

    /// Set the column set for new files
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Use the six-column legacy layout for new files
    pub fn legacy_columns(self) -> Self {
        self.columns(LEGACY_COLUMNS)
    }

    pub fn build(self) -> Config {
        self.config
    }
}
