//! Error types for tsvnotes
//!
//! Provides a unified error type for all operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using NotesError
pub type Result<T> = std::result::Result<T, NotesError>;

/// Unified error type for tsvnotes operations
#[derive(Debug, Error)]
pub enum NotesError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Notes File Errors
    // -------------------------------------------------------------------------
    #[error("malformed notes file {}{}: {reason}", .path.display(), line_suffix(.line))]
    MalformedFile {
        path: PathBuf,
        line: Option<u64>,
        reason: String,
    },

    #[error("notes file {} has no header line", .0.display())]
    EmptyHeader(PathBuf),

    // -------------------------------------------------------------------------
    // Request Errors
    // -------------------------------------------------------------------------
    #[error("bad field '{field}', fields should be one of: {}", .allowed.join(", "))]
    Validation { field: String, allowed: Vec<String> },

    #[error("invalid line selector '{0}', expected N or START:END")]
    InvalidSelector(String),
}

fn line_suffix(line: &Option<u64>) -> String {
    match line {
        Some(l) => format!(" (line {l})"),
        None => String::new(),
    }
}

impl NotesError {
    /// Translate a csv error raised while reading or writing `path`
    ///
    /// I/O failures keep their own variant; everything else means the file
    /// content does not match its header.
    pub(crate) fn from_csv(path: &std::path::Path, err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line());
        match err.into_kind() {
            csv::ErrorKind::Io(e) => NotesError::Io(e),
            csv::ErrorKind::UnequalLengths { expected_len, len, .. } => NotesError::MalformedFile {
                path: path.to_path_buf(),
                line,
                reason: format!("expected {expected_len} fields, found {len}"),
            },
            other => NotesError::MalformedFile {
                path: path.to_path_buf(),
                line,
                reason: format!("{other:?}"),
            },
        }
    }
}
