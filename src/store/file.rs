//! Row Store
//!
//! Owns the tab-separated notes file: creation, loading, appends and
//! whole-file rewrites.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{NotesError, Result};

use super::Row;

const DELIMITER: u8 = b'\t';

/// Handle on a notes file and its header
///
/// The header is read once when the store is opened and treated as the
/// file's field set from then on.
#[derive(Debug, Clone)]
pub struct RowStore {
    path: PathBuf,
    header: Vec<String>,
}

impl RowStore {
    /// Open a notes file, creating it with `columns` as header if absent
    pub fn open(path: impl AsRef<Path>, columns: &[String]) -> Result<Self> {
        let path = path.as_ref();
        Self::ensure_file(path, columns)?;
        let header = Self::read_header(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            header,
        })
    }

    /// Create the file with a header line if it does not exist
    ///
    /// Returns true when the file was created.
    pub fn ensure_file(path: &Path, header_fields: &[String]) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().write(true).create_new(true).open(path)?;
        let mut writer = Self::writer_for(file);
        writer
            .write_record(header_fields)
            .map_err(|e| NotesError::from_csv(path, e))?;
        writer.flush()?;

        tracing::debug!(path = %path.display(), columns = ?header_fields, "created notes file");
        Ok(true)
    }

    /// Read the header line of an existing notes file
    pub fn read_header(path: &Path) -> Result<Vec<String>> {
        let mut reader = Self::reader_for(path)?;
        let header = reader
            .headers()
            .map_err(|e| NotesError::from_csv(path, e))?;

        if header.is_empty() {
            return Err(NotesError::EmptyHeader(path.to_path_buf()));
        }

        Ok(header.iter().map(str::to_string).collect())
    }

    /// Load every data row, keyed by header field names
    pub fn load_all(&self) -> Result<Vec<Row>> {
        let mut reader = Self::reader_for(&self.path)?;
        let mut rows = Vec::new();

        for record in reader.deserialize::<Row>() {
            rows.push(record.map_err(|e| NotesError::from_csv(&self.path, e))?);
        }

        tracing::debug!(path = %self.path.display(), rows = rows.len(), "loaded notes file");
        Ok(rows)
    }

    /// Every note value in file order
    pub fn all_notes(&self) -> Result<Vec<String>> {
        Ok(self
            .load_all()?
            .into_iter()
            .map(|row| row.note().to_string())
            .collect())
    }

    /// Append one row to the end of the file
    ///
    /// The row's keys must all be header fields; nothing already in the file
    /// is read or rewritten.
    pub fn append(&self, row: &Row) -> Result<()> {
        self.validate(row)?;

        let file = OpenOptions::new().append(true).open(&self.path)?;
        let mut writer = Self::writer_for(file);
        writer
            .write_record(row.values_for(&self.header))
            .map_err(|e| NotesError::from_csv(&self.path, e))?;
        writer.flush()?;

        tracing::debug!(path = %self.path.display(), title = row.title(), "appended row");
        Ok(())
    }

    /// Replace the whole file with the header followed by `rows`
    ///
    /// Content goes to a sibling temp file first, which is then renamed over
    /// the notes file. An empty `rows` leaves a header-only file.
    pub fn rewrite(&self, rows: &[Row]) -> Result<()> {
        for row in rows {
            self.validate(row)?;
        }

        // Dropping the temp file on any early return removes it
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let tmp = NamedTempFile::new_in(dir)?;
        {
            let mut writer = Self::writer_for(tmp.as_file());
            writer
                .write_record(&self.header)
                .map_err(|e| NotesError::from_csv(tmp.path(), e))?;
            for row in rows {
                writer
                    .write_record(row.values_for(&self.header))
                    .map_err(|e| NotesError::from_csv(tmp.path(), e))?;
            }
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| NotesError::Io(e.error))?;

        tracing::debug!(path = %self.path.display(), rows = rows.len(), "rewrote notes file");
        Ok(())
    }

    /// The file's field set
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// The notes file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the header carries a column
    pub fn has_column(&self, column: &str) -> bool {
        self.header.iter().any(|c| c == column)
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Reject rows carrying a field the header does not declare
    fn validate(&self, row: &Row) -> Result<()> {
        match row.keys().find(|key| !self.has_column(key)) {
            Some(field) => Err(NotesError::Validation {
                field: field.to_string(),
                allowed: self.header.clone(),
            }),
            None => Ok(()),
        }
    }

    fn reader_for(path: &Path) -> Result<csv::Reader<File>> {
        let file = File::open(path)?;
        Ok(csv::ReaderBuilder::new()
            .delimiter(DELIMITER)
            .has_headers(true)
            .flexible(false)
            .from_reader(file))
    }

    fn writer_for<W: Write>(inner: W) -> csv::Writer<W> {
        csv::WriterBuilder::new()
            .delimiter(DELIMITER)
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(inner)
    }
}
