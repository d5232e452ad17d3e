//! Row Store Module
//!
//! Persists note rows in a flat tab-separated file.
//!
//! ## Responsibilities
//! - Create the file with its header on first use
//! - Load all rows into memory on demand
//! - Append a single row without touching existing content
//! - Rewrite the full file when rows are removed or replaced
//!
//! ## File Format
//! ```text
//! date<TAB>title<TAB>note
//! 2026-10-18T09:12:44+02:00<TAB>groceries<TAB>milk
//! 2026-10-18T09:13:02+02:00<TAB>groceries<TAB>bread
//! ```
//!
//! The first line names the fields and never changes for the file's
//! lifetime. Values containing tabs, newlines or quotes are quoted.

mod file;
mod row;

pub use file::RowStore;
pub use row::{Row, DATE_FIELD, NOTE_FIELD, TITLE_FIELD};
