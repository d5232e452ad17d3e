//! # tsvnotes
//!
//! A personal note keeper backed by a single tab-separated file:
//! - Notes are rows grouped under a free-form title
//! - Rows sharing a title form an ordered list of lines
//! - Append-only writes, whole-file rewrites for replace/delete
//! - Substring search over note text
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        tnotes CLI                            │
//! │               (flags → one Command per run)                  │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   Command Resolver                           │
//! │       (list / write / replace / delete / search / read)      │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!                       ▼
//!               ┌───────────────┐
//!               │   Row Store   │
//!               │  (TSV file)   │
//!               └───────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod store;
pub mod resolver;
pub mod input;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{NotesError, Result};
pub use config::Config;
pub use store::{Row, RowStore};
pub use resolver::{Command, LineSelector, Outcome, Resolver};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of tsvnotes
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
