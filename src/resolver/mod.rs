//! Command Resolver Module
//!
//! Turns one user intent into Row Store calls and a printable outcome.
//!
//! ## Modes (highest priority first)
//! - List: distinct titles
//! - Write: append a dated row
//! - Replace: drop lines of a title group, optionally insert new text
//! - Delete: drop lines of a title group
//! - Search: substring match over notes
//! - Read: print a title group, optionally a `N` or `A:B` window
//!
//! Replace and delete always go through a full read, filter and rewrite of
//! the notes file; rows are never edited in place.

mod command;
mod outcome;
#[allow(clippy::module_inception)]
mod resolver;
mod selector;

pub use command::{Command, CommandType};
pub use outcome::{Line, Outcome};
pub use resolver::Resolver;
pub use selector::LineSelector;
