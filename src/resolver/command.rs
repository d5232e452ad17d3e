//! Command definitions
//!
//! Represents one user intent per invocation.

use super::LineSelector;

/// Command types, in resolution priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CommandType {
    List,
    Write,
    Replace,
    Delete,
    Search,
    Read,
}

/// A resolved command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Distinct titles in the file
    List,

    /// Append a note under a title
    Write {
        title: String,
        text: String,
        /// Extra named fields, checked against the file header
        fields: Vec<(String, String)>,
    },

    /// Drop lines of a title group, optionally putting new text in their place
    Replace {
        title: String,
        selector: Option<LineSelector>,
        text: Option<String>,
        fields: Vec<(String, String)>,
    },

    /// Drop lines of a title group
    Delete {
        title: String,
        selector: Option<LineSelector>,
    },

    /// Substring search over notes, optionally within one title
    Search {
        needle: String,
        title: Option<String>,
    },

    /// Print a title group, optionally a window of it
    Read {
        title: String,
        selector: Option<LineSelector>,
    },
}

impl Command {
    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::List => CommandType::List,
            Command::Write { .. } => CommandType::Write,
            Command::Replace { .. } => CommandType::Replace,
            Command::Delete { .. } => CommandType::Delete,
            Command::Search { .. } => CommandType::Search,
            Command::Read { .. } => CommandType::Read,
        }
    }

    /// Whether executing this command can change the notes file
    pub fn is_mutation(&self) -> bool {
        matches!(
            self.command_type(),
            CommandType::Write | CommandType::Replace | CommandType::Delete
        )
    }
}
