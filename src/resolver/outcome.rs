//! Command outcomes
//!
//! Structured results of a resolved command, plus the plain-text lines the
//! CLI prints for them.

use crate::store::Row;

use super::LineSelector;

/// A row together with its position inside its title group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub index: usize,
    pub row: Row,
}

impl Line {
    fn render(&self) -> String {
        match self.row.date() {
            Some(date) => format!("[{}] {}  {}", self.index, date, self.row.note()),
            None => format!("[{}] {}", self.index, self.row.note()),
        }
    }
}

/// Result of executing one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Distinct titles, sorted
    Titles(Vec<String>),

    /// The row that was appended
    Written(Row),

    /// Lines removed from a group, and the row put in their place if any
    Replaced {
        title: String,
        removed: usize,
        inserted: Option<Row>,
    },

    /// Lines removed from a group
    Deleted { title: String, removed: usize },

    /// Search hits in file order
    Matches { needle: String, lines: Vec<(String, Line)> },

    /// Selected lines of a title group
    Lines { title: String, lines: Vec<Line> },

    /// No row carries the title
    TitleNotFound(String),

    /// The title exists but the selector picked none of its lines
    LineNotFound { title: String, selector: LineSelector },
}

impl Outcome {
    /// Lines to print for this outcome
    pub fn render(&self) -> Vec<String> {
        match self {
            Outcome::Titles(titles) if titles.is_empty() => vec!["no titles yet".to_string()],
            Outcome::Titles(titles) => titles.clone(),
            Outcome::Written(row) => vec![row.note().to_string()],
            Outcome::Replaced { title, removed, inserted } => {
                let mut out = vec![format!("removed {removed} line(s) from '{title}'")];
                if let Some(row) = inserted {
                    out.push(row.note().to_string());
                }
                out
            }
            Outcome::Deleted { title, removed } => {
                vec![format!("removed {removed} line(s) from '{title}'")]
            }
            Outcome::Matches { needle, lines } if lines.is_empty() => {
                vec![format!("no notes contain: {needle}")]
            }
            Outcome::Matches { lines, .. } => lines
                .iter()
                .map(|(title, line)| format!("{title} {}", line.render()))
                .collect(),
            Outcome::Lines { lines, .. } => lines.iter().map(Line::render).collect(),
            Outcome::TitleNotFound(title) => vec![format!("title not found: {title}")],
            Outcome::LineNotFound { title, selector } => {
                vec![format!("no line {selector} under title: {title}")]
            }
        }
    }

    /// Whether the requested title or lines were missing
    pub fn is_not_found(&self) -> bool {
        matches!(self, Outcome::TitleNotFound(_) | Outcome::LineNotFound { .. })
    }
}
