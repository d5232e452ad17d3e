//! Line selectors
//!
//! Positional filters over a title group: `N` picks one line, `A:B` the
//! inclusive window from A to B. Positions are zero-based.

use std::fmt;
use std::str::FromStr;

use crate::error::NotesError;

/// Position filter within a title group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSelector {
    /// A single line
    Single(usize),

    /// Inclusive window, `start <= end`
    Range { start: usize, end: usize },
}

impl LineSelector {
    /// Whether a within-group index falls inside the selection
    pub fn contains(&self, index: usize) -> bool {
        match *self {
            LineSelector::Single(n) => index == n,
            LineSelector::Range { start, end } => (start..=end).contains(&index),
        }
    }
}

impl FromStr for LineSelector {
    type Err = NotesError;

    /// Parse `N` or `START:END`
    ///
    /// Anything else (signs, blanks, extra colons, `START > END`) is rejected.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let invalid = || NotesError::InvalidSelector(token.to_string());
        let number = |s: &str| -> Result<usize, NotesError> {
            if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            s.parse().map_err(|_| invalid())
        };

        match token.split_once(':') {
            None => Ok(LineSelector::Single(number(token)?)),
            Some((start, end)) => {
                let (start, end) = (number(start)?, number(end)?);
                if start > end {
                    return Err(invalid());
                }
                Ok(LineSelector::Range { start, end })
            }
        }
    }
}

impl fmt::Display for LineSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineSelector::Single(n) => write!(f, "{n}"),
            LineSelector::Range { start, end } => write!(f, "{start}:{end}"),
        }
    }
}
