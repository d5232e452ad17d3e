//! Command Resolver
//!
//! Maps one command onto Row Store calls.

use std::collections::{BTreeSet, HashMap};

use chrono::{Local, SecondsFormat};

use crate::config::Config;
use crate::error::Result;
use crate::store::{Row, RowStore, DATE_FIELD, NOTE_FIELD, TITLE_FIELD};

use super::{Command, Line, LineSelector, Outcome};

/// Resolves commands against a single notes file
pub struct Resolver {
    store: RowStore,
}

/// A row sequence split around the selected lines of one title group
struct Partition {
    /// Rows that survive, in file order
    kept: Vec<Row>,

    /// Number of rows taken out
    removed: usize,

    /// Position in `kept` where the first removed row used to be
    splice_at: Option<usize>,

    /// Size of the title group before removal
    group_len: usize,
}

impl Resolver {
    /// Open the configured notes file, creating it if needed
    pub fn open(config: &Config) -> Result<Self> {
        let store = RowStore::open(&config.notes_file, &config.columns)?;
        Ok(Self::new(store))
    }

    /// Wrap an already opened store
    pub fn new(store: RowStore) -> Self {
        Self { store }
    }

    /// Execute a command
    ///
    /// Routes commands to appropriate handlers
    pub fn execute(&self, command: Command) -> Result<Outcome> {
        tracing::debug!(
            command = ?command.command_type(),
            mutation = command.is_mutation(),
            "executing command"
        );

        match command {
            Command::List => Ok(Outcome::Titles(self.list_titles()?)),
            Command::Write { title, text, fields } => {
                Ok(Outcome::Written(self.write(&title, &text, &fields)?))
            }
            Command::Replace { title, selector, text, fields } => {
                self.replace(&title, selector, text.as_deref(), &fields)
            }
            Command::Delete { title, selector } => self.delete(&title, selector),
            Command::Search { needle, title } => self.search(&needle, title.as_deref()),
            Command::Read { title, selector } => self.read(&title, selector),
        }
    }

    /// Distinct titles, sorted
    pub fn list_titles(&self) -> Result<Vec<String>> {
        let titles: BTreeSet<String> = self
            .store
            .load_all()?
            .into_iter()
            .map(|row| row.title().to_string())
            .collect();
        Ok(titles.into_iter().collect())
    }

    /// Append a note under `title`
    pub fn write(&self, title: &str, text: &str, fields: &[(String, String)]) -> Result<Row> {
        let row = self.new_row(title, text, fields);
        self.store.append(&row)?;
        Ok(row)
    }

    /// Remove selected lines of a group (all lines without a selector) and
    /// put `text` in their place when given
    ///
    /// Without a selector the new row goes to the end of the file. With one,
    /// it takes the position of the first selected line.
    pub fn replace(
        &self,
        title: &str,
        selector: Option<LineSelector>,
        text: Option<&str>,
        fields: &[(String, String)],
    ) -> Result<Outcome> {
        let mut partition = Self::partition(self.store.load_all()?, title, selector);

        if let Some(outcome) = Self::check_found(&partition, title, selector, text.is_none()) {
            return Ok(outcome);
        }

        let inserted = match text {
            Some(text) => {
                let row = self.new_row(title, text, fields);
                let at = match selector {
                    Some(_) => partition.splice_at.unwrap_or(partition.kept.len()),
                    None => partition.kept.len(),
                };
                partition.kept.insert(at, row.clone());
                Some(row)
            }
            None => None,
        };

        self.store.rewrite(&partition.kept)?;
        tracing::info!(title, removed = partition.removed, inserted = inserted.is_some(), "replaced lines");

        Ok(Outcome::Replaced {
            title: title.to_string(),
            removed: partition.removed,
            inserted,
        })
    }

    /// Remove selected lines of a group, or the whole group without a selector
    pub fn delete(&self, title: &str, selector: Option<LineSelector>) -> Result<Outcome> {
        let partition = Self::partition(self.store.load_all()?, title, selector);

        if let Some(outcome) = Self::check_found(&partition, title, selector, true) {
            return Ok(outcome);
        }

        self.store.rewrite(&partition.kept)?;
        tracing::info!(title, removed = partition.removed, "deleted lines");

        Ok(Outcome::Deleted {
            title: title.to_string(),
            removed: partition.removed,
        })
    }

    /// Rows whose note contains `needle`, within one title or across the file
    pub fn search(&self, needle: &str, title: Option<&str>) -> Result<Outcome> {
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut lines = Vec::new();
        let mut scoped_rows = 0;

        for row in self.store.load_all()? {
            if title.is_some_and(|t| t != row.title()) {
                continue;
            }
            scoped_rows += 1;

            let slot = positions.entry(row.title().to_string()).or_insert(0);
            let index = *slot;
            *slot += 1;

            if row.note().contains(needle) {
                lines.push((row.title().to_string(), Line { index, row }));
            }
        }

        if let (Some(title), 0) = (title, scoped_rows) {
            tracing::debug!(title, "search scope is empty");
            return Ok(Outcome::TitleNotFound(title.to_string()));
        }

        Ok(Outcome::Matches {
            needle: needle.to_string(),
            lines,
        })
    }

    /// Lines of a title group, indexed from 0, optionally narrowed by `selector`
    ///
    /// A selector past the end of the group yields no lines.
    pub fn read(&self, title: &str, selector: Option<LineSelector>) -> Result<Outcome> {
        let group: Vec<Line> = self
            .store
            .load_all()?
            .into_iter()
            .filter(|row| row.title() == title)
            .enumerate()
            .map(|(index, row)| Line { index, row })
            .collect();

        if group.is_empty() {
            tracing::debug!(title, "title not found");
            return Ok(Outcome::TitleNotFound(title.to_string()));
        }

        let lines = match selector {
            Some(selector) => group
                .into_iter()
                .filter(|line| selector.contains(line.index))
                .collect(),
            None => group,
        };

        Ok(Outcome::Lines {
            title: title.to_string(),
            lines,
        })
    }

    /// The underlying store
    pub fn store(&self) -> &RowStore {
        &self.store
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Build a fresh row, dated now when the file has a date column
    fn new_row(&self, title: &str, text: &str, fields: &[(String, String)]) -> Row {
        let mut row = Row::new();
        if self.store.has_column(DATE_FIELD) {
            row.set(DATE_FIELD, timestamp());
        }
        for (key, value) in fields {
            row.set(key.as_str(), value.as_str());
        }
        row.set(TITLE_FIELD, title);
        row.set(NOTE_FIELD, text);
        row
    }

    /// Split `rows` into survivors and the selected lines of `title`
    fn partition(rows: Vec<Row>, title: &str, selector: Option<LineSelector>) -> Partition {
        let mut partition = Partition {
            kept: Vec::with_capacity(rows.len()),
            removed: 0,
            splice_at: None,
            group_len: 0,
        };

        for row in rows {
            if row.title() == title {
                let index = partition.group_len;
                partition.group_len += 1;

                if selector.map_or(true, |s| s.contains(index)) {
                    if partition.splice_at.is_none() {
                        partition.splice_at = Some(partition.kept.len());
                    }
                    partition.removed += 1;
                    continue;
                }
            }
            partition.kept.push(row);
        }

        partition
    }

    /// Not-found outcome for a partition that leaves nothing to change
    ///
    /// A whole-group replace that brings new text always proceeds, even
    /// when the title has no lines yet.
    fn check_found(
        partition: &Partition,
        title: &str,
        selector: Option<LineSelector>,
        removal_only: bool,
    ) -> Option<Outcome> {
        if partition.group_len == 0 && (removal_only || selector.is_some()) {
            tracing::debug!(title, "title not found");
            return Some(Outcome::TitleNotFound(title.to_string()));
        }

        match selector {
            Some(selector) if partition.removed == 0 => {
                tracing::debug!(title, %selector, "selector matched no lines");
                Some(Outcome::LineNotFound {
                    title: title.to_string(),
                    selector,
                })
            }
            _ => None,
        }
    }
}

/// Current local time in ISO-8601 form
fn timestamp() -> String {
    Local::now().to_rfc3339_opts(SecondsFormat::Secs, false)
}
