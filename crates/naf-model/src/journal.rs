//! Audit journal of rule applications.
//!
//! A journal is a table: one entry per changed or created record, with the
//! configured context columns, the target value before and after the rule,
//! the rule name, and the change kind. An empty journal still carries its
//! context columns so that it can be concatenated or written out unchanged.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Output column holding the target value before a rule ran.
pub const BEFORE_COLUMN: &str = "APE_BEFORE";
/// Output column holding the target value after a rule ran.
pub const AFTER_COLUMN: &str = "APE_AFTER";
/// Output column holding the rule name.
pub const RULE_COLUMN: &str = "_log_rules_applied";
/// Output column holding the change kind.
pub const CHANGE_COLUMN: &str = "_change_type";

/// How a rule affected the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// An existing row's target code was (re)assigned.
    Modification,
    /// A row was appended.
    Creation,
}

impl ChangeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Modification => "modification",
            Self::Creation => "creation",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Row position in the dataset at the time the rule ran.
    pub row: usize,
    /// Values of the journal's context columns, in column order.
    pub context: Vec<Option<String>>,
    pub before: Option<String>,
    pub after: Option<String>,
    pub rule_name: String,
    pub change: ChangeKind,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journal {
    context_columns: Vec<String>,
    entries: Vec<JournalEntry>,
}

impl Journal {
    pub fn new<S: Into<String>>(context_columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            context_columns: context_columns.into_iter().map(Into::into).collect(),
            entries: Vec::new(),
        }
    }

    /// Appends an entry. Its context is padded or truncated to the column count.
    pub fn push(&mut self, mut entry: JournalEntry) {
        entry.context.resize(self.context_columns.len(), None);
        self.entries.push(entry);
    }

    pub fn context_columns(&self) -> &[String] {
        &self.context_columns
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Change kind of the first entry.
    pub fn change_kind(&self) -> Option<ChangeKind> {
        self.entries.first().map(|entry| entry.change)
    }

    /// True when every entry has the same change kind (vacuously true when empty).
    pub fn is_uniform(&self) -> bool {
        match self.change_kind() {
            Some(kind) => self.entries.iter().all(|entry| entry.change == kind),
            None => true,
        }
    }

    pub fn count_of(&self, kind: ChangeKind) -> usize {
        self.entries.iter().filter(|entry| entry.change == kind).count()
    }

    /// Looks up a context value for an entry by column name.
    pub fn context_value<'a>(&self, entry: &'a JournalEntry, column: &str) -> Option<&'a str> {
        let index = self.context_columns.iter().position(|c| c == column)?;
        entry.context.get(index)?.as_deref()
    }

    /// Concatenates journals in order.
    ///
    /// The result's context columns are the union of the inputs' columns in
    /// first-seen order; entries from journals lacking a column get null there.
    pub fn concat(journals: impl IntoIterator<Item = Journal>) -> Journal {
        let journals: Vec<Journal> = journals.into_iter().collect();
        let mut columns: Vec<String> = Vec::new();
        for journal in &journals {
            for column in &journal.context_columns {
                if !columns.contains(column) {
                    columns.push(column.clone());
                }
            }
        }

        let mut merged = Journal::new(columns.clone());
        for journal in journals {
            let positions: Vec<Option<usize>> = columns
                .iter()
                .map(|column| journal.context_columns.iter().position(|c| c == column))
                .collect();
            for mut entry in journal.entries {
                let context = positions
                    .iter()
                    .map(|position| position.and_then(|i| entry.context.get(i).cloned().flatten()))
                    .collect();
                entry.context = context;
                merged.entries.push(entry);
            }
        }
        merged
    }
}
