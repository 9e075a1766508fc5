//! Conversion of the audit journal to a table.

use naf_model::Journal;
use naf_model::journal::{AFTER_COLUMN, BEFORE_COLUMN, CHANGE_COLUMN, RULE_COLUMN};
use polars::prelude::{Column, DataFrame};

use crate::error::{IngestError, Result};

/// Builds the journal table: context columns, then before, after, rule name
/// and change type. An empty journal gives the same columns with no rows.
pub fn journal_to_frame(journal: &Journal) -> Result<DataFrame> {
    let entries = journal.entries();
    let mut columns: Vec<Column> = Vec::with_capacity(journal.context_columns().len() + 4);

    for (index, name) in journal.context_columns().iter().enumerate() {
        let values: Vec<Option<String>> = entries
            .iter()
            .map(|entry| entry.context.get(index).cloned().flatten())
            .collect();
        columns.push(Column::new(name.as_str().into(), values));
    }

    let before: Vec<Option<String>> = entries.iter().map(|e| e.before.clone()).collect();
    let after: Vec<Option<String>> = entries.iter().map(|e| e.after.clone()).collect();
    let rules: Vec<String> = entries.iter().map(|e| e.rule_name.clone()).collect();
    let changes: Vec<&str> = entries.iter().map(|e| e.change.as_str()).collect();
    columns.push(Column::new(BEFORE_COLUMN.into(), before));
    columns.push(Column::new(AFTER_COLUMN.into(), after));
    columns.push(Column::new(RULE_COLUMN.into(), rules));
    columns.push(Column::new(CHANGE_COLUMN.into(), changes));

    DataFrame::new(columns).map_err(|e| IngestError::DataFrame {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use naf_model::{ChangeKind, JournalEntry};

    use super::*;

    #[test]
    fn empty_journal_keeps_columns() {
        let frame = journal_to_frame(&Journal::new(["liasse_numero", "libelle"])).unwrap();
        assert_eq!(frame.height(), 0);
        let names: Vec<String> = frame
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "liasse_numero",
                "libelle",
                "APE_BEFORE",
                "APE_AFTER",
                "_log_rules_applied",
                "_change_type"
            ]
        );
    }

    #[test]
    fn entries_become_rows() {
        let mut journal = Journal::new(["liasse_numero"]);
        journal.push(JournalEntry {
            row: 4,
            context: vec![Some("J4".to_string())],
            before: Some("6820A".to_string()),
            after: Some("5590Y".to_string()),
            rule_name: "seasonal_lmnp_assignment_2025".to_string(),
            change: ChangeKind::Modification,
        });
        let frame = journal_to_frame(&journal).unwrap();
        assert_eq!(frame.height(), 1);
        let change = frame.column("_change_type").unwrap().str().unwrap().get(0);
        assert_eq!(change, Some("modification"));
        let before = frame.column("APE_BEFORE").unwrap().str().unwrap().get(0);
        assert_eq!(before, Some("6820A"));
    }
}
