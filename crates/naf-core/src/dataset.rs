//! In-memory dataset: a polars frame whose columns are all nullable strings.

use std::collections::BTreeMap;

use naf_model::{MatchVector, NafError, Result};
use polars::prelude::{Column, DataFrame, DataType, NamedFrom, Series};

/// The table rules read and relabel.
///
/// Rows are identified by position. Every column is held as a string
/// column so that codes such as `0148J` keep their leading zeros whatever
/// the source format inferred.
#[derive(Debug, Clone)]
pub struct Dataset {
    frame: DataFrame,
}

impl Dataset {
    /// Wraps `frame`, casting every non-string column to string.
    pub fn new(frame: DataFrame) -> Result<Self> {
        let mut columns: Vec<Column> = Vec::with_capacity(frame.width());
        for column in frame.get_columns() {
            if column.dtype() == &DataType::String {
                columns.push(column.clone());
            } else {
                columns.push(column.cast(&DataType::String).map_err(NafError::frame)?);
            }
        }
        let frame = DataFrame::new(columns).map_err(NafError::frame)?;
        Ok(Self { frame })
    }

    /// A dataset with no columns and no rows.
    pub fn empty() -> Self {
        Self {
            frame: DataFrame::empty(),
        }
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.frame.column(name).is_ok()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect()
    }

    /// All values of a column, in row order.
    ///
    /// # Errors
    ///
    /// Returns [`NafError::MissingColumn`] if the column does not exist.
    pub fn text_values(&self, name: &str) -> Result<Vec<Option<String>>> {
        let column = self
            .frame
            .column(name)
            .map_err(|_| NafError::MissingColumn(name.to_string()))?;
        let values = column.str().map_err(NafError::frame)?;
        Ok(values
            .into_iter()
            .map(|value| value.map(str::to_string))
            .collect())
    }

    /// Like [`Dataset::text_values`], but a missing column reads as all null.
    pub fn text_values_or_null(&self, name: &str) -> Result<Vec<Option<String>>> {
        if self.has_column(name) {
            self.text_values(name)
        } else {
            Ok(vec![None; self.height()])
        }
    }

    /// One cell. Missing columns and out-of-range rows read as null.
    pub fn value(&self, name: &str, row: usize) -> Option<String> {
        let column = self.frame.column(name).ok()?;
        column.str().ok()?.get(row).map(str::to_string)
    }

    /// Replaces or adds a column.
    ///
    /// # Errors
    ///
    /// Fails if `values` does not have one entry per row.
    pub fn set_column(&mut self, name: &str, values: Vec<Option<String>>) -> Result<()> {
        if values.len() != self.height() && self.frame.width() > 0 {
            return Err(NafError::frame(LengthMismatch {
                column: name.to_string(),
                expected: self.height(),
                actual: values.len(),
            }));
        }
        let series = Series::new(name.into(), values);
        self.frame.with_column(series).map_err(NafError::frame)?;
        Ok(())
    }

    /// Sets `column` to `code` on every row selected by `mask`.
    ///
    /// The column is created (all null) if absent; unselected rows keep
    /// their value.
    ///
    /// # Errors
    ///
    /// Fails if the mask length differs from the row count.
    pub fn assign_where(&mut self, column: &str, mask: &MatchVector, code: &str) -> Result<()> {
        if mask.len() != self.height() {
            return Err(NafError::frame(LengthMismatch {
                column: column.to_string(),
                expected: self.height(),
                actual: mask.len(),
            }));
        }
        let mut values = self.text_values_or_null(column)?;
        for row in mask.matched_rows() {
            values[row] = Some(code.to_string());
        }
        self.set_column(column, values)
    }

    /// Appends rows given as column-to-value maps.
    ///
    /// Columns absent from a row are null. Columns unknown to the dataset
    /// are added, null for every existing row.
    pub fn append_rows(&mut self, rows: &[BTreeMap<String, String>]) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let mut names = self.column_names();
        for row in rows {
            for name in row.keys() {
                if !names.contains(name) {
                    names.push(name.clone());
                }
            }
        }

        let height = self.height();
        for name in &names {
            if !self.has_column(name) {
                self.set_column(name, vec![None; height])?;
            }
        }

        let columns: Vec<Column> = names
            .iter()
            .map(|name| {
                let values: Vec<Option<String>> =
                    rows.iter().map(|row| row.get(name).cloned()).collect();
                Series::new(name.as_str().into(), values).into()
            })
            .collect();
        let appended = DataFrame::new(columns).map_err(NafError::frame)?;
        if self.frame.width() == 0 {
            self.frame = appended;
        } else {
            self.frame.vstack_mut(&appended).map_err(NafError::frame)?;
        }
        Ok(())
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn into_frame(self) -> DataFrame {
        self.frame
    }
}

#[derive(Debug, thiserror::Error)]
#[error("column '{column}' needs {expected} values, got {actual}")]
struct LengthMismatch {
    column: String,
    expected: usize,
    actual: usize,
}
