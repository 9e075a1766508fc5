//! Loading datasets from CSV or Parquet.

use std::fs::File;
use std::path::Path;

use naf_core::Dataset;
use polars::prelude::{CsvReadOptions, DataFrame, ParquetReader, SerReader};
use tracing::info;

use crate::error::{IngestError, Result};
use crate::format::DataFormat;

/// Reads a table, choosing the reader from the file extension.
///
/// CSV columns are all read as strings (no type inference) so codes keep
/// their leading zeros. Parquet columns of other types are cast to strings
/// by [`Dataset::new`].
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let format = DataFormat::from_path(path)?;
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let frame = match format {
        DataFormat::Csv => read_csv(path)?,
        DataFormat::Parquet => read_parquet(path)?,
    };
    info!(
        path = %path.display(),
        %format,
        rows = frame.height(),
        columns = frame.width(),
        "loaded dataset"
    );
    Ok(Dataset::new(frame)?)
}

fn read_csv(path: &Path) -> Result<DataFrame> {
    let read_error = |e: polars::prelude::PolarsError| IngestError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    };
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(read_error)?
        .finish()
        .map_err(read_error)
}

fn read_parquet(path: &Path) -> Result<DataFrame> {
    let file = File::open(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    ParquetReader::new(file)
        .finish()
        .map_err(|e| IngestError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}
