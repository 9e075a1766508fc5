//! Error types for dataset I/O.

use std::path::PathBuf;

use naf_model::NafError;
use thiserror::Error;

/// Errors raised while reading or writing datasets and journals.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to open or create a file.
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Format Errors ===
    /// Extension is neither `.csv` nor `.parquet`.
    #[error("unsupported file format for {path} (expected .csv or .parquet)")]
    UnsupportedFormat { path: PathBuf },

    /// Failed to parse the file with Polars.
    #[error("failed to read {path}: {message}")]
    Read { path: PathBuf, message: String },

    /// Failed to serialize a frame.
    #[error("failed to write {path}: {message}")]
    Write { path: PathBuf, message: String },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },

    /// The loaded frame could not be turned into a dataset.
    #[error(transparent)]
    Dataset(#[from] NafError),
}

pub type Result<T> = std::result::Result<T, IngestError>;
