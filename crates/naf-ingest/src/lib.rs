//! CSV and Parquet I/O for datasets and audit journals.

pub mod error;
pub mod format;
pub mod journal_frame;
pub mod reader;
pub mod writer;

pub use error::{IngestError, Result};
pub use format::DataFormat;
pub use journal_frame::journal_to_frame;
pub use reader::load_dataset;
pub use writer::{output_path, save_frame, save_frames};
