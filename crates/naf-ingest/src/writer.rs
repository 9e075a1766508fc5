//! Writing datasets and journals.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use polars::prelude::{CsvWriter, DataFrame, ParquetWriter, SerWriter};
use tracing::{info, warn};

use crate::error::{IngestError, Result};
use crate::format::DataFormat;

/// Writes `frame` to `path` in `format`, creating parent directories.
pub fn save_frame(frame: &mut DataFrame, path: &Path, format: DataFormat) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| IngestError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let mut file = File::create(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let written = match format {
        DataFormat::Csv => CsvWriter::new(&mut file).include_header(true).finish(frame),
        DataFormat::Parquet => ParquetWriter::new(&mut file).finish(frame).map(|_| ()),
    };
    written.map_err(|e| IngestError::Write {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    info!(path = %path.display(), rows = frame.height(), "wrote table");
    Ok(())
}

/// Writes every frame to its path, or none of them.
///
/// Frames are first written to staging files beside their targets and
/// renamed into place once all of them were written. When a rename fails,
/// targets already moved into place are removed again.
pub fn save_frames(outputs: &mut [(&mut DataFrame, &Path)], format: DataFormat) -> Result<()> {
    let mut staged: Vec<(PathBuf, PathBuf)> = Vec::with_capacity(outputs.len());
    for (frame, path) in outputs.iter_mut() {
        let staging = staging_path(path);
        if let Err(err) = save_frame(frame, &staging, format) {
            discard(staged.iter().map(|(staging, _)| staging).chain([&staging]));
            return Err(err);
        }
        staged.push((staging, path.to_path_buf()));
    }

    for (done, (staging, target)) in staged.iter().enumerate() {
        if let Err(source) = fs::rename(staging, target) {
            warn!(path = %target.display(), "could not move output into place, discarding run outputs");
            discard(staged[..done].iter().map(|(_, target)| target));
            discard(staged[done..].iter().map(|(staging, _)| staging));
            return Err(IngestError::Io {
                path: target.clone(),
                source,
            });
        }
    }
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map_or_else(String::new, |name| name.to_string_lossy().into_owned());
    path.with_file_name(format!(".{name}.partial"))
}

fn discard<'a>(paths: impl IntoIterator<Item = &'a PathBuf>) {
    for path in paths {
        if let Err(err) = fs::remove_file(path)
            && err.kind() != std::io::ErrorKind::NotFound
        {
            warn!(path = %path.display(), error = %err, "failed to remove output");
        }
    }
}

/// `<dir>/<stem><suffix>.<ext>`
pub fn output_path(dir: &Path, stem: &str, suffix: &str, format: DataFormat) -> PathBuf {
    dir.join(format!("{stem}{suffix}.{}", format.extension()))
}
