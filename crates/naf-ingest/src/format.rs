use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{IngestError, Result};

/// On-disk table format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    Csv,
    Parquet,
}

impl DataFormat {
    /// Detects the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("parquet" | "pq") => Ok(Self::Parquet),
            _ => Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Parquet => "parquet",
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_known_extensions() {
        assert_eq!(DataFormat::from_path(Path::new("a.csv")).unwrap(), DataFormat::Csv);
        assert_eq!(DataFormat::from_path(Path::new("a.CSV")).unwrap(), DataFormat::Csv);
        assert_eq!(
            DataFormat::from_path(Path::new("dir/a.parquet")).unwrap(),
            DataFormat::Parquet
        );
    }

    #[test]
    fn rejects_other_extensions() {
        assert!(matches!(
            DataFormat::from_path(Path::new("a.xlsx")),
            Err(IngestError::UnsupportedFormat { .. })
        ));
        assert!(DataFormat::from_path(Path::new("noext")).is_err());
    }
}
