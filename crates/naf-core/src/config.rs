//! Run configuration loaded from a TOML file.
//!
//! ```toml
//! [columns]
//! text = ["libelle"]
//! cleaned_suffix = "_cleaned"
//! modification_context = ["liasse_numero", "libelle"]
//! creation_context = ["liasse_numero", "libelle", "cj"]
//!
//! [strategies.fuzzy]
//! threshold = 90
//!
//! [strategies.similarity]
//! threshold = 0.65
//! model = "http:text-embedding-3-small"
//! endpoint = "http://localhost:8080/v1"
//! ```

use std::path::{Path, PathBuf};

use naf_match::{builtin_defaults, merge_overrides};
use naf_model::columns::{
    CLEANED_SUFFIX, CREATION_CONTEXT, DEFAULT_TEXT_COLUMNS, MODIFICATION_CONTEXT,
};
use naf_model::{StrategyKind, StrategyOverrides, StrategyParams};
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnConfig {
    /// Raw text columns to clean and match against.
    pub text: Vec<String>,
    pub cleaned_suffix: String,
    pub modification_context: Vec<String>,
    pub creation_context: Vec<String>,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        let owned = |names: &[&str]| -> Vec<String> {
            names.iter().map(|name| (*name).to_string()).collect()
        };
        Self {
            text: owned(DEFAULT_TEXT_COLUMNS),
            cleaned_suffix: CLEANED_SUFFIX.to_string(),
            modification_context: owned(MODIFICATION_CONTEXT),
            creation_context: owned(CREATION_CONTEXT),
        }
    }
}

/// Per-strategy tables, keyed by canonical strategy name.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StrategyTables {
    #[serde(alias = "exact")]
    pub regex: StrategyParams,
    #[serde(alias = "approximate")]
    pub fuzzy: StrategyParams,
    #[serde(alias = "semantic")]
    pub similarity: StrategyParams,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub columns: ColumnConfig,
    pub strategies: StrategyTables,
}

impl EngineConfig {
    /// Strategy parameters: built-in defaults overlaid with this file's tables.
    pub fn strategy_params(&self) -> StrategyOverrides {
        let mut configured = StrategyOverrides::new();
        configured.insert(StrategyKind::Exact, self.strategies.regex.clone());
        configured.insert(StrategyKind::Approximate, self.strategies.fuzzy.clone());
        configured.insert(StrategyKind::Semantic, self.strategies.similarity.clone());
        merge_overrides(&builtin_defaults(), &configured)
    }
}

/// Reads and parses a configuration file.
pub fn load_config(path: &Path) -> Result<EngineConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
    parse_config(&contents).map_err(|source| ConfigError::Toml {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_config(contents: &str) -> Result<EngineConfig, toml::de::Error> {
    toml::from_str(contents)
}
