//! Matching strategy identifiers and their tunable parameters.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{NafError, Result};

/// The closed set of matching algorithms.
///
/// Each kind answers "does this text match this term set" for one row.
/// Names are resolved once when the configuration is parsed; an
/// unrecognized name never reaches the matching stage.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum StrategyKind {
    /// Case-insensitive regular-expression containment.
    #[serde(rename = "regex", alias = "exact")]
    Exact,
    /// Normalized edit-distance similarity on a 0-100 scale.
    #[serde(rename = "fuzzy", alias = "approximate")]
    Approximate,
    /// Cosine similarity between sentence embeddings.
    #[serde(rename = "similarity", alias = "semantic")]
    Semantic,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 3] = [Self::Exact, Self::Approximate, Self::Semantic];

    /// Canonical name, used in logs, output suffixes and configuration keys.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "regex",
            Self::Approximate => "fuzzy",
            Self::Semantic => "similarity",
        }
    }

    /// Resolves a strategy name or alias.
    ///
    /// # Errors
    ///
    /// Returns [`NafError::Configuration`] for unknown names.
    pub fn parse(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "regex" | "exact" => Ok(Self::Exact),
            "fuzzy" | "approximate" => Ok(Self::Approximate),
            "similarity" | "semantic" => Ok(Self::Semantic),
            other => Err(NafError::configuration(format!(
                "unknown matching strategy '{other}' (expected regex, fuzzy or similarity)"
            ))),
        }
    }

    /// Parses a list of names, dropping duplicates while keeping first-seen order.
    pub fn parse_all<S: AsRef<str>>(names: &[S]) -> Result<Vec<Self>> {
        let mut kinds = Vec::with_capacity(names.len());
        for name in names {
            let kind = Self::parse(name.as_ref())?;
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
        Ok(kinds)
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = NafError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Parameters for one strategy.
///
/// All fields are optional so that the same shape serves as configured
/// defaults and as run-time overrides; see [`StrategyParams::overlay`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StrategyParams {
    /// Score threshold. Approximate uses 0-100, semantic uses -1..=1.
    pub threshold: Option<f64>,
    /// Embedding model reference, e.g. `hashing:384` or `http:text-embedding-3-small`.
    pub model: Option<String>,
    /// Number of texts embedded per backend call.
    pub batch_size: Option<usize>,
    /// Base URL of a remote embedding service.
    pub endpoint: Option<String>,
    /// Request timeout for remote embedding calls.
    pub timeout_secs: Option<u64>,
    /// Term list, only read by rules that delegate their terms.
    pub terms: Option<Vec<String>>,
}

impl StrategyParams {
    /// Returns `self` with every field set in `over` replaced by that value.
    #[must_use]
    pub fn overlay(&self, over: &StrategyParams) -> StrategyParams {
        StrategyParams {
            threshold: over.threshold.or(self.threshold),
            model: over.model.clone().or_else(|| self.model.clone()),
            batch_size: over.batch_size.or(self.batch_size),
            endpoint: over.endpoint.clone().or_else(|| self.endpoint.clone()),
            timeout_secs: over.timeout_secs.or(self.timeout_secs),
            terms: over.terms.clone().or_else(|| self.terms.clone()),
        }
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    #[must_use]
    pub fn with_terms<S: Into<String>>(mut self, terms: impl IntoIterator<Item = S>) -> Self {
        self.terms = Some(terms.into_iter().map(Into::into).collect());
        self
    }
}

/// Per-strategy parameters keyed by strategy.
pub type StrategyOverrides = BTreeMap<StrategyKind, StrategyParams>;
