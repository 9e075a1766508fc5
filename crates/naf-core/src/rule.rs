//! Rule bodies and the audit adapters that instrument them.
//!
//! A rule body is plain logic over the dataset. It receives the dataset by
//! value and hands it back, so exactly one rule owns it at a time. One
//! adapter exists per change kind:
//!
//! - [`TrackChanges`] wraps a [`ModificationBody`], which returns the dataset
//!   and the match vector of the rows it relabeled. Every matched row is
//!   journaled with the target value before and after the body ran.
//! - [`TrackNew`] wraps a [`CreationBody`], which returns the dataset with
//!   rows appended. Every appended row is journaled with a null before-value.
//!
//! Adapters only observe: they never touch rows the body did not touch.

use naf_match::{MatchSpec, ModelStore, MultiMatcher};
use naf_model::{
    ChangeKind, Journal, JournalEntry, MatchVector, NafError, Result, StrategyKind,
    StrategyOverrides,
};
use naf_model::columns::{CREATION_CONTEXT, MODIFICATION_CONTEXT};
use tracing::debug;

use crate::dataset::Dataset;

/// Settings shared by every rule in a run.
#[derive(Debug, Clone)]
pub struct RunSettings {
    /// Strategies enabled for the run, before per-rule exclusions.
    pub enabled: Vec<StrategyKind>,
    /// Fully resolved parameters per strategy.
    pub params: StrategyOverrides,
    /// Cleaned text columns rules match against.
    pub text_columns: Vec<String>,
    pub modification_context: Vec<String>,
    pub creation_context: Vec<String>,
    /// Overrides the row count of synthetic-row rules.
    pub synthetic_count: Option<usize>,
}

impl RunSettings {
    pub fn new(enabled: Vec<StrategyKind>, params: StrategyOverrides) -> Self {
        let owned = |names: &[&str]| -> Vec<String> {
            names.iter().map(|name| (*name).to_string()).collect()
        };
        Self {
            enabled,
            params,
            text_columns: Vec::new(),
            modification_context: owned(MODIFICATION_CONTEXT),
            creation_context: owned(CREATION_CONTEXT),
            synthetic_count: None,
        }
    }

    #[must_use]
    pub fn with_text_columns(mut self, columns: Vec<String>) -> Self {
        self.text_columns = columns;
        self
    }

    #[must_use]
    pub fn with_synthetic_count(mut self, count: Option<usize>) -> Self {
        self.synthetic_count = count;
        self
    }
}

/// What a rule body can see besides the dataset.
pub struct RuleContext<'a> {
    pub rule_name: &'a str,
    pub settings: &'a RunSettings,
    pub models: &'a ModelStore,
}

impl RuleContext<'_> {
    /// Computes the match vector for `spec` against the dataset's current state.
    ///
    /// # Errors
    ///
    /// Fails if a text column is missing, a strategy is misconfigured, or a
    /// strategy fails while matching.
    pub fn match_rows(&self, dataset: &Dataset, spec: &MatchSpec) -> Result<MatchVector> {
        let matcher =
            MultiMatcher::for_spec(spec, &self.settings.enabled, &self.settings.params, self.models)?;
        if matcher.is_empty() {
            return Ok(MatchVector::none(dataset.height()));
        }
        let columns = self
            .settings
            .text_columns
            .iter()
            .map(|name| dataset.text_values(name))
            .collect::<Result<Vec<_>>>()?;
        let hits = matcher.match_columns(&columns, dataset.height())?;
        debug!(
            rule = self.rule_name,
            strategies = ?matcher.kinds(),
            matched = hits.count(),
            "computed match vector"
        );
        Ok(hits)
    }
}

/// Rule logic that relabels existing rows.
pub trait ModificationBody: Send + Sync {
    /// Returns the dataset and the rows whose target was (re)assigned.
    fn apply(&self, dataset: Dataset, ctx: &RuleContext<'_>) -> Result<(Dataset, MatchVector)>;
}

impl<F> ModificationBody for F
where
    F: Fn(Dataset, &RuleContext<'_>) -> Result<(Dataset, MatchVector)> + Send + Sync,
{
    fn apply(&self, dataset: Dataset, ctx: &RuleContext<'_>) -> Result<(Dataset, MatchVector)> {
        self(dataset, ctx)
    }
}

/// Rule logic that appends rows.
pub trait CreationBody: Send + Sync {
    /// Returns the dataset with new rows appended after the existing ones.
    fn apply(&self, dataset: Dataset, ctx: &RuleContext<'_>) -> Result<Dataset>;
}

impl<F> CreationBody for F
where
    F: Fn(Dataset, &RuleContext<'_>) -> Result<Dataset> + Send + Sync,
{
    fn apply(&self, dataset: Dataset, ctx: &RuleContext<'_>) -> Result<Dataset> {
        self(dataset, ctx)
    }
}

/// Result of one instrumented rule invocation.
#[derive(Debug)]
pub struct RuleOutcome {
    pub dataset: Dataset,
    pub journal: Journal,
}

/// A rule body wrapped so that it also produces its journal.
pub trait InstrumentedRule: Send + Sync {
    /// Change kind declared by the adapter.
    fn change_kind(&self) -> ChangeKind;

    fn run(&self, dataset: Dataset, ctx: &RuleContext<'_>) -> Result<RuleOutcome>;
}

/// Modification adapter: journals every row of the body's match vector.
pub struct TrackChanges<B> {
    column: String,
    context: Option<Vec<String>>,
    body: B,
}

impl<B: ModificationBody> TrackChanges<B> {
    /// Tracks `column`, the target the body assigns.
    pub fn new(column: impl Into<String>, body: B) -> Self {
        Self {
            column: column.into(),
            context: None,
            body,
        }
    }

    /// Journals these context columns instead of the run's defaults.
    #[must_use]
    pub fn with_context<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.context = Some(columns.into_iter().map(Into::into).collect());
        self
    }
}

impl<B: ModificationBody> InstrumentedRule for TrackChanges<B> {
    fn change_kind(&self) -> ChangeKind {
        ChangeKind::Modification
    }

    fn run(&self, dataset: Dataset, ctx: &RuleContext<'_>) -> Result<RuleOutcome> {
        let rule = ctx.rule_name;
        let height = dataset.height();
        let before = dataset.text_values_or_null(&self.column)?;

        let (dataset, hits) = self.body.apply(dataset, ctx)?;

        if dataset.height() != height {
            return Err(NafError::contract(
                rule,
                format!(
                    "modification rule changed the row count from {height} to {}",
                    dataset.height()
                ),
            ));
        }
        if hits.len() > height {
            return Err(NafError::data_integrity(
                rule,
                format!(
                    "match vector has {} entries for {height} rows",
                    hits.len()
                ),
            ));
        }
        if hits.len() < height {
            return Err(NafError::contract(
                rule,
                format!(
                    "match vector has {} entries, expected one per row ({height})",
                    hits.len()
                ),
            ));
        }

        let context = self
            .context
            .as_ref()
            .unwrap_or(&ctx.settings.modification_context);
        let mut journal = Journal::new(context.iter().cloned());
        for row in hits.matched_rows() {
            journal.push(JournalEntry {
                row,
                context: context.iter().map(|c| dataset.value(c, row)).collect(),
                before: before[row].clone(),
                after: dataset.value(&self.column, row),
                rule_name: rule.to_string(),
                change: ChangeKind::Modification,
            });
        }
        Ok(RuleOutcome { dataset, journal })
    }
}

/// Creation adapter: journals every row appended by the body.
pub struct TrackNew<B> {
    column: String,
    context: Option<Vec<String>>,
    body: B,
}

impl<B: CreationBody> TrackNew<B> {
    pub fn new(column: impl Into<String>, body: B) -> Self {
        Self {
            column: column.into(),
            context: None,
            body,
        }
    }

    #[must_use]
    pub fn with_context<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.context = Some(columns.into_iter().map(Into::into).collect());
        self
    }
}

impl<B: CreationBody> InstrumentedRule for TrackNew<B> {
    fn change_kind(&self) -> ChangeKind {
        ChangeKind::Creation
    }

    fn run(&self, dataset: Dataset, ctx: &RuleContext<'_>) -> Result<RuleOutcome> {
        let rule = ctx.rule_name;
        let height = dataset.height();

        let dataset = self.body.apply(dataset, ctx)?;

        if dataset.height() < height {
            return Err(NafError::data_integrity(
                rule,
                format!(
                    "creation rule shrank the dataset from {height} to {} rows",
                    dataset.height()
                ),
            ));
        }

        let context = self
            .context
            .as_ref()
            .unwrap_or(&ctx.settings.creation_context);
        let mut journal = Journal::new(context.iter().cloned());
        for row in height..dataset.height() {
            journal.push(JournalEntry {
                row,
                context: context.iter().map(|c| dataset.value(c, row)).collect(),
                before: None,
                after: dataset.value(&self.column, row),
                rule_name: rule.to_string(),
                change: ChangeKind::Creation,
            });
        }
        Ok(RuleOutcome { dataset, journal })
    }
}

/// Wraps a modification closure tracking `column`.
pub fn track_changes<F>(column: impl Into<String>, body: F) -> TrackChanges<F>
where
    F: Fn(Dataset, &RuleContext<'_>) -> Result<(Dataset, MatchVector)> + Send + Sync,
{
    TrackChanges::new(column, body)
}

/// Wraps a creation closure tracking `column`.
pub fn track_new<F>(column: impl Into<String>, body: F) -> TrackNew<F>
where
    F: Fn(Dataset, &RuleContext<'_>) -> Result<Dataset> + Send + Sync,
{
    TrackNew::new(column, body)
}
