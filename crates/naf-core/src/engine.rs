//! Sequential rule application.
//!
//! Rules selected by tag run one after another against a dataset passed by
//! ownership from rule to rule, so each rule sees every earlier rule's
//! effects. Journals are bucketed by change kind and concatenated as
//! modifications first, then creations, each bucket in rule order.
//!
//! Any rule failure aborts the run. The error names the failing rule and,
//! for match failures, the failing strategy.

use naf_match::ModelStore;
use naf_model::{ChangeKind, Journal, NafError, Result};
use serde::Serialize;
use tracing::{debug, info, info_span};

use crate::dataset::Dataset;
use crate::registry::RuleRegistry;
use crate::rule::{RuleContext, RunSettings};

/// Per-rule outcome recorded in an [`ApplyReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleSummary {
    pub name: String,
    pub change: ChangeKind,
    pub journal_rows: usize,
    /// Dataset height after the rule ran.
    pub dataset_rows: usize,
}

/// Final state of a rule-application run.
#[derive(Debug)]
pub struct ApplyReport {
    pub dataset: Dataset,
    pub journal: Journal,
    /// One summary per executed rule, in execution order.
    pub rules: Vec<RuleSummary>,
}

impl ApplyReport {
    pub fn modified_rows(&self) -> usize {
        self.journal.count_of(ChangeKind::Modification)
    }

    pub fn created_rows(&self) -> usize {
        self.journal.count_of(ChangeKind::Creation)
    }
}

/// Applies every rule carrying `tag` to `dataset`.
///
/// An unknown tag selects no rule and returns the dataset unchanged with an
/// empty journal.
///
/// # Errors
///
/// Returns the first rule failure, attributed to its rule name. A journal
/// mixing change kinds is reported as a contract violation.
pub fn apply_rules(
    dataset: Dataset,
    registry: &RuleRegistry,
    tag: &str,
    settings: &RunSettings,
    models: &ModelStore,
) -> Result<ApplyReport> {
    let selected = registry.rules_with_tag(tag);
    info!(
        tag,
        rules = selected.len(),
        rows = dataset.height(),
        strategies = ?settings.enabled,
        "applying rules"
    );

    let mut dataset = dataset;
    let mut modifications: Vec<Journal> = Vec::new();
    let mut creations: Vec<Journal> = Vec::new();
    let mut summaries = Vec::with_capacity(selected.len());

    for rule in selected {
        let name = rule.name();
        let span = info_span!("rule", rule = name);
        let _guard = span.enter();

        let ctx = RuleContext {
            rule_name: name,
            settings,
            models,
        };
        let outcome = rule.run(dataset, &ctx).map_err(|error| error.in_rule(name))?;
        dataset = outcome.dataset;
        let journal = outcome.journal;

        if !journal.is_uniform() {
            return Err(NafError::contract(
                name,
                "journal mixes modification and creation entries",
            ));
        }

        summaries.push(RuleSummary {
            name: name.to_string(),
            change: journal.change_kind().unwrap_or_else(|| rule.change_kind()),
            journal_rows: journal.len(),
            dataset_rows: dataset.height(),
        });

        match journal.change_kind() {
            None => debug!("rule matched no rows"),
            Some(ChangeKind::Modification) => {
                info!(rows = journal.len(), "rule modified rows");
                modifications.push(journal);
            }
            Some(ChangeKind::Creation) => {
                info!(rows = journal.len(), "rule created rows");
                creations.push(journal);
            }
        }
    }

    let journal = if modifications.is_empty() && creations.is_empty() {
        Journal::new(settings.modification_context.iter().cloned())
    } else {
        Journal::concat(modifications.into_iter().chain(creations))
    };

    info!(
        journal_rows = journal.len(),
        rows = dataset.height(),
        "rule application complete"
    );
    Ok(ApplyReport {
        dataset,
        journal,
        rules: summaries,
    })
}
