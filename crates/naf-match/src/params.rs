//! Parameter resolution for rule matching.
//!
//! Parameters come from three layers, later layers winning field by field:
//! built-in defaults, the configuration file, and run-time overrides. Term
//! lists are different: a rule's own terms are always used unless the rule
//! explicitly delegates its terms to the run configuration.

use naf_model::{StrategyKind, StrategyOverrides, StrategyParams};
use serde::{Deserialize, Serialize};

use crate::approximate;
use crate::embedding::{DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
use crate::semantic;

/// Built-in defaults for every strategy.
pub fn builtin_defaults() -> StrategyOverrides {
    let mut defaults = StrategyOverrides::new();
    defaults.insert(StrategyKind::Exact, StrategyParams::default());
    defaults.insert(
        StrategyKind::Approximate,
        StrategyParams::default().with_threshold(approximate::DEFAULT_THRESHOLD),
    );
    defaults.insert(
        StrategyKind::Semantic,
        StrategyParams {
            threshold: Some(semantic::DEFAULT_THRESHOLD),
            model: Some(DEFAULT_MODEL.to_string()),
            batch_size: Some(semantic::DEFAULT_BATCH_SIZE),
            timeout_secs: Some(DEFAULT_TIMEOUT_SECS),
            ..StrategyParams::default()
        },
    );
    defaults
}

/// Overlays `over` onto `base`, strategy by strategy and field by field.
pub fn merge_overrides(base: &StrategyOverrides, over: &StrategyOverrides) -> StrategyOverrides {
    let mut merged = base.clone();
    for (kind, params) in over {
        let current = merged.remove(kind).unwrap_or_default();
        merged.insert(*kind, current.overlay(params));
    }
    merged
}

/// What a rule matches on: its own terms plus strategy exclusions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSpec {
    pub terms: Vec<String>,
    /// Strategies never used for this rule, whatever the run enables.
    pub exclude: Vec<StrategyKind>,
    /// When set, a term list supplied for a strategy replaces `terms`.
    pub delegate_terms: bool,
}

impl MatchSpec {
    pub fn new<S: Into<String>>(terms: impl IntoIterator<Item = S>) -> Self {
        Self {
            terms: terms.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn excluding(mut self, kinds: &[StrategyKind]) -> Self {
        for kind in kinds {
            if !self.exclude.contains(kind) {
                self.exclude.push(*kind);
            }
        }
        self
    }

    #[must_use]
    pub fn delegating_terms(mut self) -> Self {
        self.delegate_terms = true;
        self
    }

    /// Enabled strategies minus this rule's exclusions, order preserved.
    pub fn enabled_strategies(&self, enabled: &[StrategyKind]) -> Vec<StrategyKind> {
        enabled
            .iter()
            .copied()
            .filter(|kind| !self.exclude.contains(kind))
            .collect()
    }

    /// Term list used for one strategy.
    pub fn terms_for(&self, params: &StrategyParams) -> Vec<String> {
        match (&params.terms, self.delegate_terms) {
            (Some(delegated), true) => delegated.clone(),
            _ => self.terms.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exclusions_filter_enabled_strategies() {
        let spec = MatchSpec::new(["taxi"])
            .excluding(&[StrategyKind::Approximate, StrategyKind::Semantic]);
        let enabled = [StrategyKind::Semantic, StrategyKind::Exact, StrategyKind::Approximate];
        assert_eq!(spec.enabled_strategies(&enabled), vec![StrategyKind::Exact]);
    }

    #[test]
    fn external_terms_ignored_without_delegation() {
        let params = StrategyParams::default().with_terms(["boulangerie"]);
        let own = MatchSpec::new(["taxi"]);
        assert_eq!(own.terms_for(&params), vec!["taxi".to_string()]);
        let delegated = MatchSpec::new(["taxi"]).delegating_terms();
        assert_eq!(delegated.terms_for(&params), vec!["boulangerie".to_string()]);
        assert_eq!(
            delegated.terms_for(&StrategyParams::default()),
            vec!["taxi".to_string()]
        );
    }

    #[test]
    fn overrides_win_field_by_field() {
        let mut over = StrategyOverrides::new();
        over.insert(
            StrategyKind::Semantic,
            StrategyParams::default().with_threshold(0.55),
        );
        let merged = merge_overrides(&builtin_defaults(), &over);
        let semantic = &merged[&StrategyKind::Semantic];
        assert_eq!(semantic.threshold, Some(0.55));
        assert_eq!(semantic.model.as_deref(), Some(DEFAULT_MODEL));
        assert_eq!(
            merged[&StrategyKind::Approximate].threshold,
            Some(approximate::DEFAULT_THRESHOLD)
        );
    }
}
