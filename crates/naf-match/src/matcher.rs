//! OR-combination of strategies across text columns.

use naf_model::{MatchVector, NafError, Result, StrategyKind, StrategyOverrides};
use rayon::prelude::*;
use tracing::debug;

use crate::embedding::ModelStore;
use crate::params::MatchSpec;
use crate::strategy::Strategy;

/// A set of built strategies for one term list.
///
/// A row matches when any strategy matches any column. Strategies are
/// evaluated concurrently, one task each; a failure in any of them fails
/// the whole match.
pub struct MultiMatcher {
    strategies: Vec<Strategy>,
}

impl MultiMatcher {
    /// Builds the matcher for `spec` under the run's enabled strategies.
    ///
    /// `params` must hold the resolved parameters for each strategy; a
    /// strategy without an entry uses its built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns the first configuration error raised by a strategy.
    pub fn for_spec(
        spec: &MatchSpec,
        enabled: &[StrategyKind],
        params: &StrategyOverrides,
        models: &ModelStore,
    ) -> Result<Self> {
        let mut strategies = Vec::new();
        for kind in spec.enabled_strategies(enabled) {
            let strategy_params = params.get(&kind).cloned().unwrap_or_default();
            let terms = spec.terms_for(&strategy_params);
            strategies.push(Strategy::build(kind, &terms, &strategy_params, models)?);
        }
        Ok(Self { strategies })
    }

    pub fn from_strategies(strategies: Vec<Strategy>) -> Self {
        Self { strategies }
    }

    pub fn kinds(&self) -> Vec<StrategyKind> {
        self.strategies.iter().map(Strategy::kind).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Matches `columns`, each holding `rows` values, and ORs every result.
    ///
    /// # Errors
    ///
    /// Fails if a column length differs from `rows` or any strategy fails.
    pub fn match_columns(&self, columns: &[Vec<Option<String>>], rows: usize) -> Result<MatchVector> {
        if let Some(column) = columns.iter().find(|column| column.len() != rows) {
            return Err(NafError::match_computation(
                "multi",
                format!("text column has {} values, dataset has {rows} rows", column.len()),
            ));
        }

        let per_strategy: Vec<MatchVector> = self
            .strategies
            .par_iter()
            .map(|strategy| {
                let mut hits = MatchVector::none(rows);
                for column in columns {
                    hits.union_with(&strategy.match_column(column)?);
                }
                debug!(strategy = %strategy.kind(), matched = hits.count(), "strategy finished");
                Ok(hits)
            })
            .collect::<Result<Vec<_>>>()?;

        let mut combined = MatchVector::none(rows);
        for hits in &per_strategy {
            combined.union_with(hits);
        }
        Ok(combined)
    }
}
