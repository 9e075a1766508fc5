use naf_model::{MatchVector, NafError, Result, StrategyKind, StrategyParams};

use crate::approximate::{self, ApproximateStrategy};
use crate::embedding::ModelStore;
use crate::exact::ExactStrategy;
use crate::semantic::{self, SemanticStrategy};

/// A strategy built for one term list, ready to match columns.
pub enum Strategy {
    Exact(ExactStrategy),
    Approximate(ApproximateStrategy),
    Semantic(SemanticStrategy),
}

impl Strategy {
    /// Builds the strategy `kind` for `terms` with fully resolved `params`.
    ///
    /// Semantic models are fetched from `models`, loading them on first use.
    ///
    /// # Errors
    ///
    /// Configuration problems (bad threshold, invalid pattern, missing model
    /// reference) surface here, before any row is matched.
    pub fn build(
        kind: StrategyKind,
        terms: &[String],
        params: &StrategyParams,
        models: &ModelStore,
    ) -> Result<Self> {
        match kind {
            StrategyKind::Exact => Ok(Self::Exact(ExactStrategy::new(terms)?)),
            StrategyKind::Approximate => Ok(Self::Approximate(ApproximateStrategy::new(
                terms,
                params.threshold.unwrap_or(approximate::DEFAULT_THRESHOLD),
            )?)),
            StrategyKind::Semantic => {
                let model = models.get_or_load(params)?;
                Ok(Self::Semantic(SemanticStrategy::new(
                    model,
                    terms,
                    params.threshold.unwrap_or(semantic::DEFAULT_THRESHOLD),
                    params.batch_size.unwrap_or(semantic::DEFAULT_BATCH_SIZE),
                )?))
            }
        }
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            Self::Exact(_) => StrategyKind::Exact,
            Self::Approximate(_) => StrategyKind::Approximate,
            Self::Semantic(_) => StrategyKind::Semantic,
        }
    }

    /// Matches one text column. The result is aligned with `texts`.
    ///
    /// # Errors
    ///
    /// Only the semantic strategy can fail here, when its backend does.
    pub fn match_column(&self, texts: &[Option<String>]) -> Result<MatchVector> {
        let hits = match self {
            Self::Exact(strategy) => strategy.match_column(texts),
            Self::Approximate(strategy) => strategy.match_column(texts),
            Self::Semantic(strategy) => strategy.match_column(texts)?,
        };
        if hits.len() != texts.len() {
            return Err(NafError::match_computation(
                self.kind().as_str(),
                format!("produced {} results for {} rows", hits.len(), texts.len()),
            ));
        }
        Ok(hits)
    }
}
