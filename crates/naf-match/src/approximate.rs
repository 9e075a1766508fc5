//! Approximate matching with normalized Indel similarity.
//!
//! Scores are on a 0-100 scale and a row matches when any term scores at or
//! above the threshold. Rows are scored on the rayon pool.

use naf_model::{MatchVector, NafError, Result};
use rapidfuzz::fuzz;
use rayon::prelude::*;

use crate::text::normalize_for_scoring;

/// Default threshold on the 0-100 scale.
pub const DEFAULT_THRESHOLD: f64 = 85.0;

#[derive(Debug, Clone)]
pub struct ApproximateStrategy {
    terms: Vec<String>,
    threshold: f64,
}

impl ApproximateStrategy {
    /// # Errors
    ///
    /// Returns [`NafError::Configuration`] if `threshold` is outside `0..=100`.
    pub fn new(terms: &[String], threshold: f64) -> Result<Self> {
        if !(0.0..=100.0).contains(&threshold) {
            return Err(NafError::configuration(format!(
                "fuzzy threshold must be within 0..=100, got {threshold}"
            )));
        }
        let terms = terms
            .iter()
            .map(|term| normalize_for_scoring(term))
            .filter(|term| !term.is_empty())
            .collect();
        Ok(Self { terms, threshold })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Best score of `text` against the term list, in `0..=100`.
    ///
    /// `None` when the text is empty after normalization or there are no terms.
    pub fn best_score(&self, text: &str) -> Option<f64> {
        let text = normalize_for_scoring(text);
        if text.is_empty() || self.terms.is_empty() {
            return None;
        }
        Some(
            self.terms
                .iter()
                .map(|term| score(&text, term))
                .fold(0.0, f64::max),
        )
    }

    pub fn is_match(&self, text: Option<&str>) -> bool {
        text.and_then(|text| self.best_score(text))
            .is_some_and(|best| best >= self.threshold)
    }

    pub fn match_column(&self, texts: &[Option<String>]) -> MatchVector {
        if self.terms.is_empty() {
            return MatchVector::none(texts.len());
        }
        texts
            .par_iter()
            .map(|text| self.is_match(text.as_deref()))
            .collect::<Vec<bool>>()
            .into()
    }
}

/// Similarity of two already normalized strings, clamped to `0..=100`.
fn score(left: &str, right: &str) -> f64 {
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }
    (fuzz::ratio(left.chars(), right.chars()) * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strategy(terms: &[&str], threshold: f64) -> ApproximateStrategy {
        let terms: Vec<String> = terms.iter().map(|t| (*t).to_string()).collect();
        ApproximateStrategy::new(&terms, threshold).unwrap()
    }

    #[test]
    fn identical_text_scores_full() {
        let s = strategy(&["chauffeur de taxi"], 85.0);
        assert!((s.best_score("Chauffeur de TAXI").unwrap() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn close_spelling_matches() {
        let s = strategy(&["maconnerie generale"], 85.0);
        assert!(s.is_match(Some("maconerie generale")));
        assert!(!s.is_match(Some("boulangerie patisserie")));
    }

    #[test]
    fn empty_text_never_matches() {
        let s = strategy(&["taxi"], 0.0);
        assert!(!s.is_match(Some("")));
        assert!(!s.is_match(Some("!!!")));
        assert!(!s.is_match(None));
    }

    #[test]
    fn threshold_tie_counts_as_match() {
        let s = strategy(&["taxi"], 100.0);
        assert!(s.is_match(Some("taxi")));
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        let terms = vec!["taxi".to_string()];
        assert!(ApproximateStrategy::new(&terms, 120.0).is_err());
        assert!(ApproximateStrategy::new(&terms, -1.0).is_err());
    }
}
