//! Semantic matching by embedding cosine similarity.

use std::collections::HashMap;
use std::sync::Arc;

use naf_model::{MatchVector, NafError, Result};
use tracing::debug;

use crate::embedding::{EmbeddingModel, l2_normalize};
use crate::text::non_blank;

/// Default cosine-similarity threshold.
pub const DEFAULT_THRESHOLD: f64 = 0.70;
/// Default number of texts per embedding call.
pub const DEFAULT_BATCH_SIZE: usize = 256;

/// Matches a row when the cosine similarity between its text embedding and
/// any term embedding reaches the threshold.
///
/// Term embeddings are computed once at construction. Texts are embedded in
/// batches, each distinct text once.
pub struct SemanticStrategy {
    model: Arc<dyn EmbeddingModel>,
    term_vectors: Vec<Vec<f32>>,
    threshold: f64,
    batch_size: usize,
}

impl SemanticStrategy {
    /// # Errors
    ///
    /// Returns [`NafError::Configuration`] for an out-of-range threshold or a
    /// zero batch size, and propagates backend failures from embedding the terms.
    pub fn new(
        model: Arc<dyn EmbeddingModel>,
        terms: &[String],
        threshold: f64,
        batch_size: usize,
    ) -> Result<Self> {
        if !(-1.0..=1.0).contains(&threshold) {
            return Err(NafError::configuration(format!(
                "similarity threshold must be within -1..=1, got {threshold}"
            )));
        }
        if batch_size == 0 {
            return Err(NafError::configuration("similarity batch_size must be positive"));
        }
        let terms: Vec<String> = terms
            .iter()
            .filter(|term| !term.trim().is_empty())
            .cloned()
            .collect();
        let term_vectors = if terms.is_empty() {
            Vec::new()
        } else {
            embed_normalized(model.as_ref(), &terms, None)?
        };
        Ok(Self {
            model,
            term_vectors,
            threshold,
            batch_size,
        })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    fn dims(&self) -> Option<usize> {
        self.term_vectors.first().map(Vec::len)
    }

    /// Highest cosine similarity between `vector` and any term, clamped to `-1..=1`.
    fn best_similarity(&self, vector: &[f32]) -> Option<f64> {
        self.term_vectors
            .iter()
            .map(|term| {
                let dot: f32 = term.iter().zip(vector).map(|(a, b)| a * b).sum();
                f64::from(dot).clamp(-1.0, 1.0)
            })
            .reduce(f64::max)
    }

    /// # Errors
    ///
    /// Returns [`NafError::MatchComputation`] when the backend fails or
    /// returns vectors whose length differs from the term vectors.
    pub fn match_column(&self, texts: &[Option<String>]) -> Result<MatchVector> {
        if self.term_vectors.is_empty() {
            return Ok(MatchVector::none(texts.len()));
        }

        let mut unique: Vec<String> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();
        for text in texts.iter().filter_map(|text| non_blank(text.as_deref())) {
            if !positions.contains_key(text) {
                positions.insert(text, unique.len());
                unique.push(text.to_string());
            }
        }

        let mut hits = vec![false; unique.len()];
        for (batch_index, batch) in unique.chunks(self.batch_size).enumerate() {
            let vectors = embed_normalized(self.model.as_ref(), batch, self.dims())?;
            for (offset, vector) in vectors.iter().enumerate() {
                hits[batch_index * self.batch_size + offset] = self
                    .best_similarity(vector)
                    .is_some_and(|best| best >= self.threshold);
            }
        }
        debug!(
            model = self.model.reference(),
            distinct_texts = unique.len(),
            "computed semantic similarities"
        );

        Ok(texts
            .iter()
            .map(|text| {
                non_blank(text.as_deref())
                    .and_then(|text| positions.get(text))
                    .is_some_and(|index| hits[*index])
            })
            .collect())
    }
}

/// Embeds `texts` and L2-normalizes the result.
///
/// Every vector must have `dims` components, or the length of the first
/// vector when `dims` is `None`.
fn embed_normalized(
    model: &dyn EmbeddingModel,
    texts: &[String],
    dims: Option<usize>,
) -> Result<Vec<Vec<f32>>> {
    let failed = |message: String| NafError::match_computation("similarity", message);
    let mut vectors = model.embed(texts)?;
    if vectors.len() != texts.len() {
        return Err(failed(format!(
            "model {} returned {} vectors for {} texts",
            model.reference(),
            vectors.len(),
            texts.len()
        )));
    }
    let expected = dims.or_else(|| vectors.first().map(Vec::len));
    for (text, vector) in texts.iter().zip(&mut vectors) {
        if vector.is_empty() || Some(vector.len()) != expected {
            return Err(failed(format!(
                "model {} returned a {}-dimensional vector for '{text}', expected {}",
                model.reference(),
                vector.len(),
                expected.unwrap_or_default()
            )));
        }
        l2_normalize(vector);
    }
    Ok(vectors)
}
