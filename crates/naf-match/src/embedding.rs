//! Embedding backends for semantic matching.
//!
//! A backend turns a batch of texts into fixed-length vectors. Two are
//! built in and selected by a model reference string:
//!
//! - `hashing:<dims>`: local character-trigram feature hashing. Deterministic
//!   and dependency free, suitable for offline runs and tests.
//! - `http:<model>`: an OpenAI-compatible `POST {endpoint}/embeddings` service.
//!
//! Loaded backends are cached per reference in a [`ModelStore`]; the
//! process-wide store is [`shared_models`].

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Duration;

use naf_model::{NafError, Result, StrategyParams};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

const STRATEGY: &str = "similarity";

/// Default model reference when none is configured.
pub const DEFAULT_MODEL: &str = "hashing:384";

/// Default request timeout for remote backends.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Capability: given texts, return one vector per text.
///
/// Implementations must be safe for concurrent read-only use.
pub trait EmbeddingModel: Send + Sync {
    /// Reference string the model was loaded from.
    fn reference(&self) -> &str;

    /// Embeds `texts`, returning vectors in input order.
    ///
    /// # Errors
    ///
    /// Returns [`NafError::MatchComputation`] when the backend fails.
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

// ============================================================================
// Feature hashing
// ============================================================================

/// Signed feature hashing over word tokens and padded character trigrams.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    reference: String,
    dims: usize,
}

impl HashingEmbedder {
    /// # Errors
    ///
    /// Returns [`NafError::Configuration`] when `dims` is zero.
    pub fn new(dims: usize) -> Result<Self> {
        if dims == 0 {
            return Err(NafError::configuration(
                "hashing embedder needs at least one dimension",
            ));
        }
        Ok(Self {
            reference: format!("hashing:{dims}"),
            dims,
        })
    }

    pub fn dims(&self) -> usize {
        self.dims
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dims];
        let lowered = text.to_lowercase();
        for word in lowered.split_whitespace() {
            self.add_feature(&mut vector, word.as_bytes(), 1.0);
            let padded: Vec<char> = format!(" {word} ").chars().collect();
            for window in padded.windows(3) {
                let gram: String = window.iter().collect();
                self.add_feature(&mut vector, gram.as_bytes(), 0.5);
            }
        }
        vector
    }

    fn add_feature(&self, vector: &mut [f32], feature: &[u8], weight: f32) {
        let hash = fnv1a(feature);
        // dims is non-zero and fits in usize, so the modulo result does too
        let slot = (hash % self.dims as u64) as usize;
        let sign = if (hash >> 63) == 0 { 1.0 } else { -1.0 };
        vector[slot] += sign * weight;
    }
}

impl EmbeddingModel for HashingEmbedder {
    fn reference(&self) -> &str {
        &self.reference
    }

    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|text| self.embed_one(text)).collect())
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0100_0000_01b3;
    bytes
        .iter()
        .fold(OFFSET, |hash, byte| (hash ^ u64::from(*byte)).wrapping_mul(PRIME))
}

// ============================================================================
// Remote service
// ============================================================================

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingDatum>,
}

#[derive(Deserialize)]
struct EmbeddingDatum {
    #[serde(default)]
    index: Option<usize>,
    embedding: Vec<f32>,
}

/// Client for an OpenAI-compatible embeddings endpoint.
pub struct HttpEmbedder {
    reference: String,
    model: String,
    url: String,
    client: Client,
}

impl HttpEmbedder {
    /// # Errors
    ///
    /// Returns [`NafError::Configuration`] if the HTTP client cannot be built.
    pub fn new(model: &str, endpoint: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NafError::configuration(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            reference: format!("http:{model}"),
            model: model.to_string(),
            url: format!("{}/embeddings", endpoint.trim_end_matches('/')),
            client,
        })
    }
}

impl EmbeddingModel for HttpEmbedder {
    fn reference(&self) -> &str {
        &self.reference
    }

    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let failed = |message: String| NafError::match_computation(STRATEGY, message);
        let response = self
            .client
            .post(&self.url)
            .json(&EmbeddingRequest {
                model: &self.model,
                input: texts,
            })
            .send()
            .map_err(|e| failed(format!("embedding request to {} failed: {e}", self.url)))?;
        let status = response.status();
        if !status.is_success() {
            return Err(failed(format!(
                "embedding service at {} returned {status}",
                self.url
            )));
        }
        let body: EmbeddingResponse = response
            .json()
            .map_err(|e| failed(format!("malformed embedding response: {e}")))?;
        if body.data.len() != texts.len() {
            return Err(failed(format!(
                "embedding service returned {} vectors for {} inputs",
                body.data.len(),
                texts.len()
            )));
        }
        order_by_index(body.data, texts.len()).map_err(failed)
    }
}

/// Places each datum at its declared index, or at its position when the
/// service omits indices. Every slot must be filled exactly once.
fn order_by_index(
    data: Vec<EmbeddingDatum>,
    len: usize,
) -> std::result::Result<Vec<Vec<f32>>, String> {
    let mut slots: Vec<Option<Vec<f32>>> = vec![None; len];
    for (position, datum) in data.into_iter().enumerate() {
        let index = datum.index.unwrap_or(position);
        let slot = slots
            .get_mut(index)
            .ok_or_else(|| format!("embedding index {index} out of range"))?;
        if slot.replace(datum.embedding).is_some() {
            return Err(format!("embedding index {index} returned twice"));
        }
    }
    slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| slot.ok_or_else(|| format!("embedding index {index} missing")))
        .collect()
}

// ============================================================================
// Model cache
// ============================================================================

/// Cache of loaded embedding backends keyed by reference and endpoint.
#[derive(Default)]
pub struct ModelStore {
    models: Mutex<HashMap<String, Arc<dyn EmbeddingModel>>>,
}

impl ModelStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a backend under its reference, replacing any cached one.
    pub fn insert(&self, model: Arc<dyn EmbeddingModel>) -> Result<()> {
        let key = cache_key(model.reference(), None);
        self.lock()?.insert(key, model);
        Ok(())
    }

    /// Returns the cached backend for `params`, loading it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`NafError::Configuration`] when the model reference is empty,
    /// malformed or needs an endpoint that is not configured.
    pub fn get_or_load(&self, params: &StrategyParams) -> Result<Arc<dyn EmbeddingModel>> {
        let reference = params
            .model
            .as_deref()
            .map(str::trim)
            .filter(|reference| !reference.is_empty())
            .ok_or_else(|| NafError::configuration("similarity strategy needs a model reference"))?;
        let key = cache_key(reference, params.endpoint.as_deref());
        let mut models = self.lock()?;
        if let Some(model) = models.get(&key) {
            return Ok(Arc::clone(model));
        }
        let model = load_model(reference, params)?;
        info!(model = reference, "loaded embedding model");
        models.insert(key, Arc::clone(&model));
        Ok(model)
    }

    pub fn len(&self) -> usize {
        self.models.lock().map(|models| models.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<String, Arc<dyn EmbeddingModel>>>> {
        self.models
            .lock()
            .map_err(|_| NafError::match_computation(STRATEGY, "model cache lock poisoned"))
    }
}

static SHARED_MODELS: OnceLock<ModelStore> = OnceLock::new();

/// Process-wide model cache. Models are loaded once and reused by every rule.
pub fn shared_models() -> &'static ModelStore {
    SHARED_MODELS.get_or_init(ModelStore::new)
}

fn cache_key(reference: &str, endpoint: Option<&str>) -> String {
    match endpoint {
        Some(endpoint) if reference.starts_with("http:") => format!("{reference}@{endpoint}"),
        _ => reference.to_string(),
    }
}

fn load_model(reference: &str, params: &StrategyParams) -> Result<Arc<dyn EmbeddingModel>> {
    let (scheme, name) = reference.split_once(':').ok_or_else(|| {
        NafError::configuration(format!(
            "model reference '{reference}' must look like hashing:<dims> or http:<model>"
        ))
    })?;
    match scheme {
        "hashing" => {
            let dims: usize = name.parse().map_err(|_| {
                NafError::configuration(format!("invalid hashing dimension in '{reference}'"))
            })?;
            debug!(dims, "using feature-hashing embedder");
            Ok(Arc::new(HashingEmbedder::new(dims)?))
        }
        "http" => {
            let endpoint = params.endpoint.as_deref().ok_or_else(|| {
                NafError::configuration(format!("model '{reference}' needs an endpoint"))
            })?;
            let timeout =
                Duration::from_secs(params.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));
            Ok(Arc::new(HttpEmbedder::new(name, endpoint, timeout)?))
        }
        other => Err(NafError::configuration(format!(
            "unknown embedding backend '{other}' in '{reference}'"
        ))),
    }
}

/// Scales `vector` to unit length. Zero vectors are left as is.
pub fn l2_normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > 0.0 {
        for value in vector.iter_mut() {
            *value /= norm;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn datum(index: Option<usize>, value: f32) -> EmbeddingDatum {
        EmbeddingDatum {
            index,
            embedding: vec![value],
        }
    }

    #[test]
    fn response_is_reordered_by_index() {
        let ordered = order_by_index(vec![datum(Some(1), 2.0), datum(Some(0), 1.0)], 2).unwrap();
        assert_eq!(ordered, vec![vec![1.0], vec![2.0]]);

        let positional = order_by_index(vec![datum(None, 1.0), datum(None, 2.0)], 2).unwrap();
        assert_eq!(positional, vec![vec![1.0], vec![2.0]]);
    }

    #[test]
    fn duplicate_response_index_is_rejected() {
        let err = order_by_index(vec![datum(Some(0), 1.0), datum(Some(0), 2.0)], 2).unwrap_err();
        assert!(err.contains("index 0 returned twice"));
    }

    #[test]
    fn out_of_range_response_index_is_rejected() {
        let err = order_by_index(vec![datum(Some(0), 1.0), datum(Some(5), 2.0)], 2).unwrap_err();
        assert!(err.contains("out of range"));
    }

    #[test]
    fn hashing_is_deterministic() {
        let model = HashingEmbedder::new(64).unwrap();
        let texts = vec!["artisan taxi".to_string()];
        let first = model.embed(&texts).unwrap();
        let second = model.embed(&texts).unwrap();
        assert_eq!(first, second);
        assert_eq!(first[0].len(), 64);
    }

    #[test]
    fn store_caches_by_reference() {
        let store = ModelStore::new();
        let params = StrategyParams::default().with_model("hashing:32");
        let a = store.get_or_load(&params).unwrap();
        let b = store.get_or_load(&params).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn missing_model_reference_is_configuration_error() {
        let store = ModelStore::new();
        let err = store.get_or_load(&StrategyParams::default()).err().unwrap();
        assert!(matches!(err, NafError::Configuration { .. }));
        let err = store
            .get_or_load(&StrategyParams::default().with_model("http:small"))
            .err()
            .unwrap();
        assert!(matches!(err, NafError::Configuration { .. }));
        let err = store
            .get_or_load(&StrategyParams::default().with_model("onnx:minilm"))
            .err()
            .unwrap();
        assert!(matches!(err, NafError::Configuration { .. }));
    }

    #[test]
    fn normalize_yields_unit_vectors() {
        let mut v = vec![3.0, 4.0];
        l2_normalize(&mut v);
        assert!((v[0] - 0.6).abs() < 1e-6);
        assert!((v[1] - 0.8).abs() < 1e-6);
        let mut zero = vec![0.0, 0.0];
        l2_normalize(&mut zero);
        assert_eq!(zero, vec![0.0, 0.0]);
    }
}
