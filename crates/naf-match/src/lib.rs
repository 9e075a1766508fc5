#![deny(unsafe_code)]

//! Term matching for relabeling rules.
//!
//! Three strategies decide whether a row's text matches a term list:
//! [`ExactStrategy`] (regular-expression containment), [`ApproximateStrategy`]
//! (edit-distance similarity) and [`SemanticStrategy`] (embedding cosine
//! similarity). [`MultiMatcher`] OR-combines any subset of them across one or
//! more text columns.

pub mod approximate;
pub mod embedding;
pub mod exact;
pub mod matcher;
pub mod params;
pub mod semantic;
pub mod strategy;
pub mod text;

pub use approximate::ApproximateStrategy;
pub use embedding::{EmbeddingModel, HashingEmbedder, HttpEmbedder, ModelStore, shared_models};
pub use exact::ExactStrategy;
pub use matcher::MultiMatcher;
pub use params::{MatchSpec, builtin_defaults, merge_overrides};
pub use semantic::SemanticStrategy;
pub use strategy::Strategy;
