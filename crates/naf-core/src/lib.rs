//! Rule engine for NAF code relabeling.
//!
//! - [`dataset`]: the string-typed frame rules operate on
//! - [`cleaning`]: text normalization producing the matching columns
//! - [`rule`]: rule bodies and the audit adapters journaling their effects
//! - [`registry`]: tag-indexed rule registry with idempotent discovery
//! - [`rules`]: the built-in rule catalog
//! - [`engine`]: sequential application of a tag's rules
//! - [`config`]: TOML engine configuration

pub mod cleaning;
pub mod config;
pub mod dataset;
pub mod engine;
pub mod registry;
pub mod rule;
pub mod rules;

pub use cleaning::{clean_text, prepare_text_columns};
pub use config::{ColumnConfig, ConfigError, EngineConfig, load_config, parse_config};
pub use dataset::Dataset;
pub use engine::{ApplyReport, RuleSummary, apply_rules};
pub use registry::{CatalogUnit, RegisteredRule, RuleMeta, RuleRegistry};
pub use rule::{
    CreationBody, InstrumentedRule, ModificationBody, RuleContext, RuleOutcome, RunSettings,
    TrackChanges, TrackNew, track_changes, track_new,
};
pub use rules::{SideConstraint, SyntheticRows, TermRule, Variant};
