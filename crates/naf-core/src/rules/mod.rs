//! Built-in rule catalog.
//!
//! Rules are declared as data: a [`TermRule`] relabels rows whose text
//! matches its terms, a [`SyntheticRows`] rule appends labelled rows to
//! oversample a code. Each catalog unit registers its rules through a plain
//! function listed in [`CATALOG`].

pub mod augment;
pub mod naf_2025;
pub mod naf_rev2;

use std::collections::BTreeMap;

use naf_match::MatchSpec;
use naf_model::columns::{LIASSE_NUMERO, LIBELLE};
use naf_model::{MatchVector, NafError, Result};

use crate::dataset::Dataset;
use crate::registry::{CatalogUnit, RuleMeta, RuleRegistry};
use crate::rule::{CreationBody, ModificationBody, RuleContext, TrackChanges, TrackNew};

/// Every built-in catalog unit, in discovery order.
pub const CATALOG: &[CatalogUnit] = &[
    CatalogUnit {
        name: "naf_2025",
        register: naf_2025::register,
    },
    CatalogUnit {
        name: "naf_2025::augment",
        register: augment::register,
    },
    CatalogUnit {
        name: "naf_rev2",
        register: naf_rev2::register,
    },
];

/// Restricts which matched rows a term rule relabels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideConstraint {
    pub column: String,
    pub allowed: Vec<String>,
    /// Null (or a missing column) satisfies the constraint.
    pub allow_null: bool,
}

impl SideConstraint {
    pub fn new<S: Into<String>>(
        column: &str,
        allowed: impl IntoIterator<Item = S>,
        allow_null: bool,
    ) -> Self {
        Self {
            column: column.to_string(),
            allowed: allowed.into_iter().map(Into::into).collect(),
            allow_null,
        }
    }

    /// Row-wise evaluation against the dataset's current values.
    pub fn mask(&self, dataset: &Dataset) -> Result<Vec<bool>> {
        Ok(dataset
            .text_values_or_null(&self.column)?
            .iter()
            .map(|value| match value {
                Some(value) => self.allowed.iter().any(|allowed| allowed == value),
                None => self.allow_null,
            })
            .collect())
    }
}

/// Assigns `code` to `column` on rows matching `spec`.
#[derive(Debug, Clone)]
pub struct TermRule {
    pub column: String,
    pub code: String,
    pub spec: MatchSpec,
    pub constraint: Option<SideConstraint>,
}

impl TermRule {
    pub fn new(column: &str, code: &str, spec: MatchSpec) -> Self {
        Self {
            column: column.to_string(),
            code: code.to_string(),
            spec,
            constraint: None,
        }
    }

    #[must_use]
    pub fn constrained(mut self, constraint: SideConstraint) -> Self {
        self.constraint = Some(constraint);
        self
    }

    /// Registers the rule wrapped in its modification adapter.
    pub fn register(self, registry: &mut RuleRegistry, meta: RuleMeta) {
        let column = self.column.clone();
        registry.register_with(meta, TrackChanges::new(column, self));
    }
}

impl ModificationBody for TermRule {
    fn apply(&self, mut dataset: Dataset, ctx: &RuleContext<'_>) -> Result<(Dataset, MatchVector)> {
        let hits = ctx.match_rows(&dataset, &self.spec)?;
        // Rows failing the constraint stay untouched but are still reported.
        let selected = match &self.constraint {
            Some(constraint) => hits.and_mask(&constraint.mask(&dataset)?),
            None => hits.clone(),
        };
        dataset.assign_where(&self.column, &selected, &self.code)?;
        Ok((dataset, hits))
    }
}

/// One flavour of synthetic row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    /// Appended to the identifier after the row index.
    pub suffix: String,
    pub extra: Vec<(String, String)>,
    pub code: String,
}

impl Variant {
    pub fn new(suffix: &str, code: &str) -> Self {
        Self {
            suffix: suffix.to_string(),
            extra: Vec::new(),
            code: code.to_string(),
        }
    }

    #[must_use]
    pub fn with(mut self, column: &str, value: &str) -> Self {
        self.extra.push((column.to_string(), value.to_string()));
        self
    }
}

/// Appends `count` rows per variant, cycling through `labels`.
///
/// Row `i` of a variant gets the identifier `{id_prefix}{i}{suffix}`.
#[derive(Debug, Clone)]
pub struct SyntheticRows {
    pub column: String,
    pub id_prefix: String,
    pub labels: Vec<String>,
    pub count: usize,
    pub variants: Vec<Variant>,
}

impl SyntheticRows {
    /// A single-variant generator assigning `code`.
    pub fn new(column: &str, id_prefix: &str, code: &str, labels: &[&str], count: usize) -> Self {
        Self {
            column: column.to_string(),
            id_prefix: id_prefix.to_string(),
            labels: labels.iter().map(|label| (*label).to_string()).collect(),
            count,
            variants: vec![Variant::new("", code)],
        }
    }

    #[must_use]
    pub fn with_variants(mut self, variants: Vec<Variant>) -> Self {
        self.variants = variants;
        self
    }

    /// Registers the rule wrapped in its creation adapter.
    pub fn register(self, registry: &mut RuleRegistry, meta: RuleMeta) {
        let column = self.column.clone();
        registry.register_with(meta, TrackNew::new(column, self));
    }

    fn rows(&self, count: usize) -> Vec<BTreeMap<String, String>> {
        let mut rows = Vec::with_capacity(count * self.variants.len());
        for i in 0..count {
            let label = &self.labels[i % self.labels.len()];
            for variant in &self.variants {
                let mut row = BTreeMap::new();
                row.insert(
                    LIASSE_NUMERO.to_string(),
                    format!("{}{i}{}", self.id_prefix, variant.suffix),
                );
                row.insert(LIBELLE.to_string(), label.clone());
                for (column, value) in &variant.extra {
                    row.insert(column.clone(), value.clone());
                }
                row.insert(self.column.clone(), variant.code.clone());
                rows.push(row);
            }
        }
        rows
    }
}

impl CreationBody for SyntheticRows {
    fn apply(&self, mut dataset: Dataset, ctx: &RuleContext<'_>) -> Result<Dataset> {
        if self.labels.is_empty() {
            return Err(NafError::configuration(format!(
                "synthetic rule '{}' has no base labels",
                ctx.rule_name
            )));
        }
        let count = ctx.settings.synthetic_count.unwrap_or(self.count);
        dataset.append_rows(&self.rows(count))?;
        Ok(dataset)
    }
}
