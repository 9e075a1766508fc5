//! Rule registry and discovery.
//!
//! The registry is an explicit object: build it once with
//! [`RuleRegistry::discover`], then pass it by reference to the orchestrator.
//! Rules are selected by tag and returned in registration order, stably
//! sorted by their `order` metadata.
//!
//! Two rules may share a name. Lookup is by tag, so a collision does not
//! change what runs, but it makes journals ambiguous and is logged as a
//! warning.

use naf_model::ChangeKind;
use tracing::{debug, warn};

use crate::rule::{InstrumentedRule, RuleContext, RuleOutcome};
use crate::dataset::Dataset;
use crate::rules::CATALOG;

/// Descriptive metadata of a registered rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMeta {
    pub name: String,
    pub tags: Vec<String>,
    pub description: String,
    /// Sort key within a tag; equal keys keep registration order.
    pub order: i32,
}

impl RuleMeta {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tags: Vec::new(),
            description: String::new(),
            order: 0,
        }
    }

    #[must_use]
    pub fn tags<S: Into<String>>(mut self, tags: impl IntoIterator<Item = S>) -> Self {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// An immutable registry entry.
pub struct RegisteredRule {
    meta: RuleMeta,
    rule: Box<dyn InstrumentedRule>,
}

impl RegisteredRule {
    pub fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    pub fn name(&self) -> &str {
        &self.meta.name
    }

    pub fn change_kind(&self) -> ChangeKind {
        self.rule.change_kind()
    }

    pub fn run(&self, dataset: Dataset, ctx: &RuleContext<'_>) -> naf_model::Result<RuleOutcome> {
        self.rule.run(dataset, ctx)
    }
}

/// A built-in group of rules.
pub struct CatalogUnit {
    pub name: &'static str,
    pub register: fn(&mut RuleRegistry),
}

#[derive(Default)]
pub struct RuleRegistry {
    rules: Vec<RegisteredRule>,
    catalog_loaded: bool,
}

impl RuleRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in rule.
    pub fn discover() -> Self {
        let mut registry = Self::new();
        registry.load_catalog();
        registry
    }

    /// Registers every built-in catalog unit. Calling it again is a no-op.
    pub fn load_catalog(&mut self) {
        if self.catalog_loaded {
            debug!("rule catalog already loaded");
            return;
        }
        for unit in CATALOG {
            let before = self.rules.len();
            (unit.register)(self);
            debug!(unit = unit.name, rules = self.rules.len() - before, "registered catalog unit");
        }
        self.catalog_loaded = true;
    }

    pub fn is_catalog_loaded(&self) -> bool {
        self.catalog_loaded
    }

    /// Registers a rule with its tags and description.
    pub fn register<S: Into<String>>(
        &mut self,
        name: &str,
        tags: impl IntoIterator<Item = S>,
        description: &str,
        rule: impl InstrumentedRule + 'static,
    ) {
        self.register_with(
            RuleMeta::new(name).tags(tags).description(description),
            rule,
        );
    }

    /// Registers a rule with full metadata.
    pub fn register_with(&mut self, meta: RuleMeta, rule: impl InstrumentedRule + 'static) {
        if self.rules.iter().any(|existing| existing.meta.name == meta.name) {
            warn!(rule = %meta.name, "a rule with this name is already registered");
        }
        self.rules.push(RegisteredRule {
            meta,
            rule: Box::new(rule),
        });
    }

    /// Rules carrying `tag`, sorted by `order` then registration order.
    pub fn rules_with_tag(&self, tag: &str) -> Vec<&RegisteredRule> {
        let mut selected: Vec<&RegisteredRule> =
            self.rules.iter().filter(|rule| rule.meta.has_tag(tag)).collect();
        selected.sort_by_key(|rule| rule.meta.order);
        selected
    }

    /// Every registered rule in registration order.
    pub fn rules(&self) -> impl Iterator<Item = &RegisteredRule> {
        self.rules.iter()
    }

    /// Distinct tags in first-registered order.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = Vec::new();
        for rule in &self.rules {
            for tag in &rule.meta.tags {
                if !tags.contains(&tag.as_str()) {
                    tags.push(tag);
                }
            }
        }
        tags
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
