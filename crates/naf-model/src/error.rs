use thiserror::Error;

/// Errors raised while matching and applying relabeling rules.
///
/// Every variant is fatal to the current run.
#[derive(Debug, Error)]
pub enum NafError {
    /// Unknown strategy, missing model reference, invalid pattern.
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// A rule body returned something its adapter cannot accept.
    #[error("contract violation in rule '{rule}': {message}")]
    Contract { rule: String, message: String },

    /// A strategy failed while computing its match vector.
    #[error("strategy '{strategy}' failed: {message}")]
    MatchComputation { strategy: String, message: String },

    /// A rule left the dataset in a state inconsistent with its change kind.
    #[error("data integrity violation in rule '{rule}': {message}")]
    DataIntegrity { rule: String, message: String },

    #[error("column not found: {0}")]
    MissingColumn(String),

    #[error("dataframe error: {0}")]
    Frame(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Failure raised while a named rule was running.
    #[error("rule '{rule}' failed: {source}")]
    Rule {
        rule: String,
        #[source]
        source: Box<NafError>,
    },
}

impl NafError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn contract(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Contract {
            rule: rule.into(),
            message: message.into(),
        }
    }

    pub fn data_integrity(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DataIntegrity {
            rule: rule.into(),
            message: message.into(),
        }
    }

    pub fn match_computation(strategy: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MatchComputation {
            strategy: strategy.into(),
            message: message.into(),
        }
    }

    /// Wraps a dataframe engine error.
    pub fn frame(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Frame(Box::new(source))
    }

    /// Attaches the failing rule's name. Errors that already name a rule are kept as is.
    #[must_use]
    pub fn in_rule(self, rule: &str) -> Self {
        match self {
            Self::Rule { .. } | Self::Contract { .. } | Self::DataIntegrity { .. } => self,
            other => Self::Rule {
                rule: rule.to_string(),
                source: Box::new(other),
            },
        }
    }

    /// The error underneath any rule attribution.
    pub fn root(&self) -> &NafError {
        match self {
            Self::Rule { source, .. } => source.root(),
            other => other,
        }
    }

    /// Name of the rule the error is attributed to, if any.
    pub fn rule_name(&self) -> Option<&str> {
        match self {
            Self::Rule { rule, .. }
            | Self::Contract { rule, .. }
            | Self::DataIntegrity { rule, .. } => Some(rule.as_str()),
            _ => None,
        }
    }

    /// Name of the failing strategy, if the failure came from one.
    pub fn strategy_name(&self) -> Option<&str> {
        match self.root() {
            Self::MatchComputation { strategy, .. } => Some(strategy.as_str()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, NafError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_attribution_wraps_once() {
        let err = NafError::match_computation("similarity", "backend unreachable")
            .in_rule("taxi")
            .in_rule("outer");
        assert_eq!(err.rule_name(), Some("taxi"));
        assert_eq!(err.strategy_name(), Some("similarity"));
        assert!(matches!(err.root(), NafError::MatchComputation { .. }));
        assert!(err.to_string().contains("taxi"));
    }

    #[test]
    fn contract_errors_name_their_rule_once() {
        let err = NafError::contract("taxi", "row count changed").in_rule("taxi");
        assert!(matches!(err, NafError::Contract { .. }));
        assert_eq!(
            err.to_string(),
            "contract violation in rule 'taxi': row count changed"
        );
    }
}
