use naf_model::{MatchVector, NafError, Result};
use regex::{Regex, RegexBuilder};

use crate::text::non_blank;

/// Case-insensitive containment of any term, as one alternation pattern.
///
/// Terms are regular-expression fragments and are joined unescaped, so a
/// term may itself carry pattern syntax.
#[derive(Debug, Clone)]
pub struct ExactStrategy {
    pattern: Option<Regex>,
}

impl ExactStrategy {
    /// Compiles the alternation of `terms`.
    ///
    /// # Errors
    ///
    /// Returns [`NafError::Configuration`] if the combined pattern does not compile.
    pub fn new(terms: &[String]) -> Result<Self> {
        let fragments: Vec<&str> = terms
            .iter()
            .map(String::as_str)
            .filter(|term| !term.trim().is_empty())
            .collect();
        if fragments.is_empty() {
            return Ok(Self { pattern: None });
        }
        let source = fragments.join("|");
        let pattern = RegexBuilder::new(&source)
            .case_insensitive(true)
            .build()
            .map_err(|e| NafError::configuration(format!("invalid regex term list: {e}")))?;
        Ok(Self {
            pattern: Some(pattern),
        })
    }

    pub fn is_match(&self, text: Option<&str>) -> bool {
        match (&self.pattern, non_blank(text)) {
            (Some(pattern), Some(text)) => pattern.is_match(text),
            _ => false,
        }
    }

    pub fn match_column(&self, texts: &[Option<String>]) -> MatchVector {
        if self.pattern.is_none() {
            return MatchVector::none(texts.len());
        }
        texts.iter().map(|text| self.is_match(text.as_deref())).collect()
    }
}
