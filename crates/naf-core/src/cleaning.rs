//! Normalization of free-text descriptions before rule matching.
//!
//! Two passes run in order. The first lowercases, turns punctuation and
//! digits into spaces, collapses whitespace and trims; the second drops
//! isolated one-character words and normalizes whitespace again. Text left
//! empty becomes null.

use std::sync::LazyLock;

use naf_model::Result;
use naf_model::columns::cleaned_column;
use regex::Regex;
use tracing::debug;

use crate::dataset::Dataset;

static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("Invalid punctuation regex"));
static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("Invalid digits regex"));
static SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s{2,}").expect("Invalid spaces regex"));
static SINGLE_LETTERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\b").expect("Invalid single-letter regex"));

/// Cleans one description. Returns `None` for missing or emptied text.
pub fn clean_text(raw: Option<&str>) -> Option<String> {
    let lowered = raw?.to_lowercase();

    let text = PUNCTUATION.replace_all(&lowered, " ");
    let text = DIGITS.replace_all(&text, " ");
    let text = SPACES.replace_all(&text, " ");
    let text = text.trim();

    let text = SINGLE_LETTERS.replace_all(text, "");
    let text = SPACES.replace_all(&text, " ");
    let text = text.trim();

    (!text.is_empty()).then(|| text.to_string())
}

/// Writes a cleaned copy of each raw column next to it.
///
/// Returns the names of the cleaned columns, in input order.
pub fn prepare_text_columns(
    dataset: &mut Dataset,
    raw_columns: &[String],
    suffix: &str,
) -> Result<Vec<String>> {
    let mut cleaned_names = Vec::with_capacity(raw_columns.len());
    for raw in raw_columns {
        let cleaned: Vec<Option<String>> = dataset
            .text_values(raw)?
            .iter()
            .map(|value| clean_text(value.as_deref()))
            .collect();
        let name = cleaned_column(raw, suffix);
        debug!(
            column = %raw,
            cleaned = %name,
            empty = cleaned.iter().filter(|v| v.is_none()).count(),
            "cleaned text column"
        );
        dataset.set_column(&name, cleaned)?;
        cleaned_names.push(name);
    }
    Ok(cleaned_names)
}
