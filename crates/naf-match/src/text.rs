//! Text preprocessing shared by the scoring strategies.

/// Normalizes text before approximate scoring.
///
/// Lowercases, replaces every non-alphanumeric character with a space,
/// collapses whitespace runs and trims.
pub fn normalize_for_scoring(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns the text if it has any non-whitespace content.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_punctuation_and_case() {
        assert_eq!(normalize_for_scoring("  Artisan-TAXI, Paris! "), "artisan taxi paris");
        assert_eq!(normalize_for_scoring("l'économie"), "l économie");
        assert_eq!(normalize_for_scoring("--"), "");
    }

    #[test]
    fn non_blank_filters_whitespace() {
        assert_eq!(non_blank(Some("  ")), None);
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some("taxi")), Some("taxi"));
    }
}
