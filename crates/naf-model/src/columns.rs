//! Column names of the business register extract.

/// Stable record identifier.
pub const LIASSE_NUMERO: &str = "liasse_numero";
/// Free-text activity description.
pub const LIBELLE: &str = "libelle";
/// Legal category code.
pub const CJ: &str = "cj";
/// Filing type.
pub const LIASSE_TYPE: &str = "liasse_type";
/// Permanence flag: `P` permanent, `S` seasonal.
pub const ACTIV_PERM_ET: &str = "activ_perm_et";
/// Retail surface flag.
pub const ACTIV_SURF_ET: &str = "activ_surf_et";

/// Target code under the 2025 classification.
pub const NACE_REV2_1_COLUMN: &str = "nace2025";
/// Target code under the rev 2 classification.
pub const NACE_REV2_COLUMN: &str = "apet_finale";

/// Raw text columns cleaned before matching.
pub const DEFAULT_TEXT_COLUMNS: &[&str] = &[LIBELLE];
/// Suffix appended to a raw text column name to name its cleaned copy.
pub const CLEANED_SUFFIX: &str = "_cleaned";

/// Context columns journaled for modification rules.
pub const MODIFICATION_CONTEXT: &[&str] = &[LIASSE_NUMERO, LIBELLE];
/// Context columns journaled for creation rules.
pub const CREATION_CONTEXT: &[&str] = &[LIASSE_NUMERO, LIBELLE, CJ];

/// Name of the cleaned copy of a raw text column.
pub fn cleaned_column(raw: &str, suffix: &str) -> String {
    format!("{raw}{suffix}")
}
