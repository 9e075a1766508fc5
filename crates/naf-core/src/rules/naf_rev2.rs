//! Relabeling rules for the NAF rev 2 classification.

use naf_match::MatchSpec;
use naf_model::columns::{LIASSE_TYPE, NACE_REV2_COLUMN};

use super::{SideConstraint, TermRule};
use crate::registry::{RuleMeta, RuleRegistry};

pub const TAG: &str = "naf_rev2";

const LMNP_TERMS: &[&str] = &[
    "location de logement",
    "acquisition et mise en location d'un bien immobilier",
    "lmnp",
    "lmnp au regime reel simplifie d imposition",
    "loueur en meuble non professionnel",
    "loueur bailleur non professionnel",
    "location meublee non professionnelle",
    "loueur meuble non professionnel",
    "loueurs en meubles non professionnels",
    "loueur en meubl non professionnel",
    "loueur en meubles non professionnel",
    "location d un logement meuble",
    "location de logements meubles",
    "location de logements meubles non professionelle de longue duree",
    "location d un meuble",
    "location en meuble",
    "location immobiliere en meuble",
    "location meublee",
    "location meublee en residence de services avec bail commercial",
    "location meublee non professionel",
    "location meubles",
    "locations meublees",
    "loueur de meuble",
    "loueur de meuble dans le cadre de l'economie collaborative",
    "loueur en meuble",
    "loueur en meuble non profesionnel",
    "loueur en meublee non professionnel",
    "loueur en meublee non professionnel en residence de services",
];

/// Filing types under which a furnished rental is relabeled.
const LMNP_FILING_TYPES: &[&str] = &["E", "L", "S", "X", "I"];

pub fn register(registry: &mut RuleRegistry) {
    TermRule::new(NACE_REV2_COLUMN, "6820A", MatchSpec::new(LMNP_TERMS.iter().copied()))
        .constrained(SideConstraint::new(
            LIASSE_TYPE,
            LMNP_FILING_TYPES.iter().copied(),
            true,
        ))
        .register(
            registry,
            RuleMeta::new("lmnp_assignment_rev2")
                .tags([TAG])
                .description("Attribue APE 6820A si LMNP détecté dans le libellé selon NAF Rev. 2"),
        );
}
