//! Oversampling rules: append synthetic, already-labelled rows for codes
//! that are rare in the register.

use naf_model::columns::{ACTIV_PERM_ET, NACE_REV2_1_COLUMN};

use super::{SyntheticRows, Variant};
use crate::registry::{RuleMeta, RuleRegistry};
use crate::rules::naf_2025::TAG;

const TAXI_LABELS: &[&str] = &["artisan taxi"];

const SPORT_LABELS: &[&str] = &[
    "moniteur de ski",
    "moniteur de tennis",
    "moniteur de plongée",
    "educateur sportif",
    "professeur de yoga",
    "professeure de yoga",
    "instructeur pilates",
    "cours de pilates",
    "enseignant de tennis",
    "cours de judo et de fitness",
    "entrainement sportif",
    "proposition d'activités physiques adaptées",
    "éducateur sportif pluridisciplinaire",
    "préparation physique, coaching",
    "Enseignement de disciplines sportives et d'activités de loisirs",
    "professeur de fitness",
    "coaching sportif",
    "professeur de golf",
    "entraineur d'escrime",
    "enseignement de l'équitation",
    "monitrice de ski",
    "Moniteur de tennis et de padel",
    "apprentissage du tennis",
    "cours de sport personnalisé",
];

const MEAL_DELIVERY_LABELS: &[&str] = &[
    "livreur uber eat",
    "livraison a domicile uber",
    "livraison a domicile et courses rapides de repas",
    "livraison de repas a domicile",
    "livraison a velo de repas",
    "livraison de commandes de repas",
    "livraison repas",
    "Livraison de repas à domicile en vélo",
    "livrer des repas préparés avec UBER",
    "Service de livraison local de repas",
    "livraison à domicile de courses et de repas à vélo",
    "Livraison à domicile de repas sans préparation",
    "Livrer des repas a domicile a scooter",
    "Livraison à vélo de repas",
    "Activité de coursier indépendant, livraison de repas",
];

const HANDYMEN_LABELS: &[&str] = &[
    "homme toutes mains",
    "homme tout main",
    "hommes a toutes mains",
    "multiservice",
    "multiservices",
    "multi service",
    "multi services",
    "petits bricolages",
    "petit bricolage",
    "travaux de petit bricolage",
];

const EXTERIOR_CLEANING_LABELS: &[&str] = &[
    "nettoyage des exterieurs d une maison a la vapeur basse pression",
    "nettoyage des toitures et des facades",
    "nettoyage des toitures",
    "nettoyage des facades",
    "nettoyage exterieur des batiments",
    "nettoyage de fenetres",
    "entretien de fenetres",
    "nettoyage de vitres",
    "ramoneur",
    "nettoyage des facades et des fenetres",
    "nettoyage des conduits de cheminees et atres",
    "nettoyage des conduits de ventilation",
    "nettoyage industriel specialise",
    "sablage pour l exterieur des batiments",
];

const LMNP_LABELS: &[&str] = &[
    "location de logement",
    "acquisition et mise en location d'un bien immobilier",
    "lmnp",
    "lmnp au regime reel simplifie d imposition",
    "loueur en meuble non professionnel",
    "loeur meuble non professionnel",
    "loueur bailleur non professionnel",
    "location meublee non professionnelle",
    "loueur meuble non professionnel",
    "loueurs en meubles non professionnels",
    "loueur en meubl non professionnel",
    "loueur en meubles non professionnel",
    "location d un logement meuble",
    "location de logements meubles",
    "location de logements meubles non professionelle de longue duree",
    "location de logements meubles non professionel",
    "location d un meuble",
    "location d'un meuble",
    "location en meuble",
    "location immobiliere en meuble",
    "location meublee",
    "location meublee 6820A",
    "location meublee en residence de services avec bail commercial",
    "location meublee non professionnelle",
    "location meubles",
    "locations meublees",
    "loueur de meuble",
    "loueur de meuble dans le cadre de l'economie collaborative",
    "loueur en meuble",
    "loueur en meuble non profesionnel",
    "loueur en meuble non professionnel - code APE 6820A",
    "loueur en meublee non professionnel",
    "loueur en meublee non professionnel en residence de services",
];

const SEASONAL_LMNP_LABELS: &[&str] = &[
    "location de logement saisonniere",
    "lmnp saisonniere",
    "loueur en meuble non professionnel saisonniere",
    "location meublee non professionnelle saisonniere",
    "location saisonniere d un logement meuble",
    "location saisonniere de logements meubles",
    "location meublee saisonniere",
    "location meublee 5590Z saisonniere",
    "locations meublees saisonniere",
    "loueur de meuble saisonniere",
    "loueur en meuble saisonnier",
    "loueur en meuble non professionnel - code APE 5590Z",
    "5590Z autres hebergements",
    "foyers de travailleurs",
];

fn meta(name: &str, description: &str) -> RuleMeta {
    RuleMeta::new(name).tags([TAG]).description(description)
}

pub fn register(registry: &mut RuleRegistry) {
    SyntheticRows::new(NACE_REV2_1_COLUMN, "Jaug4933G", "4933G", TAXI_LABELS, 10_000).register(
        registry,
        meta(
            "augment_taxi",
            "Oversample synthetic rows for car rentals with taxi driver => 4933G",
        ),
    );

    SyntheticRows::new(NACE_REV2_1_COLUMN, "Jaug8551Y", "8551Y", SPORT_LABELS, 1_000).register(
        registry,
        meta(
            "augment_sport_education",
            "Oversample synthetic rows for sport education => 8551Y",
        ),
    );

    SyntheticRows::new(NACE_REV2_1_COLUMN, "Jaug5320H", "5320H", MEAL_DELIVERY_LABELS, 1_000)
        .with_variants(vec![Variant::new("S", "5320H")])
        .register(
            registry,
            meta(
                "augment_meal_delivery",
                "Oversample synthetic rows for meal delivery => 5320H",
            ),
        );

    SyntheticRows::new(NACE_REV2_1_COLUMN, "Jaug8110Y", "8110Y", HANDYMEN_LABELS, 10_000).register(
        registry,
        meta("augment_handymen", "Oversample synthetic rows for handymen => 8110Y"),
    );

    SyntheticRows::new(
        NACE_REV2_1_COLUMN,
        "Jaug8122Y",
        "8122Y",
        EXTERIOR_CLEANING_LABELS,
        10_000,
    )
    .register(
        registry,
        meta(
            "augment_building_exterior_cleaning",
            "Oversample synthetic rows for exterior cleaning => 8122Y",
        ),
    );

    SyntheticRows::new(
        NACE_REV2_1_COLUMN,
        "JaugLogSais",
        "5590Y",
        SEASONAL_LMNP_LABELS,
        300_000,
    )
    .register(
        registry,
        meta(
            "augment_LMNP_saisonniere",
            "Oversample synthetic rows for LMNP - saisonniere => 5590Y",
        ),
    );

    SyntheticRows::new(NACE_REV2_1_COLUMN, "JaugLMNP", "6820G", LMNP_LABELS, 100_000)
        .with_variants(vec![
            Variant::new("S", "5590Y").with(ACTIV_PERM_ET, "S"),
            Variant::new("P", "6820G").with(ACTIV_PERM_ET, "P"),
            Variant::new("", "6820G"),
        ])
        .register(
            registry,
            meta(
                "augment_LMNP_perm_P_S",
                "Oversample synthetic rows for LMNP - perm=S => 5590Y, perm=P => 6820G",
            ),
        );
}
