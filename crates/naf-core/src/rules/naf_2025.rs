//! Relabeling rules for the NAF 2025 classification.

use naf_match::MatchSpec;
use naf_model::StrategyKind::{self, Approximate, Exact, Semantic};
use naf_model::columns::{ACTIV_PERM_ET, ACTIV_SURF_ET, NACE_REV2_1_COLUMN};

use super::{SideConstraint, TermRule};
use crate::registry::{RuleMeta, RuleRegistry};

pub const TAG: &str = "naf_2025";

struct Declared {
    name: &'static str,
    description: &'static str,
    code: &'static str,
    exclude: &'static [StrategyKind],
    terms: &'static [&'static str],
}

const RULES: &[Declared] = &[
    Declared {
        name: "real_state_agent_assignment_2025",
        description: "Règle agents immobiliers version NAF 2025",
        code: "6831Y",
        exclude: &[],
        terms: &[
            "agent commercial en immobilier inscrit au rsac",
            "agent immobilier",
            "mandataire en immobilier inscrit au rsac",
            "mandataire en immobilier",
            "mandataire immobilier",
            "negociateur immobilier independant",
            "conseil et evaluation en rapport avec l achat la vente la location de biens immobiliers pour le compte de tiers",
        ],
    },
    Declared {
        name: "authors_composers_assignment_2025",
        description: "Règle auteur compositeur version NAF 2025",
        code: "9011Y",
        exclude: &[],
        terms: &[
            "artiste auteur",
            "artiste auteurs",
            "artiste autrice",
            "artiste autrices",
            "compositeur",
        ],
    },
    Declared {
        name: "home_hairdresser_assignment_2025",
        description: "Règle coiffure à domicile version NAF 2025",
        code: "9621H",
        exclude: &[],
        terms: &[
            "coiffure mixte à domicile",
            "coiffeur mixte à domicile",
            "coiffeuse mixte à domicile",
        ],
    },
    Declared {
        name: "engineering_consulting_assignment_2025",
        description: "Règle activités d'ingénieurie et conseil technique connexe version NAF 2025",
        code: "7112Y",
        exclude: &[],
        terms: &[
            "ingenieur conseil",
            "ingenieur expert",
            "activite de conseil et metreur de construction batiment",
            "activite de conseil et metreur de construction batiment travaux publics",
            "activite d ingenieurie et de conseil technique connexe",
        ],
    },
    Declared {
        name: "data_analysis_assignment_2025",
        description: "Règle traitement de données version NAF 2025",
        code: "6310Y",
        exclude: &[],
        terms: &[
            "infrastructure informatique traitement de donnees hebergement et activites connexes",
            "architecture de donnees",
            "data architect",
            "architecture logicielle",
            "hebergement d applications",
            "cloud computing",
        ],
    },
    Declared {
        name: "pet_breeding_assignment_2025",
        description: "Règle élevage domestique version NAF 2025",
        code: "0148J",
        exclude: &[],
        terms: &[
            "elevage d autres animaux canin",
            "elevage d autres animaux canins",
            "elevage d autres animaux chat",
            "elevage d autres animaux chats",
            "elevage d autres animaux felin",
            "elevage d autres animaux chien",
            "elevage d autres animaux chiens",
            "elevage d autres animaux chiot",
            "elevage d autres animaux chiots",
            "elevage d animaux domestiques",
        ],
    },
    Declared {
        name: "sheep_breeding_assignment_2025",
        description: "Règle élevage d'ovin version NAF 2025",
        code: "0145Y",
        exclude: &[],
        terms: &["elevage d ovin", "elevage ovin", "elevage ovins", "elvage d ovins"],
    },
    Declared {
        name: "bovine_breeding_assignment_2025",
        description: "Règle élevage de bovins version NAF 2025",
        code: "0142Y",
        exclude: &[Approximate],
        terms: &["elevage de bovin", "elevage bovin", "elevage bovins", "elvage de bovins"],
    },
    Declared {
        name: "sports_instruction_assignment_2025",
        description: "Règle enseignement sportif version NAF 2025",
        code: "8551Y",
        exclude: &[],
        terms: &[
            "professeur de natation",
            "professeur de yoga",
            "coaching sportif",
            "moniteur d equitation",
            "moniteur de ski",
        ],
    },
    Declared {
        name: "art_teaching_assignment_2025",
        description: "Règle enseignement culturel version NAF 2025",
        code: "8552Y",
        exclude: &[],
        terms: &[
            "animation d atelier artistique et pedagogique pour tout publiques",
            "enseignement des arts du spectacle vivant",
            "formation au chant choral pratique en atelier et en spectacle",
            "professeur de musique",
            "professeur independant de danse",
            "professeur independant de musique",
            "professeur independant de piano",
            "repetition de theatre hebdomadaire",
        ],
    },
    Declared {
        name: "graphic_designing_assignment_2025",
        description: "Règle graphistes version NAF 2025",
        code: "7412Y",
        exclude: &[Semantic],
        terms: &[
            "conseil en creation graphique",
            "design ergonomie",
            "ux ui design",
            "ux design",
            "ui design",
            "design graphique",
            "designer graphique",
            "designer graphiste",
            "graphiste conception de supports",
            "infographiste",
            "graphisme",
            "graphiste",
            "conseil graphique",
            "creation graphique",
            "conception graphique",
            "web designer",
            "charte graphique",
            "identite graphique",
            "corporate design",
        ],
    },
    Declared {
        name: "package_delivery_assignment_2025",
        description: "Règle livraison de colis version NAF 2025",
        code: "5320G",
        exclude: &[],
        terms: &[
            "enlevement et livraison de marchandises non reglemente a velo",
            "livraison de colis",
        ],
    },
    Declared {
        name: "meal_delivery_assignment_2025",
        description: "Règle livraison de repas version NAF 2025",
        code: "5320H",
        exclude: &[],
        terms: &[
            "livraison de repas",
            "livraison de repas a domicile",
            "livraison de repas a domicile a velo",
            "livreur de repas",
            "livreur uber eat",
        ],
    },
    Declared {
        name: "touristic_rental_assignment_2025",
        description: "Règle hébergement touristique version NAF 2025",
        code: "5520Y",
        exclude: &[],
        terms: &["location d une residence secondaire", "loueur residence secondaire"],
    },
    Declared {
        name: "mansonry_assignment_2025",
        description: "Règle maçonnerie version NAF 2025",
        code: "4391Y",
        exclude: &[Exact],
        terms: &[
            "macon",
            "maconnerie",
            "maconnerie generale",
            "maconnerie generale renovation",
            "travaux de maconnerie",
            "travaux de maconnerie generale",
            "la realisation de travaux de maconnerie generale",
            "pose de briques",
        ],
    },
    Declared {
        name: "alternative_therapy_assignment_2025",
        description: "Règle médecine alternative version NAF 2025",
        code: "8696Y",
        exclude: &[Approximate, Semantic],
        terms: &[
            "hypnotherapeute",
            "kinesiologie",
            "reflexologie",
            "naprapathie",
            "psycho energeticien",
            "magnetiseur energeticien",
            "pratiques holistiques",
            "energeticien",
            "energeticienne",
            "aromatherapie",
            "ayurveda",
            "phytotherapie",
            "naturopathie",
            "homeopathie",
            "chiropractie",
            "osteopathie",
            "osteopathe",
            "lithotherapie",
            "iridologie",
            "reiki",
        ],
    },
    Declared {
        name: "other_medicine_assignment_2025",
        description: "Règle médecine autre version NAF 2025",
        code: "8699Y",
        exclude: &[Semantic],
        terms: &[
            "psychomotricien",
            "psychomotricienne",
            "psychomotricite",
            "orthophonie",
            "orthophoniste",
            "orthophoniste liberale",
            "orthophoniste liberal",
            "orthophoniste remplacant",
            "orthophoniste remplacante",
        ],
    },
    Declared {
        name: "general_medicine_assignment_2025",
        description: "Règle médecine générale version NAF 2025",
        code: "8621Y",
        exclude: &[],
        terms: &["activite de medecine generale", "medecin generaliste", "medecin general"],
    },
    Declared {
        name: "physiotherapist_assignment_2025",
        description: "Règle masseur-kinésithérapeute version NAF 2025",
        code: "8695Y",
        exclude: &[],
        terms: &[
            "activite de masseur kinesitherapeute",
            "masseur kine",
            "masseuse kine",
            "masseur kinesitherapeute",
            "masseuse kinesitherapeute",
            "masseur kinesitherapeute liberal",
            "masseur kinesitherapeute remplacant",
            "masso kinesitherapie",
            "masseur physiotherapeute",
            "physiotherapie",
            "physiotherapeute",
            "ergotherapeutes",
        ],
    },
    Declared {
        name: "exterior_cleaning_assignment_2025",
        description: "Règle nettoyage extérieur version NAF 2025",
        code: "8122Y",
        exclude: &[Approximate],
        terms: &[
            "nettoyage des exterieurs d une maison a la vapeur basse pression",
            "nettoyage des toitures et des facades",
            "nettoyage exterieur des batiments",
            "ramonage",
            "ramoneur",
        ],
    },
    Declared {
        name: "car_restoring_assignment_2025",
        description: "Règle préparateur esthétique version NAF 2025",
        code: "9531G",
        exclude: &[Approximate, Semantic],
        terms: &[
            "preparateur esthetique",
            "entretien de vehicule automobile",
            "entretien de voiture",
            "reparation de vehicule automobile",
            "reparation de voiture",
        ],
    },
    Declared {
        name: "audiovisual_production_assignment_2025",
        description: "Règle production audiovisuelle version NAF 2025",
        code: "5911G",
        exclude: &[Approximate],
        terms: &["production audiovisuelle"],
    },
    Declared {
        name: "renewable_energy_production_assignment_2025",
        description: "Règle production d'énergie renouvelable version NAF 2025",
        code: "3512Y",
        exclude: &[],
        terms: &[
            "photovoltaique",
            "solaire",
            "eolien",
            "renouvelable",
            "hydroelectricite",
            "solaire thermique",
            "geothermique",
            "biocarburant gazeux",
            "energie des marees",
        ],
    },
    Declared {
        name: "it_programming_assignment_2025",
        description: "Règle programmation informatique version NAF 2025",
        code: "6210Y",
        exclude: &[],
        terms: &[
            "la creation de sites internet",
            "programmeur",
            "webmaster",
            "administrateur de site internet",
            "architecte informatique",
            "architecte logiciel",
            "machine learning engineer",
            "pentester",
            "developpeur cybersecurite",
            "ingenieur cybersecurite",
            "chef de projet informatique",
            "developpeur logiciels de systemes",
            "developpeur applications de jeux",
        ],
    },
    Declared {
        name: "fast_food_assignment_2025",
        description: "Règle restauration rapide version NAF 2025",
        code: "5611J",
        exclude: &[],
        terms: &[
            "restauration rapide sur place et a emporter",
            "preparation de plats cuisines a emporter",
            "fast food",
        ],
    },
    Declared {
        name: "retailing_second_hand_goods_assignment_2025",
        description: "Règle vente de biens d'occasion version NAF 2025",
        code: "4779H",
        exclude: &[],
        terms: &[
            "achat revente sur internet de livres d occasion",
            "achat vente de vinyles d occasion en ligne",
        ],
    },
    Declared {
        name: "tourists_driver_assignment_2025",
        description: "Règle VTC version NAF 2025",
        code: "4933H",
        exclude: &[],
        terms: &[
            "exploitant de voiture de transport avec chauffeur vtc",
            "exploitation de vehicule de tourisme avec chauffeur",
            "conducteur de voiture de tourisme avec chauffeur vtc",
            "conducteur de voiture de transport avec chauffeur",
            "location de voiture avec chauffeur",
            "voiture de tourisme avec chauffeur",
            "voiture de transport avec chauffeur",
            "vehicule de tourisme avec chauffeur",
            "vtc",
        ],
    },
    Declared {
        name: "taxi_drivers_assignment_2025",
        description: "Règle Taxis version NAF 2025",
        code: "4933G",
        exclude: &[Approximate, Semantic],
        terms: &[
            "chauffeur de taxi",
            "artisan taxi",
            "le transport de voyageurs par taxi dans un vehicule de moins de 9 personnes",
            "conducteur de taxi",
        ],
    },
    Declared {
        name: "distance_selling_2025",
        description: "Règle vente à distance version NAF 2025",
        code: "4792J",
        exclude: &[Semantic],
        terms: &[
            "vendeur a domicile vdi",
            "vente a distance sur catalogue specialise",
            "vdi",
            "vdi vente a domicile",
            "vente a domicile vdi",
            "vdi sans stock",
            "vente a domicile sous statut vdi",
        ],
    },
    Declared {
        name: "business_finders_assignment_2025",
        description: "Règle apporteurs d'affaires version NAF 2025",
        code: "8240Y",
        exclude: &[Approximate],
        terms: &[
            "apporteur d affaires",
            "mise en relation des clients et des prestataires de services moyennant des honoraires ou des commissions",
        ],
    },
    Declared {
        name: "metal_manufacturing_assignment_2025",
        description: "Règle fabrication d'objet en metal version NAF 2025",
        code: "2599Y",
        exclude: &[],
        terms: &["fabrication d objets en metal", "fabrication objet en metal"],
    },
    Declared {
        name: "handymen_assignment_2025",
        description: "Règle hommes toutes mains version NAF 2025",
        code: "8110Y",
        exclude: &[],
        terms: &[
            "homme toutes mains",
            "homme tout main",
            "hommes a toutes mains",
            "multiservice",
            "multiservices",
            "multi service",
            "multi services",
        ],
    },
    Declared {
        name: "pet_services_assignment_2025",
        description: "Règle service animaux de compagnie version NAF 2025",
        code: "9699G",
        exclude: &[],
        terms: &[
            "petsitting",
            "pet sitter",
            "pet sitting",
            "cat sitting",
            "dog sitting",
            "garde d animaux",
            "promeneur canin",
            "pension pour animaux domestiques",
            "toilettage",
            "education canine",
            "educateur canin",
            "comportementaliste canin",
            "dressage de chiens",
        ],
    },
    Declared {
        name: "services2individuals_assignment_2025",
        description: "Règle services à la personne version NAF 2025",
        code: "9699H",
        exclude: &[],
        terms: &[
            "wedding planner",
            "astrologues",
            "services de rencontres",
            "services des agences matrimoniales",
            "activites genealogiques",
            "studios de tatouage",
            "percage corporel",
            "organisateurs de ceremonies de mariages",
            "coach personnel",
            "voyance",
            "astrologie",
            "tarot",
            "cartomancie",
            "voyance telephonique",
            "medium",
        ],
    },
    // Kept last: its terms overlap the data and programming rules above.
    Declared {
        name: "IT_consulting_assignment_2025",
        description: "Règle conseil informatique version NAF 2025",
        code: "6220G",
        exclude: &[],
        terms: &[
            "conseil informatique",
            "conseil en analyse de donnees",
            "conseil en data science",
        ],
    },
];

pub fn register(registry: &mut RuleRegistry) {
    for declared in RULES {
        let spec = MatchSpec::new(declared.terms.iter().copied()).excluding(declared.exclude);
        TermRule::new(NACE_REV2_1_COLUMN, declared.code, spec).register(
            registry,
            RuleMeta::new(declared.name)
                .tags([TAG])
                .description(declared.description),
        );
    }

    TermRule::new(
        NACE_REV2_1_COLUMN,
        "5590Y",
        MatchSpec::new(["loueur de meuble saisonnier", "lmnp saisonnier"]),
    )
    .constrained(SideConstraint::new(ACTIV_PERM_ET, ["S"], true))
    .register(
        registry,
        RuleMeta::new("seasonal_lmnp_assignment_2025")
            .tags([TAG])
            .description("Règle LMNP saisonnier version NAF 2025"),
    );

    TermRule::new(
        NACE_REV2_1_COLUMN,
        "4781Y",
        MatchSpec::new([
            "achat vente de vehicules d occasion",
            "achat vente de vehicules neufs",
            "commerce de voitures et de vehicules automobiles legers",
            "achat vente de vehicules",
            "achat vente de vehicule",
        ]),
    )
    .constrained(SideConstraint::new(ACTIV_SURF_ET, ["1"], false))
    .register(
        registry,
        RuleMeta::new("retailing_cars_2025")
            .tags([TAG])
            .description("Règle commerce détail de véhicules version NAF 2025"),
    );
}
