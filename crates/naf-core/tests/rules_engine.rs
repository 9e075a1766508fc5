use std::sync::Arc;

use naf_core::{
    Dataset, InstrumentedRule, RuleContext, RuleMeta, RuleOutcome, RuleRegistry, RunSettings,
    SyntheticRows, TermRule, apply_rules, track_changes, track_new,
};
use naf_match::{EmbeddingModel, MatchSpec, ModelStore, builtin_defaults, merge_overrides};
use naf_model::{
    ChangeKind, Journal, JournalEntry, MatchVector, NafError, Result, StrategyKind,
    StrategyOverrides, StrategyParams,
};
use polars::prelude::{Column, DataFrame};
use proptest::prelude::*;

const TARGET: &str = "nace2025";

fn dataset(labels: &[&str]) -> Dataset {
    let ids: Vec<String> = (0..labels.len()).map(|i| format!("J{i}")).collect();
    let labels: Vec<Option<&str>> = labels
        .iter()
        .map(|label| if label.is_empty() { None } else { Some(*label) })
        .collect();
    let frame = DataFrame::new(vec![
        Column::new("liasse_numero".into(), ids),
        Column::new("libelle".into(), labels),
    ])
    .expect("df");
    Dataset::new(frame).expect("dataset")
}

fn settings(enabled: &[StrategyKind]) -> RunSettings {
    RunSettings::new(enabled.to_vec(), builtin_defaults())
        .with_text_columns(vec!["libelle".to_string()])
}

fn tagged(name: &str) -> RuleMeta {
    RuleMeta::new(name).tags(["test"])
}

#[test]
fn exact_rule_relabels_and_journals_matching_row() {
    let mut registry = RuleRegistry::new();
    TermRule::new(TARGET, "6820A", MatchSpec::new(["lmnp"])).register(&mut registry, tagged("lmnp"));

    let report = apply_rules(
        dataset(&["lmnp", "boulangerie", ""]),
        &registry,
        "test",
        &settings(&[StrategyKind::Exact]),
        &ModelStore::new(),
    )
    .expect("apply");

    assert_eq!(
        report.dataset.text_values(TARGET).expect("target"),
        vec![Some("6820A".to_string()), None, None]
    );
    assert_eq!(report.journal.len(), 1);
    let entry = &report.journal.entries()[0];
    assert_eq!(entry.change, ChangeKind::Modification);
    assert_eq!(entry.row, 0);
    assert_eq!(entry.before, None);
    assert_eq!(entry.after.as_deref(), Some("6820A"));
    assert_eq!(report.journal.context_value(entry, "liasse_numero"), Some("J0"));
}

#[test]
fn creation_rule_appends_and_journals_new_rows() {
    let labels: Vec<&str> = vec!["boulangerie"; 100];
    let mut registry = RuleRegistry::new();
    SyntheticRows::new(TARGET, "Jaug4933G", "4933G", &["artisan taxi"], 5)
        .register(&mut registry, tagged("augment_taxi"));

    let report = apply_rules(
        dataset(&labels),
        &registry,
        "test",
        &settings(&[StrategyKind::Exact]),
        &ModelStore::new(),
    )
    .expect("apply");

    assert_eq!(report.dataset.height(), 105);
    assert_eq!(report.journal.len(), 5);
    assert_eq!(report.created_rows(), 5);
    for (offset, entry) in report.journal.entries().iter().enumerate() {
        assert_eq!(entry.change, ChangeKind::Creation);
        assert_eq!(entry.before, None);
        assert_eq!(entry.row, 100 + offset);
        assert_eq!(entry.after.as_deref(), Some("4933G"));
    }
    assert_eq!(
        report.dataset.value("liasse_numero", 104).as_deref(),
        Some("Jaug4933G4")
    );
}

#[test]
fn later_rule_wins_and_sees_earlier_value() {
    let mut registry = RuleRegistry::new();
    TermRule::new(TARGET, "X", MatchSpec::new(["a"])).register(&mut registry, tagged("first"));
    TermRule::new(TARGET, "Y", MatchSpec::new(["a"])).register(&mut registry, tagged("second"));

    let report = apply_rules(
        dataset(&["a", "b"]),
        &registry,
        "test",
        &settings(&[StrategyKind::Exact]),
        &ModelStore::new(),
    )
    .expect("apply");

    assert_eq!(report.dataset.value(TARGET, 0).as_deref(), Some("Y"));
    let entries = report.journal.entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].rule_name, "first");
    assert_eq!(entries[0].before, None);
    assert_eq!(entries[0].after.as_deref(), Some("X"));
    assert_eq!(entries[1].rule_name, "second");
    assert_eq!(entries[1].before.as_deref(), Some("X"));
    assert_eq!(entries[1].after.as_deref(), Some("Y"));
}

#[test]
fn modifications_precede_creations_in_journal() {
    let mut registry = RuleRegistry::new();
    SyntheticRows::new(TARGET, "Jaug", "4933G", &["artisan taxi"], 2)
        .register(&mut registry, tagged("augment"));
    TermRule::new(TARGET, "4933G", MatchSpec::new(["taxi"])).register(&mut registry, tagged("taxi"));

    let report = apply_rules(
        dataset(&["chauffeur de taxi"]),
        &registry,
        "test",
        &settings(&[StrategyKind::Exact]),
        &ModelStore::new(),
    )
    .expect("apply");

    // The term rule also sees the two synthetic rows appended before it.
    let kinds: Vec<ChangeKind> = report.journal.entries().iter().map(|e| e.change).collect();
    assert_eq!(
        kinds,
        vec![
            ChangeKind::Modification,
            ChangeKind::Modification,
            ChangeKind::Modification,
            ChangeKind::Creation,
            ChangeKind::Creation,
        ]
    );
    assert_eq!(report.rules.len(), 2);
    assert_eq!(report.rules[0].dataset_rows, 3);
}

#[test]
fn unmatched_rules_contribute_empty_journals() {
    let mut registry = RuleRegistry::new();
    TermRule::new(TARGET, "4933G", MatchSpec::new(["taxi"])).register(&mut registry, tagged("taxi"));

    let report = apply_rules(
        dataset(&["boulangerie"]),
        &registry,
        "test",
        &settings(&[StrategyKind::Exact]),
        &ModelStore::new(),
    )
    .expect("apply");

    assert!(report.journal.is_empty());
    assert_eq!(report.journal.context_columns(), ["liasse_numero", "libelle"]);
    assert_eq!(report.rules[0].journal_rows, 0);
    assert_eq!(report.rules[0].change, ChangeKind::Modification);
}

#[test]
fn unknown_tag_selects_nothing() {
    let registry = RuleRegistry::discover();
    let report = apply_rules(
        dataset(&["lmnp"]),
        &registry,
        "no_such_tag",
        &settings(&[StrategyKind::Exact]),
        &ModelStore::new(),
    )
    .expect("apply");
    assert!(report.rules.is_empty());
    assert_eq!(report.dataset.height(), 1);
}

#[test]
fn short_match_vector_is_a_contract_violation() {
    let mut registry = RuleRegistry::new();
    registry.register_with(
        tagged("short"),
        track_changes(TARGET, |dataset: Dataset, _ctx: &RuleContext<'_>| {
            Ok((dataset, MatchVector::none(1)))
        }),
    );

    let err = apply_rules(
        dataset(&["a", "b"]),
        &registry,
        "test",
        &settings(&[StrategyKind::Exact]),
        &ModelStore::new(),
    )
    .expect_err("contract");
    assert!(matches!(err.root(), NafError::Contract { .. }));
    assert_eq!(err.rule_name(), Some("short"));
}

#[test]
fn modification_changing_row_count_is_a_contract_violation() {
    let mut registry = RuleRegistry::new();
    registry.register_with(
        tagged("grows"),
        track_changes(TARGET, |mut dataset: Dataset, _ctx: &RuleContext<'_>| {
            let mut row = std::collections::BTreeMap::new();
            row.insert("libelle".to_string(), "extra".to_string());
            dataset.append_rows(&[row])?;
            let hits = MatchVector::none(dataset.height());
            Ok((dataset, hits))
        }),
    );

    let err = apply_rules(
        dataset(&["a"]),
        &registry,
        "test",
        &settings(&[StrategyKind::Exact]),
        &ModelStore::new(),
    )
    .expect_err("contract");
    assert!(matches!(err.root(), NafError::Contract { .. }));
}

#[test]
fn out_of_bounds_match_vector_is_a_data_integrity_violation() {
    let mut registry = RuleRegistry::new();
    registry.register_with(
        tagged("long"),
        track_changes(TARGET, |dataset: Dataset, _ctx: &RuleContext<'_>| {
            let hits = MatchVector::new(vec![true; dataset.height() + 1]);
            Ok((dataset, hits))
        }),
    );

    let err = apply_rules(
        dataset(&["a"]),
        &registry,
        "test",
        &settings(&[StrategyKind::Exact]),
        &ModelStore::new(),
    )
    .expect_err("integrity");
    assert!(matches!(err.root(), NafError::DataIntegrity { .. }));
    assert_eq!(err.rule_name(), Some("long"));
}

#[test]
fn shrinking_creation_is_a_data_integrity_violation() {
    let mut registry = RuleRegistry::new();
    registry.register_with(
        tagged("shrinks"),
        track_new(TARGET, |_dataset: Dataset, _ctx: &RuleContext<'_>| Ok(Dataset::empty())),
    );

    let err = apply_rules(
        dataset(&["a", "b"]),
        &registry,
        "test",
        &settings(&[StrategyKind::Exact]),
        &ModelStore::new(),
    )
    .expect_err("integrity");
    assert!(matches!(err.root(), NafError::DataIntegrity { .. }));
}

#[test]
fn creation_without_new_rows_gives_empty_journal() {
    let mut registry = RuleRegistry::new();
    registry.register_with(
        tagged("noop"),
        track_new(TARGET, |dataset: Dataset, _ctx: &RuleContext<'_>| Ok(dataset)),
    );

    let report = apply_rules(
        dataset(&["a"]),
        &registry,
        "test",
        &settings(&[StrategyKind::Exact]),
        &ModelStore::new(),
    )
    .expect("apply");
    assert!(report.journal.is_empty());
    assert_eq!(report.rules[0].change, ChangeKind::Creation);
}

/// Returns a journal claiming both change kinds.
struct MixedJournal;

impl InstrumentedRule for MixedJournal {
    fn change_kind(&self) -> ChangeKind {
        ChangeKind::Modification
    }

    fn run(&self, dataset: Dataset, ctx: &RuleContext<'_>) -> Result<RuleOutcome> {
        let mut journal = Journal::new(["liasse_numero"]);
        for (row, change) in [(0, ChangeKind::Modification), (0, ChangeKind::Creation)] {
            journal.push(JournalEntry {
                row,
                context: vec![None],
                before: None,
                after: None,
                rule_name: ctx.rule_name.to_string(),
                change,
            });
        }
        Ok(RuleOutcome { dataset, journal })
    }
}

#[test]
fn mixed_journal_is_a_contract_violation() {
    let mut registry = RuleRegistry::new();
    registry.register_with(tagged("mixed"), MixedJournal);

    let err = apply_rules(
        dataset(&["a"]),
        &registry,
        "test",
        &settings(&[StrategyKind::Exact]),
        &ModelStore::new(),
    )
    .expect_err("mixed");
    assert!(matches!(err.root(), NafError::Contract { .. }));
    assert_eq!(err.rule_name(), Some("mixed"));
    assert_eq!(err.to_string().matches("'mixed'").count(), 1);
}

/// Embeds the term "taxi" and fails on anything else.
struct UnreachableBackend;

impl EmbeddingModel for UnreachableBackend {
    fn reference(&self) -> &str {
        "mock:unreachable"
    }

    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.iter().all(|text| text == "taxi") {
            Ok(texts.iter().map(|_| vec![1.0, 0.0]).collect())
        } else {
            Err(NafError::match_computation("similarity", "connection refused"))
        }
    }
}

#[test]
fn strategy_failure_names_rule_and_strategy() {
    let models = ModelStore::new();
    models.insert(Arc::new(UnreachableBackend)).expect("insert");
    let mut overrides = StrategyOverrides::new();
    overrides.insert(
        StrategyKind::Semantic,
        StrategyParams::default().with_model("mock:unreachable"),
    );
    let settings = RunSettings::new(
        vec![StrategyKind::Exact, StrategyKind::Semantic],
        merge_overrides(&builtin_defaults(), &overrides),
    )
    .with_text_columns(vec!["libelle".to_string()]);

    let mut registry = RuleRegistry::new();
    TermRule::new(TARGET, "4933G", MatchSpec::new(["taxi"])).register(&mut registry, tagged("taxi"));

    let err = apply_rules(dataset(&["boulangerie"]), &registry, "test", &settings, &models)
        .expect_err("backend failure");
    assert_eq!(err.rule_name(), Some("taxi"));
    assert_eq!(err.strategy_name(), Some("similarity"));
}

#[test]
fn missing_text_column_fails_the_run() {
    let mut registry = RuleRegistry::new();
    TermRule::new(TARGET, "4933G", MatchSpec::new(["taxi"])).register(&mut registry, tagged("taxi"));
    let settings = settings(&[StrategyKind::Exact]).with_text_columns(vec!["absent".to_string()]);

    let err = apply_rules(dataset(&["taxi"]), &registry, "test", &settings, &ModelStore::new())
        .expect_err("missing column");
    assert!(matches!(err.root(), NafError::MissingColumn(name) if name == "absent"));
}

proptest! {
    #[test]
    fn reapplication_is_deterministic(
        labels in prop::collection::vec(prop::sample::select(vec![
            "lmnp", "artisan taxi", "boulangerie", "", "vtc", "graphiste",
        ]), 0..20)
    ) {
        let registry = RuleRegistry::discover();
        let settings = settings(&[StrategyKind::Exact]).with_synthetic_count(Some(2));
        let models = ModelStore::new();
        let first = apply_rules(dataset(&labels), &registry, "naf_2025", &settings, &models)
            .expect("first run");
        let second = apply_rules(dataset(&labels), &registry, "naf_2025", &settings, &models)
            .expect("second run");
        prop_assert_eq!(&first.journal, &second.journal);
        prop_assert_eq!(
            first.dataset.text_values("nace2025").expect("target"),
            second.dataset.text_values("nace2025").expect("target")
        );
    }

    #[test]
    fn modification_rule_applied_twice_equals_once(
        labels in prop::collection::vec(prop::sample::select(vec![
            "lmnp", "loueur lmnp", "boulangerie", "", "taxi",
        ]), 0..20)
    ) {
        let rule = TermRule::new(TARGET, "6820A", MatchSpec::new(["lmnp"]));
        let mut once = RuleRegistry::new();
        rule.clone().register(&mut once, tagged("lmnp"));
        let mut twice = RuleRegistry::new();
        rule.clone().register(&mut twice, tagged("lmnp"));
        rule.register(&mut twice, tagged("lmnp_again"));

        let settings = settings(&[StrategyKind::Exact]);
        let models = ModelStore::new();
        let single = apply_rules(dataset(&labels), &once, "test", &settings, &models)
            .expect("single application");
        let double = apply_rules(dataset(&labels), &twice, "test", &settings, &models)
            .expect("double application");

        prop_assert_eq!(
            single.dataset.text_values(TARGET).expect("target"),
            double.dataset.text_values(TARGET).expect("target")
        );

        let rows_of = |rule: &str| -> Vec<usize> {
            double
                .journal
                .entries()
                .iter()
                .filter(|entry| entry.rule_name == rule)
                .map(|entry| entry.row)
                .collect()
        };
        let single_rows: Vec<usize> = single.journal.entries().iter().map(|entry| entry.row).collect();
        prop_assert_eq!(rows_of("lmnp"), single_rows.clone());
        prop_assert_eq!(rows_of("lmnp_again"), single_rows);
        for entry in double.journal.entries().iter().filter(|entry| entry.rule_name == "lmnp_again") {
            prop_assert_eq!(entry.before.as_deref(), Some("6820A"));
            prop_assert_eq!(entry.after.as_deref(), Some("6820A"));
        }
    }

    #[test]
    fn creation_journal_matches_appended_rows(initial in 0usize..30, count in 0usize..10) {
        let labels = vec!["boulangerie"; initial];
        let mut registry = RuleRegistry::new();
        SyntheticRows::new(TARGET, "Jaug", "4933G", &["artisan taxi"], count)
            .register(&mut registry, tagged("augment"));
        let report = apply_rules(
            dataset(&labels),
            &registry,
            "test",
            &settings(&[StrategyKind::Exact]),
            &ModelStore::new(),
        )
        .expect("apply");
        prop_assert_eq!(report.dataset.height() - initial, report.journal.len());
    }
}
