use std::sync::Arc;

use naf_match::{EmbeddingModel, MatchSpec, ModelStore, MultiMatcher, builtin_defaults};
use naf_model::{NafError, Result, StrategyKind, StrategyParams};
use proptest::prelude::*;

/// Embeds the term "taxi" and fails on anything else.
struct FlakyBackend;

impl EmbeddingModel for FlakyBackend {
    fn reference(&self) -> &str {
        "mock:flaky"
    }

    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.iter().all(|text| text == "taxi") {
            Ok(texts.iter().map(|_| vec![1.0, 0.0]).collect())
        } else {
            Err(NafError::match_computation("similarity", "connection refused"))
        }
    }
}

fn column(values: &[&str]) -> Vec<Option<String>> {
    values
        .iter()
        .map(|v| if v.is_empty() { None } else { Some((*v).to_string()) })
        .collect()
}

#[test]
fn exact_scenario_marks_only_the_matching_row() {
    let spec = MatchSpec::new(["lmnp"]);
    let matcher = MultiMatcher::for_spec(
        &spec,
        &[StrategyKind::Exact],
        &builtin_defaults(),
        &ModelStore::new(),
    )
    .unwrap();
    let hits = matcher
        .match_columns(&[column(&["lmnp", "boulangerie", ""])], 3)
        .unwrap();
    assert_eq!(hits.as_slice(), &[true, false, false]);
}

#[test]
fn columns_are_or_combined() {
    let spec = MatchSpec::new(["taxi"]);
    let matcher = MultiMatcher::for_spec(
        &spec,
        &[StrategyKind::Exact],
        &builtin_defaults(),
        &ModelStore::new(),
    )
    .unwrap();
    let first = column(&["artisan taxi", "", "boulangerie"]);
    let second = column(&["", "taxi moto", "pain"]);
    let hits = matcher.match_columns(&[first, second], 3).unwrap();
    assert_eq!(hits.as_slice(), &[true, true, false]);
}

#[test]
fn excluded_strategies_are_not_built() {
    let spec = MatchSpec::new(["macon"]).excluding(&[StrategyKind::Exact]);
    let matcher = MultiMatcher::for_spec(
        &spec,
        &[StrategyKind::Exact, StrategyKind::Approximate],
        &builtin_defaults(),
        &ModelStore::new(),
    )
    .unwrap();
    assert_eq!(matcher.kinds(), vec![StrategyKind::Approximate]);
}

#[test]
fn all_strategies_excluded_matches_nothing() {
    let spec = MatchSpec::new(["taxi"]).excluding(&[StrategyKind::Exact]);
    let matcher = MultiMatcher::for_spec(
        &spec,
        &[StrategyKind::Exact],
        &builtin_defaults(),
        &ModelStore::new(),
    )
    .unwrap();
    assert!(matcher.is_empty());
    let hits = matcher.match_columns(&[column(&["taxi"])], 1).unwrap();
    assert_eq!(hits.count(), 0);
}

#[test]
fn failing_strategy_fails_the_whole_match() {
    let store = ModelStore::new();
    store.insert(Arc::new(FlakyBackend)).unwrap();
    let mut params = builtin_defaults();
    params.insert(
        StrategyKind::Semantic,
        StrategyParams::default().with_model("mock:flaky"),
    );
    let matcher = MultiMatcher::for_spec(
        &MatchSpec::new(["taxi"]),
        &[StrategyKind::Exact, StrategyKind::Semantic],
        &params,
        &store,
    )
    .unwrap();
    let err = matcher
        .match_columns(&[column(&["taxi", "boulangerie"])], 2)
        .unwrap_err();
    assert_eq!(err.strategy_name(), Some("similarity"));
}

#[test]
fn semantic_strategy_uses_the_local_backend() {
    let spec = MatchSpec::new(["chauffeur de taxi"]);
    let matcher = MultiMatcher::for_spec(
        &spec,
        &[StrategyKind::Semantic],
        &builtin_defaults(),
        &ModelStore::new(),
    )
    .unwrap();
    let hits = matcher
        .match_columns(&[column(&["chauffeur de taxi", ""])], 2)
        .unwrap();
    assert_eq!(hits.as_slice(), &[true, false]);
}

#[test]
fn mismatched_column_length_is_rejected() {
    let matcher = MultiMatcher::for_spec(
        &MatchSpec::new(["taxi"]),
        &[StrategyKind::Exact],
        &builtin_defaults(),
        &ModelStore::new(),
    )
    .unwrap();
    assert!(matcher.match_columns(&[column(&["taxi"])], 2).is_err());
}

fn texts() -> impl Strategy<Value = Vec<Option<String>>> {
    prop::collection::vec(
        prop::option::of(prop::sample::select(vec![
            "artisan taxi".to_string(),
            "chauffeur de taxi".to_string(),
            "chaufeur taxi".to_string(),
            "boulangerie".to_string(),
            "maconnerie generale".to_string(),
            "macon".to_string(),
            String::new(),
        ])),
        0..24,
    )
}

proptest! {
    #[test]
    fn adding_a_strategy_never_loses_matches(rows in texts()) {
        let spec = MatchSpec::new(["chauffeur de taxi", "macon"]);
        let store = ModelStore::new();
        let defaults = builtin_defaults();
        let single = MultiMatcher::for_spec(&spec, &[StrategyKind::Exact], &defaults, &store).unwrap();
        let both = MultiMatcher::for_spec(
            &spec,
            &[StrategyKind::Exact, StrategyKind::Approximate],
            &defaults,
            &store,
        )
        .unwrap();
        let len = rows.len();
        let narrow = single.match_columns(std::slice::from_ref(&rows), len).unwrap();
        let wide = both.match_columns(std::slice::from_ref(&rows), len).unwrap();
        prop_assert!(narrow.is_subset_of(&wide));
    }

    #[test]
    fn strategy_order_does_not_change_result(rows in texts()) {
        let spec = MatchSpec::new(["taxi", "maconnerie"]);
        let store = ModelStore::new();
        let defaults = builtin_defaults();
        let forward = MultiMatcher::for_spec(
            &spec,
            &[StrategyKind::Exact, StrategyKind::Approximate],
            &defaults,
            &store,
        )
        .unwrap();
        let backward = MultiMatcher::for_spec(
            &spec,
            &[StrategyKind::Approximate, StrategyKind::Exact],
            &defaults,
            &store,
        )
        .unwrap();
        let len = rows.len();
        prop_assert_eq!(
            forward.match_columns(std::slice::from_ref(&rows), len).unwrap(),
            backward.match_columns(std::slice::from_ref(&rows), len).unwrap()
        );
    }
}
