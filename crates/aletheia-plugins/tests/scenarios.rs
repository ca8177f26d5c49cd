use std::collections::BTreeMap;
use std::sync::Arc;

use aletheia_falsify::{
    evaluate_comparative, synthesize_threshold, ComparativeOpts, FalsificationEngine,
};
use aletheia_plugins::values::int_array;
use aletheia_plugins::{
    builtin_registry, distinctness_claim, distinctness_sweep, dot_kahan_claim,
    nearly_sorted_comparison_claim, sorts_correct_claim, Quicksort3VsMergesort,
};
use serde_json::Value;

fn engine() -> FalsificationEngine {
    FalsificationEngine::new(Arc::new(builtin_registry()))
}

fn counts(value: &Value) -> BTreeMap<i64, usize> {
    let mut counts = BTreeMap::new();
    for item in int_array(value).expect("int array") {
        *counts.entry(item).or_insert(0) += 1;
    }
    counts
}

#[test]
fn buggy_quicksort_is_refuted_with_a_lossy_counterexample() {
    let result = engine()
        .evaluate(&sorts_correct_claim(20_000), "buggy_quicksort", "bug-hunt", 4)
        .expect("evaluate");
    assert!(result.failures > 0);
    assert!(result.trials_run <= 20_000);
    assert_eq!(result.upper95_failure_prob, None);
    let sample = result.counterexample().expect("counterexample");
    assert!(!sample.passed);
    assert_ne!(counts(&sample.input), counts(&sample.output));
    assert_eq!(sample.details["reason"], "not_sorted_or_not_permutation");
    assert_eq!(sample.details["permutation"], false);
}

#[test]
fn three_way_quicksort_survives_the_full_budget() {
    let result = engine()
        .evaluate(&sorts_correct_claim(20_000), "quicksort3", "bug-hunt", 0)
        .expect("evaluate");
    assert_eq!(result.failures, 0);
    assert_eq!(result.trials_run, 20_000);
    let bound = result.upper95_failure_prob.expect("bound");
    assert_eq!(bound, 3.0 / 20_000.0);
    assert!((bound - 0.00015).abs() < 1e-12);
}

#[test]
fn kahan_dot_holds_on_mixed_magnitudes() {
    let result = engine()
        .evaluate(&dot_kahan_claim(300), "dot_kahan", "floats", 0)
        .expect("evaluate");
    assert_eq!(result.failures, 0);
    assert_eq!(result.trials_run, 300);
}

#[test]
fn quicksort3_does_not_beat_mergesort_on_nearly_sorted_arrays() {
    let registry = builtin_registry();
    let report = evaluate_comparative(
        &registry,
        &nearly_sorted_comparison_claim(200),
        &Quicksort3VsMergesort,
        "perf",
        &ComparativeOpts::default(),
    )
    .expect("comparative");
    assert_eq!(report.belief.trials(), 200);
    assert!(report.summary.posterior_mean < 0.5);
    assert!(report.summary.refuted);
    assert_eq!(report.comparison, "quicksort3 vs mergesort");
}

#[test]
fn distinctness_sweep_finds_a_crossover() {
    let registry = builtin_registry();
    let rule = synthesize_threshold(
        &registry,
        &distinctness_claim(),
        &Quicksort3VsMergesort,
        &distinctness_sweep(24),
        "sweep",
        0,
    )
    .expect("sweep");
    assert_eq!(rule.points.len(), 8);
    assert!(rule.points[0].mean_advantage > 0.0);
    let threshold = rule.threshold.expect("crossover");
    assert!(threshold > 0.001);
    assert_eq!(rule.prefer_below, "quicksort3");
    assert_eq!(rule.prefer_at_or_above, "mergesort");
}
