//! Built-in claims exercised by the `aletheia` binary.

use aletheia_core::{Claim, ClaimEntry, Domain};
use aletheia_falsify::SweepPlan;
use serde_json::json;

use crate::generators::{DISTINCTNESS_PARAM, WIDE_VALUE_MAX};

/// Correctness claims paired with the implementations expected to satisfy them.
pub fn demo_claims(trials: u64) -> Vec<ClaimEntry> {
    vec![
        ClaimEntry::new(sorts_correct_claim(trials), "quicksort3"),
        ClaimEntry::new(dot_kahan_claim(trials), "dot_kahan"),
    ]
}

/// The same claims paired with implementations that are expected to violate them.
pub fn faulty_demo_claims(trials: u64) -> Vec<ClaimEntry> {
    vec![
        ClaimEntry::new(sorts_correct_claim(trials), "buggy_quicksort"),
        ClaimEntry::new(dot_kahan_claim(trials), "dot_naive"),
    ]
}

/// Sorting on short duplicate-heavy arrays of length 0..=12 over [0, 9].
pub fn sorts_correct_claim(trials: u64) -> Claim {
    Claim::new(
        "SortsCorrect@quicksort3",
        "quicksort3 sorts correctly on small duplicate-heavy arrays",
        Domain::new("int_array")
            .with_param("nmin", 0)
            .with_param("nmax", 12)
            .with_param("range", json!([0, 9])),
        "dup_heavy_small",
        "sort_correctness",
    )
    .with_trials(trials)
}

/// Compensated dot product under extreme magnitude mixing.
pub fn dot_kahan_claim(trials: u64) -> Claim {
    Claim::new(
        "DotKahanCorrect@floatmix",
        "kahan dot approximates the exact sum within 1e-6 relative error under magnitude mixing",
        Domain::new("float_dot")
            .with_param("nmin", 64)
            .with_param("nmax", 1024)
            .with_param("hi", 1e16)
            .with_param("lo", 1e-16),
        "float_dot_vectors",
        "dot_correctness",
    )
    .with_trials(trials)
}

/// "Three-way quicksort needs fewer comparisons than mergesort on nearly-sorted arrays."
///
/// Comparative claims never consult the oracle; the name is kept for the record.
pub fn nearly_sorted_comparison_claim(trials: u64) -> Claim {
    Claim::new(
        "QS3FewerComparisons@nearly_sorted",
        "quicksort3 uses fewer comparisons than mergesort on nearly-sorted arrays",
        Domain::new("int_array")
            .with_param("nmin", 64)
            .with_param("nmax", 512)
            .with_param("range", json!([0, WIDE_VALUE_MAX]))
            .with_param("swaps_min", 0.005)
            .with_param("swaps_max", 0.08),
        "nearly_sorted",
        "comparison_count",
    )
    .with_trials(trials)
    .with_stop_on_first_failure(false)
}

/// Base claim for the distinctness-ratio sweep.
pub fn distinctness_claim() -> Claim {
    Claim::new(
        "QS3VsMergesort@distinctness",
        "quicksort3 beats mergesort while few distinct values are present",
        Domain::new("int_array")
            .with_param("nmin", 256)
            .with_param("nmax", 1024)
            .with_param("range", json!([0, WIDE_VALUE_MAX])),
        "distinctness_ratio",
        "comparison_count",
    )
    .with_stop_on_first_failure(false)
}

/// Default sweep over the distinctness ratio with `trials` duels per candidate.
pub fn distinctness_sweep(trials: u64) -> SweepPlan {
    SweepPlan {
        parameter: DISTINCTNESS_PARAM.to_string(),
        trials_per_candidate: trials,
        ..SweepPlan::default()
    }
}
