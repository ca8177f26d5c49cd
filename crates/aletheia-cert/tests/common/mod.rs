use aletheia_core::{Claim, Details, Domain, ProofArtifact};
use aletheia_falsify::{ClaimResult, TrialOutcome};
use serde_json::json;

pub fn passing_result() -> ClaimResult {
    let claim = Claim::new(
        "SortsCorrect@quicksort3",
        "quicksort3 sorts",
        Domain::new("int_array").with_param("nmax", 12).with_param("nmin", 0),
        "dup_heavy_small",
        "sort_correctness",
    )
    .with_trials(2_000)
    .with_proof(ProofArtifact {
        kind: "ProofSketch".into(),
        uri: "docs/quicksort3.md".into(),
        hash: None,
    });
    ClaimResult {
        claim,
        implementation: "quicksort3".into(),
        failures: 0,
        trials_run: 2_000,
        sample_failures: Vec::new(),
        upper95_failure_prob: Some(3.0 / 2_000.0),
        rng_commit: "ab".repeat(32),
        duration_sec: 0.25,
    }
}

pub fn failing_result() -> ClaimResult {
    let mut details = Details::new();
    details.insert("reason".into(), json!("not_sorted_or_not_permutation"));
    let mut result = passing_result();
    result.implementation = "buggy_quicksort".into();
    result.failures = 1;
    result.trials_run = 128;
    result.upper95_failure_prob = None;
    result.sample_failures = vec![TrialOutcome {
        index: 17,
        input: json!([3, 3, 1]),
        output: json!([1, 3]),
        passed: false,
        details,
    }];
    result
}
