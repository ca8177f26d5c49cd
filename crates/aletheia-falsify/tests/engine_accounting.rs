mod common;

use std::collections::BTreeSet;

use aletheia_core::{rng_commit, AletheiaError, Claim, Domain};
use aletheia_falsify::{run_trial, EngineOpts, FalsificationEngine};
use common::{modulus_claim, modulus_registry};

fn failing_indices(engine: &FalsificationEngine, claim: &Claim, workers: usize) -> BTreeSet<u64> {
    let result = engine
        .evaluate(claim, "identity", "seed-17", workers)
        .expect("evaluate");
    result
        .sample_failures
        .iter()
        .map(|outcome| outcome.index)
        .collect()
}

#[test]
fn full_budget_runs_without_early_stop() {
    let engine = FalsificationEngine::new(modulus_registry(3));
    let claim = modulus_claim(1_000, false);
    let result = engine.evaluate(&claim, "identity", "7", 4).expect("evaluate");
    assert_eq!(result.trials_run, claim.trials);
    assert!(result.failures > 0);
    assert!(result.failures <= result.trials_run);
    assert_eq!(result.sample_failures.len(), 5);
    assert!(result.upper95_failure_prob.is_none());
    assert!(result.refuted());
}

#[test]
fn pass_fail_set_is_independent_of_worker_count() {
    let opts = EngineOpts {
        sample_cap: usize::MAX,
        ..EngineOpts::default()
    };
    let engine = FalsificationEngine::with_opts(modulus_registry(5), opts);
    let claim = modulus_claim(700, false);
    let single = failing_indices(&engine, &claim, 1);
    let many = failing_indices(&engine, &claim, 8);
    assert!(!single.is_empty());
    assert_eq!(single, many);

    for index in [0u64, 13, 699] {
        let outcome = run_trial(engine.registry(), &claim, "identity", "seed-17", index)
            .expect("trial");
        assert_eq!(!outcome.passed, single.contains(&index));
    }
}

#[test]
fn early_stop_finishes_the_failing_batch_only() {
    let registry = modulus_registry(50);
    let claim = modulus_claim(5_000, true);
    let first_failure = (0..claim.trials)
        .find(|&index| {
            !run_trial(&registry, &claim, "identity", "early", index)
                .expect("trial")
                .passed
        })
        .expect("some trial fails");

    let opts = EngineOpts {
        batch_size: 64,
        sample_cap: 5,
    };
    let engine = FalsificationEngine::with_opts(registry, opts);
    let result = engine.evaluate(&claim, "identity", "early", 6).expect("evaluate");
    let expected_run = ((first_failure / 64) + 1) * 64;
    assert_eq!(result.trials_run, expected_run.min(claim.trials));
    assert!(result.failures >= 1);
    assert!(result.sample_failures.iter().all(|outcome| !outcome.passed));
    assert!(result
        .sample_failures
        .iter()
        .all(|outcome| outcome.index < result.trials_run));
}

#[test]
fn clean_claim_gets_rule_of_three_bound() {
    let engine = FalsificationEngine::new(modulus_registry(1_000_003));
    let base = modulus_claim(2_000, true);
    let claim = Claim {
        domain: Domain::new("ints").with_param("lo", 1).with_param("hi", 1_000_000),
        ..base
    };
    let result = engine.evaluate(&claim, "identity", "clean", 0).expect("evaluate");
    assert_eq!(result.failures, 0);
    assert_eq!(result.trials_run, 2_000);
    assert_eq!(result.upper95_failure_prob, Some(3.0 / 2_000.0));
    assert!(result.sample_failures.is_empty());
    assert!(!result.refuted());
}

#[test]
fn zero_trial_budget_yields_empty_result() {
    let engine = FalsificationEngine::new(modulus_registry(3));
    let claim = modulus_claim(0, true);
    let result = engine.evaluate(&claim, "identity", "7", 2).expect("evaluate");
    assert_eq!(result.trials_run, 0);
    assert_eq!(result.failures, 0);
    assert_eq!(result.upper95_failure_prob, None);
}

#[test]
fn panics_and_errors_become_failing_outcomes() {
    let engine = FalsificationEngine::new(modulus_registry(3));
    let claim = modulus_claim(40, false);
    for implementation in ["explodes", "refuses"] {
        let result = engine
            .evaluate(&claim, implementation, "7", 3)
            .expect("evaluation completes");
        assert_eq!(result.trials_run, 40);
        assert_eq!(result.failures, 40);
        let sample = result.counterexample().expect("sample");
        assert_eq!(sample.details["reason"], "trial_execution");
        assert_eq!(sample.details["stage"], "implementation");
        assert!(!sample.input.is_null());
    }
}

#[test]
fn run_trial_surfaces_execution_errors_with_index() {
    let registry = modulus_registry(3);
    let claim = modulus_claim(10, true);
    let err = run_trial(&registry, &claim, "explodes", "7", 9).expect_err("panics");
    assert_eq!(err.trial_index(), Some(9));
    assert!(err.info().message.contains("implementation blew up"));
}

#[test]
fn unknown_capability_aborts_before_any_trial() {
    let engine = FalsificationEngine::new(modulus_registry(3));
    let mut claim = modulus_claim(10, true);
    let err = engine.evaluate(&claim, "missing", "7", 1).expect_err("unknown impl");
    assert!(matches!(err, AletheiaError::UnknownCapability(_)));

    claim.oracle = "nope".into();
    let err = engine.evaluate(&claim, "identity", "7", 1).expect_err("unknown oracle");
    assert_eq!(err.info().context["kind"], "oracle");
}

#[test]
fn rng_commit_depends_only_on_configuration() {
    let engine = FalsificationEngine::new(modulus_registry(3));
    let claim = modulus_claim(50, false);
    let a = engine.evaluate(&claim, "identity", "s", 1).unwrap();
    let b = engine.evaluate(&claim, "explodes", "s", 1).unwrap();
    assert_eq!(a.rng_commit, rng_commit("s", &claim.id, "identity"));
    assert_ne!(a.rng_commit, b.rng_commit);
}
