use aletheia_belief::{failure_rate, rule_of_three_upper_bound};

#[test]
fn zero_failures_yield_three_over_n() {
    assert_eq!(rule_of_three_upper_bound(0, 20_000), Some(3.0 / 20_000.0));
    let bound = rule_of_three_upper_bound(0, 20_000).unwrap();
    assert!((bound - 0.00015).abs() < 1e-12);
}

#[test]
fn failures_produce_no_bound() {
    assert_eq!(rule_of_three_upper_bound(1, 20_000), None);
    assert_eq!(rule_of_three_upper_bound(3, 3), None);
}

#[test]
fn empty_evidence_produces_no_bound() {
    assert_eq!(rule_of_three_upper_bound(0, 0), None);
    assert_eq!(failure_rate(0, 0), None);
}

#[test]
fn failure_rate_is_observed_fraction() {
    assert_eq!(failure_rate(5, 20), Some(0.25));
}
