mod common;

use aletheia_belief::BeliefState;
use aletheia_cert::{build, certificate_hash, Certificate, CERT_VERSION};
use aletheia_core::RngHandle;
use aletheia_falsify::{CandidatePoint, DecisionRule};
use serde_json::{json, Value};

use common::{failing_result, passing_result};

fn fixed_certificate() -> Certificate {
    let mut cert = build("0xfeed", "bench-host", &[passing_result(), failing_result()]);
    cert.created_at = "2026-01-01T00:00:00+00:00".into();
    cert
}

#[test]
fn build_collects_claims_and_proofs() {
    let cert = fixed_certificate();
    assert_eq!(cert.cert_version, CERT_VERSION);
    assert_eq!(cert.claims.len(), 2);
    assert_eq!(cert.proofs.len(), 2);
    assert_eq!(cert.claims[0].implementation, "quicksort3");
    assert_eq!(cert.claims[0].power.trials, 2_000);
    assert!(cert.claims[0].results.counterexample.is_none());
    let counterexample = cert.claims[1].results.counterexample.as_ref().expect("sample");
    assert_eq!(counterexample.index, 17);
    assert!(!cert.all_claims_hold());
    assert!(chrono::DateTime::parse_from_rfc3339(&build("0x", "m", &[]).created_at).is_ok());
}

#[test]
fn document_uses_camel_case_keys() {
    let value = serde_json::to_value(fixed_certificate()).expect("json");
    for key in [
        "certVersion",
        "programHash",
        "machine",
        "createdAt",
        "claims",
        "proofs",
        "beliefs",
        "decisionRules",
    ] {
        assert!(value.get(key).is_some(), "missing {key}");
    }
    let results = &value["claims"][0]["results"];
    assert_eq!(results["trialsRun"], json!(2_000));
    assert_eq!(results["upper95FailureProb"], json!(0.0015));
    assert_eq!(value["claims"][1]["results"]["upper95FailureProb"], Value::Null);
    assert!(results.get("rngCommit").is_some());
    assert!(results.get("durationSec").is_some());
    assert_eq!(value["claims"][0]["power"]["alpha"], json!(0.05));
}

#[test]
fn hash_is_prefixed_and_idempotent() {
    let cert = fixed_certificate();
    let first = certificate_hash(&cert).expect("hash");
    let second = certificate_hash(&cert).expect("hash");
    assert_eq!(first, second);
    assert!(first.starts_with("0x"));
    assert_eq!(first.len(), 66);
    assert!(first[2..].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
}

#[test]
fn hash_ignores_in_memory_key_order() {
    let cert = fixed_certificate();
    let mut reordered = cert.clone();
    let params = std::mem::take(&mut reordered.claims[0].domain.params);
    for (key, value) in params.into_iter().rev() {
        reordered.claims[0].domain.params.insert(key, value);
    }
    assert_eq!(certificate_hash(&cert).unwrap(), certificate_hash(&reordered).unwrap());

    // A document parsed from differently ordered JSON hashes the same.
    let value = serde_json::to_value(&cert).unwrap();
    let text = serde_json::to_string_pretty(&value).unwrap();
    let parsed: Certificate = serde_json::from_str(&text).unwrap();
    assert_eq!(certificate_hash(&cert).unwrap(), certificate_hash(&parsed).unwrap());
}

#[test]
fn any_field_change_alters_the_hash() {
    let cert = fixed_certificate();
    let baseline = certificate_hash(&cert).unwrap();
    let mutations: Vec<Box<dyn Fn(&mut Certificate)>> = vec![
        Box::new(|c: &mut Certificate| c.program_hash.push('0')),
        Box::new(|c: &mut Certificate| c.machine = "other-host".into()),
        Box::new(|c: &mut Certificate| c.created_at = "2026-01-01T00:00:01+00:00".into()),
        Box::new(|c: &mut Certificate| c.claims[0].results.failures = 1),
        Box::new(|c: &mut Certificate| c.claims[0].results.trials_run -= 1),
        Box::new(|c: &mut Certificate| c.claims[0].results.duration_sec += 1e-9),
        Box::new(|c: &mut Certificate| c.claims[1].implementation = "quicksort3".into()),
        Box::new(|c: &mut Certificate| c.proofs[0].hash = Some("0x01".into())),
        Box::new(|c: &mut Certificate| c.cert_version = "1.1".into()),
    ];
    for (idx, mutate) in mutations.iter().enumerate() {
        let mut changed = cert.clone();
        mutate(&mut changed);
        assert_ne!(baseline, certificate_hash(&changed).unwrap(), "mutation {idx}");
    }
}

#[test]
fn beliefs_and_rules_are_covered_by_the_hash() {
    let cert = fixed_certificate();
    let mut belief = BeliefState::new("QS3FewerComparisons");
    belief.extend([true, false, false]);
    let summary = belief
        .summarize(0.5, 1_000, 0.05, &mut RngHandle::from_seed(3))
        .expect("summary");
    let rule = DecisionRule {
        claim_id: "QS3VsMergesort".into(),
        parameter: "distinctness_ratio".into(),
        threshold: Some(0.02),
        prefer_below: "quicksort3".into(),
        prefer_at_or_above: "mergesort".into(),
        points: vec![CandidatePoint {
            value: 0.02,
            mean_advantage: -10.0,
            trials: 120,
        }],
    };
    let enriched = cert
        .clone()
        .with_beliefs(vec![summary])
        .with_decision_rules(vec![rule]);
    assert_eq!(enriched.beliefs.len(), 1);
    assert_eq!(enriched.decision_rules.len(), 1);
    assert_ne!(certificate_hash(&cert).unwrap(), certificate_hash(&enriched).unwrap());
    let value = serde_json::to_value(&enriched).unwrap();
    assert_eq!(value["decisionRules"][0]["preferAtOrAbove"], "mergesort");
}
