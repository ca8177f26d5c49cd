use aletheia_belief::BeliefSummary;
use aletheia_core::{Domain, ProofArtifact};
use aletheia_falsify::{ClaimResult, DecisionRule, TrialOutcome};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Version tag written into every certificate.
pub const CERT_VERSION: &str = "1.0";

/// Significance and budget a claim was evaluated under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerSummary {
    /// Significance level.
    pub alpha: f64,
    /// Configured trial budget.
    pub trials: u64,
}

/// Evidence gathered for a claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSummary {
    /// Failing trials observed.
    pub failures: u64,
    /// Trials actually run.
    pub trials_run: u64,
    /// Rule-of-three bound, `null` when a failure was observed.
    pub upper95_failure_prob: Option<f64>,
    /// Commitment to the seed material.
    pub rng_commit: String,
    /// Wall-clock evaluation time.
    pub duration_sec: f64,
    /// First sampled failing trial, if any.
    #[serde(default)]
    pub counterexample: Option<TrialOutcome>,
}

/// Per-claim entry of a certificate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimSummary {
    /// Claim identifier.
    pub id: String,
    /// Natural-language proposition.
    pub proposition: String,
    /// Input domain.
    pub domain: Domain,
    /// Generator name.
    pub adversary: String,
    /// Oracle name.
    pub oracle: String,
    /// Implementation the evidence is about.
    pub implementation: String,
    /// Evaluation power.
    pub power: PowerSummary,
    /// Collected evidence.
    pub results: ResultSummary,
}

impl From<&ClaimResult> for ClaimSummary {
    fn from(result: &ClaimResult) -> Self {
        let claim = &result.claim;
        Self {
            id: claim.id.clone(),
            proposition: claim.proposition.clone(),
            domain: claim.domain.clone(),
            adversary: claim.adversary.clone(),
            oracle: claim.oracle.clone(),
            implementation: result.implementation.clone(),
            power: PowerSummary {
                alpha: claim.power_alpha,
                trials: claim.trials,
            },
            results: ResultSummary {
                failures: result.failures,
                trials_run: result.trials_run,
                upper95_failure_prob: result.upper95_failure_prob,
                rng_commit: result.rng_commit.clone(),
                duration_sec: result.duration_sec,
                counterexample: result.counterexample().cloned(),
            },
        }
    }
}

/// Tamper-evident record of the evidence gathered for a set of claims.
///
/// The certificate hash is derived from this document and never stored in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    /// Document format version.
    pub cert_version: String,
    /// Hash of the program the claims are about.
    pub program_hash: String,
    /// Machine the evidence was produced on.
    pub machine: String,
    /// RFC 3339 UTC creation time.
    pub created_at: String,
    /// Per-claim evidence.
    pub claims: Vec<ClaimSummary>,
    /// Proof artifacts attached to the claims, in claim order.
    pub proofs: Vec<ProofArtifact>,
    /// Posterior summaries of comparative claims.
    #[serde(default)]
    pub beliefs: Vec<BeliefSummary>,
    /// Decision rules synthesized from parameter sweeps.
    #[serde(default)]
    pub decision_rules: Vec<DecisionRule>,
}

impl Certificate {
    /// Builds a certificate stamped with the current UTC time.
    pub fn build(
        program_hash: impl Into<String>,
        machine: impl Into<String>,
        results: &[ClaimResult],
    ) -> Self {
        let claims = results.iter().map(ClaimSummary::from).collect();
        let proofs = results
            .iter()
            .flat_map(|result| result.claim.proofs.iter().cloned())
            .collect();
        Self {
            cert_version: CERT_VERSION.to_string(),
            program_hash: program_hash.into(),
            machine: machine.into(),
            created_at: Utc::now().to_rfc3339(),
            claims,
            proofs,
            beliefs: Vec::new(),
            decision_rules: Vec::new(),
        }
    }

    /// Attaches posterior summaries.
    pub fn with_beliefs(mut self, beliefs: Vec<BeliefSummary>) -> Self {
        self.beliefs.extend(beliefs);
        self
    }

    /// Attaches synthesized decision rules.
    pub fn with_decision_rules(mut self, rules: Vec<DecisionRule>) -> Self {
        self.decision_rules.extend(rules);
        self
    }

    /// True when no claim recorded a failure.
    pub fn all_claims_hold(&self) -> bool {
        self.claims.iter().all(|claim| claim.results.failures == 0)
    }
}

/// Convenience wrapper for [`Certificate::build`].
pub fn build(
    program_hash: impl Into<String>,
    machine: impl Into<String>,
    results: &[ClaimResult],
) -> Certificate {
    Certificate::build(program_hash, machine, results)
}
