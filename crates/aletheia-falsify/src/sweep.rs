use aletheia_core::errors::{invalid_input, AletheiaError};
use aletheia_core::Claim;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::compare::{run_duels, PairedComparison};
use crate::registry::Registry;

/// Candidate values swept when synthesizing a decision threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPlan {
    /// Domain parameter overridden for each candidate.
    pub parameter: String,
    /// Candidate values, visited in order.
    pub candidates: Vec<f64>,
    /// Paired trials run per candidate.
    pub trials_per_candidate: u64,
}

impl Default for SweepPlan {
    fn default() -> Self {
        Self {
            parameter: "distinctness_ratio".to_string(),
            candidates: vec![0.001, 0.005, 0.01, 0.02, 0.03, 0.04, 0.05, 0.1],
            trials_per_candidate: 120,
        }
    }
}

/// Mean advantage of variant A observed at one candidate value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidatePoint {
    /// Candidate parameter value.
    pub value: f64,
    /// Average of `cost_b - cost_a` over the candidate's trials.
    pub mean_advantage: f64,
    /// Trials run at this value.
    pub trials: u64,
}

/// Synthesized rule choosing between two variants by a domain parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionRule {
    /// Claim the sweep was derived from.
    pub claim_id: String,
    /// Parameter the rule switches on.
    pub parameter: String,
    /// First candidate where A lost its advantage, if any.
    pub threshold: Option<f64>,
    /// Variant preferred below the threshold.
    pub prefer_below: String,
    /// Variant preferred at or above the threshold.
    pub prefer_at_or_above: String,
    /// Per-candidate evidence.
    pub points: Vec<CandidatePoint>,
}

/// Sweeps `plan.parameter` and reports where A's mean advantage turns negative.
///
/// Candidates are visited sequentially; each candidate's paired trials run in
/// parallel with seeds namespaced by claim, parameter and candidate value.
pub fn synthesize_threshold(
    registry: &Registry,
    claim: &Claim,
    comparison: &dyn PairedComparison,
    plan: &SweepPlan,
    master_seed: &str,
    concurrency: usize,
) -> Result<DecisionRule, AletheiaError> {
    if plan.candidates.is_empty() {
        return Err(invalid_input("sweep_candidates", "sweep needs at least one candidate"));
    }
    if plan.trials_per_candidate == 0 {
        return Err(invalid_input(
            "sweep_trials",
            "sweep needs at least one trial per candidate",
        ));
    }
    let generator = registry.generator(&claim.adversary)?;
    let mut points = Vec::with_capacity(plan.candidates.len());
    for &value in &plan.candidates {
        let mut params = claim.domain.params.clone();
        params.insert(plan.parameter.clone(), Value::from(value));
        let namespace = format!("{}/{}={}", claim.id, plan.parameter, value);
        let duels = run_duels(
            generator,
            comparison,
            &params,
            master_seed,
            &namespace,
            plan.trials_per_candidate,
            concurrency,
        )?;
        let total: f64 = duels.iter().map(|duel| duel.advantage()).sum();
        let mean_advantage = total / duels.len() as f64;
        debug!(parameter = %plan.parameter, value, mean_advantage, "sweep candidate");
        points.push(CandidatePoint {
            value,
            mean_advantage,
            trials: plan.trials_per_candidate,
        });
    }
    let threshold = points
        .iter()
        .find(|point| point.mean_advantage < 0.0)
        .map(|point| point.value);
    info!(
        claim = %claim.id,
        parameter = %plan.parameter,
        ?threshold,
        "decision threshold synthesized"
    );
    Ok(DecisionRule {
        claim_id: claim.id.clone(),
        parameter: plan.parameter.clone(),
        threshold,
        prefer_below: comparison.label_a().to_string(),
        prefer_at_or_above: comparison.label_b().to_string(),
        points,
    })
}
