use std::time::Instant;

use aletheia_belief::{BeliefState, BeliefSummary, DEFAULT_POSTERIOR_SAMPLES, REFUTATION_THRESHOLD};
use aletheia_core::errors::{AletheiaError, ErrorInfo};
use aletheia_core::{rng_commit, Claim, Generator, Params, RngHandle};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::engine::resolve_concurrency;
use crate::registry::Registry;

/// Costs of two competing variants on the same input; lower is better.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Duel {
    /// Cost incurred by variant A.
    pub cost_a: f64,
    /// Cost incurred by variant B.
    pub cost_b: f64,
}

impl Duel {
    /// True when A is strictly cheaper than B.
    pub fn a_wins(&self) -> bool {
        self.cost_a < self.cost_b
    }

    /// How much cheaper A was; negative when B was cheaper.
    pub fn advantage(&self) -> f64 {
        self.cost_b - self.cost_a
    }
}

/// Paired comparison of two algorithm variants on a shared input.
pub trait PairedComparison: Send + Sync {
    /// Label for variant A (the one the claim says is better).
    fn label_a(&self) -> &str;
    /// Label for variant B.
    fn label_b(&self) -> &str;
    /// Runs both variants on `input` and reports their costs.
    fn duel(&self, input: &Value, rng: &mut RngHandle) -> Result<Duel, AletheiaError>;
}

/// Options for a comparative claim run.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparativeOpts {
    /// Posterior draws used for the tail estimate.
    pub samples: usize,
    /// Threshold the reported tail probability is computed against.
    pub threshold: f64,
    /// Worker count, `0` for the default.
    pub concurrency: usize,
}

impl Default for ComparativeOpts {
    fn default() -> Self {
        Self {
            samples: DEFAULT_POSTERIOR_SAMPLES,
            threshold: REFUTATION_THRESHOLD,
            concurrency: 0,
        }
    }
}

/// Outcome of a comparative claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparativeReport {
    /// Claim identifier.
    pub claim_id: String,
    /// `"<a> vs <b>"` label of the comparison.
    pub comparison: String,
    /// Posterior after every paired trial.
    pub belief: BeliefState,
    /// Summary with the Monte Carlo tail estimate.
    pub summary: BeliefSummary,
    /// Hash binding master seed, claim id and comparison label.
    pub rng_commit: String,
    /// Wall-clock evaluation time.
    pub duration_sec: f64,
}

/// Evaluates "A outperforms B on the claim's domain".
///
/// Runs `claim.trials` paired trials in parallel, each with its own derived
/// seed, then folds the outcomes into a posterior seeded by `claim.prior` in
/// index order so the history is identical for every worker count. Refutation
/// is a field of the report, not an error.
pub fn evaluate_comparative(
    registry: &Registry,
    claim: &Claim,
    comparison: &dyn PairedComparison,
    master_seed: &str,
    opts: &ComparativeOpts,
) -> Result<ComparativeReport, AletheiaError> {
    let started = Instant::now();
    let generator = registry.generator(&claim.adversary)?;
    let mut belief = BeliefState::from_prior(claim.id.clone(), claim.prior)?;
    let duels = run_duels(
        generator,
        comparison,
        &claim.domain.params,
        master_seed,
        &claim.id,
        claim.trials,
        opts.concurrency,
    )?;
    belief.extend(duels.iter().map(Duel::a_wins));

    let posterior_ns = format!("{}/posterior", claim.id);
    let mut posterior_rng = RngHandle::derived(master_seed, &posterior_ns, 0);
    let summary =
        belief.summarize(opts.threshold, opts.samples, claim.power_alpha, &mut posterior_rng)?;
    let label = format!("{} vs {}", comparison.label_a(), comparison.label_b());
    info!(
        claim = %claim.id,
        comparison = %label,
        mean = summary.posterior_mean,
        prob_greater = summary.prob_greater,
        refuted = summary.refuted,
        "comparative claim evaluated"
    );
    Ok(ComparativeReport {
        claim_id: claim.id.clone(),
        rng_commit: rng_commit(master_seed, &claim.id, &label),
        comparison: label,
        belief,
        summary,
        duration_sec: started.elapsed().as_secs_f64(),
    })
}

/// Runs `trials` seeded duels in parallel and returns them in index order.
pub(crate) fn run_duels(
    generator: &dyn Generator,
    comparison: &dyn PairedComparison,
    params: &Params,
    master_seed: &str,
    namespace: &str,
    trials: u64,
    concurrency: usize,
) -> Result<Vec<Duel>, AletheiaError> {
    let workers = resolve_concurrency(concurrency);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|err| AletheiaError::Io(ErrorInfo::new("thread_pool", err.to_string())))?;
    pool.install(|| {
        (0..trials)
            .into_par_iter()
            .map(|index| {
                let mut rng = RngHandle::derived(master_seed, namespace, index);
                let input = generator.generate(&mut rng, params).map_err(|err| {
                    AletheiaError::trial_execution(index, "generator", err.to_string())
                })?;
                comparison.duel(&input, &mut rng).map_err(|err| {
                    AletheiaError::trial_execution(index, "comparison", err.to_string())
                })
            })
            .collect()
    })
}
