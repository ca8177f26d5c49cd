use aletheia_belief::failure_rate;
use aletheia_core::{AletheiaError, Claim, Details};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Record of one executed trial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialOutcome {
    /// Trial index within the claim's budget.
    pub index: u64,
    /// Generated input (`null` when the generator itself failed).
    pub input: Value,
    /// Implementation output (`null` when no output was produced).
    pub output: Value,
    /// Oracle verdict.
    pub passed: bool,
    /// Diagnostics, populated only when `passed` is false.
    #[serde(default)]
    pub details: Details,
}

impl TrialOutcome {
    /// Converts a trial execution error into a failing outcome.
    ///
    /// The stage and message land in `details`; an input captured by the
    /// runner before the failure is restored so the counterexample survives.
    pub fn from_execution_error(index: u64, err: &AletheiaError) -> Self {
        let info = err.info();
        let input = info
            .context
            .get("input")
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or(Value::Null);
        let mut details = Details::new();
        details.insert("reason".into(), Value::from("trial_execution"));
        details.insert("message".into(), Value::from(info.message.clone()));
        if let Some(stage) = info.context.get("stage") {
            details.insert("stage".into(), Value::from(stage.clone()));
        }
        Self {
            index,
            input,
            output: Value::Null,
            passed: false,
            details,
        }
    }
}

/// Aggregate evidence for one claim against one implementation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimResult {
    /// The evaluated claim.
    pub claim: Claim,
    /// Implementation the trials exercised.
    pub implementation: String,
    /// Number of failing outcomes among `trials_run`.
    pub failures: u64,
    /// Number of trial outcomes actually collected.
    pub trials_run: u64,
    /// Up to five failing outcomes, in the order they were observed.
    pub sample_failures: Vec<TrialOutcome>,
    /// Rule-of-three bound, present only when no failure was seen.
    pub upper95_failure_prob: Option<f64>,
    /// Hash binding master seed, claim id and implementation name.
    pub rng_commit: String,
    /// Wall-clock evaluation time.
    pub duration_sec: f64,
}

impl ClaimResult {
    /// True when at least one counterexample was found.
    pub fn refuted(&self) -> bool {
        self.failures > 0
    }

    /// First sampled counterexample, if any.
    pub fn counterexample(&self) -> Option<&TrialOutcome> {
        self.sample_failures.first()
    }

    /// Observed failure fraction.
    pub fn failure_rate(&self) -> Option<f64> {
        failure_rate(self.failures, self.trials_run)
    }
}
