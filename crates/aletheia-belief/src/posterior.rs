use aletheia_core::errors::{invalid_input, AletheiaError};
use aletheia_core::{BetaPrior, RngHandle};
use rand_distr::{Beta, Distribution};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Number of posterior draws used for tail estimates unless overridden.
pub const DEFAULT_POSTERIOR_SAMPLES: usize = 20_000;

/// Win probability a comparative claim must beat.
pub const REFUTATION_THRESHOLD: f64 = 0.5;

/// Sequentially updated `Beta(alpha, beta)` posterior over a success probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeliefState {
    /// Claim or comparison this belief is about.
    pub name: String,
    /// Prior pseudo-count plus observed successes.
    pub alpha: f64,
    /// Prior pseudo-count plus observed failures.
    pub beta: f64,
    /// Every binary outcome folded in so far (1 = success).
    pub history: Vec<u8>,
}

/// Serializable snapshot of a [`BeliefState`] for reports and certificates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeliefSummary {
    /// Belief name.
    pub name: String,
    /// Posterior alpha.
    pub alpha: f64,
    /// Posterior beta.
    pub beta: f64,
    /// Number of outcomes observed.
    pub trials: u64,
    /// Number of successes observed.
    pub successes: u64,
    /// `alpha / (alpha + beta)`.
    pub posterior_mean: f64,
    /// Threshold the tail probability was computed against.
    pub threshold: f64,
    /// Monte Carlo estimate of `P(p > threshold)`.
    pub prob_greater: f64,
    /// Monte Carlo draws behind `prob_greater`.
    pub samples: usize,
    /// Significance level used for the verdict.
    pub significance: f64,
    /// True when the estimate of `P(p > 0.5)` fell below `significance`.
    pub refuted: bool,
}

impl BeliefState {
    /// Starts from the uniform `Beta(1, 1)` prior.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alpha: 1.0,
            beta: 1.0,
            history: Vec::new(),
        }
    }

    /// Starts from a declared prior.
    pub fn from_prior(name: impl Into<String>, prior: BetaPrior) -> Result<Self, AletheiaError> {
        let prior = BetaPrior::new(prior.alpha, prior.beta)?;
        Ok(Self {
            name: name.into(),
            alpha: prior.alpha,
            beta: prior.beta,
            history: Vec::new(),
        })
    }

    /// Folds one binary outcome into the posterior.
    pub fn update(&mut self, success: bool) {
        if success {
            self.alpha += 1.0;
            self.history.push(1);
        } else {
            self.beta += 1.0;
            self.history.push(0);
        }
    }

    /// Folds a sequence of outcomes in order.
    pub fn extend<I: IntoIterator<Item = bool>>(&mut self, outcomes: I) {
        for outcome in outcomes {
            self.update(outcome);
        }
    }

    /// Posterior mean of the success probability.
    pub fn posterior_mean(&self) -> f64 {
        self.alpha / (self.alpha + self.beta)
    }

    /// Number of outcomes observed.
    pub fn trials(&self) -> u64 {
        self.history.len() as u64
    }

    /// Number of successful outcomes observed.
    pub fn successes(&self) -> u64 {
        self.history.iter().filter(|&&outcome| outcome == 1).count() as u64
    }

    /// Estimates `P(p > threshold)` from `samples` posterior draws.
    pub fn prob_greater_than(
        &self,
        threshold: f64,
        samples: usize,
        rng: &mut RngHandle,
    ) -> Result<f64, AletheiaError> {
        if samples == 0 {
            return Err(invalid_input(
                "posterior_samples",
                "at least one posterior sample is required",
            ));
        }
        let dist = Beta::new(self.alpha, self.beta)
            .map_err(|err| invalid_input("beta_posterior", err.to_string()))?;
        let above = (0..samples)
            .filter(|_| dist.sample(rng) > threshold)
            .count();
        Ok(above as f64 / samples as f64)
    }

    /// Whether the belief that `p > 0.5` has dropped below `significance`.
    pub fn is_refuted(
        &self,
        significance: f64,
        samples: usize,
        rng: &mut RngHandle,
    ) -> Result<bool, AletheiaError> {
        Ok(self.prob_greater_than(REFUTATION_THRESHOLD, samples, rng)? < significance)
    }

    /// Produces a summary with a tail estimate against `threshold`.
    ///
    /// The verdict always tests `p > 0.5`, whatever `threshold` is reported.
    pub fn summarize(
        &self,
        threshold: f64,
        samples: usize,
        significance: f64,
        rng: &mut RngHandle,
    ) -> Result<BeliefSummary, AletheiaError> {
        let prob_greater = self.prob_greater_than(threshold, samples, rng)?;
        let refuted = if threshold == REFUTATION_THRESHOLD {
            prob_greater < significance
        } else {
            self.is_refuted(significance, samples, rng)?
        };
        let summary = BeliefSummary {
            name: self.name.clone(),
            alpha: self.alpha,
            beta: self.beta,
            trials: self.trials(),
            successes: self.successes(),
            posterior_mean: self.posterior_mean(),
            threshold,
            prob_greater,
            samples,
            significance,
            refuted,
        };
        debug!(
            belief = %summary.name,
            mean = summary.posterior_mean,
            prob_greater = summary.prob_greater,
            refuted = summary.refuted,
            "posterior summarized"
        );
        Ok(summary)
    }
}
