use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use aletheia_belief::rule_of_three_upper_bound;
use aletheia_core::errors::{AletheiaError, ErrorInfo};
use aletheia_core::{rng_commit, Claim};
use tracing::{debug, info};

use crate::outcome::{ClaimResult, TrialOutcome};
use crate::registry::Registry;
use crate::trial::execute_trial;

/// Upper limit on automatically chosen worker counts.
pub const MAX_AUTO_WORKERS: usize = 32;

/// Options governing trial dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOpts {
    /// Number of trial indices submitted per batch.
    pub batch_size: usize,
    /// Maximum number of failing outcomes retained as samples.
    pub sample_cap: usize,
}

impl Default for EngineOpts {
    fn default() -> Self {
        Self {
            batch_size: 128,
            sample_cap: 5,
        }
    }
}

/// Evaluates claims by running many seeded trials concurrently.
#[derive(Debug, Clone)]
pub struct FalsificationEngine {
    registry: Arc<Registry>,
    opts: EngineOpts,
}

impl FalsificationEngine {
    /// Creates an engine over a fully populated registry.
    pub fn new(registry: Arc<Registry>) -> Self {
        Self::with_opts(registry, EngineOpts::default())
    }

    /// Creates an engine with explicit dispatch options.
    pub fn with_opts(registry: Arc<Registry>, opts: EngineOpts) -> Self {
        Self { registry, opts }
    }

    /// Registry the engine resolves capabilities from.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Dispatch options in effect.
    pub fn opts(&self) -> &EngineOpts {
        &self.opts
    }

    /// Runs `claim` against `implementation` and aggregates the outcomes.
    ///
    /// Trials `0..claim.trials` are submitted in batches to a pool of
    /// `concurrency` workers (`0` picks a default). Outcomes are sent back to
    /// the calling thread, which alone updates the counters and the sample
    /// list. With `stop_on_first_failure`, no batch is submitted after a
    /// failure has been observed, but every trial already submitted runs to
    /// completion and is counted.
    pub fn evaluate(
        &self,
        claim: &Claim,
        implementation: &str,
        master_seed: &str,
        concurrency: usize,
    ) -> Result<ClaimResult, AletheiaError> {
        let started = Instant::now();
        let resolved = self.registry.resolve(claim, implementation)?;
        let workers = resolve_concurrency(concurrency);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|idx| format!("aletheia-trial-{idx}"))
            .build()
            .map_err(|err| {
                AletheiaError::Io(
                    ErrorInfo::new("thread_pool", err.to_string())
                        .with_context("workers", workers.to_string()),
                )
            })?;

        let batch_size = self.opts.batch_size.max(1) as u64;
        let mut tally = Tally::new(self.opts.sample_cap);
        let mut cursor = 0u64;
        while cursor < claim.trials {
            let end = claim.trials.min(cursor + batch_size);
            let (sender, receiver) = mpsc::channel::<TrialOutcome>();
            pool.in_place_scope(|scope| {
                for index in cursor..end {
                    let sender = sender.clone();
                    let resolved = &resolved;
                    scope.spawn(move |_| {
                        let outcome = execute_trial(resolved, claim, master_seed, index)
                            .unwrap_or_else(|err| TrialOutcome::from_execution_error(index, &err));
                        // The receiver outlives the scope, so this cannot fail.
                        let _ = sender.send(outcome);
                    });
                }
                drop(sender);
                for outcome in receiver.iter() {
                    tally.record(outcome);
                }
            });
            debug!(
                claim = %claim.id,
                batch_start = cursor,
                batch_end = end,
                failures = tally.failures,
                "batch complete"
            );
            cursor = end;
            if claim.stop_on_first_failure && tally.failures > 0 {
                break;
            }
        }

        let result = ClaimResult {
            claim: claim.clone(),
            implementation: implementation.to_string(),
            failures: tally.failures,
            trials_run: tally.trials_run,
            upper95_failure_prob: rule_of_three_upper_bound(tally.failures, tally.trials_run),
            sample_failures: tally.samples,
            rng_commit: rng_commit(master_seed, &claim.id, implementation),
            duration_sec: started.elapsed().as_secs_f64(),
        };
        info!(
            claim = %claim.id,
            implementation,
            workers,
            trials_run = result.trials_run,
            failures = result.failures,
            "claim evaluated"
        );
        Ok(result)
    }
}

/// Maps a requested worker count to an effective one; `0` means
/// `min(available parallelism, 32)`.
pub fn resolve_concurrency(requested: usize) -> usize {
    if requested > 0 {
        return requested;
    }
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(2)
        .min(MAX_AUTO_WORKERS)
}

struct Tally {
    trials_run: u64,
    failures: u64,
    samples: Vec<TrialOutcome>,
    cap: usize,
}

impl Tally {
    fn new(cap: usize) -> Self {
        Self {
            trials_run: 0,
            failures: 0,
            samples: Vec::new(),
            cap,
        }
    }

    fn record(&mut self, outcome: TrialOutcome) {
        self.trials_run += 1;
        if outcome.passed {
            return;
        }
        self.failures += 1;
        if self.samples.len() < self.cap {
            self.samples.push(outcome);
        }
    }
}
