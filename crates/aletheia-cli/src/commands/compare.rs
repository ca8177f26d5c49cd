use std::error::Error;

use aletheia_belief::DEFAULT_POSTERIOR_SAMPLES;
use aletheia_falsify::{
    evaluate_comparative, ComparativeOpts, ComparativeReport, PairedComparison, Registry,
};
use aletheia_plugins::{nearly_sorted_comparison_claim, Quicksort3VsMergesort};
use clap::Args;

use super::shared_registry;

#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Master seed for trial derivation.
    #[arg(long)]
    pub seed: String,
    /// Paired trials to run.
    #[arg(long, default_value_t = 1_200)]
    pub trials: u64,
    /// Worker threads (0 picks a default).
    #[arg(long, default_value_t = 0)]
    pub workers: usize,
    /// Posterior draws for the tail estimate.
    #[arg(long, default_value_t = DEFAULT_POSTERIOR_SAMPLES)]
    pub samples: usize,
}

pub fn run(args: &CompareArgs) -> Result<(), Box<dyn Error>> {
    let registry = shared_registry();
    let report = evaluate(&registry, &args.seed, args.trials, args.workers, args.samples)?;
    let summary = &report.summary;
    println!("Claim: {} ({})", report.claim_id, report.comparison);
    println!("Trials: {}", summary.trials);
    println!("Posterior mean (A wins): {:.3}", summary.posterior_mean);
    println!("P(A better > {:.0}%): {:.3}", summary.threshold * 100.0, summary.prob_greater);
    if summary.refuted {
        println!(
            "Claim REFUTED: prefer {} on this domain",
            Quicksort3VsMergesort.label_b()
        );
    } else {
        println!("Claim supported");
    }
    println!("RNG commit: {}", report.rng_commit);
    Ok(())
}

/// Runs the built-in nearly-sorted comparison.
pub fn evaluate(
    registry: &Registry,
    seed: &str,
    trials: u64,
    workers: usize,
    samples: usize,
) -> Result<ComparativeReport, Box<dyn Error>> {
    let claim = nearly_sorted_comparison_claim(trials);
    let opts = ComparativeOpts {
        samples,
        concurrency: workers,
        ..ComparativeOpts::default()
    };
    Ok(evaluate_comparative(
        registry,
        &claim,
        &Quicksort3VsMergesort,
        seed,
        &opts,
    )?)
}
