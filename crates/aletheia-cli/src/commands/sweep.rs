use std::error::Error;

use aletheia_falsify::{synthesize_threshold, DecisionRule, Registry};
use aletheia_plugins::{distinctness_claim, distinctness_sweep, Quicksort3VsMergesort};
use clap::Args;

use super::shared_registry;

#[derive(Args, Debug)]
pub struct SweepArgs {
    /// Master seed for trial derivation.
    #[arg(long)]
    pub seed: String,
    /// Paired trials per candidate ratio.
    #[arg(long, default_value_t = 120)]
    pub trials: u64,
    /// Worker threads (0 picks a default).
    #[arg(long, default_value_t = 0)]
    pub workers: usize,
}

pub fn run(args: &SweepArgs) -> Result<(), Box<dyn Error>> {
    let registry = shared_registry();
    let rule = evaluate(&registry, &args.seed, args.trials, args.workers)?;
    for point in &rule.points {
        println!(
            "rho={:.3}: avg gap = {:+.1} comparisons",
            point.value, point.mean_advantage
        );
    }
    match rule.threshold {
        Some(threshold) => {
            println!("Threshold found: rho* = {threshold:.3}");
            println!("  use {} when distinctness < {threshold:.3}", rule.prefer_below);
            println!("  use {} otherwise", rule.prefer_at_or_above);
        }
        None => println!("No crossover: {} wins at every candidate", rule.prefer_below),
    }
    Ok(())
}

/// Runs the built-in distinctness sweep.
pub fn evaluate(
    registry: &Registry,
    seed: &str,
    trials: u64,
    workers: usize,
) -> Result<DecisionRule, Box<dyn Error>> {
    Ok(synthesize_threshold(
        registry,
        &distinctness_claim(),
        &Quicksort3VsMergesort,
        &distinctness_sweep(trials),
        seed,
        workers,
    )?)
}
