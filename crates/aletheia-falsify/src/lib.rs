#![deny(missing_docs)]
#![doc = "Plugin registry, seeded trial runner and concurrent falsification engine."]

/// Comparative (paired) claims evaluated into a Beta posterior.
pub mod compare;
/// Concurrent batch dispatch with early stop.
pub mod engine;
/// Trial outcome and claim result records.
pub mod outcome;
/// Name-keyed capability tables.
pub mod registry;
/// Decision-threshold synthesis over a domain parameter.
pub mod sweep;
/// Single-trial execution.
pub mod trial;

pub use compare::{
    evaluate_comparative, ComparativeOpts, ComparativeReport, Duel, PairedComparison,
};
pub use engine::{resolve_concurrency, EngineOpts, FalsificationEngine, MAX_AUTO_WORKERS};
pub use outcome::{ClaimResult, TrialOutcome};
pub use registry::{Registry, Resolved};
pub use sweep::{synthesize_threshold, CandidatePoint, DecisionRule, SweepPlan};
pub use trial::run_trial;
