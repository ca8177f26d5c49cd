#![deny(missing_docs)]
#![doc = "Statistical bound and posterior calculators over aggregate trial counts."]

/// Distribution-free failure probability bounds.
pub mod bounds;
/// Beta-Bernoulli belief tracking with Monte Carlo tail estimates.
pub mod posterior;

pub use bounds::{failure_rate, rule_of_three_upper_bound};
pub use posterior::{BeliefState, BeliefSummary, DEFAULT_POSTERIOR_SAMPLES, REFUTATION_THRESHOLD};
