#![deny(missing_docs)]
#![doc = "Reference generators, oracles, implementations under test and paired comparisons."]

/// Paired comparison costs.
pub mod comparisons;
pub mod demo;
pub mod generators;
pub mod implementations;
pub mod oracles;
/// JSON decoding helpers shared by the plugins.
pub mod values;

use aletheia_core::CapabilityKind;
use aletheia_falsify::Registry;
use tracing::debug;

pub use comparisons::Quicksort3VsMergesort;
pub use demo::{
    demo_claims, distinctness_claim, distinctness_sweep, dot_kahan_claim, faulty_demo_claims,
    nearly_sorted_comparison_claim, sorts_correct_claim,
};
pub use oracles::exact_sum;

/// Registers every built-in generator, oracle and implementation.
pub fn register_builtins(registry: &mut Registry) -> &mut Registry {
    registry
        .register_generator("dup_heavy_small", generators::dup_heavy_small)
        .register_generator("nearly_sorted", generators::nearly_sorted)
        .register_generator("float_dot_vectors", generators::float_dot_vectors)
        .register_generator("distinctness_ratio", generators::distinctness_ratio)
        .register_generator("all_equal", generators::all_equal)
        .register_generator("k_distinct", generators::k_distinct)
        .register_oracle("sort_correctness", oracles::sort_correctness)
        .register_oracle("dot_correctness", oracles::dot_correctness)
        .register_implementation("buggy_quicksort", implementations::buggy_quicksort)
        .register_implementation("quicksort3", implementations::quicksort3)
        .register_implementation("mergesort", implementations::mergesort)
        .register_implementation("dot_naive", implementations::dot_naive)
        .register_implementation("dot_kahan", implementations::dot_kahan);
    debug!(
        generators = registry.names(CapabilityKind::Generator).len(),
        oracles = registry.names(CapabilityKind::Oracle).len(),
        implementations = registry.names(CapabilityKind::Implementation).len(),
        "built-in plugins registered"
    );
    registry
}

/// A fresh registry holding only the built-ins.
pub fn builtin_registry() -> Registry {
    let mut registry = Registry::new();
    register_builtins(&mut registry);
    registry
}
