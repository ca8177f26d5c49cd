use aletheia_core::{AletheiaError, RngHandle};
use aletheia_falsify::{Duel, PairedComparison};
use serde_json::Value;

use crate::implementations::{mergesort_counting, quicksort3_in_place};
use crate::values::int_array;

/// Element comparisons spent by three-way quicksort (A) versus mergesort (B).
#[derive(Debug, Clone, Copy, Default)]
pub struct Quicksort3VsMergesort;

impl PairedComparison for Quicksort3VsMergesort {
    fn label_a(&self) -> &str {
        "quicksort3"
    }

    fn label_b(&self) -> &str {
        "mergesort"
    }

    fn duel(&self, input: &Value, _rng: &mut RngHandle) -> Result<Duel, AletheiaError> {
        let mut values = int_array(input)?;
        let (_, merge_cost) = mergesort_counting(&values);
        let quick_cost = quicksort3_in_place(&mut values);
        Ok(Duel {
            cost_a: quick_cost as f64,
            cost_b: merge_cost as f64,
        })
    }
}
