//! Oracles deciding whether an implementation's output is acceptable.

use std::collections::BTreeMap;

use aletheia_core::{AletheiaError, Verdict};
use serde_json::Value;

use crate::values::{float_pair, int_array, try_int_array};

/// Relative tolerance accepted by [`dot_correctness`].
pub const DOT_RELATIVE_TOLERANCE: f64 = 1e-6;

fn is_sorted(values: &[i64]) -> bool {
    values.windows(2).all(|pair| pair[0] <= pair[1])
}

fn multiset(values: &[i64]) -> BTreeMap<i64, usize> {
    let mut counts = BTreeMap::new();
    for &value in values {
        *counts.entry(value).or_insert(0) += 1;
    }
    counts
}

/// Passes when the output is sorted ascending and is a permutation of the input.
pub fn sort_correctness(input: &Value, output: &Value) -> Result<Verdict, AletheiaError> {
    let original = int_array(input)?;
    let Some(sorted) = try_int_array(output) else {
        return Ok(Verdict::default().with_detail("reason", "output_not_int_array"));
    };
    let ordered = is_sorted(&sorted);
    let permutation = multiset(&original) == multiset(&sorted);
    if ordered && permutation {
        return Ok(Verdict::pass());
    }
    Ok(Verdict::default()
        .with_detail("reason", "not_sorted_or_not_permutation")
        .with_detail("sorted", ordered)
        .with_detail("permutation", permutation)
        .with_detail("inputLen", original.len())
        .with_detail("outputLen", sorted.len()))
}

/// Passes when the output lies within `1e-6 * (1 + |baseline|)` of the
/// correctly rounded dot product of the input vectors.
pub fn dot_correctness(input: &Value, output: &Value) -> Result<Verdict, AletheiaError> {
    let (x, y) = float_pair(input)?;
    let baseline = exact_sum(x.iter().zip(&y).map(|(a, b)| a * b));
    let tolerance = DOT_RELATIVE_TOLERANCE * (1.0 + baseline.abs());
    let observed = output.as_f64().filter(|value| value.is_finite());
    if let Some(observed) = observed {
        if (observed - baseline).abs() <= tolerance {
            return Ok(Verdict::pass());
        }
    }
    Ok(Verdict::default()
        .with_detail("baseline", baseline)
        .with_detail("observed", output.clone())
        .with_detail("tolerance", tolerance))
}

/// Correctly rounded sum of `values` using Shewchuk's non-overlapping partials.
///
/// Falls back to plain summation when any term is non-finite.
pub fn exact_sum<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    let values: Vec<f64> = values.into_iter().collect();
    if values.iter().any(|value| !value.is_finite()) {
        return values.iter().sum();
    }
    let mut partials: Vec<f64> = Vec::new();
    for mut x in values {
        let mut kept = 0;
        for idx in 0..partials.len() {
            let mut y = partials[idx];
            if x.abs() < y.abs() {
                std::mem::swap(&mut x, &mut y);
            }
            let hi = x + y;
            let lo = y - (hi - x);
            if lo != 0.0 {
                partials[kept] = lo;
                kept += 1;
            }
            x = hi;
        }
        partials.truncate(kept);
        partials.push(x);
    }

    let Some(mut hi) = partials.pop() else {
        return 0.0;
    };
    let mut lo = 0.0;
    while let Some(y) = partials.pop() {
        let x = hi;
        hi = x + y;
        lo = y - (hi - x);
        if lo != 0.0 {
            break;
        }
    }
    // Round half-even across the remaining partials.
    if let Some(&next) = partials.last() {
        if (lo < 0.0 && next < 0.0) || (lo > 0.0 && next > 0.0) {
            let y = lo * 2.0;
            let x = hi + y;
            if y == x - hi {
                hi = x;
            }
        }
    }
    hi
}
