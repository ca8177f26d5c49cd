//! Implementations under test: sorting and dot-product variants.

use aletheia_core::{AletheiaError, RngHandle};
use serde_json::{json, Value};

use crate::values::{float_pair, int_array};

/// Quicksort that keeps a single copy of each pivot, losing duplicates.
pub fn buggy_quicksort_values(values: &[i64]) -> Vec<i64> {
    if values.len() <= 1 {
        return values.to_vec();
    }
    let pivot = values[values.len() / 2];
    let left: Vec<i64> = values.iter().copied().filter(|&v| v < pivot).collect();
    let right: Vec<i64> = values.iter().copied().filter(|&v| v > pivot).collect();
    let mut sorted = buggy_quicksort_values(&left);
    sorted.push(pivot);
    sorted.extend(buggy_quicksort_values(&right));
    sorted
}

/// In-place quicksort with Dijkstra three-way partitioning.
///
/// Returns the number of element comparisons: one per element that is less
/// than the pivot, two for every other element of each partitioned range.
pub fn quicksort3_in_place(values: &mut [i64]) -> u64 {
    let mut comparisons = 0;
    sort_range(values, &mut comparisons);
    comparisons
}

fn sort_range(values: &mut [i64], comparisons: &mut u64) {
    if values.len() <= 1 {
        return;
    }
    let pivot = values[values.len() / 2];
    let (mut lt, mut i, mut gt) = (0, 0, values.len());
    while i < gt {
        *comparisons += 1;
        if values[i] < pivot {
            values.swap(lt, i);
            lt += 1;
            i += 1;
            continue;
        }
        *comparisons += 1;
        if values[i] == pivot {
            i += 1;
        } else {
            gt -= 1;
            values.swap(i, gt);
        }
    }
    let (lower, rest) = values.split_at_mut(lt);
    sort_range(lower, comparisons);
    sort_range(&mut rest[gt - lt..], comparisons);
}

/// Top-down mergesort. Returns the sorted copy and the number of merge comparisons.
pub fn mergesort_counting(values: &[i64]) -> (Vec<i64>, u64) {
    let mut comparisons = 0;
    let sorted = merge_sorted(values, &mut comparisons);
    (sorted, comparisons)
}

fn merge_sorted(values: &[i64], comparisons: &mut u64) -> Vec<i64> {
    if values.len() <= 1 {
        return values.to_vec();
    }
    let (left, right) = values.split_at(values.len() / 2);
    let left = merge_sorted(left, comparisons);
    let right = merge_sorted(right, comparisons);
    let mut out = Vec::with_capacity(values.len());
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        *comparisons += 1;
        if left[i] <= right[j] {
            out.push(left[i]);
            i += 1;
        } else {
            out.push(right[j]);
            j += 1;
        }
    }
    out.extend_from_slice(&left[i..]);
    out.extend_from_slice(&right[j..]);
    out
}

/// Left-to-right accumulation of `x[i] * y[i]`.
pub fn dot_naive_values(x: &[f64], y: &[f64]) -> f64 {
    x.iter().zip(y).fold(0.0, |acc, (a, b)| acc + a * b)
}

/// Kahan-compensated accumulation of `x[i] * y[i]`.
pub fn dot_kahan_values(x: &[f64], y: &[f64]) -> f64 {
    let mut sum = 0.0;
    let mut carry = 0.0;
    for (a, b) in x.iter().zip(y) {
        let term = a * b - carry;
        let next = sum + term;
        carry = (next - sum) - term;
        sum = next;
    }
    sum
}

/// Registry adapter for [`buggy_quicksort_values`].
pub fn buggy_quicksort(input: &Value, _rng: &mut RngHandle) -> Result<Value, AletheiaError> {
    Ok(json!(buggy_quicksort_values(&int_array(input)?)))
}

/// Registry adapter for [`quicksort3_in_place`].
pub fn quicksort3(input: &Value, _rng: &mut RngHandle) -> Result<Value, AletheiaError> {
    let mut values = int_array(input)?;
    quicksort3_in_place(&mut values);
    Ok(json!(values))
}

/// Registry adapter for [`mergesort_counting`].
pub fn mergesort(input: &Value, _rng: &mut RngHandle) -> Result<Value, AletheiaError> {
    let (sorted, _) = mergesort_counting(&int_array(input)?);
    Ok(json!(sorted))
}

/// Registry adapter for [`dot_naive_values`]. Non-finite sums encode as `null`.
pub fn dot_naive(input: &Value, _rng: &mut RngHandle) -> Result<Value, AletheiaError> {
    let (x, y) = float_pair(input)?;
    Ok(json!(dot_naive_values(&x, &y)))
}

/// Registry adapter for [`dot_kahan_values`].
pub fn dot_kahan(input: &Value, _rng: &mut RngHandle) -> Result<Value, AletheiaError> {
    let (x, y) = float_pair(input)?;
    Ok(json!(dot_kahan_values(&x, &y)))
}
