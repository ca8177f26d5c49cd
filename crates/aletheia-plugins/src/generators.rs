//! Adversarial input generators.
//!
//! Every generator reads its options from the claim's domain parameters and
//! draws exclusively from the supplied [`RngHandle`].

use aletheia_core::errors::{invalid_input, AletheiaError};
use aletheia_core::{param_f64, param_i64, param_range, Params, RngHandle};
use rand::Rng;
use serde_json::{json, Value};

/// Largest value drawn by the wide-range integer generators.
pub const WIDE_VALUE_MAX: i64 = 10_000_000;

/// Domain parameter read by [`distinctness_ratio`].
pub const DISTINCTNESS_PARAM: &str = "distinctness_ratio";

fn draw_len(
    rng: &mut RngHandle,
    params: &Params,
    default: (i64, i64),
) -> Result<usize, AletheiaError> {
    let nmin = param_i64(params, "nmin", default.0)?;
    let nmax = param_i64(params, "nmax", default.1)?;
    if nmin < 0 || nmin > nmax {
        return Err(invalid_input(
            "param_length",
            format!("length bounds must satisfy 0 <= nmin <= nmax, got [{nmin}, {nmax}]"),
        ));
    }
    Ok(rng.gen_range(nmin..=nmax) as usize)
}

fn draw_values(rng: &mut RngHandle, len: usize, (lo, hi): (i64, i64)) -> Vec<i64> {
    (0..len).map(|_| rng.gen_range(lo..=hi)).collect()
}

/// Short arrays over a tiny value range, so duplicates are the norm.
///
/// Options: `nmin` (0), `nmax` (12), `range` ([0, 9]).
pub fn dup_heavy_small(rng: &mut RngHandle, params: &Params) -> Result<Value, AletheiaError> {
    let len = draw_len(rng, params, (0, 12))?;
    let range = param_range(params, "range", (0, 9))?;
    Ok(json!(draw_values(rng, len, range)))
}

/// Sorted arrays disturbed by a small fraction of random swaps.
///
/// Options: `nmin` (64), `nmax` (512), `range` ([0, 10^7]), `swaps_min`
/// (0.005) and `swaps_max` (0.08) bounding the swapped fraction.
pub fn nearly_sorted(rng: &mut RngHandle, params: &Params) -> Result<Value, AletheiaError> {
    let len = draw_len(rng, params, (64, 512))?;
    let range = param_range(params, "range", (0, WIDE_VALUE_MAX))?;
    let swaps_min = param_f64(params, "swaps_min", 0.005)?;
    let swaps_max = param_f64(params, "swaps_max", 0.08)?;
    if !(0.0..=1.0).contains(&swaps_min) || swaps_min > swaps_max || swaps_max > 1.0 {
        return Err(invalid_input(
            "param_swaps",
            format!(
                "swap fractions must satisfy 0 <= min <= max <= 1, got [{swaps_min}, {swaps_max}]"
            ),
        ));
    }
    let fraction = if swaps_min < swaps_max {
        rng.gen_range(swaps_min..swaps_max)
    } else {
        swaps_min
    };
    let mut values = draw_values(rng, len, range);
    values.sort_unstable();
    if len > 0 {
        let swaps = ((fraction * len as f64) as usize).max(1);
        for _ in 0..swaps {
            let i = rng.gen_range(0..len);
            let j = rng.gen_range(0..len);
            values.swap(i, j);
        }
    }
    Ok(json!(values))
}

/// Pairs of float vectors whose entries mix huge and tiny magnitudes.
///
/// Options: `nmin` (64), `nmax` (2048), `hi` (1e16), `lo` (1e-16). Each entry
/// is uniform in `[-0.5, 0.5)` scaled by `hi` or `lo` with equal odds.
pub fn float_dot_vectors(rng: &mut RngHandle, params: &Params) -> Result<Value, AletheiaError> {
    let len = draw_len(rng, params, (64, 2048))?;
    let hi = param_f64(params, "hi", 1e16)?;
    let lo = param_f64(params, "lo", 1e-16)?;
    let x = mixed_magnitudes(rng, len, hi, lo);
    let y = mixed_magnitudes(rng, len, hi, lo);
    Ok(json!({ "x": x, "y": y }))
}

fn mixed_magnitudes(rng: &mut RngHandle, len: usize, hi: f64, lo: f64) -> Vec<f64> {
    (0..len)
        .map(|_| {
            let unit = rng.gen::<f64>() - 0.5;
            let scale = if rng.gen::<f64>() < 0.5 { hi } else { lo };
            unit * scale
        })
        .collect()
}

/// Arrays whose number of distinct values is `round(rho * n)`, at least one.
///
/// Options: `distinctness_ratio` (0.01, in `(0, 1]`), `nmin` (256), `nmax`
/// (1024), `range` ([0, 10^7]).
pub fn distinctness_ratio(rng: &mut RngHandle, params: &Params) -> Result<Value, AletheiaError> {
    let rho = param_f64(params, DISTINCTNESS_PARAM, 0.01)?;
    if !(rho > 0.0 && rho <= 1.0) {
        return Err(invalid_input(
            "param_distinctness",
            format!("distinctness ratio must lie in (0, 1], got {rho}"),
        ));
    }
    let len = draw_len(rng, params, (256, 1024))?;
    let range = param_range(params, "range", (0, WIDE_VALUE_MAX))?;
    if len == 0 {
        return Ok(json!([]));
    }
    let distinct = ((rho * len as f64).round() as usize).clamp(1, len);
    let pool = draw_values(rng, distinct, range);
    let values: Vec<i64> = (0..len).map(|_| pool[rng.gen_range(0..distinct)]).collect();
    Ok(json!(values))
}

/// Arrays holding a single repeated value.
///
/// Options: `nmin` (128), `nmax` (1024), `range` ([0, 100]).
pub fn all_equal(rng: &mut RngHandle, params: &Params) -> Result<Value, AletheiaError> {
    let len = draw_len(rng, params, (128, 1024))?;
    let (lo, hi) = param_range(params, "range", (0, 100))?;
    let value = rng.gen_range(lo..=hi);
    Ok(json!(vec![value; len]))
}

/// Arrays drawn from a handful of distinct values.
///
/// Options: `nmin` (128), `nmax` (1024), `kmin` (1), `kmax` (4), `range`
/// ([0, 10^7]).
pub fn k_distinct(rng: &mut RngHandle, params: &Params) -> Result<Value, AletheiaError> {
    let len = draw_len(rng, params, (128, 1024))?;
    let kmin = param_i64(params, "kmin", 1)?;
    let kmax = param_i64(params, "kmax", 4)?;
    if kmin < 1 || kmin > kmax {
        return Err(invalid_input(
            "param_distinct_count",
            format!("distinct counts must satisfy 1 <= kmin <= kmax, got [{kmin}, {kmax}]"),
        ));
    }
    let range = param_range(params, "range", (0, WIDE_VALUE_MAX))?;
    let distinct = rng.gen_range(kmin..=kmax) as usize;
    let pool = draw_values(rng, distinct, range);
    let values: Vec<i64> = (0..len).map(|_| pool[rng.gen_range(0..distinct)]).collect();
    Ok(json!(values))
}
