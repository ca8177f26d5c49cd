/// Conservative 95% upper bound on the failure probability after `trials`
/// clean runs.
///
/// Only defined when no failure was observed; a claim with failures is refuted,
/// not bounded, and callers should report [`failure_rate`] instead.
pub fn rule_of_three_upper_bound(failures: u64, trials: u64) -> Option<f64> {
    if failures == 0 && trials > 0 {
        Some(3.0 / trials as f64)
    } else {
        None
    }
}

/// Observed failure fraction, `None` when nothing ran.
pub fn failure_rate(failures: u64, trials: u64) -> Option<f64> {
    if trials == 0 {
        None
    } else {
        Some(failures as f64 / trials as f64)
    }
}
