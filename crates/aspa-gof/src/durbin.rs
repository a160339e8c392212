//! Durbin's modification of a uniform sample
//!
//! J. Durbin (1961), "Some methods of constructing exact tests",
//! Biometrika 48: 41-55. Given n values presumed i.i.d. U(0, 1), the n+1
//! spacings c_1 .. c_{n+1} (including the gaps to 0 and 1) are sorted, and
//!
//! ```text
//! g_i = (n + 2 - i) (c_(i) - c_(i-1)),   c_(0) = 0
//! w_r = g_1 + ... + g_r,                 r = 1..n
//! ```
//!
//! The w_r are again distributed as uniform order statistics, so the
//! Kolmogorov and Anderson-Darling machinery applies to them directly.

use crate::error::GofResult;
use crate::statistic::check_unit_interval;

/// Apply Durbin's modification; the result is sorted and lies in [0, 1]
pub fn durbin_modification(sample: &[f64]) -> GofResult<Vec<f64>> {
    check_unit_interval(sample)?;

    let mut sorted = sample.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();

    let mut spacings = Vec::with_capacity(n + 1);
    spacings.push(sorted[0]);
    spacings.extend(sorted.windows(2).map(|w| w[1] - w[0]));
    spacings.push(1.0 - sorted[n - 1]);
    spacings.sort_by(f64::total_cmp);

    let mut previous = 0.0;
    let mut cumulative = 0.0;
    let modified = spacings[..n]
        .iter()
        .enumerate()
        .map(|(idx, &c)| {
            let weight = (n + 1 - idx) as f64;
            cumulative += weight * (c - previous);
            previous = c;
            // w_n = 1 - c_(n+1) + c_(n) <= 1; rounding can overshoot by an ulp
            cumulative.min(1.0)
        })
        .collect();
    Ok(modified)
}
