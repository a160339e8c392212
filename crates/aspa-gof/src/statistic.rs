//! Kolmogorov and Anderson-Darling statistics of a sample against U(0, 1)
//!
//! Samples are expected to be probability-integral-transformed values;
//! anything outside [0, 1], NaN included, is rejected with
//! [`GofError::OutOfUnitInterval`]. Unsorted input is copied and sorted;
//! the caller's slice is never reordered.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{GofError, GofResult};

/// Which Kolmogorov statistic to report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KolmogorovSide {
    /// max(D+, D-), selector "D"
    TwoSided,
    /// Largest excess of the sample over the uniform CDF, selector "D+"
    Plus,
    /// Largest shortfall of the sample below the uniform CDF, selector "D-"
    Minus,
}

impl KolmogorovSide {
    pub fn selector(&self) -> &'static str {
        match self {
            Self::TwoSided => "D",
            Self::Plus => "D+",
            Self::Minus => "D-",
        }
    }
}

impl fmt::Display for KolmogorovSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.selector())
    }
}

impl FromStr for KolmogorovSide {
    type Err = GofError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "D" => Ok(Self::TwoSided),
            "D+" => Ok(Self::Plus),
            "D-" => Ok(Self::Minus),
            other => Err(GofError::InvalidSelector(other.to_string())),
        }
    }
}

/// The three Kolmogorov statistics of one sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KolmogorovStatistics {
    /// Two-sided statistic
    pub d: f64,
    /// max_i (x_(i) - i/n)
    pub d_plus: f64,
    /// max_i ((i+1)/n - x_(i))
    pub d_minus: f64,
}

impl KolmogorovStatistics {
    /// Compute all three statistics in a single pass over the order statistics
    pub fn from_sample(sample: &[f64], sorted: bool) -> GofResult<Self> {
        check_unit_interval(sample)?;
        let data = ordered(sample, sorted);
        let inv_n = 1.0 / data.len() as f64;

        let mut d_plus = 0.0_f64;
        let mut d_minus = 0.0_f64;
        for (i, &x) in data.iter().enumerate() {
            let diff = x - i as f64 * inv_n;
            d_plus = d_plus.max(diff);
            d_minus = d_minus.max(inv_n - diff);
        }

        Ok(Self {
            d: d_plus.max(d_minus),
            d_plus,
            d_minus,
        })
    }

    /// Select one of the statistics
    pub fn get(&self, side: KolmogorovSide) -> f64 {
        match side {
            KolmogorovSide::TwoSided => self.d,
            KolmogorovSide::Plus => self.d_plus,
            KolmogorovSide::Minus => self.d_minus,
        }
    }
}

/// Kolmogorov statistic of `sample` for the requested side
pub fn kolmogorov_statistic(sample: &[f64], sorted: bool, side: KolmogorovSide) -> GofResult<f64> {
    Ok(KolmogorovStatistics::from_sample(sample, sorted)?.get(side))
}

/// Kolmogorov statistic selected by its textual name ("D", "D+" or "D-")
pub fn kolmogorov_statistic_named(sample: &[f64], sorted: bool, what: &str) -> GofResult<f64> {
    let side: KolmogorovSide = what.parse()?;
    kolmogorov_statistic(sample, sorted, side)
}

/// Anderson-Darling statistic
///
/// `W2 = -n - (1/n) sum_i (2i+1) [ln x_(i) + ln(1 - x_(n-1-i))]`. A value at
/// exactly 0 or 1 sends the statistic to +infinity.
pub fn anderson_darling_statistic(sample: &[f64], sorted: bool) -> GofResult<f64> {
    check_unit_interval(sample)?;
    let data = ordered(sample, sorted);
    let n = data.len();
    let nf = n as f64;

    let a: f64 = (0..n)
        .map(|i| (2 * i + 1) as f64 * (data[i] * (1.0 - data[n - 1 - i])).ln())
        .sum();
    Ok(-a / nf - nf)
}

/// Reject empty samples and the first value outside [0, 1]
pub(crate) fn check_unit_interval(sample: &[f64]) -> GofResult<()> {
    if sample.is_empty() {
        return Err(GofError::EmptySample);
    }
    match sample
        .iter()
        .enumerate()
        .find(|(_, v)| !(0.0..=1.0).contains(*v))
    {
        Some((index, &value)) => {
            warn!(index, value, "sample value outside [0, 1]");
            Err(GofError::OutOfUnitInterval { index, value })
        }
        None => Ok(()),
    }
}

/// Borrow `sample` if it is already sorted, otherwise sort a copy
pub(crate) fn ordered(sample: &[f64], sorted: bool) -> Cow<'_, [f64]> {
    if sorted {
        Cow::Borrowed(sample)
    } else {
        let mut copy = sample.to_vec();
        copy.sort_by(f64::total_cmp);
        Cow::Owned(copy)
    }
}
