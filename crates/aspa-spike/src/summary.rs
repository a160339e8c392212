//! Summary statistics for inter-spike intervals
//!
//! Provides:
//! - Five-number summary (min, quartiles, max) with Tukey fences
//! - Mean, standard deviation, coefficient of variation
//! - Lagged Spearman rank correlation, a quick check of interval independence

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{SpikeError, SpikeResult};

/// Standard error factor of the Spearman coefficient under independence
const SPEARMAN_SE_FACTOR: f64 = 0.6325;

/// Five-number summary of a dataset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FiveNumberSummary {
    pub min: f64,
    pub first_quartile: f64,
    pub median: f64,
    pub third_quartile: f64,
    pub max: f64,
}

impl FiveNumberSummary {
    /// Compute the summary; quantiles interpolate linearly between order statistics
    pub fn from_data(data: &[f64]) -> SpikeResult<Self> {
        if data.is_empty() {
            return Err(SpikeError::EmptyTrain);
        }
        let mut sorted = data.to_vec();
        sorted.sort_by(f64::total_cmp);

        Ok(Self {
            min: sorted[0],
            first_quartile: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            third_quartile: quantile(&sorted, 0.75),
            max: sorted[sorted.len() - 1],
        })
    }

    /// Interquartile range
    pub fn iqr(&self) -> f64 {
        self.third_quartile - self.first_quartile
    }

    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Q1 - 1.5 IQR
    pub fn lower_fence(&self) -> f64 {
        self.first_quartile - 1.5 * self.iqr()
    }

    /// Q3 + 1.5 IQR
    pub fn upper_fence(&self) -> f64 {
        self.third_quartile + 1.5 * self.iqr()
    }
}

impl fmt::Display for FiveNumberSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "min: {:.6}  Q1: {:.6}  median: {:.6}  Q3: {:.6}  max: {:.6}",
            self.min, self.first_quartile, self.median, self.third_quartile, self.max
        )
    }
}

/// Quantile `p` of sorted data by linear interpolation
///
/// `sorted` must be non-empty and in increasing order.
pub fn quantile(sorted: &[f64], p: f64) -> f64 {
    let h = (sorted.len() - 1) as f64 * p.clamp(0.0, 1.0);
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
}

/// Mean, spread and variability of a dataset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStats {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator)
    pub std_dev: f64,
}

impl DescriptiveStats {
    pub fn from_data(data: &[f64]) -> SpikeResult<Self> {
        if data.len() < 2 {
            return Err(SpikeError::InsufficientData {
                needed: 2,
                got: data.len(),
            });
        }
        let count = data.len();
        let mean = data.iter().sum::<f64>() / count as f64;
        let ss: f64 = data.iter().map(|x| (x - mean).powi(2)).sum();
        Ok(Self {
            count,
            mean,
            std_dev: (ss / (count - 1) as f64).sqrt(),
        })
    }

    /// Coefficient of variation (std_dev / mean)
    pub fn cv(&self) -> f64 {
        self.std_dev / self.mean.abs()
    }
}

/// Mid-ranks (1-based, ties share their average rank)
pub fn mid_ranks(x: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..x.len()).collect();
    order.sort_by(|&a, &b| x[a].total_cmp(&x[b]));

    let mut ranks = vec![0.0; x.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && x[order[end]] == x[order[start]] {
            end += 1;
        }
        // positions start..end hold ranks start+1 ..= end
        let rank = (start + end + 1) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = rank;
        }
        start = end;
    }
    ranks
}

/// Spearman rank correlation between x[i] and x[i + lag]
pub fn lagged_spearman(x: &[f64], lag: usize) -> SpikeResult<f64> {
    if x.len() < lag + 2 {
        return Err(SpikeError::InsufficientData {
            needed: lag + 2,
            got: x.len(),
        });
    }
    let n = x.len() - lag;
    let a = mid_ranks(&x[..n]);
    let b = mid_ranks(&x[lag..]);

    // both rank vectors have mean (n + 1) / 2
    let center = (n + 1) as f64 / 2.0;
    let (mut sab, mut saa, mut sbb) = (0.0, 0.0, 0.0);
    for (ra, rb) in a.iter().zip(&b) {
        let da = ra - center;
        let db = rb - center;
        sab += da * db;
        saa += da * da;
        sbb += db * db;
    }
    Ok(sab / (saa * sbb).sqrt())
}

/// Normal-approximation interval `rho +/- z * 0.6325 / sqrt(n - 1)`
pub fn spearman_interval(rho: f64, n: usize, z: f64) -> (f64, f64) {
    let half_width = z * SPEARMAN_SE_FACTOR / ((n as f64) - 1.0).sqrt();
    (rho - half_width, rho + half_width)
}
