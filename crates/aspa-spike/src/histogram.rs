//! Histograms and bin-count selection
//!
//! Bins cover the data range widened by one machine epsilon on each side,
//! so the extreme observations always fall inside. With [`BinScale::Log`]
//! the bins are equally spaced in log and reported on the original scale.
//!
//! The number of bins can be chosen with Rudemo's cross-validation score,
//! M. Rudemo (1982), "Empirical choice of histograms and kernel density
//! estimators", Scand. J. Statist. 9: 65-78.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{SpikeError, SpikeResult};

/// Spacing of bin edges
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinScale {
    #[default]
    Linear,
    Log,
}

impl BinScale {
    fn forward(self, x: f64) -> f64 {
        match self {
            Self::Linear => x,
            Self::Log => x.ln(),
        }
    }

    fn inverse(self, y: f64) -> f64 {
        match self {
            Self::Linear => y,
            Self::Log => y.exp(),
        }
    }

    /// Reject data the scale cannot represent
    fn check(self, data: &[f64]) -> SpikeResult<()> {
        if self == Self::Log {
            if let Some(&value) = data.iter().find(|&&x| !(x > 0.0)) {
                return Err(SpikeError::NegativeValue { value });
            }
        }
        Ok(())
    }
}

/// Range of `data` in transformed coordinates, widened by one epsilon
fn padded_range(data: &[f64], scale: BinScale) -> (f64, f64) {
    let (min, max) = data
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
            (lo.min(x), hi.max(x))
        });
    let (lo, hi) = match scale {
        BinScale::Linear => (
            min - f64::EPSILON * min.abs().max(1.0),
            max + f64::EPSILON * max.abs().max(1.0),
        ),
        BinScale::Log => (min * (1.0 - f64::EPSILON), max * (1.0 + f64::EPSILON)),
    };
    (scale.forward(lo), scale.forward(hi))
}

/// Bin counts over `m` equal bins of [lo, hi] (transformed coordinates)
fn bin_counts(values: impl Iterator<Item = f64>, lo: f64, hi: f64, m: usize) -> Vec<f64> {
    let width = (hi - lo) / m as f64;
    let mut counts = vec![0.0; m];
    for y in values {
        let idx = (((y - lo) / width).floor().max(0.0) as usize).min(m - 1);
        counts[idx] += 1.0;
    }
    counts
}

/// Histogram of a dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    edges: Vec<f64>,
    counts: Vec<f64>,
    n: usize,
    scale: BinScale,
}

impl Histogram {
    /// Build a histogram with `n_bins` bins
    pub fn build(data: &[f64], n_bins: usize, scale: BinScale) -> SpikeResult<Self> {
        if n_bins == 0 {
            return Err(SpikeError::InvalidBins(
                "number of bins must be positive".to_string(),
            ));
        }
        if data.is_empty() {
            return Err(SpikeError::EmptyTrain);
        }
        scale.check(data)?;

        let (lo, hi) = padded_range(data, scale);
        let delta = (hi - lo) / n_bins as f64;
        let edges = (0..=n_bins)
            .map(|i| {
                let y = if i == n_bins { hi } else { lo + i as f64 * delta };
                scale.inverse(y)
            })
            .collect();
        let counts = bin_counts(data.iter().map(|&x| scale.forward(x)), lo, hi, n_bins);
        debug!(n = data.len(), n_bins, ?scale, "built histogram");

        Ok(Self {
            edges,
            counts,
            n: data.len(),
            scale,
        })
    }

    pub fn n_bins(&self) -> usize {
        self.counts.len()
    }

    /// Number of observations
    pub fn n(&self) -> usize {
        self.n
    }

    pub fn scale(&self) -> BinScale {
        self.scale
    }

    /// The n_bins + 1 bin boundaries on the original scale
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    pub fn counts(&self) -> &[f64] {
        &self.counts
    }

    /// Counts divided by n times the bin width, a density estimate
    pub fn normalized(&self) -> Vec<f64> {
        let n = self.n as f64;
        self.counts
            .iter()
            .zip(self.edges.windows(2))
            .map(|(c, e)| c / (n * (e[1] - e[0])))
            .collect()
    }

    /// (left, right, value) for every bin, with densities when `prob` is set
    pub fn rows(&self, prob: bool) -> Vec<(f64, f64, f64)> {
        let values = if prob {
            self.normalized()
        } else {
            self.counts.clone()
        };
        self.edges
            .windows(2)
            .zip(values)
            .map(|(e, v)| (e[0], e[1], v))
            .collect()
    }
}

/// Rudemo's cross-validation score for `m` equal bins (smaller is better)
///
/// `(2 - (n + 1) sum p_i^2) m / (n - 1)` with p_i the fraction of the data
/// in bin i. The data are taken as they are; transform them first for log
/// bins.
pub fn rudemo_score(data: &[f64], m: usize) -> SpikeResult<f64> {
    if m == 0 {
        return Err(SpikeError::InvalidBins(
            "number of bins must be positive".to_string(),
        ));
    }
    if data.len() < 2 {
        return Err(SpikeError::InsufficientData {
            needed: 2,
            got: data.len(),
        });
    }
    let (lo, hi) = padded_range(data, BinScale::Linear);
    Ok(score_from_range(data, lo, hi, m))
}

fn score_from_range(data: &[f64], lo: f64, hi: f64, m: usize) -> f64 {
    let n = data.len() as f64;
    let sum_sq: f64 = bin_counts(data.iter().copied(), lo, hi, m)
        .iter()
        .map(|c| (c / n).powi(2))
        .sum();
    (2.0 - (n + 1.0) * sum_sq) * m as f64 / (n - 1.0)
}

/// Scores over a range of bin counts and the best of them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinCountSelection {
    /// (m, score) for every m explored
    pub scores: Vec<(usize, f64)>,
    /// Bin count with the smallest score (the first one on ties)
    pub best: usize,
    pub best_score: f64,
}

/// Explore bin counts from `from` to `to` inclusive
///
/// When `to < from` the range defaults to 2 ..= n/10.
pub fn select_bin_count(
    data: &[f64],
    from: usize,
    to: usize,
    scale: BinScale,
) -> SpikeResult<BinCountSelection> {
    if data.len() < 2 {
        return Err(SpikeError::InsufficientData {
            needed: 2,
            got: data.len(),
        });
    }
    let (from, to) = if to < from {
        (2, data.len() / 10)
    } else {
        (from, to)
    };
    if from == 0 || to < from {
        return Err(SpikeError::InvalidBins(format!(
            "cannot explore bin counts {} to {}",
            from, to
        )));
    }
    scale.check(data)?;
    info!(from, to, ?scale, "exploring bin counts");

    let transformed: Vec<f64> = data.iter().map(|&x| scale.forward(x)).collect();
    let (lo, hi) = padded_range(data, scale);

    let scores: Vec<(usize, f64)> = (from..=to)
        .map(|m| (m, score_from_range(&transformed, lo, hi, m)))
        .collect();
    let (best, best_score) = scores
        .iter()
        .copied()
        .fold((from, f64::INFINITY), |(bm, bs), (m, s)| {
            if s < bs {
                (m, s)
            } else {
                (bm, bs)
            }
        });
    info!(best, best_score, "best bin count");

    Ok(BinCountSelection {
        scores,
        best,
        best_score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_histogram() {
        let hist = Histogram::build(&[0.5, 1.5, 2.5, 3.5], 2, BinScale::Linear).unwrap();
        assert_eq!(hist.n_bins(), 2);
        assert_eq!(hist.counts(), &[2.0, 2.0]);
        assert!((hist.edges()[0] - 0.5).abs() < 1e-12);
        assert!((hist.edges()[1] - 2.0).abs() < 1e-12);
        assert!((hist.edges()[2] - 3.5).abs() < 1e-12);
        for density in hist.normalized() {
            assert!((density - 1.0 / 3.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_log_histogram() {
        let hist = Histogram::build(&[1.0, 5.0, 100.0], 2, BinScale::Log).unwrap();
        assert_eq!(hist.counts(), &[2.0, 1.0]);
        assert!((hist.edges()[1] - 10.0).abs() < 1e-9);
        assert_eq!(hist.scale(), BinScale::Log);
    }

    #[test]
    fn test_log_needs_positive_data() {
        assert!(matches!(
            Histogram::build(&[1.0, 0.0], 2, BinScale::Log),
            Err(SpikeError::NegativeValue { value }) if value == 0.0
        ));
    }

    #[test]
    fn test_constant_data() {
        let hist = Histogram::build(&[2.0, 2.0, 2.0], 3, BinScale::Linear).unwrap();
        assert_eq!(hist.counts().iter().sum::<f64>(), 3.0);
    }

    #[test]
    fn test_bad_arguments() {
        assert!(Histogram::build(&[1.0], 0, BinScale::Linear).is_err());
        assert!(matches!(
            Histogram::build(&[], 4, BinScale::Linear),
            Err(SpikeError::EmptyTrain)
        ));
    }

    #[test]
    fn test_rows() {
        let hist = Histogram::build(&[0.5, 1.5, 2.5, 3.5], 2, BinScale::Linear).unwrap();
        let rows = hist.rows(false);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].2, 2.0);
        assert_eq!(rows[0].1, rows[1].0);
        assert!((hist.rows(true)[0].2 - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_rudemo_score() {
        let data = [0.0, 1.0, 2.0, 3.0];
        // one bin: sum p^2 = 1
        assert!((rudemo_score(&data, 1).unwrap() + 1.0).abs() < 1e-12);
        // two bins of two points: sum p^2 = 1/2
        assert!((rudemo_score(&data, 2).unwrap() + 1.0 / 3.0).abs() < 1e-12);
        assert!(rudemo_score(&[1.0], 2).is_err());
    }

    #[test]
    fn test_select_bin_count() {
        let data = [0.0, 1.0, 2.0, 3.0];
        let selection = select_bin_count(&data, 1, 2, BinScale::Linear).unwrap();
        assert_eq!(selection.scores.len(), 2);
        assert_eq!(selection.best, 1);
        assert!((selection.best_score + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_select_default_range() {
        let data: Vec<f64> = (1..=50).map(|i| i as f64).collect();
        let selection = select_bin_count(&data, 5, 0, BinScale::Linear).unwrap();
        let explored: Vec<usize> = selection.scores.iter().map(|(m, _)| *m).collect();
        assert_eq!(explored, vec![2, 3, 4, 5]);
        // too little data for the default range
        assert!(select_bin_count(&data[..15], 5, 0, BinScale::Linear).is_err());
    }
}
