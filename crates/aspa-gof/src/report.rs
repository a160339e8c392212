//! One-call goodness-of-fit summary of a presumed-uniform sample

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::anderson_darling::anderson_darling_cdf;
use crate::error::GofResult;
use crate::kolmogorov::kolmogorov_cdf;
use crate::one_sided::kolmogorov_plus_cdf;
use crate::statistic::{anderson_darling_statistic, ordered, KolmogorovStatistics};

/// Kolmogorov and Anderson-Darling statistics with their distributions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GofReport {
    /// Sample size
    pub n: usize,
    /// Two-sided Kolmogorov statistic D
    pub d: f64,
    /// One-sided statistic D+
    pub d_plus: f64,
    /// One-sided statistic D-
    pub d_minus: f64,
    /// sqrt(n) D
    pub scaled_d: f64,
    /// P(D_n <= D)
    pub kolmogorov_cdf: f64,
    /// P(D_n > D)
    pub kolmogorov_p_value: f64,
    /// P(D+_n > D+)
    pub d_plus_p_value: f64,
    /// P(D-_n > D-)
    pub d_minus_p_value: f64,
    /// Anderson-Darling statistic W2
    pub anderson_darling: f64,
    /// P(W2_n <= W2)
    pub anderson_darling_cdf: f64,
    /// P(W2_n > W2)
    pub anderson_darling_p_value: f64,
}

impl GofReport {
    /// Test `sample` against U(0, 1)
    pub fn from_uniform_sample(sample: &[f64], sorted: bool) -> GofResult<Self> {
        let data = ordered(sample, sorted);
        let stats = KolmogorovStatistics::from_sample(&data, true)?;
        let w2 = anderson_darling_statistic(&data, true)?;
        let n = data.len();

        let k_cdf = kolmogorov_cdf(n, stats.d);
        let ad_cdf = anderson_darling_cdf(n, w2);
        debug!(n, d = stats.d, w2, "goodness-of-fit report");

        Ok(Self {
            n,
            d: stats.d,
            d_plus: stats.d_plus,
            d_minus: stats.d_minus,
            scaled_d: (n as f64).sqrt() * stats.d,
            kolmogorov_cdf: k_cdf,
            kolmogorov_p_value: 1.0 - k_cdf,
            d_plus_p_value: 1.0 - kolmogorov_plus_cdf(n, stats.d_plus),
            d_minus_p_value: 1.0 - kolmogorov_plus_cdf(n, stats.d_minus),
            anderson_darling: w2,
            anderson_darling_cdf: ad_cdf,
            anderson_darling_p_value: 1.0 - ad_cdf,
        })
    }
}

impl fmt::Display for GofReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "n = {}", self.n)?;
        writeln!(
            f,
            "Kolmogorov       D = {:.6}  sqrt(n)D = {:.6}  P(D <= d) = {:.6}  p = {:.6}",
            self.d, self.scaled_d, self.kolmogorov_cdf, self.kolmogorov_p_value
        )?;
        writeln!(
            f,
            "                 D+ = {:.6}  p = {:.6}   D- = {:.6}  p = {:.6}",
            self.d_plus, self.d_plus_p_value, self.d_minus, self.d_minus_p_value
        )?;
        write!(
            f,
            "Anderson-Darling W2 = {:.6}  P(W2 <= w) = {:.6}  p = {:.6}",
            self.anderson_darling, self.anderson_darling_cdf, self.anderson_darling_p_value
        )
    }
}
