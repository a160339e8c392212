//! aspa-gof - Goodness-of-fit distributions for spike train analysis
//!
//! Tests of a presumed-uniform sample against U(0, 1):
//!
//! - **Kolmogorov**: exact two-sided distribution via a rescaled matrix
//!   power, with a tail approximation for large d^2 n
//! - **One-sided Kolmogorov**: Birnbaum-Tingey distribution of D+ and D-
//! - **Anderson-Darling**: limiting distribution (series and rational forms)
//!   with a finite-sample correction
//! - **Durbin**: spacing transform that restores uniform order statistics
//! - **Gaussian**: standard normal CDF and complementary CDF
//!
//! # Usage
//!
//! Samples usually come from a probability integral transform of spike
//! timing data (for example the counting-process transform of inter-spike
//! intervals). [`GofReport`] runs every test in one call.

pub mod anderson_darling;
pub mod durbin;
pub mod error;
pub mod kolmogorov;
pub mod normal;
pub mod one_sided;
pub mod report;
pub mod statistic;

pub use anderson_darling::*;
pub use durbin::*;
pub use error::*;
pub use kolmogorov::{kolmogorov_cdf, kolmogorov_p_value};
pub use normal::*;
pub use one_sided::*;
pub use report::*;
pub use statistic::{
    anderson_darling_statistic, kolmogorov_statistic, kolmogorov_statistic_named,
    KolmogorovSide, KolmogorovStatistics,
};
