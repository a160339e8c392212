//! Error types for aspa-gof

use thiserror::Error;

/// Errors raised by the goodness-of-fit routines
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GofError {
    /// The sample has no elements
    #[error("Sample is empty")]
    EmptySample,

    /// A value lies outside [0, 1] where a probability was expected
    #[error("Sample value {value} at index {index} is outside [0, 1]")]
    OutOfUnitInterval { index: usize, value: f64 },

    /// Unrecognized Kolmogorov statistic selector
    #[error("Unknown Kolmogorov statistic '{0}' (expected D, D+ or D-)")]
    InvalidSelector(String),
}

/// Result type alias for goodness-of-fit operations
pub type GofResult<T> = Result<T, GofError>;
