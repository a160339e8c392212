//! Time rescaling of inter-spike intervals
//!
//! Under a homogeneous Poisson hypothesis the spike times of a train,
//! divided by the time of the last spike, are the ordered sample of a
//! uniform distribution on [0, 1]. These values are what the
//! goodness-of-fit tests consume.

use tracing::debug;

use crate::error::{SpikeError, SpikeResult};

/// Normalized cumulative sums of `isi`, without the final value
///
/// For intervals i_1 .. i_n the result is (s_1 / s_n, ..., s_{n-1} / s_n)
/// with s_k = i_1 + ... + i_k. The dropped last value is identically 1.
pub fn counting_process_uniforms(isi: &[f64]) -> SpikeResult<Vec<f64>> {
    if isi.len() < 2 {
        return Err(SpikeError::InsufficientData {
            needed: 2,
            got: isi.len(),
        });
    }
    if let Some(&value) = isi.iter().find(|&&x| !(x >= 0.0)) {
        return Err(SpikeError::InvalidConfig(format!(
            "inter-spike intervals must be non-negative, got {}",
            value
        )));
    }

    let cumulative: Vec<f64> = isi
        .iter()
        .scan(0.0, |acc, &x| {
            *acc += x;
            Some(*acc)
        })
        .collect();
    let total = cumulative[cumulative.len() - 1];
    if !(total > 0.0) {
        return Err(SpikeError::InvalidConfig(
            "inter-spike intervals sum to zero".to_string(),
        ));
    }
    debug!(n = isi.len(), total, "counting process transform");

    Ok(cumulative[..cumulative.len() - 1]
        .iter()
        .map(|s| s / total)
        .collect())
}
