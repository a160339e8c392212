//! Plain-text readers for spike times and numeric columns
//!
//! Values are whitespace separated, usually one per line. Blank lines and
//! lines starting with `#` are skipped.

use std::io::BufRead;

use tracing::debug;

use crate::error::{SpikeError, SpikeResult};

/// Read every number from `reader`
///
/// Non-finite values are rejected; errors carry the 1-based line number.
pub fn read_column<R: BufRead>(reader: R) -> SpikeResult<Vec<f64>> {
    let mut values = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let text = line.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }
        for token in text.split_whitespace() {
            let value: f64 = token.parse().map_err(|e| SpikeError::Parse {
                line: idx + 1,
                message: format!("'{}': {}", token, e),
            })?;
            if !value.is_finite() {
                return Err(SpikeError::Parse {
                    line: idx + 1,
                    message: format!("'{}' is not a finite number", token),
                });
            }
            values.push(value);
        }
    }
    debug!(count = values.len(), "read numeric column");
    Ok(values)
}

/// Read raw spike timestamps and convert them to seconds
pub fn read_raw_spike_times<R: BufRead>(reader: R, sample2second: f64) -> SpikeResult<Vec<f64>> {
    if !(sample2second > 0.0) {
        return Err(SpikeError::InvalidConfig(format!(
            "sample2second must be positive, got {}",
            sample2second
        )));
    }
    let mut times = read_column(reader)?;
    for t in &mut times {
        *t /= sample2second;
    }
    Ok(times)
}
