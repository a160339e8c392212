//! Configuration for trial segmentation
//!
//! Raw recordings are one long list of spike times. Splitting them into
//! trials needs the acquisition rate and the stimulation protocol timing.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SpikeError, SpikeResult};

/// Acquisition and protocol parameters
///
/// All durations are in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationConfig {
    /// Samples per second; raw timestamps are divided by this
    pub sample2second: f64,
    /// Time between the starts of successive trials
    pub inter_trial_interval: f64,
    /// Recorded length of each trial
    pub trial_duration: f64,
    /// Stimulus onset within a trial
    pub stim_onset: f64,
    /// Stimulus offset within a trial
    pub stim_offset: f64,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            sample2second: 15000.0,
            inter_trial_interval: 0.0,
            trial_duration: 0.0,
            stim_onset: 0.0,
            stim_offset: 0.0,
        }
    }
}

impl SegmentationConfig {
    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> SpikeResult<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file(path: impl AsRef<Path>) -> SpikeResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> SpikeResult<Self> {
        Ok(serde_json::from_str(json_str)?)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Validate configuration values
    pub fn validate(&self) -> SpikeResult<()> {
        if !(self.sample2second > 0.0) {
            return Err(SpikeError::InvalidConfig(
                "sample2second must be positive".to_string(),
            ));
        }

        if !(self.inter_trial_interval > 0.0) {
            return Err(SpikeError::InvalidConfig(
                "inter_trial_interval must be positive".to_string(),
            ));
        }

        if !(self.trial_duration > 0.0) || self.trial_duration > self.inter_trial_interval {
            return Err(SpikeError::InvalidConfig(
                "trial_duration must be positive and at most inter_trial_interval".to_string(),
            ));
        }

        if self.stim_offset < self.stim_onset {
            return Err(SpikeError::InvalidConfig(
                "stim_offset must not precede stim_onset".to_string(),
            ));
        }

        Ok(())
    }
}
