//! Multi-trial spike trains
//!
//! A recording made of repeated stimulations is stored as one vector of
//! spike times per trial, each expressed relative to the start of its trial.
//! Trials can be pooled with [`SpikeTrains::aggregate`], which superposes
//! them on the common within-trial time base.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::SegmentationConfig;
use crate::error::{SpikeError, SpikeResult};
use crate::isi::{Interval, IsiData};

/// Spike times grouped by trial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpikeTrains {
    trials: Vec<Vec<f64>>,
    trial_duration: f64,
    stim_onset: f64,
    stim_offset: f64,
    n_aggregated: usize,
}

impl SpikeTrains {
    /// Build from trials whose spike times are already within-trial
    ///
    /// Every trial must be sorted with times in [0, trial_duration).
    pub fn from_trials(
        trials: Vec<Vec<f64>>,
        trial_duration: f64,
        stim_onset: f64,
        stim_offset: f64,
    ) -> SpikeResult<Self> {
        if !(trial_duration > 0.0) {
            return Err(SpikeError::InvalidConfig(
                "trial_duration must be positive".to_string(),
            ));
        }
        if trials.is_empty() {
            return Err(SpikeError::EmptyTrain);
        }
        for (i, trial) in trials.iter().enumerate() {
            if !trial.windows(2).all(|w| w[0] <= w[1]) {
                return Err(SpikeError::InvalidConfig(format!(
                    "spike times of trial {} are not sorted",
                    i
                )));
            }
            if let Some(&t) = trial.iter().find(|&&t| !(0.0..trial_duration).contains(&t)) {
                return Err(SpikeError::InvalidConfig(format!(
                    "spike time {} of trial {} is outside [0, {})",
                    t, i, trial_duration
                )));
            }
        }
        Ok(Self {
            trials,
            trial_duration,
            stim_onset,
            stim_offset,
            n_aggregated: 1,
        })
    }

    /// Split one long list of spike times (in seconds) into trials
    ///
    /// A spike at time t belongs to trial floor(t / inter_trial_interval).
    /// Spikes falling after the recorded part of their trial, or before
    /// time zero, are dropped. Trials without spikes are kept.
    pub fn from_raw(times: &[f64], config: &SegmentationConfig) -> SpikeResult<Self> {
        config.validate()?;
        if times.is_empty() {
            return Err(SpikeError::EmptyTrain);
        }

        let mut sorted = times.to_vec();
        if !times.windows(2).all(|w| w[0] <= w[1]) {
            warn!("spike times are not in increasing order, sorting them");
            sorted.sort_by(f64::total_cmp);
        }

        let iti = config.inter_trial_interval;
        let last = sorted[sorted.len() - 1];
        let n_trials = if last < 0.0 {
            1
        } else {
            (last / iti).floor() as usize + 1
        };

        let mut trials = vec![Vec::new(); n_trials];
        let mut dropped = 0usize;
        for &t in &sorted {
            if t < 0.0 {
                dropped += 1;
                continue;
            }
            let trial = ((t / iti).floor() as usize).min(n_trials - 1);
            let within = (t - trial as f64 * iti).max(0.0);
            if within >= config.trial_duration {
                dropped += 1;
                continue;
            }
            trials[trial].push(within);
        }
        if dropped > 0 {
            warn!(dropped, "spikes outside the recorded part of their trial");
        }

        let segmented = Self {
            trials,
            trial_duration: config.trial_duration,
            stim_onset: config.stim_onset,
            stim_offset: config.stim_offset,
            n_aggregated: 1,
        };
        info!(
            n_trials = segmented.n_trials(),
            n_spikes = segmented.n_spikes(),
            "segmented raw spike times"
        );
        Ok(segmented)
    }

    /// Superpose every trial into a single one
    pub fn aggregate(&self) -> Self {
        let mut merged: Vec<f64> = self.trials.iter().flatten().copied().collect();
        merged.sort_by(f64::total_cmp);
        Self {
            trials: vec![merged],
            trial_duration: self.trial_duration,
            stim_onset: self.stim_onset,
            stim_offset: self.stim_offset,
            n_aggregated: self.n_aggregated * self.n_trials(),
        }
    }

    pub fn n_trials(&self) -> usize {
        self.trials.len()
    }

    /// Total number of spikes over all trials
    pub fn n_spikes(&self) -> usize {
        self.trials.iter().map(Vec::len).sum()
    }

    /// Spike times of trial `i`
    pub fn trial(&self, i: usize) -> Option<&[f64]> {
        self.trials.get(i).map(Vec::as_slice)
    }

    pub fn trials(&self) -> &[Vec<f64>] {
        &self.trials
    }

    pub fn trial_duration(&self) -> f64 {
        self.trial_duration
    }

    pub fn stim_onset(&self) -> f64 {
        self.stim_onset
    }

    pub fn stim_offset(&self) -> f64 {
        self.stim_offset
    }

    /// Number of original trials pooled into each stored trial
    pub fn n_aggregated(&self) -> usize {
        self.n_aggregated
    }

    /// Mean discharge rate in Hz
    pub fn rate(&self) -> f64 {
        let observed = (self.n_aggregated * self.n_trials()) as f64 * self.trial_duration;
        self.n_spikes() as f64 / observed
    }

    /// Inter-spike intervals, trial after trial
    ///
    /// No interval spans the boundary between two trials.
    pub fn isi(&self) -> Vec<f64> {
        self.trials
            .iter()
            .flat_map(|trial| trial.windows(2).map(|w| w[1] - w[0]))
            .collect()
    }

    /// Inter-spike intervals with their origin and rank
    pub fn isi_data(&self) -> IsiData {
        let intervals = self
            .trials
            .iter()
            .enumerate()
            .flat_map(|(trial, times)| {
                times.windows(2).map(move |w| Interval {
                    value: w[1] - w[0],
                    spike_time: w[0],
                    trial,
                    rank: 0,
                })
            })
            .collect();
        IsiData::new(self.n_trials(), intervals)
    }
}
