//! Inter-spike intervals with bookkeeping

use serde::{Deserialize, Serialize};

/// One inter-spike interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    /// Interval length in seconds
    pub value: f64,
    /// Time of the spike opening the interval
    pub spike_time: f64,
    /// Trial of origin
    pub trial: usize,
    /// Position of the interval when all intervals are sorted by value
    pub rank: usize,
}

/// All intervals of a set of trials, in recording order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsiData {
    n_trials: usize,
    intervals: Vec<Interval>,
}

impl IsiData {
    /// Collect intervals and assign their ranks
    ///
    /// Equal values are ranked in recording order.
    pub fn new(n_trials: usize, mut intervals: Vec<Interval>) -> Self {
        let mut order: Vec<usize> = (0..intervals.len()).collect();
        order.sort_by(|&a, &b| intervals[a].value.total_cmp(&intervals[b].value));
        for (rank, idx) in order.into_iter().enumerate() {
            intervals[idx].rank = rank;
        }
        Self {
            n_trials,
            intervals,
        }
    }

    pub fn n_trials(&self) -> usize {
        self.n_trials
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Interval lengths in recording order
    pub fn values(&self) -> Vec<f64> {
        self.intervals.iter().map(|i| i.value).collect()
    }

    /// Intervals coming from trial `trial`
    pub fn from_trial(&self, trial: usize) -> impl Iterator<Item = &Interval> {
        self.intervals.iter().filter(move |i| i.trial == trial)
    }
}
