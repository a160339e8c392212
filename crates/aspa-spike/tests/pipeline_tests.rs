//! Spike train pipeline integration tests
//!
//! Raw timestamps -> trials -> intervals -> rescaled times -> goodness of fit.

use std::io::Cursor;

use aspa_gof::{durbin_modification, GofReport};
use aspa_spike::{
    counting_process_uniforms, lagged_spearman, read_raw_spike_times, select_bin_count,
    BinScale, FiveNumberSummary, Histogram, SegmentationConfig, SpikeTrains,
};
use proptest::prelude::*;
use rstest::rstest;

fn protocol() -> SegmentationConfig {
    SegmentationConfig {
        sample2second: 1000.0,
        inter_trial_interval: 10.0,
        trial_duration: 10.0,
        ..Default::default()
    }
}

/// Exponential quantiles at golden-ratio points, a deterministic stand-in
/// for Poisson intervals
fn poisson_like_intervals(n: usize) -> Vec<f64> {
    (1..=n)
        .map(|k| {
            let u = (k as f64 * 0.618_033_988_749_894_9).fract();
            -u.ln()
        })
        .collect()
}

// === Segmentation ===

#[test]
fn test_raw_text_to_intervals() {
    let input = "# one spike per line, in samples\n500\n1500\n4000\n10250\n11000\n";
    let times = read_raw_spike_times(Cursor::new(input), 1000.0).unwrap();
    let trains = SpikeTrains::from_raw(&times, &protocol()).unwrap();

    assert_eq!(trains.n_trials(), 2);
    assert_eq!(trains.isi(), vec![1.0, 2.5, 0.75]);
    assert!((trains.rate() - 5.0 / 20.0).abs() < 1e-12);

    let pooled = trains.aggregate();
    assert_eq!(pooled.n_aggregated(), 2);
    assert_eq!(pooled.isi().len(), 4);
}

#[test]
fn test_interval_summary() {
    let isi = poisson_like_intervals(400);
    let summary = FiveNumberSummary::from_data(&isi).unwrap();
    // exponential(1) median is ln 2
    assert!((summary.median - std::f64::consts::LN_2).abs() < 0.05);
    let rho = lagged_spearman(&isi, 1).unwrap();
    assert!(rho.abs() <= 1.0);
}

// === Goodness of fit ===

#[test]
fn test_poisson_like_train_is_accepted() {
    let uniforms = counting_process_uniforms(&poisson_like_intervals(200)).unwrap();
    let report = GofReport::from_uniform_sample(&uniforms, true).unwrap();
    assert_eq!(report.n, 199);
    assert!(report.kolmogorov_p_value > 0.05);
    assert!(report.anderson_darling_p_value > 0.05);
}

#[test]
fn test_accelerating_train_is_rejected() {
    // intervals growing linearly: the rescaled times bunch up near 0
    let isi: Vec<f64> = (1..=200).map(|k| k as f64).collect();
    let uniforms = counting_process_uniforms(&isi).unwrap();
    let report = GofReport::from_uniform_sample(&uniforms, true).unwrap();
    assert!(report.kolmogorov_p_value < 1e-6);
}

#[test]
fn test_durbin_on_rescaled_times() {
    let uniforms = counting_process_uniforms(&poisson_like_intervals(100)).unwrap();
    let modified = durbin_modification(&uniforms).unwrap();
    assert_eq!(modified.len(), uniforms.len());
    let report = GofReport::from_uniform_sample(&modified, true).unwrap();
    assert!((0.0..=1.0).contains(&report.kolmogorov_p_value));
}

// === Histograms ===

#[rstest]
#[case(BinScale::Linear)]
#[case(BinScale::Log)]
fn test_histogram_keeps_every_interval(#[case] scale: BinScale) {
    let isi = poisson_like_intervals(300);
    let hist = Histogram::build(&isi, 12, scale).unwrap();
    assert_eq!(hist.counts().iter().sum::<f64>(), 300.0);
    let integral: f64 = hist
        .normalized()
        .iter()
        .zip(hist.edges().windows(2))
        .map(|(d, e)| d * (e[1] - e[0]))
        .sum();
    assert!((integral - 1.0).abs() < 1e-9);
}

#[test]
fn test_bin_count_selection_on_intervals() {
    let isi = poisson_like_intervals(300);
    // to < from selects the default range 2 ..= n/10
    let selection = select_bin_count(&isi, 1, 0, BinScale::Log).unwrap();
    assert_eq!(selection.scores.len(), 29);
    assert!((2..=30).contains(&selection.best));
}

// === Property-Based Tests ===

proptest! {
    #[test]
    fn test_segmentation_keeps_all_spikes(times in prop::collection::vec(0.0f64..100.0, 1..200)) {
        let trains = SpikeTrains::from_raw(&times, &protocol()).unwrap();
        prop_assert_eq!(trains.n_spikes(), times.len());
        prop_assert_eq!(trains.aggregate().n_spikes(), times.len());
        let non_empty = trains.trials().iter().filter(|t| !t.is_empty()).count();
        prop_assert_eq!(trains.isi().len() + non_empty, times.len());
    }

    #[test]
    fn test_histogram_counts_sum_to_n(
        data in prop::collection::vec(-50.0f64..50.0, 1..300),
        n_bins in 1usize..40
    ) {
        let hist = Histogram::build(&data, n_bins, BinScale::Linear).unwrap();
        prop_assert_eq!(hist.counts().iter().sum::<f64>(), data.len() as f64);
        prop_assert_eq!(hist.edges().len(), n_bins + 1);
    }

    #[test]
    fn test_uniforms_are_ordered(isi in prop::collection::vec(0.001f64..10.0, 2..200)) {
        let u = counting_process_uniforms(&isi).unwrap();
        prop_assert_eq!(u.len(), isi.len() - 1);
        prop_assert!(u.windows(2).all(|w| w[0] <= w[1]));
        prop_assert!(u.iter().all(|&x| x > 0.0 && x <= 1.0));
    }
}
