//! Property-based integration tests for the goodness-of-fit distributions

use aspa_gof::{
    anderson_darling_p_value, anderson_darling_statistic, durbin_modification, kolmogorov_cdf,
    kolmogorov_p_value, kolmogorov_plus_cdf, GofReport, KolmogorovStatistics,
};
use proptest::prelude::*;

// === Known samples ===

#[test]
fn test_order_statistics_at_grid_points() {
    // x_(i) = i/n + eps puts the sample on the uniform grid
    let n = 50;
    let eps = 1e-6;
    let sample: Vec<f64> = (0..n).map(|i| i as f64 / n as f64 + eps).collect();
    let stats = KolmogorovStatistics::from_sample(&sample, true).unwrap();

    assert!((stats.d_plus - eps).abs() < 1e-12);
    assert!((stats.d - 1.0 / n as f64).abs() < 1e-5);
    assert!(kolmogorov_p_value(n, stats.d) > 0.999);
}

#[test]
fn test_endpoints_for_many_sizes() {
    for n in 1..=120 {
        assert_eq!(kolmogorov_cdf(n, 0.0), 0.0, "n={n}");
        assert_eq!(kolmogorov_cdf(n, 1.0), 1.0, "n={n}");
    }
}

#[test]
fn test_clustered_sample_is_rejected() {
    let sample: Vec<f64> = (0..60).map(|i| 0.4 + 0.003 * i as f64).collect();
    let report = GofReport::from_uniform_sample(&sample, true).unwrap();
    assert!(report.kolmogorov_p_value < 1e-6);
    assert!(report.anderson_darling_p_value < 1e-3);
}

// === Property-Based Tests ===

proptest! {
    #[test]
    fn test_kolmogorov_cdf_non_decreasing(n in 1usize..60, a in 0.0f64..1.0, b in 0.0f64..1.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let p_lo = kolmogorov_cdf(n, lo);
        let p_hi = kolmogorov_cdf(n, hi);
        // the exact and tail branches meet with a gap below 1e-6
        prop_assert!(p_lo <= p_hi + 1e-6, "n={} {}->{} {}->{}", n, lo, p_lo, hi, p_hi);
        prop_assert!((-1e-12..=1.0 + 1e-9).contains(&p_lo));
    }

    #[test]
    fn test_one_sided_dominates_two_sided(n in 1usize..60, d in 0.0f64..1.0) {
        prop_assert!(kolmogorov_cdf(n, d) <= kolmogorov_plus_cdf(n, d) + 1e-9);
    }

    #[test]
    fn test_one_sided_non_decreasing(n in 1usize..150, a in 0.0f64..1.0, b in 0.0f64..1.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(kolmogorov_plus_cdf(n, lo) <= kolmogorov_plus_cdf(n, hi) + 1e-9);
    }

    #[test]
    fn test_anderson_darling_p_value_bounded_and_decreasing(
        n in 2usize..500,
        a in 0.001f64..10.0,
        b in 0.001f64..10.0
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let p_lo = anderson_darling_p_value(n, lo);
        let p_hi = anderson_darling_p_value(n, hi);
        prop_assert!((0.0..=1.0).contains(&p_lo));
        prop_assert!((0.0..=1.0).contains(&p_hi));
        prop_assert!(p_hi <= p_lo + 1e-12, "n={} p({})={} p({})={}", n, lo, p_lo, hi, p_hi);
    }

    #[test]
    fn test_sorted_flag_is_idempotent(sample in prop::collection::vec(0.0f64..1.0, 1..80)) {
        let mut sorted = sample.clone();
        sorted.sort_by(f64::total_cmp);

        let from_unsorted = KolmogorovStatistics::from_sample(&sample, false).unwrap();
        let from_sorted = KolmogorovStatistics::from_sample(&sorted, true).unwrap();
        prop_assert_eq!(from_unsorted, from_sorted);

        let w_unsorted = anderson_darling_statistic(&sample, false).unwrap();
        let w_sorted = anderson_darling_statistic(&sorted, true).unwrap();
        prop_assert_eq!(w_unsorted.to_bits(), w_sorted.to_bits());
    }

    #[test]
    fn test_durbin_output_ordered_in_unit_interval(
        sample in prop::collection::vec(0.0f64..1.0, 1..80)
    ) {
        let w = durbin_modification(&sample).unwrap();
        prop_assert_eq!(w.len(), sample.len());
        prop_assert!(w.windows(2).all(|p| p[0] <= p[1]));
        prop_assert!(w.iter().all(|&x| (0.0..=1.0 + 1e-12).contains(&x)));
    }
}
