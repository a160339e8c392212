//! Distribution of the one-sided Kolmogorov statistics
//!
//! Equation 3 of Z. W. Birnbaum and F. H. Tingey (1951), "One-sided
//! confidence contours for probability distribution functions",
//! Ann. Math. Statist. 22: 592-596. D+ and D- share the same distribution.

/// P(D+_n <= d), equivalently P(D-_n <= d)
///
/// `1 - d * sum_{j=0}^{floor(n(1-d))} C(n,j) (1-d-j/n)^(n-j) (d+j/n)^(j-1)`,
/// with every term evaluated in log space so that large `n` does not
/// overflow the binomial coefficients.
pub fn kolmogorov_plus_cdf(n: usize, d: f64) -> f64 {
    if n == 0 || d.is_nan() {
        return f64::NAN;
    }
    if d <= 0.0 {
        return 0.0;
    }
    if d >= 1.0 {
        return 1.0;
    }

    let nf = n as f64;
    let k = (nf * (1.0 - d)).floor() as usize;
    let mut ln_choose = 0.0;
    let mut sum = 0.0;
    for j in 0..=k {
        if j > 0 {
            ln_choose += ((n - j + 1) as f64 / j as f64).ln();
        }
        let jf = j as f64;
        let gap = 1.0 - d - jf / nf;
        // (1 - d - j/n)^(n-j) is zero here; rounding may make gap negative
        if gap <= 0.0 {
            break;
        }
        sum += (ln_choose + (nf - jf) * gap.ln() + (jf - 1.0) * (d + jf / nf).ln()).exp();
    }
    1.0 - d * sum
}

/// Upper tail P(D+_n > d)
pub fn kolmogorov_plus_p_value(n: usize, d: f64) -> f64 {
    1.0 - kolmogorov_plus_cdf(n, d)
}
