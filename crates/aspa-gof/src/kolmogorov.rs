//! Distribution of the two-sided Kolmogorov statistic
//!
//! P(D_n <= d) following G. Marsaglia, W. W. Tsang and J. Wang (2003),
//! "Evaluating Kolmogorov's Distribution", J. Stat. Software 8(18).
//!
//! The exact value is the (k, k) entry of H^n, where H is an m x m matrix
//! (m = 2k - 1, k = ceil(n d)), multiplied by n!/n^n. Entries of H^n grow
//! far past the f64 range for moderate n, so the power is carried as a
//! mantissa matrix plus a decimal exponent ([`ScaledMatrix`]).
//!
//! When d^2 n is large the tail approximation
//! `1 - 2 exp(-(2.000071 + 0.331/sqrt(n) + 1.409/n) d^2 n)` is used instead.

use nalgebra::DMatrix;
use tracing::{debug, trace};

/// Rescale once the central entry of a matrix power passes this
const OVERFLOW_GUARD: f64 = 1e140;
/// Rescale the running product once it falls below this
const UNDERFLOW_GUARD: f64 = 1e-140;
/// Decimal exponent moved in and out of the mantissa by one rescale
const RESCALE_DIGITS: i32 = 140;

/// Above this d^2 n the tail approximation is accurate to 6 digits
const ASYMPTOTIC_THRESHOLD: f64 = 7.24;
/// Same, for n > 99
const ASYMPTOTIC_THRESHOLD_LARGE_N: f64 = 3.76;

/// A square matrix stored as mantissa * 10^exponent
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ScaledMatrix {
    mantissa: DMatrix<f64>,
    exponent: i32,
}

impl ScaledMatrix {
    pub(crate) fn new(mantissa: DMatrix<f64>) -> Self {
        Self {
            mantissa,
            exponent: 0,
        }
    }

    pub(crate) fn exponent(&self) -> i32 {
        self.exponent
    }

    pub(crate) fn get(&self, i: usize, j: usize) -> f64 {
        self.mantissa[(i, j)]
    }

    fn multiply(&self, other: &ScaledMatrix) -> ScaledMatrix {
        ScaledMatrix {
            mantissa: &self.mantissa * &other.mantissa,
            exponent: self.exponent + other.exponent,
        }
    }

    /// Move 10^140 into the exponent if the central entry overflows the guard
    fn rescale(&mut self) {
        let c = self.mantissa.nrows() / 2;
        if self.mantissa[(c, c)] > OVERFLOW_GUARD {
            self.mantissa *= UNDERFLOW_GUARD;
            self.exponent += RESCALE_DIGITS;
            trace!(exponent = self.exponent, "rescaled matrix power");
        }
    }

    /// `self^n` by recursive halving; `n` must be at least 1
    pub(crate) fn power(&self, n: usize) -> ScaledMatrix {
        if n <= 1 {
            return self.clone();
        }
        let half = self.power(n / 2);
        let squared = half.multiply(&half);
        let mut result = if n % 2 == 0 {
            squared
        } else {
            self.multiply(&squared)
        };
        result.rescale();
        result
    }
}

/// The m x m matrix whose powers carry the Kolmogorov recursion
///
/// Entry (i, j) is 1/(i-j+1)! for j <= i+1 and 0 above the superdiagonal,
/// with the first column and last row reduced by powers of h, and the
/// bottom-left corner corrected by (2h-1)^m when 2h > 1.
fn recursion_matrix(m: usize, h: f64) -> DMatrix<f64> {
    let mut a = DMatrix::from_fn(m, m, |i, j| if j <= i + 1 { 1.0 } else { 0.0 });
    for i in 0..m {
        a[(i, 0)] -= h.powi(i as i32 + 1);
        a[(m - 1, i)] -= h.powi((m - i) as i32);
    }
    if 2.0 * h - 1.0 > 0.0 {
        a[(m - 1, 0)] += (2.0 * h - 1.0).powi(m as i32);
    }
    for i in 0..m {
        for j in 0..=i {
            for g in 1..=(i - j + 1) {
                a[(i, j)] /= g as f64;
            }
        }
    }
    a
}

/// P(D_n <= d) for the two-sided Kolmogorov statistic of a sample of size n
///
/// Returns exactly 0 for `d <= 0` and 1 for `d >= 1`. `n` must be at least
/// one; NaN is returned otherwise.
pub fn kolmogorov_cdf(n: usize, d: f64) -> f64 {
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
    let s = d * d * nf;
    if s > ASYMPTOTIC_THRESHOLD || (s > ASYMPTOTIC_THRESHOLD_LARGE_N && n > 99) {
        debug!(n, d, "Kolmogorov CDF from tail approximation");
        return 1.0 - 2.0 * (-(2.000071 + 0.331 / nf.sqrt() + 1.409 / nf) * s).exp();
    }

    let k = (nf * d).ceil() as usize;
    let m = 2 * k - 1;
    let h = k as f64 - nf * d;
    debug!(n, d, m, "Kolmogorov CDF from exact matrix power");

    let q = ScaledMatrix::new(recursion_matrix(m, h)).power(n);
    let mut value = q.get(k - 1, k - 1);
    let mut exponent = q.exponent();
    for i in 1..=n {
        value = value * i as f64 / nf;
        if value < UNDERFLOW_GUARD {
            value *= OVERFLOW_GUARD;
            exponent -= RESCALE_DIGITS;
        }
    }
    value * 10f64.powf(f64::from(exponent))
}

/// Upper tail P(D_n > d)
pub fn kolmogorov_p_value(n: usize, d: f64) -> f64 {
    1.0 - kolmogorov_cdf(n, d)
}
