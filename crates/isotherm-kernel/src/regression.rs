//! Ordinary least-squares line fit.
//!
//! Closed form over the four running sums:
//!
//! ```text
//! slope     = (n·Σxy − Σx·Σy) / (n·Σx² − (Σx)²)
//! intercept = (Σy − slope·Σx) / n
//! ```
//!
//! `x` may be unsorted and unevenly spaced. Hosts conventionally pass
//! `x = 1..=n` for an index trend, but nothing here assumes it.

use isotherm_core::KernelError;

/// A fitted line `y = slope * x + intercept`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fit {
    /// Change in `y` per unit `x`.
    pub slope: f64,
    /// Value of `y` at `x = 0`.
    pub intercept: f64,
}

impl Fit {
    /// Evaluate the line at `x`.
    pub fn evaluate(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Evaluate the line at each of `xs`.
    pub fn trend_line(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.evaluate(x)).collect()
    }

    /// Evaluate the line at `x_origin + i` for `i in 0..n`, matching an
    /// index-based fit whose `x` series started at `x_origin`.
    pub fn index_trend(&self, n: usize, x_origin: f64) -> Vec<f64> {
        (0..n).map(|i| self.evaluate(x_origin + i as f64)).collect()
    }
}

/// Fit `y = slope * x + intercept` by ordinary least squares.
///
/// # Errors
///
/// - `InvalidInput` if `x` and `y` differ in length.
/// - `DegenerateInput` if there are fewer than two points, all `x` are
///   identical, or the denominator is zero or not finite.
pub fn linear_regression(x: &[f64], y: &[f64]) -> Result<Fit, KernelError> {
    if x.len() != y.len() {
        return Err(KernelError::invalid(format!(
            "x has {} elements but y has {}",
            x.len(),
            y.len()
        )));
    }
    let n = x.len();
    if n < 2 {
        return Err(KernelError::degenerate(format!(
            "regression needs at least 2 points, got {n}"
        )));
    }
    if x.iter().all(|&v| v == x[0]) {
        return Err(KernelError::degenerate("all x values are identical"));
    }

    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_x2) = (0.0, 0.0, 0.0, 0.0);
    for (&xi, &yi) in x.iter().zip(y) {
        sum_x += xi;
        sum_y += yi;
        sum_xy += xi * yi;
        sum_x2 += xi * xi;
    }

    let nf = n as f64;
    let denominator = nf * sum_x2 - sum_x * sum_x;
    if denominator == 0.0 || !denominator.is_finite() {
        return Err(KernelError::degenerate(format!(
            "zero or non-finite variance in x (denominator {denominator})"
        )));
    }

    let slope = (nf * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / nf;
    Ok(Fit { slope, intercept })
}
