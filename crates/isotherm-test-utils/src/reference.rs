//! Direct, allocation-happy reference implementations.
//!
//! Written for obviousness, not speed, and independent of the kernel code
//! they are compared against.

/// Trailing-window moving average, forward, into a fresh vector.
pub fn naive_moving_average(values: &[f64], window: usize) -> Vec<f64> {
    assert!(window >= 1, "window must be >= 1");
    let mut out = Vec::with_capacity(values.len());
    for i in 0..values.len() {
        let start = if i + 1 >= window { i + 1 - window } else { 0 };
        let mut sum = 0.0;
        for v in &values[start..=i] {
            sum += v;
        }
        out.push(sum / (i - start + 1) as f64);
    }
    out
}

/// Mean, or `None` for an empty slice.
pub fn naive_mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sum = 0.0;
    for v in values {
        sum += v;
    }
    Some(sum / values.len() as f64)
}

/// OLS via mean-centred sums: `slope = Σ(dx·dy) / Σ(dx²)`.
///
/// Returns `(slope, intercept)`, or `None` when undefined.
pub fn centered_ols(x: &[f64], y: &[f64]) -> Option<(f64, f64)> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    let mx = naive_mean(x)?;
    let my = naive_mean(y)?;
    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (xi, yi) in x.iter().zip(y) {
        sxx += (xi - mx) * (xi - mx);
        sxy += (xi - mx) * (yi - my);
    }
    if sxx == 0.0 {
        return None;
    }
    let slope = sxy / sxx;
    Some((slope, my - slope * mx))
}
