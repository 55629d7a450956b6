//! Synthetic sample series.
//!
//! Noisy generators are seeded [`ChaCha8Rng`] streams, so a given seed
//! always yields the same series on every platform.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// `intercept + slope * i` for `i in 0..n`.
pub fn linear_series(n: usize, slope: f64, intercept: f64) -> Vec<f64> {
    (0..n).map(|i| slope * i as f64 + intercept).collect()
}

/// `origin + i` for `i in 0..n`: the index axis used for trend fits.
pub fn index_axis(n: usize, origin: f64) -> Vec<f64> {
    (0..n).map(|i| origin + i as f64).collect()
}

/// `n` copies of `value`.
pub fn constant_series(n: usize, value: f64) -> Vec<f64> {
    vec![value; n]
}

/// [`linear_series`] plus uniform noise in `[-noise, noise)`.
pub fn noisy_linear(n: usize, slope: f64, intercept: f64, noise: f64, seed: u64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|i| slope * i as f64 + intercept + noise * rng.gen_range(-1.0..1.0))
        .collect()
}

/// `days * 24` hourly air temperatures in °C.
///
/// A diurnal cycle peaking mid-afternoon, a slow warming drift of 0.02 °C
/// per hour, and ±0.5 °C of seeded noise.
pub fn hourly_temperatures(days: usize, seed: u64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..days * 24)
        .map(|h| {
            let hour = h as f64;
            let diurnal = 6.0 * (2.0 * std::f64::consts::PI * (hour - 9.0) / 24.0).sin();
            12.0 + diurnal + 0.02 * hour + rng.gen_range(-0.5..0.5)
        })
        .collect()
}
