//! Mean and summary statistics.
//!
//! # Summation order
//!
//! Sums are accumulated in a single `f64`, left to right in index order,
//! seeded with the first sample. There is no compensated or pairwise
//! summation. Implementations in other languages that follow the same order
//! reproduce [`mean`] bit for bit.

use isotherm_core::KernelError;

/// Left-to-right `f64` sum. An empty slice sums to `0.0`.
pub fn sum(values: &[f64]) -> f64 {
    match values.split_first() {
        Some((&first, rest)) => rest.iter().fold(first, |acc, &v| acc + v),
        None => 0.0,
    }
}

/// Arithmetic mean: [`sum`] divided once by the sample count.
///
/// # Errors
///
/// `DivisionByZero` for an empty slice.
pub fn mean(values: &[f64]) -> Result<f64, KernelError> {
    if values.is_empty() {
        return Err(KernelError::DivisionByZero { operation: "mean" });
    }
    Ok(sum(values) / values.len() as f64)
}

/// Summary statistics of a series.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Summary {
    /// Number of samples.
    pub count: usize,
    /// Arithmetic mean, identical to [`mean`].
    pub mean: f64,
    /// Smallest sample.
    pub min: f64,
    /// Largest sample.
    pub max: f64,
    /// Population variance (divides by `count`).
    pub variance: f64,
    /// Population standard deviation.
    pub std_dev: f64,
}

impl Summary {
    /// Number of `f64` values in the packed representation.
    pub const PACKED_LEN: usize = 6;

    /// Packed as `[count, mean, min, max, variance, std_dev]`.
    pub fn to_array(&self) -> [f64; Self::PACKED_LEN] {
        [
            self.count as f64,
            self.mean,
            self.min,
            self.max,
            self.variance,
            self.std_dev,
        ]
    }
}

fn nan_aware(acc: f64, v: f64, pick: fn(f64, f64) -> f64) -> f64 {
    if acc.is_nan() || v.is_nan() {
        f64::NAN
    } else {
        pick(acc, v)
    }
}

/// Compute [`Summary`] in two passes: mean first, then squared deviations
/// around it. NaN in the input propagates to every field except `count`.
///
/// # Errors
///
/// `DivisionByZero` for an empty slice.
pub fn summary(values: &[f64]) -> Result<Summary, KernelError> {
    let m = mean(values).map_err(|_| KernelError::DivisionByZero {
        operation: "summary",
    })?;
    let first = values[0];
    let min = values.iter().fold(first, |acc, &v| nan_aware(acc, v, f64::min));
    let max = values.iter().fold(first, |acc, &v| nan_aware(acc, v, f64::max));
    let squared: f64 = values.iter().map(|&v| (v - m) * (v - m)).sum();
    let variance = squared / values.len() as f64;
    Ok(Summary {
        count: values.len(),
        mean: m,
        min,
        max,
        variance,
        std_dev: variance.sqrt(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_is_division_by_zero() {
        assert_eq!(
            mean(&[]),
            Err(KernelError::DivisionByZero { operation: "mean" })
        );
    }

    #[test]
    fn mean_of_single_sample() {
        assert_eq!(mean(&[5.0]).unwrap(), 5.0);
    }

    #[test]
    fn mean_of_one_two_three() {
        assert_eq!(mean(&[1.0, 2.0, 3.0]).unwrap(), 2.0);
    }

    #[test]
    fn mean_follows_documented_summation_order() {
        let values = [0.1, 0.2, 0.3, 1e16, -1e16];
        let expected: f64 = ((((0.1 + 0.2) + 0.3) + 1e16) + -1e16) / 5.0;
        assert_eq!(mean(&values).unwrap().to_bits(), expected.to_bits());
    }

    #[test]
    fn nan_propagates_through_mean() {
        assert!(mean(&[1.0, f64::NAN]).unwrap().is_nan());
    }

    #[test]
    fn summary_of_known_series() {
        let s = summary(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(s.count, 8);
        assert_eq!(s.mean, 5.0);
        assert_eq!(s.min, 2.0);
        assert_eq!(s.max, 9.0);
        assert_eq!(s.variance, 4.0);
        assert_eq!(s.std_dev, 2.0);
        assert_eq!(s.to_array(), [8.0, 5.0, 2.0, 9.0, 4.0, 2.0]);
    }

    #[test]
    fn summary_of_empty_is_division_by_zero() {
        assert_eq!(
            summary(&[]),
            Err(KernelError::DivisionByZero {
                operation: "summary"
            })
        );
    }

    #[test]
    fn summary_min_max_propagate_nan() {
        let s = summary(&[1.0, f64::NAN, 3.0]).unwrap();
        assert!(s.min.is_nan());
        assert!(s.max.is_nan());
        assert!(s.mean.is_nan());
        assert_eq!(s.count, 3);
    }

    mod proptests {
        use super::*;
        use isotherm_test_utils::naive_mean;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn mean_of_constant_series_is_the_constant(value in -1e6f64..1e6, len in 1usize..500) {
                let m = mean(&vec![value; len]).unwrap();
                prop_assert!((m - value).abs() <= 1e-9 * value.abs().max(1.0));
            }

            #[test]
            fn mean_lies_between_min_and_max(values in proptest::collection::vec(-1e6f64..1e6, 1..200)) {
                let s = summary(&values).unwrap();
                let slack = 1e-9 * s.max.abs().max(s.min.abs()).max(1.0);
                prop_assert!(s.mean >= s.min - slack);
                prop_assert!(s.mean <= s.max + slack);
                prop_assert!(s.variance >= 0.0);
            }

            #[test]
            fn mean_matches_reference(values in proptest::collection::vec(-1e6f64..1e6, 1..200)) {
                prop_assert_eq!(mean(&values).unwrap(), naive_mean(&values).unwrap());
            }
        }
    }
}
