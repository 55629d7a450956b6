//! Test utilities for Isotherm development.
//!
//! Provides synthetic series generators ([`fixtures`]), straightforward
//! reference implementations to check the kernel against ([`reference`]),
//! an [`ArenaFixture`] builder for laying out test arenas, and tolerance
//! asserts for floating-point results.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod reference;

pub use fixtures::{constant_series, hourly_temperatures, index_axis, linear_series, noisy_linear};
pub use reference::{centered_ols, naive_mean, naive_moving_average};

use isotherm_arena::{Arena, ArenaError, Layout, LayoutBuilder};

/// Assert `actual` is within `tol` of `expected`, relative to
/// `max(|expected|, 1)`. Equal values (including equal infinities) always pass.
#[track_caller]
pub fn assert_close(actual: f64, expected: f64, tol: f64) {
    if actual == expected {
        return;
    }
    let scale = expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tol * scale,
        "expected {expected}, got {actual} (tolerance {tol})"
    );
}

/// Element-wise [`assert_close`] over two slices of equal length.
#[track_caller]
pub fn assert_slices_close(actual: &[f64], expected: &[f64], tol: f64) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "length mismatch: got {}, expected {}",
        actual.len(),
        expected.len()
    );
    for (i, (&a, &e)) in actual.iter().zip(expected).enumerate() {
        if a == e {
            continue;
        }
        let scale = e.abs().max(1.0);
        assert!(
            (a - e).abs() <= tol * scale,
            "index {i}: expected {e}, got {a} (tolerance {tol})"
        );
    }
}

/// Builder for an [`Arena`] pre-populated with named series.
///
/// Regions are packed in declaration order, exactly as a [`Layout`] would
/// place them, and the arena is sized to fit with optional trailing slack.
pub struct ArenaFixture {
    layout: LayoutBuilder,
    values: Vec<(String, Vec<f64>)>,
    slack: usize,
}

impl ArenaFixture {
    pub fn new() -> Self {
        Self {
            layout: Layout::builder(),
            values: Vec::new(),
            slack: 0,
        }
    }

    /// Declare a series and its initial contents.
    pub fn series(mut self, name: &str, values: &[f64]) -> Self {
        self.layout = self.layout.series(name, values.len());
        self.values.push((name.to_string(), values.to_vec()));
        self
    }

    /// Declare a zeroed series of `len` elements.
    pub fn zeroed(mut self, name: &str, len: usize) -> Self {
        self.layout = self.layout.series(name, len);
        self
    }

    /// Declare a zeroed scalar slot.
    pub fn scalar(mut self, name: &str) -> Self {
        self.layout = self.layout.scalar(name);
        self
    }

    /// Extra zeroed elements after the last region.
    pub fn slack(mut self, slack: usize) -> Self {
        self.slack = slack;
        self
    }

    pub fn build(self) -> Result<(Arena, Layout), ArenaError> {
        let layout = self.layout.build()?;
        let mut arena = Arena::with_capacity(layout.end() + self.slack);
        for (name, values) in &self.values {
            arena.write_series(layout.series(name)?, values)?;
        }
        Ok((arena, layout))
    }
}

impl Default for ArenaFixture {
    fn default() -> Self {
        Self::new()
    }
}
