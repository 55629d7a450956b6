//! End-to-end trend analysis of a sample series on a host-owned arena.
//!
//! This is the sequence a host runs after loading a temperature series:
//! place the samples, smooth them, summarise them, build an index axis and
//! fit a trend line. The arena is laid out as
//!
//! ```text
//! [ raw (n) | smoothed (n) | x (n) | slope | intercept ]
//! ```
//!
//! and every kernel call goes through [`ops`](crate::ops) with typed
//! addresses from a [`Layout`].

use std::error::Error;
use std::fmt;

use isotherm_arena::{Arena, ArenaError, Layout};
use isotherm_core::{KernelError, Window};

use crate::ops;
use crate::regression::Fit;
use crate::stats::Summary;

/// Parameters for [`analyze`].
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisConfig {
    /// Moving-average window. Default: 3.
    pub window: Window,
    /// First value of the index axis used as regression `x`. Default: 1.0,
    /// i.e. `x = 1..=n`.
    pub x_origin: f64,
}

impl AnalysisConfig {
    /// Default moving-average window.
    pub const DEFAULT_WINDOW: usize = 3;

    /// Default index-axis origin.
    pub const DEFAULT_X_ORIGIN: f64 = 1.0;

    /// Check that the configuration is usable.
    pub fn validate(&self) -> Result<(), KernelError> {
        if !self.x_origin.is_finite() {
            return Err(KernelError::invalid(format!(
                "x_origin must be finite, got {}",
                self.x_origin
            )));
        }
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window: Window::new(Self::DEFAULT_WINDOW).unwrap_or(Window::ONE),
            x_origin: Self::DEFAULT_X_ORIGIN,
        }
    }
}

/// Everything a renderer needs: the raw and smoothed series, summary
/// statistics, and a trend line when one is defined.
#[derive(Clone, Debug, PartialEq)]
pub struct TrendReport {
    /// The input samples, as read back from the arena.
    pub raw: Vec<f64>,
    /// Moving average of `raw`, same length.
    pub smoothed: Vec<f64>,
    /// Summary statistics of `raw`.
    pub summary: Summary,
    /// OLS fit against the index axis, or `None` when the regression is
    /// degenerate (fewer than two samples). Renderers should skip the trend
    /// line rather than plot a made-up one.
    pub fit: Option<Fit>,
    /// Origin of the index axis the fit was computed against.
    pub x_origin: f64,
}

impl TrendReport {
    /// Arithmetic mean of the raw samples.
    pub fn mean(&self) -> f64 {
        self.summary.mean
    }

    /// The fitted line evaluated at each sample's index-axis position.
    pub fn trend_line(&self) -> Option<Vec<f64>> {
        self.fit
            .map(|fit| fit.index_trend(self.raw.len(), self.x_origin))
    }
}

/// Errors from [`analyze`].
#[derive(Debug, PartialEq)]
pub enum AnalysisError {
    /// The arena could not be laid out or grown.
    Arena(ArenaError),
    /// A kernel operation failed.
    Kernel(KernelError),
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arena(e) => write!(f, "arena: {e}"),
            Self::Kernel(e) => write!(f, "kernel: {e}"),
        }
    }
}

impl Error for AnalysisError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Arena(e) => Some(e),
            Self::Kernel(e) => Some(e),
        }
    }
}

impl From<ArenaError> for AnalysisError {
    fn from(e: ArenaError) -> Self {
        Self::Arena(e)
    }
}

impl From<KernelError> for AnalysisError {
    fn from(e: KernelError) -> Self {
        Self::Kernel(e)
    }
}

/// Arena layout used by [`analyze`] for `n` samples, starting at element 0.
pub fn layout_for(n: usize) -> Result<Layout, ArenaError> {
    Layout::builder()
        .series("raw", n)
        .series("smoothed", n)
        .series("x", n)
        .scalar("slope")
        .scalar("intercept")
        .build()
}

/// Run the full analysis of `samples` on `arena`, growing it if needed.
///
/// # Errors
///
/// - [`AnalysisError::Arena`] if the arena cannot grow to fit the layout.
/// - [`AnalysisError::Kernel`] with `DivisionByZero` if `samples` is empty,
///   or `InvalidInput` if the config is invalid.
///
/// A degenerate regression is not an error: it yields `fit: None`.
pub fn analyze(
    arena: &mut Arena,
    samples: &[f64],
    config: &AnalysisConfig,
) -> Result<TrendReport, AnalysisError> {
    config.validate()?;
    let n = samples.len();
    let layout = layout_for(n)?;
    arena.ensure_layout(&layout)?;

    let raw = layout.series("raw")?;
    let smoothed = layout.series("smoothed")?;
    let x = layout.series("x")?;
    let slope = layout.scalar("slope")?;
    let intercept = layout.scalar("intercept")?;

    let axis: Vec<f64> = (0..n).map(|i| config.x_origin + i as f64).collect();
    arena.write_series(raw, samples)?;
    arena.write_series(x, &axis)?;

    let mut view = arena.view();
    ops::moving_average_into(&mut view, raw, smoothed, config.window)?;
    let summary = ops::summary(&view, raw)?;
    let fit = match ops::linear_regression(&mut view, x, raw, slope, intercept) {
        Ok(fit) => Some(fit),
        Err(KernelError::DegenerateInput { reason }) => {
            tracing::debug!(%reason, n, "skipping trend line");
            None
        }
        Err(e) => return Err(e.into()),
    };

    tracing::debug!(
        n,
        window = config.window.get(),
        mean = summary.mean,
        has_fit = fit.is_some(),
        "analysis complete"
    );

    Ok(TrendReport {
        raw: arena.read_series(raw)?.to_vec(),
        smoothed: arena.read_series(smoothed)?.to_vec(),
        summary,
        fit,
        x_origin: config.x_origin,
    })
}
