//! Arena-facing entry points.
//!
//! Each function follows the same shape:
//!
//! 1. Validate every region it will read or write against the view.
//! 2. Run the pure algorithm on borrowed slices.
//! 3. Write results.
//!
//! Step 3 only runs once steps 1 and 2 have succeeded, so an error leaves
//! the arena exactly as it was. Offsets are element indices throughout.
//! No overlap validation is done between distinct regions, except that
//! in-place smoothing (`dst == src`) is explicitly supported.

use isotherm_arena::ArenaView;
use isotherm_core::{KernelError, ScalarSlot, Series, Window};

use crate::regression::{self, Fit};
use crate::smoothing;
use crate::stats::{self, Summary};

/// Smooth `series` in place.
pub fn moving_average(
    view: &mut ArenaView<'_>,
    series: Series,
    window: Window,
) -> Result<(), KernelError> {
    moving_average_into(view, series, series, window)
}

/// Smooth `src` into `dst`. The two series must have the same length.
///
/// `dst == src` is the in-place case. A destination at a later offset may
/// overlap the source. A destination at an earlier offset must either be
/// disjoint from the source or start at least `window` elements before it.
pub fn moving_average_into(
    view: &mut ArenaView<'_>,
    src: Series,
    dst: Series,
    window: Window,
) -> Result<(), KernelError> {
    tracing::trace!(%src, %dst, %window, "moving_average");
    if src.len() != dst.len() {
        return Err(KernelError::invalid(format!(
            "moving average destination has {} elements, source has {}",
            dst.len(),
            src.len()
        )));
    }
    let src_range = view.check(src)?;
    let dst_range = view.check(dst)?;
    smoothing::moving_average_within(
        view.as_mut_slice(),
        src_range.start,
        dst_range.start,
        src.len(),
        window,
    );
    Ok(())
}

/// Arithmetic mean of `series`.
pub fn mean(view: &ArenaView<'_>, series: Series) -> Result<f64, KernelError> {
    tracing::trace!(%series, "mean");
    stats::mean(view.read_series(series)?)
}

/// Arithmetic mean of `series`, also written to `out`.
pub fn mean_into(
    view: &mut ArenaView<'_>,
    series: Series,
    out: ScalarSlot,
) -> Result<f64, KernelError> {
    view.check_scalar(out)?;
    let m = mean(view, series)?;
    view.write_scalar(out, m)?;
    Ok(m)
}

/// Summary statistics of `series`.
pub fn summary(view: &ArenaView<'_>, series: Series) -> Result<Summary, KernelError> {
    tracing::trace!(%series, "summary");
    stats::summary(view.read_series(series)?)
}

/// Summary statistics of `series`, also written packed into `out` as
/// `[count, mean, min, max, variance, std_dev]`.
///
/// `out` must hold exactly [`Summary::PACKED_LEN`] elements.
pub fn summary_into(
    view: &mut ArenaView<'_>,
    series: Series,
    out: Series,
) -> Result<Summary, KernelError> {
    if out.len() != Summary::PACKED_LEN {
        return Err(KernelError::invalid(format!(
            "summary output needs {} elements, got {}",
            Summary::PACKED_LEN,
            out.len()
        )));
    }
    view.check(out)?;
    let s = summary(view, series)?;
    view.write_series(out, &s.to_array())?;
    Ok(s)
}

/// Fit `y = slope * x + intercept` over paired series and write the two
/// coefficients to their slots.
pub fn linear_regression(
    view: &mut ArenaView<'_>,
    x: Series,
    y: Series,
    slope_out: ScalarSlot,
    intercept_out: ScalarSlot,
) -> Result<Fit, KernelError> {
    tracing::trace!(%x, %y, %slope_out, %intercept_out, "linear_regression");
    if x.len() != y.len() {
        return Err(KernelError::invalid(format!(
            "x has {} elements but y has {}",
            x.len(),
            y.len()
        )));
    }
    view.check_scalar(slope_out)?;
    view.check_scalar(intercept_out)?;
    let fit = regression::linear_regression(view.read_series(x)?, view.read_series(y)?)?;
    view.write_scalar(slope_out, fit.slope)?;
    view.write_scalar(intercept_out, fit.intercept)?;
    Ok(fit)
}
