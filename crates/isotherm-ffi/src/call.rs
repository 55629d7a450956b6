//! Kernel calls decoded from raw C arguments.
//!
//! Both FFI surfaces build a [`KernelCall`] from the signed integers they
//! receive, resolve an [`ArenaView`] by their own means, and hand the pair
//! to [`dispatch`]. Decoding rejects negative offsets, negative
//! lengths and windows below 1 before any memory is touched.

use isotherm_arena::ArenaView;
use isotherm_core::{KernelError, ScalarSlot, Series, Window};
use isotherm_kernel::{ops, Summary};

use crate::status::IsothermStatus;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum KernelCall {
    MovingAverage {
        src: Series,
        dst: Series,
        window: Window,
    },
    Mean {
        series: Series,
    },
    Summary {
        series: Series,
        out: Series,
    },
    LinearRegression {
        x: Series,
        y: Series,
        slope: ScalarSlot,
        intercept: ScalarSlot,
    },
}

impl KernelCall {
    pub fn moving_average(
        src_offset: i64,
        dst_offset: i64,
        length: i64,
        window: i64,
    ) -> Result<Self, KernelError> {
        Ok(Self::MovingAverage {
            src: Series::from_raw(src_offset, length)?,
            dst: Series::from_raw(dst_offset, length)?,
            window: Window::from_raw(window)?,
        })
    }

    pub fn mean(offset: i64, length: i64) -> Result<Self, KernelError> {
        Ok(Self::Mean {
            series: Series::from_raw(offset, length)?,
        })
    }

    pub fn summary(offset: i64, length: i64, out_offset: i64) -> Result<Self, KernelError> {
        Ok(Self::Summary {
            series: Series::from_raw(offset, length)?,
            out: Series::from_raw(out_offset, Summary::PACKED_LEN as i64)?,
        })
    }

    /// Regression over `x` at `x_offset` and `y` at `y_offset`, both of
    /// `length` elements.
    pub fn linear_regression(
        x_offset: i64,
        y_offset: i64,
        length: i64,
        slope_offset: i64,
        intercept_offset: i64,
    ) -> Result<Self, KernelError> {
        Ok(Self::LinearRegression {
            x: Series::from_raw(x_offset, length)?,
            y: Series::from_raw(y_offset, length)?,
            slope: ScalarSlot::from_raw(slope_offset)?,
            intercept: ScalarSlot::from_raw(intercept_offset)?,
        })
    }

    fn name(&self) -> &'static str {
        match self {
            Self::MovingAverage { .. } => "moving_average",
            Self::Mean { .. } => "mean",
            Self::Summary { .. } => "summary",
            Self::LinearRegression { .. } => "linear_regression",
        }
    }

    /// Execute against `view`. Returns the mean for [`KernelCall::Mean`].
    pub fn execute(self, view: &mut ArenaView<'_>) -> Result<Option<f64>, KernelError> {
        match self {
            Self::MovingAverage { src, dst, window } => {
                ops::moving_average_into(view, src, dst, window)?;
                Ok(None)
            }
            Self::Mean { series } => ops::mean(view, series).map(Some),
            Self::Summary { series, out } => {
                ops::summary_into(view, series, out)?;
                Ok(None)
            }
            Self::LinearRegression {
                x,
                y,
                slope,
                intercept,
            } => {
                ops::linear_regression(view, x, y, slope, intercept)?;
                Ok(None)
            }
        }
    }
}

/// Decode, execute and map the outcome to a status, logging failures.
///
/// On success the optional scalar result is passed to `on_value`.
pub(crate) fn dispatch(
    decoded: Result<KernelCall, KernelError>,
    view: &mut ArenaView<'_>,
    on_value: impl FnOnce(f64),
) -> IsothermStatus {
    let call = match decoded {
        Ok(call) => call,
        Err(e) => {
            tracing::warn!(error = %e, "rejected kernel arguments");
            return IsothermStatus::from(&e);
        }
    };
    let name = call.name();
    tracing::trace!(call = name, capacity = view.capacity(), "dispatch");
    match call.execute(view) {
        Ok(Some(value)) => {
            on_value(value);
            IsothermStatus::Ok
        }
        Ok(None) => IsothermStatus::Ok,
        Err(e) => {
            let status = IsothermStatus::from(&e);
            tracing::warn!(call = name, error = %e, code = status as i32, "kernel call failed");
            status
        }
    }
}
