//! Kernel operations over a host-owned buffer.
//!
//! `base` points at element 0 of the host's `f64` view and `capacity` is the
//! number of elements in that view. Offsets and lengths are **element
//! indices**, never byte addresses. A call never writes outside the regions
//! it names, and a call that fails writes nothing at all.
//!
//! `base` may be null only when `capacity` is 0. It must be aligned for
//! `f64`.

use isotherm_arena::ArenaView;

use crate::call::{dispatch, KernelCall};
use crate::status::IsothermStatus;

/// Borrow the host buffer as a slice, or report why it cannot be.
#[allow(unsafe_code)]
fn host_view<'a>(base: *mut f64, capacity: usize) -> Result<ArenaView<'a>, IsothermStatus> {
    if capacity == 0 {
        return Ok(ArenaView::new(&mut []));
    }
    if base.is_null() || !base.is_aligned() {
        return Err(IsothermStatus::InvalidArgument);
    }
    if capacity > isize::MAX as usize / std::mem::size_of::<f64>() {
        return Err(IsothermStatus::InvalidArgument);
    }
    // SAFETY: base is non-null and aligned, and the caller guarantees it
    // points to `capacity` initialised f64 values that nothing else accesses
    // for the duration of the call.
    let data = unsafe { std::slice::from_raw_parts_mut(base, capacity) };
    Ok(ArenaView::new(data))
}

fn run_on_host(
    base: *mut f64,
    capacity: usize,
    decoded: Result<KernelCall, isotherm_core::KernelError>,
    on_value: impl FnOnce(f64),
) -> i32 {
    let mut view = match host_view(base, capacity) {
        Ok(v) => v,
        Err(status) => return status as i32,
    };
    dispatch(decoded, &mut view, on_value) as i32
}

/// Replace `length` elements at `offset` with their trailing moving average
/// over `window` samples. The first `window - 1` outputs average only the
/// samples seen so far.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn isotherm_moving_average(
    base: *mut f64,
    capacity: usize,
    offset: i64,
    length: i64,
    window: i64,
) -> i32 {
    ffi_guard!({
        run_on_host(
            base,
            capacity,
            KernelCall::moving_average(offset, offset, length, window),
            |_| {},
        )
    })
}

/// Write the moving average of `length` elements at `src_offset` to
/// `length` elements at `dst_offset`, leaving the source untouched unless
/// the two regions overlap.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn isotherm_moving_average_into(
    base: *mut f64,
    capacity: usize,
    src_offset: i64,
    dst_offset: i64,
    length: i64,
    window: i64,
) -> i32 {
    ffi_guard!({
        run_on_host(
            base,
            capacity,
            KernelCall::moving_average(src_offset, dst_offset, length, window),
            |_| {},
        )
    })
}

/// Arithmetic mean of `length` elements at `offset`, written to `*mean_out`.
///
/// Returns `DivisionByZero` for an empty series and leaves `*mean_out`
/// untouched on any error.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn isotherm_mean(
    base: *mut f64,
    capacity: usize,
    offset: i64,
    length: i64,
    mean_out: *mut f64,
) -> i32 {
    ffi_guard!({
        if mean_out.is_null() {
            return IsothermStatus::InvalidArgument as i32;
        }
        run_on_host(base, capacity, KernelCall::mean(offset, length), |m| {
            // SAFETY: mean_out is non-null and valid per caller contract.
            unsafe { *mean_out = m };
        })
    })
}

/// Summary statistics of `length` elements at `offset`, written as six
/// elements at `out_offset`: count, mean, min, max, population variance,
/// standard deviation.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn isotherm_summary(
    base: *mut f64,
    capacity: usize,
    offset: i64,
    length: i64,
    out_offset: i64,
) -> i32 {
    ffi_guard!({
        run_on_host(
            base,
            capacity,
            KernelCall::summary(offset, length, out_offset),
            |_| {},
        )
    })
}

/// Ordinary least squares fit of `y` on `x`, each `length` elements, writing
/// the slope to element `slope_out_offset` and the intercept to element
/// `intercept_out_offset`.
///
/// Returns `DegenerateInput` when `length < 2` or every `x` is identical.
/// Nothing is written in that case.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn isotherm_linear_regression(
    base: *mut f64,
    capacity: usize,
    x_offset: i64,
    y_offset: i64,
    length: i64,
    slope_out_offset: i64,
    intercept_out_offset: i64,
) -> i32 {
    ffi_guard!({
        run_on_host(
            base,
            capacity,
            KernelCall::linear_regression(
                x_offset,
                y_offset,
                length,
                slope_out_offset,
                intercept_out_offset,
            ),
            |_| {},
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use isotherm_test_utils::assert_close;

    const OK: i32 = IsothermStatus::Ok as i32;

    #[test]
    fn moving_average_over_host_buffer() {
        let mut buf = [1.0, 2.0, 3.0, 4.0, 5.0];
        let rc = isotherm_moving_average(buf.as_mut_ptr(), buf.len(), 0, 5, 3);
        assert_eq!(rc, OK);
        assert_eq!(buf, [1.0, 1.5, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn offsets_are_element_indices() {
        // A byte-addressed host would pass 16 for the third element. Here
        // that is element 16, which is out of bounds.
        let mut buf = [0.0, 0.0, 2.0, 4.0, 9.0];
        let rc = isotherm_moving_average(buf.as_mut_ptr(), buf.len(), 16, 2, 2);
        assert_eq!(rc, IsothermStatus::Addressing as i32);
        assert_eq!(buf, [0.0, 0.0, 2.0, 4.0, 9.0]);

        let rc = isotherm_moving_average(buf.as_mut_ptr(), buf.len(), 2, 2, 2);
        assert_eq!(rc, OK);
        assert_eq!(buf, [0.0, 0.0, 2.0, 3.0, 9.0]);
    }

    #[test]
    fn moving_average_into_keeps_source() {
        let mut buf = [2.0, 4.0, 6.0, 0.0, 0.0, 0.0];
        let rc = isotherm_moving_average_into(buf.as_mut_ptr(), buf.len(), 0, 3, 3, 2);
        assert_eq!(rc, OK);
        assert_eq!(buf, [2.0, 4.0, 6.0, 2.0, 3.0, 5.0]);
    }

    #[test]
    fn mean_writes_out_pointer() {
        let mut buf = [0.0, 1.0, 2.0, 3.0];
        let mut m = f64::NAN;
        let rc = isotherm_mean(buf.as_mut_ptr(), buf.len(), 1, 3, &mut m);
        assert_eq!(rc, OK);
        assert_eq!(m, 2.0);
    }

    #[test]
    fn mean_of_empty_series_leaves_out_untouched() {
        let mut buf = [1.0];
        let mut m = -7.0;
        let rc = isotherm_mean(buf.as_mut_ptr(), buf.len(), 0, 0, &mut m);
        assert_eq!(rc, IsothermStatus::DivisionByZero as i32);
        assert_eq!(m, -7.0);
    }

    #[test]
    fn mean_null_out_is_invalid_argument() {
        let mut buf = [1.0];
        let rc = isotherm_mean(buf.as_mut_ptr(), 1, 0, 1, std::ptr::null_mut());
        assert_eq!(rc, IsothermStatus::InvalidArgument as i32);
    }

    #[test]
    fn summary_writes_six_elements() {
        let mut buf = [1.0, 3.0, 3.0, 5.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        let rc = isotherm_summary(buf.as_mut_ptr(), buf.len(), 0, 4, 4);
        assert_eq!(rc, OK);
        assert_eq!(&buf[4..9], &[4.0, 3.0, 1.0, 5.0, 2.0]);
        assert_close(buf[9], 2.0_f64.sqrt(), 1e-15);
    }

    #[test]
    fn regression_over_host_buffer() {
        let mut buf = [1.0, 2.0, 3.0, 4.0, 5.0, 7.0, 9.0, 11.0, 0.0, 0.0];
        let rc = isotherm_linear_regression(buf.as_mut_ptr(), buf.len(), 0, 4, 4, 8, 9);
        assert_eq!(rc, OK);
        assert_close(buf[8], 2.0, 1e-12);
        assert_close(buf[9], 3.0, 1e-12);
    }

    #[test]
    fn degenerate_regression_writes_nothing() {
        let mut buf = [3.0, 3.0, 1.0, 2.0, -1.0, -1.0];
        let rc = isotherm_linear_regression(buf.as_mut_ptr(), buf.len(), 0, 2, 2, 4, 5);
        assert_eq!(rc, IsothermStatus::DegenerateInput as i32);
        assert_eq!(buf[4..], [-1.0, -1.0]);
    }

    #[test]
    fn null_base_with_capacity_is_invalid_argument() {
        let rc = isotherm_moving_average(std::ptr::null_mut(), 4, 0, 1, 1);
        assert_eq!(rc, IsothermStatus::InvalidArgument as i32);
    }

    #[test]
    fn null_base_with_zero_capacity_is_an_empty_arena() {
        let rc = isotherm_moving_average(std::ptr::null_mut(), 0, 0, 0, 3);
        assert_eq!(rc, OK);
        let rc = isotherm_moving_average(std::ptr::null_mut(), 0, 0, 1, 3);
        assert_eq!(rc, IsothermStatus::Addressing as i32);
    }

    #[test]
    fn invalid_window_is_invalid_input() {
        let mut buf = [1.0, 2.0];
        let rc = isotherm_moving_average(buf.as_mut_ptr(), buf.len(), 0, 2, 0);
        assert_eq!(rc, IsothermStatus::InvalidInput as i32);
        assert_eq!(buf, [1.0, 2.0]);
    }
}
