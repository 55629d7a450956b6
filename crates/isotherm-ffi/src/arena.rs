//! Library-owned arenas behind generational handles.
//!
//! The host creates an arena, grows it explicitly, copies samples in with
//! [`isotherm_arena_write`] and results out with [`isotherm_arena_read`],
//! and runs kernel calls addressed by element offsets into it. Kernel calls
//! never grow the arena.

use std::sync::Mutex;

use isotherm_arena::{Arena, ArenaConfig};
use isotherm_core::Series;

use crate::call::{dispatch, KernelCall};
use crate::handle::HandleTable;
use crate::status::IsothermStatus;

static ARENAS: Mutex<HandleTable<Arena>> = Mutex::new(HandleTable::new());

/// Run `f` on the arena behind `handle` while holding the table lock.
fn with_arena(handle: u64, f: impl FnOnce(&mut Arena) -> i32) -> i32 {
    let mut table = ffi_lock!(ARENAS);
    match table.get_mut(handle) {
        Some(arena) => f(arena),
        None => IsothermStatus::InvalidHandle as i32,
    }
}

fn run_on_arena(handle: u64, decoded: Result<KernelCall, isotherm_core::KernelError>) -> i32 {
    run_on_arena_with(handle, decoded, |_| {})
}

fn run_on_arena_with(
    handle: u64,
    decoded: Result<KernelCall, isotherm_core::KernelError>,
    on_value: impl FnOnce(f64),
) -> i32 {
    with_arena(handle, |arena| {
        dispatch(decoded, &mut arena.view(), on_value) as i32
    })
}

/// Create an arena of `capacity` zeroed elements that may later grow to
/// `max_capacity` elements. A `max_capacity` of 0 selects the default
/// ceiling (16,777,216 elements).
///
/// Writes the new handle to `*arena_out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn isotherm_arena_create(
    capacity: usize,
    max_capacity: usize,
    arena_out: *mut u64,
) -> i32 {
    ffi_guard!({
        if arena_out.is_null() {
            return IsothermStatus::InvalidArgument as i32;
        }
        let config = ArenaConfig {
            initial_capacity: capacity,
            max_capacity: if max_capacity == 0 {
                ArenaConfig::DEFAULT_MAX_CAPACITY
            } else {
                max_capacity
            },
        };
        let arena = match Arena::new(&config) {
            Ok(a) => a,
            Err(e) => {
                tracing::warn!(error = %e, "rejected arena config");
                return IsothermStatus::from(&e) as i32;
            }
        };
        let handle = ffi_lock!(ARENAS).insert(arena);
        tracing::debug!(handle, capacity, "arena created");
        // SAFETY: arena_out is non-null and valid per caller contract.
        unsafe { *arena_out = handle };
        IsothermStatus::Ok as i32
    })
}

/// Destroy an arena. Destroying an already-destroyed handle returns
/// `InvalidHandle` and has no other effect.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn isotherm_arena_destroy(handle: u64) -> i32 {
    ffi_guard!({
        match ffi_lock!(ARENAS).remove(handle) {
            Some(_) => IsothermStatus::Ok as i32,
            None => IsothermStatus::InvalidHandle as i32,
        }
    })
}

/// Write the arena's current capacity in elements to `*capacity_out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn isotherm_arena_capacity(handle: u64, capacity_out: *mut usize) -> i32 {
    ffi_guard!({
        if capacity_out.is_null() {
            return IsothermStatus::InvalidArgument as i32;
        }
        let capacity = match ffi_lock!(ARENAS).get(handle) {
            Some(arena) => arena.capacity(),
            None => return IsothermStatus::InvalidHandle as i32,
        };
        // SAFETY: capacity_out is non-null and valid per caller contract.
        unsafe { *capacity_out = capacity };
        IsothermStatus::Ok as i32
    })
}

/// Grow the arena to at least `capacity` elements. New elements are zero.
/// Never shrinks.
///
/// Growth may move the storage: pointers from [`isotherm_arena_data`] are
/// invalid afterwards.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn isotherm_arena_ensure_capacity(handle: u64, capacity: usize) -> i32 {
    ffi_guard!({
        with_arena(handle, |arena| match arena.ensure_capacity(capacity) {
            Ok(()) => IsothermStatus::Ok as i32,
            Err(e) => {
                tracing::warn!(error = %e, "arena growth failed");
                IsothermStatus::from(&e) as i32
            }
        })
    })
}

/// Expose the arena's storage for zero-copy access.
///
/// The pointer stays valid until the arena is grown or destroyed. The host
/// must not use it concurrently with any other call on the same arena.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn isotherm_arena_data(
    handle: u64,
    data_out: *mut *mut f64,
    len_out: *mut usize,
) -> i32 {
    ffi_guard!({
        if data_out.is_null() || len_out.is_null() {
            return IsothermStatus::InvalidArgument as i32;
        }
        with_arena(handle, |arena| {
            // SAFETY: both out pointers are non-null and valid per caller
            // contract.
            unsafe {
                *data_out = arena.as_mut_ptr();
                *len_out = arena.capacity();
            }
            IsothermStatus::Ok as i32
        })
    })
}

/// Copy `n` values from `values` into the arena starting at element
/// `offset`. `values` may be null when `n == 0`, and may point into the
/// arena's own storage (see [`isotherm_arena_data`]).
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn isotherm_arena_write(
    handle: u64,
    offset: i64,
    values: *const f64,
    n: usize,
) -> i32 {
    ffi_guard!({
        let series = match Series::from_raw(offset, 0) {
            Ok(s) => Series::new(s.offset(), n),
            Err(e) => return IsothermStatus::from(&e) as i32,
        };
        if n > 0 && values.is_null() {
            return IsothermStatus::InvalidArgument as i32;
        }
        with_arena(handle, |arena| {
            let mut view = arena.view();
            let dst = match view.series_mut(series) {
                Ok(d) => d,
                Err(e) => return IsothermStatus::from(&e) as i32,
            };
            if n > 0 {
                // SAFETY: values is non-null and points to n f64 values per
                // caller contract. `copy` tolerates overlap with arena storage.
                unsafe { std::ptr::copy(values, dst.as_mut_ptr(), n) };
            }
            IsothermStatus::Ok as i32
        })
    })
}

/// Copy `n` elements starting at element `offset` into `out`. `out` may be
/// null when `n == 0`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn isotherm_arena_read(
    handle: u64,
    offset: i64,
    out: *mut f64,
    n: usize,
) -> i32 {
    ffi_guard!({
        let series = match Series::from_raw(offset, 0) {
            Ok(s) => Series::new(s.offset(), n),
            Err(e) => return IsothermStatus::from(&e) as i32,
        };
        if n > 0 && out.is_null() {
            return IsothermStatus::InvalidArgument as i32;
        }
        with_arena(handle, |arena| {
            let values = match arena.read_series(series) {
                Ok(v) => v,
                Err(e) => return IsothermStatus::from(&e) as i32,
            };
            if n > 0 {
                // SAFETY: out is non-null with room for n f64 values per
                // caller contract. `copy` tolerates overlap with arena storage.
                unsafe { std::ptr::copy(values.as_ptr(), out, n) };
            }
            IsothermStatus::Ok as i32
        })
    })
}

/// Arena-handle form of [`isotherm_moving_average`](crate::kernel::isotherm_moving_average).
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn isotherm_arena_moving_average(
    handle: u64,
    offset: i64,
    length: i64,
    window: i64,
) -> i32 {
    ffi_guard!({
        run_on_arena(
            handle,
            KernelCall::moving_average(offset, offset, length, window),
        )
    })
}

/// Arena-handle form of
/// [`isotherm_moving_average_into`](crate::kernel::isotherm_moving_average_into).
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn isotherm_arena_moving_average_into(
    handle: u64,
    src_offset: i64,
    dst_offset: i64,
    length: i64,
    window: i64,
) -> i32 {
    ffi_guard!({
        run_on_arena(
            handle,
            KernelCall::moving_average(src_offset, dst_offset, length, window),
        )
    })
}

/// Arena-handle form of [`isotherm_mean`](crate::kernel::isotherm_mean).
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn isotherm_arena_mean(
    handle: u64,
    offset: i64,
    length: i64,
    mean_out: *mut f64,
) -> i32 {
    ffi_guard!({
        if mean_out.is_null() {
            return IsothermStatus::InvalidArgument as i32;
        }
        run_on_arena_with(handle, KernelCall::mean(offset, length), |m| {
            // SAFETY: mean_out is non-null and valid per caller contract.
            unsafe { *mean_out = m };
        })
    })
}

/// Arena-handle form of [`isotherm_summary`](crate::kernel::isotherm_summary).
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn isotherm_arena_summary(
    handle: u64,
    offset: i64,
    length: i64,
    out_offset: i64,
) -> i32 {
    ffi_guard!({ run_on_arena(handle, KernelCall::summary(offset, length, out_offset)) })
}

/// Arena-handle form of
/// [`isotherm_linear_regression`](crate::kernel::isotherm_linear_regression).
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn isotherm_arena_linear_regression(
    handle: u64,
    x_offset: i64,
    y_offset: i64,
    length: i64,
    slope_out_offset: i64,
    intercept_out_offset: i64,
) -> i32 {
    ffi_guard!({
        run_on_arena(
            handle,
            KernelCall::linear_regression(
                x_offset,
                y_offset,
                length,
                slope_out_offset,
                intercept_out_offset,
            ),
        )
    })
}
