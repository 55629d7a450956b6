//! C ABI for the Isotherm numeric kernel.
//!
//! Two addressing surfaces share one set of kernel calls:
//!
//! - **Host buffer** (`isotherm_moving_average`, `isotherm_mean`, ...): the
//!   host passes the base pointer and element capacity of memory it owns,
//!   e.g. a WebAssembly linear memory viewed as `f64`.
//! - **Arena handle** (`isotherm_arena_*`): the library allocates the
//!   arena, the host grows it explicitly and copies data in and out.
//!
//! Every function returns an [`IsothermStatus`] code as `i32`. All offsets
//! and lengths are element indices into the `f64` view, passed as `i64` so
//! that negative values from loosely typed hosts are rejected rather than
//! reinterpreted. Panics are caught at the boundary and reported as
//! `Panicked`.
//!
//! This is the only crate in the workspace that contains `unsafe` code.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

/// Run an FFI body, converting a caught panic into `IsothermStatus::Panicked`.
macro_rules! ffi_guard {
    ($body:block) => {
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| $body)) {
            Ok(code) => code,
            Err(_) => {
                tracing::error!("panic caught at FFI boundary");
                $crate::status::IsothermStatus::Panicked as i32
            }
        }
    };
}

/// Lock a mutex, returning `InternalError` from the enclosing body if it
/// was poisoned by an earlier panic.
macro_rules! ffi_lock {
    ($mutex:expr) => {
        match $mutex.lock() {
            Ok(guard) => guard,
            Err(_) => return $crate::status::IsothermStatus::InternalError as i32,
        }
    };
}

pub mod arena;
mod call;
mod handle;
pub mod kernel;
pub mod status;

pub use status::IsothermStatus;
