//! C-compatible status codes for the kernel error taxonomy.
//!
//! [`IsothermStatus`] is a `repr(i32)` enum. Conversions from the Rust
//! error types (`KernelError`, `ArenaError`, `ConfigError`) are provided.

use isotherm_arena::{ArenaError, ConfigError};
use isotherm_core::KernelError;

/// C-compatible status code returned by all FFI functions.
///
/// `Ok` = 0, all errors are negative. Values are ABI-stable.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IsothermStatus {
    /// Success.
    Ok = 0,
    /// Arena handle is invalid or was already destroyed.
    InvalidHandle = -1,
    /// A required pointer is null, or a buffer pointer is null with a
    /// non-zero capacity.
    InvalidArgument = -2,
    /// A region lies outside the arena's current capacity.
    Addressing = -3,
    /// Structurally invalid parameters: negative offset or length, window
    /// below 1, misaligned or mismatched sizes.
    InvalidInput = -4,
    /// Mean or summary of an empty series.
    DivisionByZero = -5,
    /// Regression with fewer than two points or zero variance in `x`.
    DegenerateInput = -6,
    /// Arena growth would exceed its maximum capacity.
    CapacityExceeded = -7,
    /// Arena configuration is invalid.
    ConfigError = -8,
    /// Internal error (e.g. poisoned mutex after a prior panic).
    InternalError = -20,
    /// A Rust panic was caught at the FFI boundary.
    Panicked = -128,
}

impl From<&KernelError> for IsothermStatus {
    fn from(e: &KernelError) -> Self {
        match e {
            KernelError::Addressing { .. } => IsothermStatus::Addressing,
            KernelError::InvalidInput { .. } => IsothermStatus::InvalidInput,
            KernelError::DivisionByZero { .. } => IsothermStatus::DivisionByZero,
            KernelError::DegenerateInput { .. } => IsothermStatus::DegenerateInput,
        }
    }
}

impl From<&ArenaError> for IsothermStatus {
    fn from(e: &ArenaError) -> Self {
        match e {
            ArenaError::OutOfBounds { .. } => IsothermStatus::Addressing,
            ArenaError::CapacityExceeded { .. } => IsothermStatus::CapacityExceeded,
            ArenaError::LengthMismatch { .. }
            | ArenaError::DuplicateRegion { .. }
            | ArenaError::UnknownRegion { .. } => IsothermStatus::InvalidInput,
        }
    }
}

impl From<&ConfigError> for IsothermStatus {
    fn from(_e: &ConfigError) -> Self {
        IsothermStatus::ConfigError
    }
}
