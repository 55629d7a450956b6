//! Error taxonomy for kernel entry points.
//!
//! Every kernel operation either fully succeeds or returns one of these
//! errors without having written to the arena. Nothing is retried and
//! there is no best-effort mode.

use std::error::Error;
use std::fmt;

/// Errors reported by kernel operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KernelError {
    /// A region would read or write outside the arena's current capacity.
    ///
    /// Never clamped: the caller gets the exact region that failed.
    Addressing {
        /// First element of the offending region.
        offset: usize,
        /// Length of the offending region in elements.
        len: usize,
        /// Arena capacity in elements at the time of the call.
        capacity: usize,
    },
    /// Structurally invalid parameters (negative length, zero window,
    /// mismatched series lengths, misaligned byte offsets).
    InvalidInput {
        /// Human-readable description of the problem.
        reason: String,
    },
    /// A reduction was asked to divide by zero elements.
    DivisionByZero {
        /// The operation that was attempted, e.g. `"mean"`.
        operation: &'static str,
    },
    /// The input has a shape for which the computation is mathematically
    /// undefined (fewer than two points, zero variance in `x`).
    DegenerateInput {
        /// Human-readable description of the degeneracy.
        reason: String,
    },
}

impl KernelError {
    /// Shorthand for [`KernelError::InvalidInput`].
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Shorthand for [`KernelError::DegenerateInput`].
    pub fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateInput {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Addressing {
                offset,
                len,
                capacity,
            } => write!(
                f,
                "region [{offset}, {offset}+{len}) exceeds arena capacity of {capacity} elements"
            ),
            Self::InvalidInput { reason } => write!(f, "invalid input: {reason}"),
            Self::DivisionByZero { operation } => {
                write!(f, "{operation} of an empty series is undefined")
            }
            Self::DegenerateInput { reason } => write!(f, "degenerate input: {reason}"),
        }
    }
}

impl Error for KernelError {}
