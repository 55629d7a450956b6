//! Arena-specific error types.

use std::error::Error;
use std::fmt;

use isotherm_core::KernelError;

/// Errors that can occur while addressing or resizing the arena.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// A region extends past the arena's current capacity.
    OutOfBounds {
        /// First element of the requested region.
        offset: usize,
        /// Length of the requested region in elements.
        len: usize,
        /// Current capacity in elements.
        capacity: usize,
    },
    /// Growing the arena would exceed its configured maximum.
    CapacityExceeded {
        /// Capacity requested, in elements.
        requested: usize,
        /// Configured maximum capacity, in elements.
        max: usize,
    },
    /// A write supplied a different number of values than the target region holds.
    LengthMismatch {
        /// Length of the target region.
        expected: usize,
        /// Number of values supplied.
        actual: usize,
    },
    /// A layout declared the same region name twice.
    DuplicateRegion {
        /// The repeated name.
        name: String,
    },
    /// A layout lookup named a region that was never declared, or that has
    /// the wrong kind (series vs scalar).
    UnknownRegion {
        /// The name that was looked up.
        name: String,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds {
                offset,
                len,
                capacity,
            } => write!(
                f,
                "region [{offset}, {offset}+{len}) out of bounds for arena of {capacity} elements"
            ),
            Self::CapacityExceeded { requested, max } => write!(
                f,
                "arena capacity exceeded: requested {requested} elements, max {max} elements"
            ),
            Self::LengthMismatch { expected, actual } => write!(
                f,
                "length mismatch: region holds {expected} elements, got {actual}"
            ),
            Self::DuplicateRegion { name } => write!(f, "duplicate layout region '{name}'"),
            Self::UnknownRegion { name } => write!(f, "unknown layout region '{name}'"),
        }
    }
}

impl Error for ArenaError {}

impl From<ArenaError> for KernelError {
    fn from(e: ArenaError) -> Self {
        match e {
            ArenaError::OutOfBounds {
                offset,
                len,
                capacity,
            } => KernelError::Addressing {
                offset,
                len,
                capacity,
            },
            other => KernelError::invalid(other.to_string()),
        }
    }
}
