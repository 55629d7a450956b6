//! Arena configuration parameters.

use std::error::Error;
use std::fmt;

/// Configuration for a host-owned [`Arena`](crate::Arena).
///
/// Capacities are in `f64` elements, matching the element-indexed
/// addressing used everywhere else.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Number of zeroed elements allocated at construction.
    ///
    /// Default: 1024 (8KB). Ten days of hourly samples laid out as
    /// `x`, `y`, smoothed output and two scalars fit comfortably.
    pub initial_capacity: usize,

    /// Hard ceiling on capacity. Growth beyond this fails with
    /// [`ArenaError::CapacityExceeded`](crate::ArenaError::CapacityExceeded).
    ///
    /// Default: 16_777_216 (128MB at 8 bytes per element).
    pub max_capacity: usize,
}

impl ArenaConfig {
    /// Default initial capacity in elements.
    pub const DEFAULT_INITIAL_CAPACITY: usize = 1024;

    /// Default maximum capacity in elements.
    pub const DEFAULT_MAX_CAPACITY: usize = 16_777_216;

    /// Create a config with the given initial capacity and the default maximum.
    pub fn new(initial_capacity: usize) -> Self {
        Self {
            initial_capacity,
            max_capacity: Self::DEFAULT_MAX_CAPACITY,
        }
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_capacity == 0 {
            return Err(ConfigError::ZeroMaxCapacity);
        }
        if self.initial_capacity > self.max_capacity {
            return Err(ConfigError::InitialExceedsMax {
                initial: self.initial_capacity,
                max: self.max_capacity,
            });
        }
        Ok(())
    }

    /// Size of the initial allocation in bytes.
    pub fn initial_bytes(&self) -> usize {
        self.initial_capacity * std::mem::size_of::<f64>()
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INITIAL_CAPACITY)
    }
}

/// Errors detected by [`ArenaConfig::validate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `max_capacity` is zero.
    ZeroMaxCapacity,
    /// `initial_capacity` is larger than `max_capacity`.
    InitialExceedsMax {
        /// The configured initial capacity.
        initial: usize,
        /// The configured maximum capacity.
        max: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroMaxCapacity => write!(f, "max_capacity must be > 0"),
            Self::InitialExceedsMax { initial, max } => write!(
                f,
                "initial_capacity {initial} exceeds max_capacity {max}"
            ),
        }
    }
}

impl Error for ConfigError {}
