//! Host-owned, growable arena storage.
//!
//! [`Arena`] is what a host embeds when it has no linear memory of its own
//! to lend the kernel. It is a zero-initialised `Vec<f64>` with an explicit
//! growth ceiling. Growth is always an explicit host action and is never
//! triggered by a kernel entry point.

use isotherm_core::{ScalarSlot, Series};

use crate::config::{ArenaConfig, ConfigError};
use crate::error::ArenaError;
use crate::layout::Layout;
use crate::view::{resolve, ArenaView};

/// A contiguous, zero-initialised run of `f64` elements owned by the host.
///
/// Growing the arena may move its storage. Any raw pointer obtained via
/// [`as_mut_ptr`](Arena::as_mut_ptr) before a grow is stale afterwards, as is
/// any offset the host computed against an older layout.
#[derive(Debug)]
pub struct Arena {
    data: Vec<f64>,
    max_capacity: usize,
}

impl Arena {
    /// Create an arena from a validated config.
    pub fn new(config: &ArenaConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            data: vec![0.0; config.initial_capacity],
            max_capacity: config.max_capacity,
        })
    }

    /// Create an arena with `capacity` elements and the default maximum.
    ///
    /// Capacities above the default maximum raise the maximum to match.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: vec![0.0; capacity],
            max_capacity: capacity.max(ArenaConfig::DEFAULT_MAX_CAPACITY),
        }
    }

    /// Create an arena holding exactly `values`.
    pub fn from_values(values: &[f64]) -> Self {
        let mut arena = Self::with_capacity(values.len());
        arena.data.copy_from_slice(values);
        arena
    }

    /// Current capacity in elements.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Configured maximum capacity in elements.
    pub fn max_capacity(&self) -> usize {
        self.max_capacity
    }

    /// Memory held by the arena, in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.data.len() * std::mem::size_of::<f64>()
    }

    /// Grow the arena so it holds at least `capacity` elements.
    ///
    /// New elements are zeroed. Existing contents are preserved. A request
    /// at or below the current capacity is a no-op; arenas never shrink.
    pub fn ensure_capacity(&mut self, capacity: usize) -> Result<(), ArenaError> {
        if capacity <= self.data.len() {
            return Ok(());
        }
        if capacity > self.max_capacity {
            return Err(ArenaError::CapacityExceeded {
                requested: capacity,
                max: self.max_capacity,
            });
        }
        tracing::debug!(
            from = self.data.len(),
            to = capacity,
            "growing arena"
        );
        self.data.resize(capacity, 0.0);
        Ok(())
    }

    /// Grow the arena by `additional` elements.
    pub fn grow(&mut self, additional: usize) -> Result<(), ArenaError> {
        let requested =
            self.data
                .len()
                .checked_add(additional)
                .ok_or(ArenaError::CapacityExceeded {
                    requested: usize::MAX,
                    max: self.max_capacity,
                })?;
        self.ensure_capacity(requested)
    }

    /// Grow the arena so every region of `layout` fits.
    pub fn ensure_layout(&mut self, layout: &Layout) -> Result<(), ArenaError> {
        self.ensure_capacity(layout.end())
    }

    /// Borrow the arena as a kernel view for one invocation.
    pub fn view(&mut self) -> ArenaView<'_> {
        ArenaView::new(&mut self.data)
    }

    /// Borrow the elements of a series.
    pub fn read_series(&self, series: Series) -> Result<&[f64], ArenaError> {
        let range = resolve(self.data.len(), series)?;
        Ok(&self.data[range])
    }

    /// Copy `values` into `series`.
    pub fn write_series(&mut self, series: Series, values: &[f64]) -> Result<(), ArenaError> {
        self.view().write_series(series, values)
    }

    /// Read a single scalar.
    pub fn read_scalar(&self, slot: ScalarSlot) -> Result<f64, ArenaError> {
        let range = resolve(self.data.len(), slot.as_series())?;
        Ok(self.data[range.start])
    }

    /// Write a single scalar.
    pub fn write_scalar(&mut self, slot: ScalarSlot, value: f64) -> Result<(), ArenaError> {
        self.view().write_scalar(slot, value)
    }

    /// The whole arena as a slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// The whole arena as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Base pointer of the arena storage, for hosts that write through
    /// shared memory. Invalidated by any subsequent grow.
    pub fn as_mut_ptr(&mut self) -> *mut f64 {
        self.data.as_mut_ptr()
    }

    /// Zero every element without changing capacity.
    pub fn clear(&mut self) {
        self.data.fill(0.0);
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::with_capacity(ArenaConfig::DEFAULT_INITIAL_CAPACITY)
    }
}
