//! Named placement of series and scalar slots within an arena.
//!
//! A [`Layout`] packs regions back to back starting at a base offset and
//! hands out typed [`Series`] / [`ScalarSlot`] values, so hosts never
//! compute offsets by hand. Declaration order is placement order.
//!
//! ```
//! use isotherm_arena::Layout;
//!
//! let n = 240;
//! let layout = Layout::builder()
//!     .series("x", n)
//!     .series("y", n)
//!     .scalar("slope")
//!     .scalar("intercept")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(layout.series("y").unwrap().offset(), n);
//! assert_eq!(layout.scalar("intercept").unwrap().offset(), 2 * n + 1);
//! assert_eq!(layout.end(), 2 * n + 2);
//! ```

use indexmap::IndexMap;
use isotherm_core::{ScalarSlot, Series};

use crate::error::ArenaError;

/// A placed region: either a series or a single scalar slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Region {
    /// A run of elements.
    Series(Series),
    /// One element.
    Scalar(ScalarSlot),
}

impl Region {
    /// The elements covered by this region.
    pub fn as_series(&self) -> Series {
        match self {
            Region::Series(s) => *s,
            Region::Scalar(slot) => slot.as_series(),
        }
    }
}

/// An immutable offset table mapping region names to placements.
#[derive(Clone, Debug)]
pub struct Layout {
    regions: IndexMap<String, Region>,
    base: usize,
    end: usize,
}

/// Builder for [`Layout`]. Created by [`Layout::builder`].
pub struct LayoutBuilder {
    base: usize,
    entries: Vec<(String, Option<usize>)>,
}

impl Layout {
    /// Start declaring regions, placed from element 0.
    pub fn builder() -> LayoutBuilder {
        LayoutBuilder {
            base: 0,
            entries: Vec::new(),
        }
    }

    /// Look up a series region by name.
    pub fn series(&self, name: &str) -> Result<Series, ArenaError> {
        match self.regions.get(name) {
            Some(Region::Series(s)) => Ok(*s),
            _ => Err(ArenaError::UnknownRegion { name: name.into() }),
        }
    }

    /// Look up a scalar slot by name.
    pub fn scalar(&self, name: &str) -> Result<ScalarSlot, ArenaError> {
        match self.regions.get(name) {
            Some(Region::Scalar(slot)) => Ok(*slot),
            _ => Err(ArenaError::UnknownRegion { name: name.into() }),
        }
    }

    /// First element covered by the layout.
    pub fn base(&self) -> usize {
        self.base
    }

    /// One past the last element covered by the layout: the arena capacity
    /// the layout needs.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of elements the layout spans.
    pub fn total_len(&self) -> usize {
        self.end - self.base
    }

    /// Number of declared regions.
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    /// Iterate regions in placement order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Region)> + '_ {
        self.regions.iter().map(|(name, r)| (name.as_str(), *r))
    }
}

impl LayoutBuilder {
    /// Place the first region at element `base` instead of 0.
    pub fn starting_at(mut self, base: usize) -> Self {
        self.base = base;
        self
    }

    /// Declare a series of `len` elements.
    pub fn series(mut self, name: impl Into<String>, len: usize) -> Self {
        self.entries.push((name.into(), Some(len)));
        self
    }

    /// Declare a single scalar slot.
    pub fn scalar(mut self, name: impl Into<String>) -> Self {
        self.entries.push((name.into(), None));
        self
    }

    /// Assign offsets in declaration order.
    ///
    /// # Errors
    ///
    /// [`ArenaError::DuplicateRegion`] if a name is declared twice, or
    /// [`ArenaError::CapacityExceeded`] if the packed layout overflows `usize`.
    pub fn build(self) -> Result<Layout, ArenaError> {
        let mut regions = IndexMap::with_capacity(self.entries.len());
        let mut cursor = self.base;
        for (name, len) in self.entries {
            if regions.contains_key(&name) {
                return Err(ArenaError::DuplicateRegion { name });
            }
            let region = match len {
                Some(len) => Region::Series(Series::new(cursor, len)),
                None => Region::Scalar(ScalarSlot::new(cursor)),
            };
            cursor = cursor
                .checked_add(len.unwrap_or(1))
                .ok_or(ArenaError::CapacityExceeded {
                    requested: usize::MAX,
                    max: usize::MAX,
                })?;
            regions.insert(name, region);
        }
        Ok(Layout {
            regions,
            base: self.base,
            end: cursor,
        })
    }
}
