//! Element-indexed views into the arena: [`Series`], [`ScalarSlot`], [`Window`].

use std::fmt;
use std::num::NonZeroUsize;
use std::ops::Range;

use crate::error::KernelError;

/// Width of one arena element in bytes (`f64`).
pub const ELEMENT_BYTES: usize = std::mem::size_of::<f64>();

fn element_index(byte_offset: usize, what: &str) -> Result<usize, KernelError> {
    if byte_offset % ELEMENT_BYTES != 0 {
        return Err(KernelError::invalid(format!(
            "{what} byte offset {byte_offset} is not a multiple of {ELEMENT_BYTES}"
        )));
    }
    Ok(byte_offset / ELEMENT_BYTES)
}

fn non_negative(value: i64, what: &str) -> Result<usize, KernelError> {
    usize::try_from(value)
        .map_err(|_| KernelError::invalid(format!("{what} must be non-negative, got {value}")))
}

/// A contiguous run of `len` elements starting at element `offset`.
///
/// A `Series` is only a description; it says nothing about whether the
/// region fits in any particular arena. Bounds are checked when the series
/// is resolved against an arena view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub struct Series {
    offset: usize,
    len: usize,
}

impl Series {
    /// Create a series from an element offset and element length.
    pub const fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    /// Create a series from signed integers as received across a host
    /// boundary. Negative values are rejected with `InvalidInput`.
    pub fn from_raw(offset: i64, len: i64) -> Result<Self, KernelError> {
        Ok(Self::new(
            non_negative(offset, "series offset")?,
            non_negative(len, "series length")?,
        ))
    }

    /// Create a series from a **byte** offset and an element length.
    ///
    /// The byte offset must be a multiple of [`ELEMENT_BYTES`].
    pub fn from_byte_offset(byte_offset: usize, len: usize) -> Result<Self, KernelError> {
        Ok(Self::new(element_index(byte_offset, "series")?, len))
    }

    /// First element index.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Number of elements.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the series has no elements.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// One past the last element index, or `None` on overflow.
    pub fn end(&self) -> Option<usize> {
        self.offset.checked_add(self.len)
    }

    /// Element range covered by this series, or `None` on overflow.
    pub fn range(&self) -> Option<Range<usize>> {
        self.end().map(|end| self.offset..end)
    }

    /// Byte offset of the first element.
    pub fn byte_offset(&self) -> Option<usize> {
        self.offset.checked_mul(ELEMENT_BYTES)
    }

    /// The series of the same length placed immediately after this one.
    ///
    /// Mirrors the conventional regression layout where `y` follows `x`.
    pub fn followed_by(&self, len: usize) -> Option<Series> {
        self.end().map(|end| Series::new(end, len))
    }

    /// Whether two series share at least one element.
    pub fn overlaps(&self, other: &Series) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        match (self.range(), other.range()) {
            (Some(a), Some(b)) => a.start < b.end && b.start < a.end,
            _ => false,
        }
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Series(off={}, len={})", self.offset, self.len)
    }
}

/// Location of a single `f64` result in the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub struct ScalarSlot {
    offset: usize,
}

impl ScalarSlot {
    /// Create a slot at an element offset.
    pub const fn new(offset: usize) -> Self {
        Self { offset }
    }

    /// Create a slot from a signed element offset received across a host
    /// boundary.
    pub fn from_raw(offset: i64) -> Result<Self, KernelError> {
        Ok(Self::new(non_negative(offset, "slot offset")?))
    }

    /// Create a slot from a **byte** offset, which must be element-aligned.
    pub fn from_byte_offset(byte_offset: usize) -> Result<Self, KernelError> {
        Ok(Self::new(element_index(byte_offset, "slot")?))
    }

    /// Element offset of the slot.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// The one-element series covering this slot.
    pub const fn as_series(&self) -> Series {
        Series::new(self.offset, 1)
    }
}

impl fmt::Display for ScalarSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScalarSlot(off={})", self.offset)
    }
}

/// Number of trailing samples averaged by the moving average. Always >= 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Window(NonZeroUsize);

impl Window {
    /// A window of one sample: the identity smoothing.
    pub const ONE: Window = Window(NonZeroUsize::MIN);

    /// Create a window, rejecting zero.
    pub fn new(size: usize) -> Result<Self, KernelError> {
        NonZeroUsize::new(size)
            .map(Self)
            .ok_or_else(|| KernelError::invalid("window must be >= 1, got 0"))
    }

    /// Create a window from a signed value received across a host boundary.
    pub fn from_raw(size: i64) -> Result<Self, KernelError> {
        if size < 1 {
            return Err(KernelError::invalid(format!(
                "window must be >= 1, got {size}"
            )));
        }
        Self::new(non_negative(size, "window")?)
    }

    /// Window size in samples.
    pub const fn get(&self) -> usize {
        self.0.get()
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
