//! Bounds-checked view over host-owned arena memory.
//!
//! [`ArenaView`] borrows a `&mut [f64]` for the duration of exactly one
//! kernel invocation. The borrow is what enforces the non-reentrancy rule:
//! while a view exists nothing else can touch the arena, and a host resize
//! cannot happen until the view is dropped.

use std::ops::Range;

use isotherm_core::{ScalarSlot, Series};

use crate::error::ArenaError;

/// Resolve `series` against an arena of `capacity` elements.
///
/// Overflowing `offset + len` is reported as out of bounds rather than
/// wrapping.
pub(crate) fn resolve(capacity: usize, series: Series) -> Result<Range<usize>, ArenaError> {
    match series.range() {
        Some(range) if range.end <= capacity => Ok(range),
        _ => Err(ArenaError::OutOfBounds {
            offset: series.offset(),
            len: series.len(),
            capacity,
        }),
    }
}

/// A mutable, bounds-checked window over arena memory the kernel does not own.
pub struct ArenaView<'a> {
    data: &'a mut [f64],
}

impl<'a> ArenaView<'a> {
    /// Wrap a host-provided element buffer.
    pub fn new(data: &'a mut [f64]) -> Self {
        Self { data }
    }

    /// Current capacity in elements.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Validate that `series` lies entirely within the arena.
    pub fn check(&self, series: Series) -> Result<Range<usize>, ArenaError> {
        resolve(self.data.len(), series)
    }

    /// Validate that `slot` lies within the arena.
    pub fn check_scalar(&self, slot: ScalarSlot) -> Result<usize, ArenaError> {
        self.check(slot.as_series()).map(|r| r.start)
    }

    /// Borrow the elements of a series.
    pub fn read_series(&self, series: Series) -> Result<&[f64], ArenaError> {
        let range = self.check(series)?;
        Ok(&self.data[range])
    }

    /// Mutably borrow the elements of a series.
    pub fn series_mut(&mut self, series: Series) -> Result<&mut [f64], ArenaError> {
        let range = self.check(series)?;
        Ok(&mut self.data[range])
    }

    /// Copy `values` into `series`. The lengths must match exactly.
    pub fn write_series(&mut self, series: Series, values: &[f64]) -> Result<(), ArenaError> {
        if values.len() != series.len() {
            return Err(ArenaError::LengthMismatch {
                expected: series.len(),
                actual: values.len(),
            });
        }
        self.series_mut(series)?.copy_from_slice(values);
        Ok(())
    }

    /// Read a single scalar.
    pub fn read_scalar(&self, slot: ScalarSlot) -> Result<f64, ArenaError> {
        let i = self.check_scalar(slot)?;
        Ok(self.data[i])
    }

    /// Write a single scalar.
    pub fn write_scalar(&mut self, slot: ScalarSlot, value: f64) -> Result<(), ArenaError> {
        let i = self.check_scalar(slot)?;
        self.data[i] = value;
        Ok(())
    }

    /// The whole arena as a shared slice.
    pub fn as_slice(&self) -> &[f64] {
        &*self.data
    }

    /// The whole arena as a mutable slice.
    ///
    /// For algorithms that address source and destination regions of the
    /// same buffer by index (overlap-tolerant smoothing). Callers must have
    /// validated every region they touch via [`check`](Self::check).
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut *self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_read_series() {
        let mut buf = vec![0.0; 8];
        let mut view = ArenaView::new(&mut buf);
        let s = Series::new(2, 3);
        view.write_series(s, &[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(view.read_series(s).unwrap(), &[1.0, 2.0, 3.0]);
        assert_eq!(buf, vec![0.0, 0.0, 1.0, 2.0, 3.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn series_ending_at_capacity_is_in_bounds() {
        let mut buf = vec![0.0; 4];
        let view = ArenaView::new(&mut buf);
        assert_eq!(view.check(Series::new(0, 4)).unwrap(), 0..4);
        assert_eq!(view.check(Series::new(4, 0)).unwrap(), 4..4);
    }

    #[test]
    fn series_past_capacity_is_out_of_bounds() {
        let mut buf = vec![0.0; 4];
        let view = ArenaView::new(&mut buf);
        assert_eq!(
            view.read_series(Series::new(2, 3)),
            Err(ArenaError::OutOfBounds {
                offset: 2,
                len: 3,
                capacity: 4
            })
        );
    }

    #[test]
    fn overflowing_series_is_out_of_bounds() {
        let mut buf = vec![0.0; 4];
        let view = ArenaView::new(&mut buf);
        assert!(matches!(
            view.check(Series::new(usize::MAX, 2)),
            Err(ArenaError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn scalar_round_trip_and_bounds() {
        let mut buf = vec![0.0; 2];
        let mut view = ArenaView::new(&mut buf);
        view.write_scalar(ScalarSlot::new(1), 42.5).unwrap();
        assert_eq!(view.read_scalar(ScalarSlot::new(1)).unwrap(), 42.5);
        assert!(view.write_scalar(ScalarSlot::new(2), 1.0).is_err());
        assert_eq!(buf, vec![0.0, 42.5]);
    }

    #[test]
    fn length_mismatch_leaves_arena_untouched() {
        let mut buf = vec![9.0; 4];
        let mut view = ArenaView::new(&mut buf);
        assert_eq!(
            view.write_series(Series::new(0, 3), &[1.0, 2.0]),
            Err(ArenaError::LengthMismatch {
                expected: 3,
                actual: 2
            })
        );
        assert_eq!(buf, vec![9.0; 4]);
    }

    #[test]
    fn failed_write_leaves_arena_untouched() {
        let mut buf = vec![9.0; 4];
        let mut view = ArenaView::new(&mut buf);
        assert!(view.write_series(Series::new(3, 2), &[1.0, 2.0]).is_err());
        assert_eq!(buf, vec![9.0; 4]);
    }
}
