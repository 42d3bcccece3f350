use core::iter::FusedIterator;

use super::{BidirectionalCursor, InputCursor};

/// An iterator over the half-open cursor range `[first, last)`.
///
/// ```
/// use seqvec::cursor::{CursorRange, SliceCursor};
///
/// let data = [1, 2, 3];
/// let range = CursorRange::new(SliceCursor::begin(&data), SliceCursor::end(&data));
/// assert_eq!(range.rev().copied().collect::<Vec<_>>(), [3, 2, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct CursorRange<C> {
    first: C,
    last: C,
}

impl<C: InputCursor> CursorRange<C> {
    /// Create an iterator over `[first, last)`. `last` must be reachable
    /// from `first` by stepping forward.
    #[inline]
    pub fn new(first: C, last: C) -> Self {
        Self { first, last }
    }

    /// Unwrap the remaining range into its bounds.
    #[inline]
    pub fn into_bounds(self) -> (C, C) {
        (self.first, self.last)
    }
}

impl<C: InputCursor> Iterator for CursorRange<C> {
    type Item = C::Item;

    #[inline]
    fn next(&mut self) -> Option<C::Item> {
        if self.first == self.last {
            None
        } else {
            let item = self.first.get();
            self.first.step();
            Some(item)
        }
    }
}

impl<C: BidirectionalCursor> DoubleEndedIterator for CursorRange<C> {
    #[inline]
    fn next_back(&mut self) -> Option<C::Item> {
        if self.first == self.last {
            None
        } else {
            self.last.step_back();
            Some(self.last.get())
        }
    }
}

impl<C: InputCursor> FusedIterator for CursorRange<C> {}
