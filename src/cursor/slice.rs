use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, AddAssign, Sub, SubAssign};
use core::ptr;

use super::{BidirectionalCursor, ForwardCursor, InputCursor, RandomAccessCursor, RandomAccessTag};

/// A random-access cursor over a borrowed slice.
///
/// The cursor is an offset paired with the slice it borrows, so it cannot
/// outlive the elements it refers to, and no operation that could move or
/// destroy those elements is possible while it exists. Valid positions are
/// `0..=len`, where `len` is the end position.
pub struct SliceCursor<'a, T> {
    data: &'a [T],
    pos: usize,
}

impl<'a, T> SliceCursor<'a, T> {
    /// Create a cursor at position `pos` within `data`.
    ///
    /// Panics if `pos` is greater than the length of `data`.
    #[inline]
    pub fn new(data: &'a [T], pos: usize) -> Self {
        if pos > data.len() {
            panic!("Cursor position out of bounds");
        }
        Self { data, pos }
    }

    /// Create a cursor at the first element of `data`.
    #[inline]
    pub const fn begin(data: &'a [T]) -> Self {
        Self { data, pos: 0 }
    }

    /// Create a cursor one past the last element of `data`.
    #[inline]
    pub const fn end(data: &'a [T]) -> Self {
        Self {
            data,
            pos: data.len(),
        }
    }

    /// The offset of this cursor from the start of the slice.
    #[inline]
    pub const fn index(&self) -> usize {
        self.pos
    }

    /// The full slice this cursor ranges over.
    #[inline]
    pub const fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// The elements from this position to the end of the slice.
    #[inline]
    pub fn remaining(&self) -> &'a [T] {
        &self.data[self.pos..]
    }

    /// Check whether this cursor is positioned at the end of the slice.
    #[inline]
    pub const fn is_end(&self) -> bool {
        self.pos == self.data.len()
    }

    #[inline]
    fn same_slice(&self, other: &Self) -> bool {
        ptr::eq(self.data.as_ptr(), other.data.as_ptr()) && self.data.len() == other.data.len()
    }

    #[inline]
    fn moved(&self, n: isize) -> usize {
        match self.pos.checked_add_signed(n) {
            Some(pos) if pos <= self.data.len() => pos,
            _ => panic!("Cursor position out of bounds"),
        }
    }
}

impl<T> Clone for SliceCursor<'_, T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SliceCursor<'_, T> {}

impl<T> fmt::Debug for SliceCursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliceCursor")
            .field("pos", &self.pos)
            .field("len", &self.data.len())
            .finish()
    }
}

impl<T> PartialEq for SliceCursor<'_, T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos && self.same_slice(other)
    }
}

impl<T> Eq for SliceCursor<'_, T> {}

impl<T> PartialOrd for SliceCursor<'_, T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.same_slice(other) {
            Some(self.pos.cmp(&other.pos))
        } else {
            None
        }
    }
}

impl<'a, T> InputCursor for SliceCursor<'a, T> {
    type Value = T;
    type Item = &'a T;
    type Difference = isize;
    type Category = RandomAccessTag;

    #[inline]
    fn get(&self) -> &'a T {
        match self.data.get(self.pos) {
            Some(item) => item,
            None => panic!("Cannot read a cursor at the end position"),
        }
    }

    #[inline]
    fn step(&mut self) {
        self.pos = self.moved(1);
    }
}

impl<T> ForwardCursor for SliceCursor<'_, T> {}

impl<T> BidirectionalCursor for SliceCursor<'_, T> {
    #[inline]
    fn step_back(&mut self) {
        self.pos = self.moved(-1);
    }
}

impl<T> RandomAccessCursor for SliceCursor<'_, T> {
    #[inline]
    fn jump(&mut self, n: isize) {
        self.pos = self.moved(n);
    }

    #[inline]
    fn offset_from(&self, origin: &Self) -> isize {
        debug_assert!(self.same_slice(origin), "Cursors range over different slices");
        self.pos as isize - origin.pos as isize
    }
}

impl<T> Add<usize> for SliceCursor<'_, T> {
    type Output = Self;

    #[inline]
    fn add(mut self, n: usize) -> Self {
        self += n;
        self
    }
}

impl<T> AddAssign<usize> for SliceCursor<'_, T> {
    #[inline]
    fn add_assign(&mut self, n: usize) {
        match self.pos.checked_add(n) {
            Some(pos) if pos <= self.data.len() => self.pos = pos,
            _ => panic!("Cursor position out of bounds"),
        }
    }
}

impl<T> Sub<usize> for SliceCursor<'_, T> {
    type Output = Self;

    #[inline]
    fn sub(mut self, n: usize) -> Self {
        self -= n;
        self
    }
}

impl<T> SubAssign<usize> for SliceCursor<'_, T> {
    #[inline]
    fn sub_assign(&mut self, n: usize) {
        match self.pos.checked_sub(n) {
            Some(pos) => self.pos = pos,
            None => panic!("Cursor position out of bounds"),
        }
    }
}

impl<'a, T> Sub for SliceCursor<'a, T> {
    type Output = isize;

    #[inline]
    fn sub(self, origin: Self) -> isize {
        self.offset_from(&origin)
    }
}
