use crate::index::Difference;

use super::{BidirectionalCursor, ForwardCursor, InputCursor, RandomAccessCursor};

/// A cursor adapter which walks its inner cursor backward.
///
/// A reverse cursor built from position `p` reads the element immediately
/// before `p`, so the reverse of an end cursor reads the last element and
/// the reverse of a begin cursor is the end of the reversed sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReverseCursor<C> {
    inner: C,
}

impl<C: BidirectionalCursor> ReverseCursor<C> {
    /// Wrap a bidirectional cursor.
    #[inline]
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    /// The position of the underlying cursor.
    #[inline]
    pub fn base(&self) -> &C {
        &self.inner
    }

    /// Unwrap the underlying cursor.
    #[inline]
    pub fn into_base(self) -> C {
        self.inner
    }
}

impl<C: BidirectionalCursor> InputCursor for ReverseCursor<C> {
    type Value = C::Value;
    type Item = C::Item;
    type Difference = C::Difference;
    type Category = C::Category;

    #[inline]
    fn get(&self) -> C::Item {
        let mut before = self.inner.clone();
        before.step_back();
        before.get()
    }

    #[inline]
    fn step(&mut self) {
        self.inner.step_back();
    }
}

impl<C: BidirectionalCursor> ForwardCursor for ReverseCursor<C> {}

impl<C: BidirectionalCursor> BidirectionalCursor for ReverseCursor<C> {
    #[inline]
    fn step_back(&mut self) {
        self.inner.step();
    }
}

impl<C: RandomAccessCursor> RandomAccessCursor for ReverseCursor<C> {
    #[inline]
    fn jump(&mut self, n: C::Difference) {
        self.inner.jump(C::Difference::from_isize(-n.to_isize()));
    }

    #[inline]
    fn offset_from(&self, origin: &Self) -> C::Difference {
        origin.inner.offset_from(&self.inner)
    }
}
