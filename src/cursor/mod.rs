//! Cursors: position-like handles into a run of elements.
//!
//! A cursor names an element type, a signed difference type and one of four
//! movement capabilities, each refining the last:
//!
//! | capability      | trait                   | tag                  |
//! |-----------------|-------------------------|----------------------|
//! | single pass     | [`InputCursor`]         | [`InputTag`]         |
//! | multi pass      | [`ForwardCursor`]       | [`ForwardTag`]       |
//! | step backward   | [`BidirectionalCursor`] | [`BidirectionalTag`] |
//! | jump by offset  | [`RandomAccessCursor`]  | [`RandomAccessTag`]  |
//!
//! Generic algorithms such as [`distance`] and [`advance`] select their
//! implementation from the cursor's tag at compile time, so a random-access
//! cursor measures a range in constant time while a forward cursor walks it.

use crate::index::Difference;

mod category;
mod range;
mod reverse;
mod slice;

pub use self::{
    category::{
        advance, category_of, distance, next, prev, BidirectionalTag, Category, CursorTag,
        Dispatch, ForwardTag, InputTag, RandomAccessTag,
    },
    range::CursorRange,
    reverse::ReverseCursor,
    slice::SliceCursor,
};

/// A cursor which may be read and stepped forward. Copies of an input
/// cursor are not required to observe the same sequence.
pub trait InputCursor: Sized + PartialEq {
    /// The element type of the underlying sequence
    type Value;
    /// The type produced by reading the cursor, usually `&Self::Value`
    type Item;
    /// The signed type expressing the distance between positions
    type Difference: Difference;
    /// The richest movement capability of this cursor
    type Category: CursorTag;

    /// Read the element at the current position.
    ///
    /// Reading a cursor positioned at the end of its sequence panics.
    fn get(&self) -> Self::Item;

    /// Move to the next position.
    fn step(&mut self);
}

/// A cursor which may be copied, with every copy observing the same sequence.
pub trait ForwardCursor: InputCursor + Clone {}

/// A cursor which may also move to the previous position.
pub trait BidirectionalCursor: ForwardCursor {
    /// Move to the previous position.
    fn step_back(&mut self);
}

/// A cursor which may move by an arbitrary offset in constant time.
pub trait RandomAccessCursor: BidirectionalCursor {
    /// Move by `n` positions, backward when `n` is negative.
    fn jump(&mut self, n: Self::Difference);

    /// The number of positions from `origin` to `self`.
    fn offset_from(&self, origin: &Self) -> Self::Difference;
}
