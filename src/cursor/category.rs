use core::fmt::Debug;

use crate::index::Difference;

use super::{BidirectionalCursor, InputCursor, RandomAccessCursor};

/// The movement capability of a cursor. Each variant refines every
/// variant ordered before it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    /// Single pass, forward only
    Input,
    /// Multi pass, forward only
    Forward,
    /// Multi pass, forward and backward by single steps
    Bidirectional,
    /// Multi pass, arbitrary jumps in constant time
    RandomAccess,
}

impl Category {
    /// Check whether a cursor of this category supports every operation
    /// of `other`.
    #[inline]
    pub const fn refines(self, other: Category) -> bool {
        self as u8 >= other as u8
    }
}

/// A zero-sized marker type naming a cursor category.
pub trait CursorTag: Debug + Copy + Default {
    /// The category this tag stands for
    const CATEGORY: Category;
}

/// Tag for cursors implementing only [`InputCursor`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct InputTag;

/// Tag for cursors implementing [`ForwardCursor`](super::ForwardCursor).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct ForwardTag;

/// Tag for cursors implementing [`BidirectionalCursor`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct BidirectionalTag;

/// Tag for cursors implementing [`RandomAccessCursor`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct RandomAccessTag;

impl CursorTag for InputTag {
    const CATEGORY: Category = Category::Input;
}

impl CursorTag for ForwardTag {
    const CATEGORY: Category = Category::Forward;
}

impl CursorTag for BidirectionalTag {
    const CATEGORY: Category = Category::Bidirectional;
}

impl CursorTag for RandomAccessTag {
    const CATEGORY: Category = Category::RandomAccess;
}

/// Cursor algorithms specialized for the capability named by a tag.
///
/// A tag only implements `Dispatch<C>` for cursors providing the matching
/// capability trait, so the choice of algorithm is fixed at compile time.
pub trait Dispatch<C: InputCursor>: CursorTag {
    /// Count the positions from `first` to `last`.
    fn distance(first: C, last: C) -> C::Difference;

    /// Move `cursor` by `n` positions.
    fn advance(cursor: &mut C, n: C::Difference);
}

#[inline]
fn count_steps<C: InputCursor>(mut first: C, last: C) -> C::Difference {
    let mut count = 0isize;
    while first != last {
        first.step();
        count += 1;
    }
    C::Difference::from_isize(count)
}

#[inline]
fn step_forward<C: InputCursor>(cursor: &mut C, n: C::Difference) {
    if n.is_negative() {
        panic!("Cannot move a forward-only cursor backward");
    }
    for _ in 0..n.magnitude() {
        cursor.step();
    }
}

impl<C: InputCursor> Dispatch<C> for InputTag {
    #[inline]
    fn distance(first: C, last: C) -> C::Difference {
        count_steps(first, last)
    }

    #[inline]
    fn advance(cursor: &mut C, n: C::Difference) {
        step_forward(cursor, n)
    }
}

impl<C: InputCursor> Dispatch<C> for ForwardTag {
    #[inline]
    fn distance(first: C, last: C) -> C::Difference {
        count_steps(first, last)
    }

    #[inline]
    fn advance(cursor: &mut C, n: C::Difference) {
        step_forward(cursor, n)
    }
}

impl<C: BidirectionalCursor> Dispatch<C> for BidirectionalTag {
    #[inline]
    fn distance(first: C, last: C) -> C::Difference {
        count_steps(first, last)
    }

    fn advance(cursor: &mut C, n: C::Difference) {
        if n.is_negative() {
            for _ in 0..n.magnitude() {
                cursor.step_back();
            }
        } else {
            for _ in 0..n.magnitude() {
                cursor.step();
            }
        }
    }
}

impl<C: RandomAccessCursor> Dispatch<C> for RandomAccessTag {
    #[inline]
    fn distance(first: C, last: C) -> C::Difference {
        last.offset_from(&first)
    }

    #[inline]
    fn advance(cursor: &mut C, n: C::Difference) {
        cursor.jump(n)
    }
}

/// The category of a cursor type.
#[inline]
pub fn category_of<C: InputCursor>() -> Category {
    C::Category::CATEGORY
}

/// Count the positions from `first` to `last`.
///
/// Random-access cursors compute the result directly. Other cursors step
/// `first` until it equals `last`, which must be reachable.
///
/// ```
/// use seqvec::cursor::{distance, SliceCursor};
///
/// let data = [1, 2, 3, 4];
/// assert_eq!(distance(SliceCursor::begin(&data), SliceCursor::end(&data)), 4);
/// ```
#[inline]
pub fn distance<C>(first: C, last: C) -> C::Difference
where
    C: InputCursor,
    C::Category: Dispatch<C>,
{
    <C::Category as Dispatch<C>>::distance(first, last)
}

/// Move `cursor` by `n` positions.
///
/// Negative offsets are only accepted by bidirectional and random-access
/// cursors, and panic for the others.
#[inline]
pub fn advance<C>(cursor: &mut C, n: C::Difference)
where
    C: InputCursor,
    C::Category: Dispatch<C>,
{
    <C::Category as Dispatch<C>>::advance(cursor, n)
}

/// Return a cursor `n` positions after `cursor`.
#[inline]
pub fn next<C>(mut cursor: C, n: C::Difference) -> C
where
    C: InputCursor,
    C::Category: Dispatch<C>,
{
    advance(&mut cursor, n);
    cursor
}

/// Return a cursor `n` positions before `cursor`.
#[inline]
pub fn prev<C>(mut cursor: C, n: C::Difference) -> C
where
    C: BidirectionalCursor,
    C::Category: Dispatch<C>,
{
    advance(&mut cursor, C::Difference::from_isize(-n.to_isize()));
    cursor
}
