//! Signed offsets between cursor positions, and capacity growth.

use core::fmt::{Debug, Display};

/// Signed types which may express the distance between two cursor positions.
pub trait Difference:
    Copy + Clone + Debug + Display + PartialEq + Eq + PartialOrd + Ord + Sized + 'static
{
    /// The zero value
    const ZERO: Self;

    /// Create an instance of this type from an `isize`, panicking if
    /// the bounds are exceeded
    fn from_isize(val: isize) -> Self;

    /// Convert this instance into an `isize`, panicking if the bounds
    /// are exceeded
    fn to_isize(self) -> isize;

    /// The magnitude of this value as a `usize`
    #[inline]
    fn magnitude(self) -> usize {
        self.to_isize().unsigned_abs()
    }

    /// Whether this value is below zero
    #[inline]
    fn is_negative(self) -> bool {
        self < Self::ZERO
    }
}

impl Difference for isize {
    const ZERO: Self = 0isize;

    #[inline]
    fn from_isize(val: isize) -> Self {
        val
    }

    #[inline]
    fn to_isize(self) -> isize {
        self
    }
}

impl Difference for i64 {
    const ZERO: Self = 0i64;

    #[inline]
    fn from_isize(val: isize) -> Self {
        val as Self
    }

    #[inline]
    fn to_isize(self) -> isize {
        match self.try_into() {
            Ok(val) => val,
            Err(_) => panic!("Cursor offset exceeds isize"),
        }
    }
}

impl Difference for i32 {
    const ZERO: Self = 0i32;

    #[inline]
    fn from_isize(val: isize) -> Self {
        match val.try_into() {
            Ok(val) => val,
            Err(_) => panic!("Cursor offset exceeds i32"),
        }
    }

    #[inline]
    fn to_isize(self) -> isize {
        self as isize
    }
}

/// Growth behavior for collections which have exceeded their available storage
pub trait Grow: Debug {
    /// Calculate the next capacity to request from the allocator, or `None`
    /// if no representable capacity satisfies `minimum`
    fn next_capacity(prev: usize, minimum: usize) -> Option<usize>;
}

/// Growth behavior which never requests extra capacity
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct GrowExact;

impl Grow for GrowExact {
    #[inline]
    fn next_capacity(_prev: usize, minimum: usize) -> Option<usize> {
        Some(minimum)
    }
}

/// Growth behavior which doubles the capacity, starting from one, until
/// the minimum is reached
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct GrowDoubling;

impl Grow for GrowDoubling {
    #[inline]
    fn next_capacity(prev: usize, minimum: usize) -> Option<usize> {
        let mut capacity = if prev == 0 { 1 } else { prev };
        while capacity < minimum {
            capacity = capacity.checked_mul(2)?;
        }
        Some(capacity)
    }
}
