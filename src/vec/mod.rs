//! A contiguous growable sequence built on a [`RawAlloc`] allocator.
//!
//! # Cursor and reference invalidation
//!
//! Slices, references and cursors obtained from a [`Vector`] borrow it, so
//! the compiler rejects any use of them after a mutating call. The rules
//! which that borrow enforces are the following:
//!
//! - any operation which reallocates (growth past the capacity, `reserve`,
//!   `shrink_to_fit`, `assign` beyond the capacity) moves every element;
//! - `insert` and `erase` shift every element at or after the position;
//! - `push_back` within capacity and `pop_back` only affect the end position.
//!
//! Mutating operations accept positions as element offsets, which remain
//! meaningful across reallocation. A cursor reports its offset with
//! [`SliceCursor::index`].
//!
//! # Element lifetimes
//!
//! Every element is constructed through the vector's allocator, and
//! `pop_back`, `erase`, `erase_range`, `truncate`, `clear`, `resize` and
//! `Drop` end element lifetimes through the allocator's `destroy` methods.
//! `pop`, `remove` and the owning iterator instead move elements out to the
//! caller, after which the allocator no longer tracks them. Elements still
//! held by an owning iterator when it is dropped are destroyed through the
//! allocator.

use core::borrow::{Borrow, BorrowMut};
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::mem::{self, ManuallyDrop};
use core::ops::{Bound, Deref, DerefMut, Index, IndexMut, Range, RangeBounds};
use core::ptr;
use core::slice::SliceIndex;

use const_default::ConstDefault;

use crate::alloc::{Global, RawAlloc};
use crate::cursor::{self, Dispatch, ForwardCursor, InputCursor, ReverseCursor, SliceCursor};
use crate::error::{InsertionError, OutOfRange, StorageError};
use crate::index::{Difference, GrowDoubling, GrowExact};

use self::buffer::VecBuffer;
use self::insert::Inserter;

pub use self::into_iter::IntoIter;

mod buffer;

#[macro_use]
mod macros;

pub(crate) mod insert;
mod into_iter;

#[cfg(feature = "zeroize")]
/// A `Vector` which zeroizes its storage whenever it is released.
pub type ZeroizingVector<T> = Vector<T, crate::alloc::ZeroizingAlloc<Global>>;

#[cold]
#[inline(never)]
pub(super) fn index_panic() -> ! {
    panic!("Invalid element index");
}

#[inline]
fn bounds_to_range(range: impl RangeBounds<usize>, length: usize) -> Range<usize> {
    let start = match range.start_bound() {
        Bound::Unbounded => 0,
        Bound::Included(i) => *i,
        Bound::Excluded(i) => i.saturating_add(1),
    };
    let end = match range.end_bound() {
        Bound::Unbounded => length,
        Bound::Included(i) => i.saturating_add(1),
        Bound::Excluded(i) => *i,
    };
    if start > end || end > length {
        index_panic();
    }
    Range { start, end }
}

/// The number of positions in `[first, last)`.
#[inline]
fn range_len<C>(first: C, last: C) -> usize
where
    C: InputCursor,
    C::Category: Dispatch<C>,
{
    let count = cursor::distance(first, last);
    if count.is_negative() {
        panic!("Invalid cursor range");
    }
    count.magnitude()
}

#[cfg(feature = "alloc")]
#[inline]
/// Create a `Vector<T>` from an array `[T; N]`.
pub fn from_array<T, const N: usize>(data: [T; N]) -> Vector<T> {
    from_array_in(data, Global)
}

#[inline]
/// Create a `Vector<T, A>` from an array `[T; N]` and an allocator instance.
pub fn from_array_in<T, A: RawAlloc, const N: usize>(data: [T; N], alloc: A) -> Vector<T, A> {
    let mut v = Vector::with_capacity_in(N, alloc);
    v.extend(data);
    v
}

/// A contiguous growable sequence of `T`, storing its elements in a single
/// allocation obtained from `A`.
///
/// The slots `[0, len)` of the allocation hold live elements and the slots
/// `[len, capacity)` are raw storage. The capacity grows by doubling and is
/// only reduced by [`shrink_to_fit`](Self::shrink_to_fit).
pub struct Vector<T, A: RawAlloc = Global> {
    buffer: VecBuffer<T, A>,
}

#[cfg(feature = "alloc")]
impl<T> Vector<T> {
    /// Constructs a new, empty `Vector<T>`.
    ///
    /// The vector will not allocate until elements are pushed onto it.
    ///
    /// # Examples
    ///
    /// ```
    /// # #![allow(unused_mut)]
    /// use seqvec::Vector;
    ///
    /// let mut vec: Vector<i32> = Vector::new();
    /// assert_eq!(vec.capacity(), 0);
    /// ```
    pub const fn new() -> Self {
        Self::new_in(Global)
    }

    pub fn try_with_capacity(capacity: usize) -> Result<Self, StorageError> {
        Self::try_with_capacity_in(capacity, Global)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_in(capacity, Global)
    }

    /// Constructs a vector holding `count` clones of `value`.
    pub fn from_elem(count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::from_elem_in(count, value, Global)
    }

    pub fn try_from_elem(count: usize, value: T) -> Result<Self, StorageError>
    where
        T: Clone,
    {
        Self::try_from_elem_in(count, value, Global)
    }

    pub fn from_slice(data: &[T]) -> Self
    where
        T: Clone,
    {
        Self::from_slice_in(data, Global)
    }

    pub fn try_from_slice(data: &[T]) -> Result<Self, StorageError>
    where
        T: Clone,
    {
        Self::try_from_slice_in(data, Global)
    }

    /// Constructs a vector holding clones of the elements of `[first, last)`.
    pub fn from_range<C>(first: C, last: C) -> Self
    where
        T: Clone,
        C: ForwardCursor<Value = T>,
        C::Item: Borrow<T>,
        C::Category: Dispatch<C>,
    {
        Self::from_range_in(first, last, Global)
    }
}

impl<T, A: RawAlloc + ConstDefault> Vector<T, A> {
    /// Constructs a new, empty `Vector<T, A>` with the default allocator
    /// instance. Usable in `const` and `static` initializers.
    ///
    /// ```
    /// use seqvec::vec::ZeroizingVector;
    ///
    /// const EMPTY: ZeroizingVector<u8> = ZeroizingVector::new_default();
    /// assert!(EMPTY.is_empty());
    /// ```
    pub const fn new_default() -> Self {
        Self::new_in(A::DEFAULT)
    }
}

impl<T, A: RawAlloc> Vector<T, A> {
    /// Constructs a new, empty `Vector<T, A>` using the provided allocator.
    pub const fn new_in(alloc: A) -> Self {
        Self {
            buffer: VecBuffer::new_in(alloc),
        }
    }

    pub fn with_capacity_in(capacity: usize, alloc: A) -> Self {
        match Self::try_with_capacity_in(capacity, alloc) {
            Ok(res) => res,
            Err(error) => error.panic(),
        }
    }

    pub fn try_with_capacity_in(capacity: usize, alloc: A) -> Result<Self, StorageError> {
        Ok(Self {
            buffer: VecBuffer::try_with_capacity_in(capacity, alloc)?,
        })
    }

    pub fn from_elem_in(count: usize, value: T, alloc: A) -> Self
    where
        T: Clone,
    {
        match Self::try_from_elem_in(count, value, alloc) {
            Ok(res) => res,
            Err(error) => error.panic(),
        }
    }

    pub fn try_from_elem_in(count: usize, value: T, alloc: A) -> Result<Self, StorageError>
    where
        T: Clone,
    {
        let mut vec = Self::try_with_capacity_in(count, alloc)?;
        if count > 0 {
            unsafe {
                let first = vec.buffer.slot(0);
                vec.buffer.allocator().construct_n(first, count, &value);
                vec.buffer.set_length(count);
            }
        }
        Ok(vec)
    }

    pub fn from_slice_in(data: &[T], alloc: A) -> Self
    where
        T: Clone,
    {
        match Self::try_from_slice_in(data, alloc) {
            Ok(res) => res,
            Err(error) => error.panic(),
        }
    }

    pub fn try_from_slice_in(data: &[T], alloc: A) -> Result<Self, StorageError>
    where
        T: Clone,
    {
        let mut vec = Self::try_with_capacity_in(data.len(), alloc)?;
        vec.extend_from_slice(data);
        Ok(vec)
    }

    pub fn from_range_in<C>(first: C, last: C, alloc: A) -> Self
    where
        T: Clone,
        C: ForwardCursor<Value = T>,
        C::Item: Borrow<T>,
        C::Category: Dispatch<C>,
    {
        let mut vec = Self::new_in(alloc);
        vec.assign(first, last);
        vec
    }

    #[inline]
    fn into_inner(self) -> VecBuffer<T, A> {
        let me = ManuallyDrop::new(self);
        unsafe { ptr::read(&me.buffer) }
    }

    /// The allocator used by this vector.
    #[inline]
    pub fn allocator(&self) -> &A {
        self.buffer.allocator()
    }

    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.buffer.data_ptr()
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buffer.data_ptr_mut()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.buffer.as_slice()
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.buffer.as_mut_slice()
    }

    /// The number of elements the current allocation can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// The number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.length()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The largest number of elements any vector of `T` may hold.
    #[inline]
    pub fn max_size(&self) -> usize {
        VecBuffer::<T, A>::max_size()
    }

    /// Access the element at `index`, or report that it is out of range.
    ///
    /// ```
    /// use seqvec::{vector, OutOfRange};
    ///
    /// let v = vector![10, 20];
    /// assert_eq!(v.at(1), Ok(&20));
    /// assert_eq!(v.at(2), Err(OutOfRange { index: 2, len: 2 }));
    /// ```
    #[inline]
    pub fn at(&self, index: usize) -> Result<&T, OutOfRange> {
        let len = self.len();
        self.as_slice().get(index).ok_or(OutOfRange { index, len })
    }

    #[inline]
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, OutOfRange> {
        let len = self.len();
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(OutOfRange { index, len })
    }

    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.as_slice().first()
    }

    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().first_mut()
    }

    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.as_slice().last()
    }

    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    /// A cursor at the first element.
    #[inline]
    pub fn begin(&self) -> SliceCursor<'_, T> {
        SliceCursor::begin(self.as_slice())
    }

    /// A cursor one past the last element.
    #[inline]
    pub fn end(&self) -> SliceCursor<'_, T> {
        SliceCursor::end(self.as_slice())
    }

    /// A reverse cursor at the last element.
    #[inline]
    pub fn rbegin(&self) -> ReverseCursor<SliceCursor<'_, T>> {
        ReverseCursor::new(self.end())
    }

    /// A reverse cursor one before the first element.
    #[inline]
    pub fn rend(&self) -> ReverseCursor<SliceCursor<'_, T>> {
        ReverseCursor::new(self.begin())
    }

    /// Ensure the capacity is at least `capacity`. The capacity is
    /// never reduced.
    #[inline]
    pub fn reserve(&mut self, capacity: usize) {
        match self.try_reserve(capacity) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    #[inline]
    pub fn try_reserve(&mut self, capacity: usize) -> Result<(), StorageError> {
        self.buffer.try_grow::<GrowExact>(capacity)
    }

    /// Make room for `additional` more elements, growing by doubling.
    #[inline]
    fn try_grow_for(&mut self, additional: usize) -> Result<(), StorageError> {
        let Some(required) = self.buffer.length().checked_add(additional) else {
            return Err(StorageError::CapacityLimit);
        };
        self.buffer.try_grow::<GrowDoubling>(required)
    }

    /// Reduce the capacity to the number of live elements.
    #[inline]
    pub fn shrink_to_fit(&mut self) {
        match self.try_shrink_to_fit() {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    #[inline]
    pub fn try_shrink_to_fit(&mut self) -> Result<(), StorageError> {
        self.buffer.try_shrink_to(0)
    }

    /// Destroy every element, keeping the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Destroy the elements at and after `len`.
    pub fn truncate(&mut self, len: usize) {
        let old_len = self.buffer.length();
        if len < old_len {
            unsafe {
                self.buffer.set_length(len);
                let first = self.buffer.slot(len);
                self.buffer.allocator().destroy_n(first, old_len - len);
            }
        }
    }

    /// Append an element.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqvec::Vector;
    ///
    /// let mut v = Vector::new();
    /// v.push_back(1);
    /// v.push_back(2);
    /// assert_eq!(v, [1, 2]);
    /// assert_eq!(v.capacity(), 2);
    /// ```
    pub fn push_back(&mut self, item: T) {
        match self.try_grow_for(1) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
        unsafe {
            self.push_unchecked(item);
        }
    }

    pub fn try_push_back(&mut self, item: T) -> Result<(), InsertionError<T>> {
        if let Err(error) = self.try_grow_for(1) {
            return Err(InsertionError::new(error, item));
        }
        unsafe {
            self.push_unchecked(item);
        }
        Ok(())
    }

    #[inline]
    unsafe fn push_unchecked(&mut self, item: T) {
        let length = self.buffer.length();
        let slot = self.buffer.slot(length);
        self.buffer.allocator().construct(slot, item);
        self.buffer.set_length(length + 1);
    }

    /// Destroy the last element. Does nothing if the vector is empty.
    pub fn pop_back(&mut self) {
        let len = self.buffer.length();
        if len > 0 {
            unsafe {
                self.buffer.set_length(len - 1);
                let last = self.buffer.slot(len - 1);
                self.buffer.allocator().destroy(last);
            }
        }
    }

    /// Move the last element out to the caller, or return `None` if empty.
    pub fn pop(&mut self) -> Option<T> {
        let mut tail = self.buffer.length();
        if tail > 0 {
            tail -= 1;
            unsafe {
                self.buffer.set_length(tail);
                Some(ptr::read(self.buffer.slot(tail).as_ptr()))
            }
        } else {
            None
        }
    }

    /// Insert `value` at offset `index`, shifting the following elements
    /// toward the back.
    ///
    /// Panics if `index` is greater than the length.
    pub fn insert(&mut self, index: usize, value: T) {
        match self.try_insert(index, value) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    pub fn try_insert(&mut self, index: usize, value: T) -> Result<(), InsertionError<T>> {
        let prev_len = self.buffer.length();
        if index > prev_len {
            index_panic();
        }
        let tail_count = prev_len - index;
        if let Err(error) = self.try_grow_for(1) {
            return Err(InsertionError::new(error, value));
        }
        unsafe {
            let head = self.buffer.slot(index);
            if tail_count > 0 {
                ptr::copy(head.as_ptr(), head.as_ptr().add(1), tail_count);
            }
            self.buffer.allocator().construct(head, value);
            self.buffer.set_length(prev_len + 1);
        }
        Ok(())
    }

    /// Insert `count` clones of `value` at offset `index`.
    pub fn insert_n(&mut self, index: usize, count: usize, value: T)
    where
        T: Clone,
    {
        match self.try_insert_n(index, count, value) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    pub fn try_insert_n(&mut self, index: usize, count: usize, value: T) -> Result<(), StorageError>
    where
        T: Clone,
    {
        if index > self.buffer.length() {
            index_panic();
        }
        if count == 0 {
            return Ok(());
        }
        self.try_grow_for(count)?;
        let mut insert = Inserter::for_buffer_with_range(&mut self.buffer, index, count);
        for _ in 0..count {
            insert.push_clone(&value);
        }
        insert.complete();
        Ok(())
    }

    /// Insert clones of the elements of `[first, last)` at offset `index`.
    pub fn insert_range<C>(&mut self, index: usize, first: C, last: C)
    where
        T: Clone,
        C: ForwardCursor<Value = T>,
        C::Item: Borrow<T>,
        C::Category: Dispatch<C>,
    {
        match self.try_insert_range(index, first, last) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    pub fn try_insert_range<C>(
        &mut self,
        index: usize,
        mut first: C,
        last: C,
    ) -> Result<(), StorageError>
    where
        T: Clone,
        C: ForwardCursor<Value = T>,
        C::Item: Borrow<T>,
        C::Category: Dispatch<C>,
    {
        if index > self.buffer.length() {
            index_panic();
        }
        let count = range_len(first.clone(), last.clone());
        if count == 0 {
            return Ok(());
        }
        self.try_grow_for(count)?;
        let mut insert = Inserter::for_buffer_with_range(&mut self.buffer, index, count);
        while first != last {
            let item = first.get();
            insert.push_clone(<C::Item as Borrow<T>>::borrow(&item));
            first.step();
        }
        insert.complete();
        Ok(())
    }

    /// Insert clones of the elements of `values` at offset `index`.
    #[inline]
    pub fn insert_slice(&mut self, index: usize, values: &[T])
    where
        T: Clone,
    {
        self.insert_range(index, SliceCursor::begin(values), SliceCursor::end(values))
    }

    #[inline]
    pub fn try_insert_slice(&mut self, index: usize, values: &[T]) -> Result<(), StorageError>
    where
        T: Clone,
    {
        self.try_insert_range(index, SliceCursor::begin(values), SliceCursor::end(values))
    }

    /// Destroy the element at offset `index`, shifting the following
    /// elements toward the front.
    ///
    /// Panics if `index` is not less than the length.
    pub fn erase(&mut self, index: usize) {
        let len = self.buffer.length();
        if index >= len {
            index_panic();
        }
        let copy_count = len - index - 1;
        unsafe {
            // the following elements are leaked if the destructor panics
            self.buffer.set_length(index);
            let head = self.buffer.slot(index);
            self.buffer.allocator().destroy(head);
            if copy_count > 0 {
                ptr::copy(head.as_ptr().add(1), head.as_ptr(), copy_count);
            }
            self.buffer.set_length(len - 1);
        }
    }

    /// Move the element at offset `index` out to the caller, shifting the
    /// following elements toward the front.
    ///
    /// Panics if `index` is not less than the length.
    pub fn remove(&mut self, index: usize) -> T {
        let len = self.buffer.length();
        if index >= len {
            index_panic();
        }
        let copy_count = len - index - 1;
        unsafe {
            let head = self.buffer.slot(index).as_ptr();
            let result = ptr::read(head);
            if copy_count > 0 {
                ptr::copy(head.add(1), head, copy_count);
            }
            self.buffer.set_length(len - 1);
            result
        }
    }

    /// Destroy the elements in `range`, shifting the following elements
    /// toward the front. The capacity is unchanged.
    ///
    /// ```
    /// use seqvec::vector;
    ///
    /// let mut v = vector![1, 2, 3, 4];
    /// v.erase_range(1..3);
    /// assert_eq!(v, [1, 4]);
    /// ```
    pub fn erase_range<R>(&mut self, range: R)
    where
        R: RangeBounds<usize>,
    {
        let len = self.buffer.length();
        let Range { start, end } = bounds_to_range(range, len);
        let count = end - start;
        if count == 0 {
            return;
        }
        let tail = len - end;
        unsafe {
            // elements after `start` are leaked if destroying the range panics
            self.buffer.set_length(start);
            let first = self.buffer.slot(start);
            self.buffer.allocator().destroy_n(first, count);
            if tail > 0 {
                let base = self.buffer.data_ptr_mut();
                ptr::copy(base.add(end), base.add(start), tail);
            }
            self.buffer.set_length(start + tail);
        }
    }

    /// Resize the vector to `new_len` elements, appending clones of `value`
    /// or destroying trailing elements as needed.
    #[inline]
    pub fn resize(&mut self, new_len: usize, value: T)
    where
        T: Clone,
    {
        match self.try_resize(new_len, value) {
            Ok(_) => (),
            Err(err) => err.panic(),
        }
    }

    pub fn try_resize(&mut self, new_len: usize, value: T) -> Result<(), StorageError>
    where
        T: Clone,
    {
        let len = self.buffer.length();
        match new_len.cmp(&len) {
            Ordering::Greater => {
                let ins_count = new_len - len;
                self.try_grow_for(ins_count)?;
                unsafe {
                    let first = self.buffer.slot(len);
                    self.buffer.allocator().construct_n(first, ins_count, &value);
                    self.buffer.set_length(new_len);
                }
            }
            Ordering::Less => {
                self.truncate(new_len);
            }
            Ordering::Equal => {}
        }
        Ok(())
    }

    /// Resize the vector to `new_len` elements, appending values produced
    /// by `f` or destroying trailing elements as needed.
    pub fn resize_with<F>(&mut self, new_len: usize, mut f: F)
    where
        F: FnMut() -> T,
    {
        let len = self.buffer.length();
        if new_len > len {
            let ins_count = new_len - len;
            if let Err(error) = self.try_grow_for(ins_count) {
                error.panic();
            }
            let mut insert = Inserter::for_buffer_with_range(&mut self.buffer, len, ins_count);
            for _ in 0..ins_count {
                insert.push(f());
            }
            insert.complete();
        } else {
            self.truncate(new_len);
        }
    }

    /// Replace the contents with clones of the elements of `[first, last)`.
    ///
    /// Live elements are assigned in place, any excess is destroyed, and
    /// any shortfall is constructed into raw storage.
    ///
    /// ```
    /// use seqvec::{cursor::SliceCursor, vector};
    ///
    /// let src = [4, 5];
    /// let mut v = vector![1, 2, 3];
    /// v.assign(SliceCursor::begin(&src), SliceCursor::end(&src));
    /// assert_eq!(v, [4, 5]);
    /// ```
    pub fn assign<C>(&mut self, first: C, last: C)
    where
        T: Clone,
        C: ForwardCursor<Value = T>,
        C::Item: Borrow<T>,
        C::Category: Dispatch<C>,
    {
        match self.try_assign(first, last) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    pub fn try_assign<C>(&mut self, mut first: C, last: C) -> Result<(), StorageError>
    where
        T: Clone,
        C: ForwardCursor<Value = T>,
        C::Item: Borrow<T>,
        C::Category: Dispatch<C>,
    {
        let count = range_len(first.clone(), last.clone());
        self.try_reserve(count)?;
        let live = self.buffer.length().min(count);
        for slot in &mut self.buffer.as_mut_slice()[..live] {
            let item = first.get();
            slot.clone_from(<C::Item as Borrow<T>>::borrow(&item));
            first.step();
        }
        if count > live {
            unsafe {
                let slot = self.buffer.slot(live);
                let added = self
                    .buffer
                    .allocator()
                    .construct_range(slot, count - live, first, last);
                self.buffer.set_length(live + added);
            }
        } else {
            self.truncate(count);
        }
        Ok(())
    }

    /// Replace the contents with clones of the elements of `values`.
    #[inline]
    pub fn assign_slice(&mut self, values: &[T])
    where
        T: Clone,
    {
        self.assign(SliceCursor::begin(values), SliceCursor::end(values))
    }

    /// Replace the contents with `count` clones of `value`.
    pub fn assign_n(&mut self, count: usize, value: T)
    where
        T: Clone,
    {
        if let Err(error) = self.try_reserve(count) {
            error.panic();
        }
        let live = self.buffer.length().min(count);
        for slot in &mut self.buffer.as_mut_slice()[..live] {
            slot.clone_from(&value);
        }
        self.resize(count, value);
    }

    /// Exchange the contents of two vectors, including their allocations.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.buffer, &mut other.buffer);
    }

    pub fn extend_from_slice(&mut self, items: &[T])
    where
        T: Clone,
    {
        match self.try_extend_from_slice(items) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    pub fn try_extend_from_slice(&mut self, items: &[T]) -> Result<(), StorageError>
    where
        T: Clone,
    {
        self.try_grow_for(items.len())?;
        let len = self.buffer.length();
        let mut insert = Inserter::for_buffer_with_range(&mut self.buffer, len, items.len());
        for item in items {
            insert.push_clone(item);
        }
        insert.complete();
        Ok(())
    }

    fn try_extend(&mut self, iter: &mut impl Iterator<Item = T>) -> Result<(), InsertionError<T>> {
        loop {
            let mut insert = Inserter::for_buffer(&mut self.buffer);
            let mut full;
            loop {
                full = insert.full();
                if full {
                    break;
                }
                let Some(item) = iter.next() else { break };
                insert.push(item);
            }
            insert.complete();
            if !full {
                // ran out of items to insert
                break;
            }
            if let Some(item) = iter.next() {
                let min_reserve = iter.size_hint().0.saturating_add(1);
                match self.try_grow_for(min_reserve) {
                    Ok(_) => unsafe { self.push_unchecked(item) },
                    Err(err) => return Err(InsertionError::new(err, item)),
                }
            } else {
                break;
            }
        }
        Ok(())
    }
}

impl<T, A: RawAlloc> Drop for Vector<T, A> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Clone, A: RawAlloc + Clone> Clone for Vector<T, A> {
    fn clone(&self) -> Self {
        Self::from_slice_in(self.as_slice(), self.allocator().clone())
    }

    fn clone_from(&mut self, source: &Self) {
        self.assign_slice(source.as_slice());
    }
}

impl<T: fmt::Debug, A: RawAlloc> fmt::Debug for Vector<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_slice().fmt(f)
    }
}

impl<T, A: RawAlloc + Default> Default for Vector<T, A> {
    #[inline]
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<T, A: RawAlloc> AsRef<[T]> for Vector<T, A> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: RawAlloc> AsMut<[T]> for Vector<T, A> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, A: RawAlloc> Borrow<[T]> for Vector<T, A> {
    #[inline]
    fn borrow(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: RawAlloc> BorrowMut<[T]> for Vector<T, A> {
    #[inline]
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, A: RawAlloc> Deref for Vector<T, A> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: RawAlloc> DerefMut for Vector<T, A> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, I: SliceIndex<[T]>, A: RawAlloc> Index<I> for Vector<T, A> {
    type Output = I::Output;

    #[inline]
    fn index(&self, index: I) -> &Self::Output {
        Index::index(self.as_slice(), index)
    }
}

impl<T, I: SliceIndex<[T]>, A: RawAlloc> IndexMut<I> for Vector<T, A> {
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        IndexMut::index_mut(self.as_mut_slice(), index)
    }
}

impl<T, A: RawAlloc> Extend<T> for Vector<T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let mut iter = iter.into_iter();
        match self.try_extend(&mut iter) {
            Ok(_) => (),
            Err(err) => err.panic(),
        }
    }
}

impl<'a, T: Clone + 'a, A: RawAlloc> Extend<&'a T> for Vector<T, A> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        let mut iter = iter.into_iter().cloned();
        match self.try_extend(&mut iter) {
            Ok(_) => (),
            Err(err) => err.panic(),
        }
    }
}

impl<T, A: RawAlloc + Default> FromIterator<T> for Vector<T, A> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let (min_cap, _) = iter.size_hint();
        let mut vec = Self::with_capacity_in(min_cap, A::default());
        vec.extend(iter);
        vec
    }
}

impl<T: Clone, A: RawAlloc + Default> From<&[T]> for Vector<T, A> {
    #[inline]
    fn from(data: &[T]) -> Self {
        Self::from_slice_in(data, A::default())
    }
}

impl<T: Clone, A: RawAlloc + Default, const N: usize> From<&[T; N]> for Vector<T, A> {
    #[inline]
    fn from(data: &[T; N]) -> Self {
        Self::from_slice_in(data, A::default())
    }
}

impl<T, A: RawAlloc + Default, const N: usize> From<[T; N]> for Vector<T, A> {
    #[inline]
    fn from(data: [T; N]) -> Self {
        from_array_in(data, A::default())
    }
}

#[cfg(feature = "alloc")]
impl<T> From<alloc_crate::vec::Vec<T>> for Vector<T> {
    fn from(vec: alloc_crate::vec::Vec<T>) -> Self {
        let mut vec = ManuallyDrop::new(vec);
        let capacity = vec.capacity();
        let length = vec.len();
        let data = unsafe { ptr::NonNull::new_unchecked(vec.as_mut_ptr()) };
        Self {
            buffer: unsafe { VecBuffer::from_parts(data, length, capacity, Global) },
        }
    }
}

#[cfg(feature = "alloc")]
impl<T> From<Vector<T>> for alloc_crate::vec::Vec<T> {
    fn from(vec: Vector<T>) -> Self {
        let (data, length, capacity, _alloc) = vec.into_inner().into_parts();
        unsafe { alloc_crate::vec::Vec::from_raw_parts(data.as_ptr(), length, capacity) }
    }
}

impl<T, A: RawAlloc> IntoIterator for Vector<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.into_inner())
    }
}

impl<'a, T, A: RawAlloc> IntoIterator for &'a Vector<T, A> {
    type Item = &'a T;
    type IntoIter = <&'a [T] as IntoIterator>::IntoIter;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T, A: RawAlloc> IntoIterator for &'a mut Vector<T, A> {
    type Item = &'a mut T;
    type IntoIter = <&'a mut [T] as IntoIterator>::IntoIter;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

impl<T1, A1, T2, A2> PartialEq<Vector<T2, A2>> for Vector<T1, A1>
where
    A1: RawAlloc,
    A2: RawAlloc,
    T1: PartialEq<T2>,
{
    #[inline]
    fn eq(&self, other: &Vector<T2, A2>) -> bool {
        self.as_slice().eq(other.as_slice())
    }
}

impl<T: Eq, A: RawAlloc> Eq for Vector<T, A> {}

impl<T1, A1, T2> PartialEq<&[T2]> for Vector<T1, A1>
where
    T1: PartialEq<T2>,
    A1: RawAlloc,
{
    #[inline]
    fn eq(&self, other: &&[T2]) -> bool {
        self.as_slice().eq(*other)
    }
}

impl<T1, A1, T2> PartialEq<[T2]> for Vector<T1, A1>
where
    T1: PartialEq<T2>,
    A1: RawAlloc,
{
    #[inline]
    fn eq(&self, other: &[T2]) -> bool {
        self.as_slice().eq(other)
    }
}

impl<T1, A1, T2, const N: usize> PartialEq<&[T2; N]> for Vector<T1, A1>
where
    T1: PartialEq<T2>,
    A1: RawAlloc,
{
    #[inline]
    fn eq(&self, other: &&[T2; N]) -> bool {
        self.as_slice().eq(&other[..])
    }
}

impl<T1, A1, T2, const N: usize> PartialEq<[T2; N]> for Vector<T1, A1>
where
    T1: PartialEq<T2>,
    A1: RawAlloc,
{
    #[inline]
    fn eq(&self, other: &[T2; N]) -> bool {
        self.as_slice().eq(&other[..])
    }
}

impl<T1, T2, A2> PartialEq<Vector<T2, A2>> for &[T1]
where
    T2: PartialEq<T1>,
    A2: RawAlloc,
{
    #[inline]
    fn eq(&self, other: &Vector<T2, A2>) -> bool {
        other.eq(self)
    }
}

impl<T1, T2, A2> PartialEq<Vector<T2, A2>> for [T1]
where
    T2: PartialEq<T1>,
    A2: RawAlloc,
{
    #[inline]
    fn eq(&self, other: &Vector<T2, A2>) -> bool {
        other.eq(self)
    }
}

impl<T1, T2, A2, const N: usize> PartialEq<Vector<T2, A2>> for [T1; N]
where
    T2: PartialEq<T1>,
    A2: RawAlloc,
{
    #[inline]
    fn eq(&self, other: &Vector<T2, A2>) -> bool {
        other.eq(self)
    }
}

#[cfg(feature = "alloc")]
impl<T1, T2, A1> PartialEq<alloc_crate::vec::Vec<T2>> for Vector<T1, A1>
where
    T1: PartialEq<T2>,
    A1: RawAlloc,
{
    #[inline]
    fn eq(&self, other: &alloc_crate::vec::Vec<T2>) -> bool {
        self.as_slice().eq(other.as_slice())
    }
}

impl<T: PartialOrd, A1: RawAlloc, A2: RawAlloc> PartialOrd<Vector<T, A2>> for Vector<T, A1> {
    #[inline]
    fn partial_cmp(&self, other: &Vector<T, A2>) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord, A: RawAlloc> Ord for Vector<T, A> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Hash, A: RawAlloc> Hash for Vector<T, A> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state)
    }
}

#[cfg(feature = "zeroize")]
impl<T, A: RawAlloc> zeroize::Zeroize for Vector<T, crate::alloc::ZeroizingAlloc<A>> {
    #[inline]
    fn zeroize(&mut self) {
        self.clear();
        self.shrink_to_fit();
    }
}

#[cfg(feature = "zeroize")]
impl<T, A: RawAlloc> zeroize::ZeroizeOnDrop for Vector<T, crate::alloc::ZeroizingAlloc<A>> {}

/// ```compile_fail,E0502
/// use seqvec::{cursor::InputCursor, vector};
///
/// let mut v = vector![1, 2, 3];
/// let first = v.begin();
/// v.push_back(4);
/// assert_eq!(*first.get(), 1);
/// ```
#[cfg(doctest)]
fn _invalidation_check() {}
