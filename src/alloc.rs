//! Support for memory allocation and in-place element construction.
//!
//! An allocator separates two concerns which are otherwise easy to conflate:
//! acquiring and releasing raw storage, and beginning or ending the lifetime
//! of the elements placed in that storage. Vectors route every one of these
//! steps through a [`RawAlloc`] instance.

use core::alloc::Layout;
use core::borrow::Borrow;
use core::fmt;
use core::mem::{align_of, size_of};
use core::ptr::{self, NonNull};
#[cfg(feature = "zeroize")]
use core::slice;

#[cfg(feature = "alloc")]
use alloc_crate::alloc::{alloc as raw_alloc, dealloc as raw_dealloc};
#[cfg(feature = "alloc")]
use core::mem::transmute;

use const_default::ConstDefault;

use crate::cursor::InputCursor;
use crate::error::StorageError;
use crate::uninit::AllocRun;

/// Compute the layout of an array of `count` elements of `T`.
#[inline]
pub fn array_layout<T>(count: usize) -> Result<Layout, StorageError> {
    Layout::array::<T>(count).map_err(StorageError::LayoutError)
}

/// An allocator acquires and releases raw storage, and constructs and
/// destroys elements within that storage.
///
/// Only `try_alloc` and `release` must be provided. The element-level
/// methods have default implementations which place values with a plain
/// write and destroy them with `drop_in_place`. The bulk constructors are
/// built on `construct` and `destroy_n`, so an allocator overriding those
/// two observes every element lifetime.
pub trait RawAlloc: fmt::Debug {
    /// Try to allocate a block of memory fitting `layout`. The returned
    /// slice may be larger than requested.
    fn try_alloc(&self, layout: Layout) -> Result<NonNull<[u8]>, StorageError>;

    /// Release an allocation produced by this allocator.
    ///
    /// # Safety
    /// The value `ptr` must represent an allocation produced by this allocator,
    /// and `layout` must be the layout it was requested with.
    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout);

    /// Acquire raw storage for exactly `count` elements of `T`. No element
    /// is live in the returned storage.
    #[inline]
    fn acquire<T>(&self, count: usize) -> Result<NonNull<T>, StorageError> {
        let layout = array_layout::<T>(count)?;
        let ptr = self.try_alloc(layout)?;
        Ok(ptr.cast())
    }

    /// Release storage acquired for `count` elements of `T`. Any elements
    /// still live in the storage are not dropped.
    ///
    /// # Safety
    /// `ptr` must have been returned by `acquire::<T>(count)` on this allocator
    /// with the same `count`.
    #[inline]
    unsafe fn release_array<T>(&self, ptr: NonNull<T>, count: usize) {
        // SAFETY: the same layout was computed successfully when acquiring
        let layout = Layout::from_size_align_unchecked(size_of::<T>() * count, align_of::<T>());
        self.release(ptr.cast(), layout);
    }

    /// Construct one element at `ptr`.
    ///
    /// # Safety
    /// `ptr` must be valid for writes and must not hold a live element.
    #[inline]
    unsafe fn construct<T>(&self, ptr: NonNull<T>, value: T) {
        ptr.as_ptr().write(value);
    }

    /// Construct `count` clones of `value` starting at `ptr`, one at a time
    /// through [`construct`](Self::construct). If a clone panics, the
    /// elements already constructed are destroyed.
    ///
    /// # Safety
    /// The `count` slots starting at `ptr` must be valid for writes and must
    /// not hold live elements.
    #[inline]
    unsafe fn construct_n<T: Clone>(&self, ptr: NonNull<T>, count: usize, value: &T) {
        let mut run = AllocRun::new(self, ptr, count);
        for _ in 0..count {
            run.push(value.clone());
        }
        run.complete();
    }

    /// Construct a clone of each element in `[first, last)` into consecutive
    /// slots starting at `ptr`, returning the number of elements constructed.
    ///
    /// Panics if the range holds more than `count` elements. If a clone
    /// panics, the elements already constructed are destroyed.
    ///
    /// # Safety
    /// The `count` slots starting at `ptr` must be valid for writes and must
    /// not hold live elements.
    #[inline]
    unsafe fn construct_range<T, C>(
        &self,
        ptr: NonNull<T>,
        count: usize,
        mut first: C,
        last: C,
    ) -> usize
    where
        T: Clone,
        C: InputCursor<Value = T>,
        C::Item: Borrow<T>,
    {
        let mut run = AllocRun::new(self, ptr, count);
        while first != last {
            let item = first.get();
            run.push(<C::Item as Borrow<T>>::borrow(&item).clone());
            first.step();
        }
        run.complete()
    }

    /// Destroy the element at `ptr` without releasing its storage.
    ///
    /// # Safety
    /// `ptr` must hold a live element, which must not be used afterward.
    #[inline]
    unsafe fn destroy<T>(&self, ptr: NonNull<T>) {
        ptr::drop_in_place(ptr.as_ptr());
    }

    /// Destroy `count` consecutive elements starting at `ptr`.
    ///
    /// # Safety
    /// All `count` slots must hold live elements, which must not be used
    /// afterward.
    #[inline]
    unsafe fn destroy_n<T>(&self, ptr: NonNull<T>, count: usize) {
        if count > 0 {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(ptr.as_ptr(), count));
        }
    }
}

impl<A: RawAlloc + ?Sized> RawAlloc for &A {
    #[inline]
    fn try_alloc(&self, layout: Layout) -> Result<NonNull<[u8]>, StorageError> {
        (**self).try_alloc(layout)
    }

    #[inline]
    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        (**self).release(ptr, layout)
    }

    #[inline]
    unsafe fn construct<T>(&self, ptr: NonNull<T>, value: T) {
        (**self).construct(ptr, value)
    }

    #[inline]
    unsafe fn construct_n<T: Clone>(&self, ptr: NonNull<T>, count: usize, value: &T) {
        (**self).construct_n(ptr, count, value)
    }

    #[inline]
    unsafe fn construct_range<T, C>(
        &self,
        ptr: NonNull<T>,
        count: usize,
        first: C,
        last: C,
    ) -> usize
    where
        T: Clone,
        C: InputCursor<Value = T>,
        C::Item: Borrow<T>,
    {
        (**self).construct_range(ptr, count, first, last)
    }

    #[inline]
    unsafe fn destroy<T>(&self, ptr: NonNull<T>) {
        (**self).destroy(ptr)
    }

    #[inline]
    unsafe fn destroy_n<T>(&self, ptr: NonNull<T>, count: usize) {
        (**self).destroy_n(ptr, count)
    }
}

/// The global memory allocator.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "alloc", derive(Default, Copy))]
pub struct Global;

#[cfg(feature = "alloc")]
impl RawAlloc for Global {
    #[inline]
    fn try_alloc(&self, layout: Layout) -> Result<NonNull<[u8]>, StorageError> {
        let ptr = if layout.size() == 0 {
            // FIXME: use Layout::dangling when stabilized
            // SAFETY: layout alignments are guaranteed to be non-zero.
            #[allow(clippy::useless_transmute)]
            unsafe {
                NonNull::new_unchecked(transmute(layout.align()))
            }
        } else {
            let Some(ptr) = NonNull::new(unsafe { raw_alloc(layout) }) else {
                return Err(StorageError::AllocError);
            };
            ptr
        };
        Ok(NonNull::slice_from_raw_parts(ptr, layout.size()))
    }

    #[inline]
    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        if layout.size() > 0 {
            raw_dealloc(ptr.as_ptr(), layout);
        }
    }
}

#[cfg(not(feature = "alloc"))]
// Stub implementation to allow Global as the default allocator type.
// Because the type can't be created, errors will still be detected at compile time if used.
impl RawAlloc for Global {
    fn try_alloc(&self, _layout: Layout) -> Result<NonNull<[u8]>, StorageError> {
        unimplemented!();
    }

    unsafe fn release(&self, _ptr: NonNull<u8>, _layout: Layout) {
        unimplemented!();
    }
}

#[cfg(feature = "alloc")]
impl ConstDefault for Global {
    const DEFAULT: Self = Global;
}

/// An allocator wrapper which zeroizes every allocation before it is
/// released to the inner allocator.
#[cfg(feature = "zeroize")]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ZeroizingAlloc<A>(pub A);

#[cfg(feature = "zeroize")]
impl<A: RawAlloc> RawAlloc for ZeroizingAlloc<A> {
    #[inline]
    fn try_alloc(&self, layout: Layout) -> Result<NonNull<[u8]>, StorageError> {
        self.0.try_alloc(layout)
    }

    #[inline]
    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        use zeroize::Zeroize;

        if layout.size() > 0 {
            let mem = slice::from_raw_parts_mut(ptr.as_ptr(), layout.size());
            mem.zeroize();
        }
        self.0.release(ptr, layout)
    }

    #[inline]
    unsafe fn construct<T>(&self, ptr: NonNull<T>, value: T) {
        self.0.construct(ptr, value)
    }

    #[inline]
    unsafe fn construct_n<T: Clone>(&self, ptr: NonNull<T>, count: usize, value: &T) {
        self.0.construct_n(ptr, count, value)
    }

    #[inline]
    unsafe fn construct_range<T, C>(
        &self,
        ptr: NonNull<T>,
        count: usize,
        first: C,
        last: C,
    ) -> usize
    where
        T: Clone,
        C: InputCursor<Value = T>,
        C::Item: Borrow<T>,
    {
        self.0.construct_range(ptr, count, first, last)
    }

    #[inline]
    unsafe fn destroy<T>(&self, ptr: NonNull<T>) {
        self.0.destroy(ptr)
    }

    #[inline]
    unsafe fn destroy_n<T>(&self, ptr: NonNull<T>, count: usize) {
        self.0.destroy_n(ptr, count)
    }
}

#[cfg(feature = "zeroize")]
impl<A: ConstDefault> ConstDefault for ZeroizingAlloc<A> {
    const DEFAULT: Self = ZeroizingAlloc(A::DEFAULT);
}

/// An adapter which allows any `allocator_api2` allocator, such as a
/// bump arena, to back a vector.
#[cfg(feature = "allocator-api2")]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ApiAlloc<A>(pub A);

#[cfg(feature = "allocator-api2")]
impl<A> RawAlloc for ApiAlloc<A>
where
    A: allocator_api2::alloc::Allocator + fmt::Debug,
{
    #[inline]
    fn try_alloc(&self, layout: Layout) -> Result<NonNull<[u8]>, StorageError> {
        self.0
            .allocate(layout)
            .map_err(|_| StorageError::AllocError)
    }

    #[inline]
    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        self.0.deallocate(ptr, layout)
    }
}
