use core::fmt;
use core::marker::PhantomData;
use core::mem::{size_of, ManuallyDrop};
use core::ptr::{self, NonNull};
use core::slice;

use crate::alloc::RawAlloc;
use crate::error::StorageError;
use crate::index::Grow;
use crate::uninit::uninitialized_move;

/// The owned storage of a vector: one allocation, its capacity in elements,
/// and the number of leading slots which hold live elements.
///
/// Dropping a buffer releases its allocation but never drops elements. The
/// owner is responsible for destroying `[0, length)` first.
pub struct VecBuffer<T, A: RawAlloc> {
    data: NonNull<T>,
    capacity: usize,
    length: usize,
    alloc: A,
    _pd: PhantomData<T>,
}

impl<T, A: RawAlloc> VecBuffer<T, A> {
    /// The largest number of elements of `T` which may be allocated.
    #[inline]
    pub const fn max_size() -> usize {
        let t_size = size_of::<T>();
        if t_size == 0 {
            usize::MAX
        } else {
            isize::MAX as usize / t_size
        }
    }

    /// An empty buffer holding no allocation.
    #[inline]
    pub const fn new_in(alloc: A) -> Self {
        Self {
            data: NonNull::dangling(),
            capacity: 0,
            length: 0,
            alloc,
            _pd: PhantomData,
        }
    }

    /// # Safety
    /// `data` must be an allocation of `capacity` elements produced by `alloc`
    /// (or dangling when `capacity` is zero), holding `length` live elements.
    #[inline]
    pub const unsafe fn from_parts(data: NonNull<T>, length: usize, capacity: usize, alloc: A) -> Self {
        Self {
            data,
            capacity,
            length,
            alloc,
            _pd: PhantomData,
        }
    }

    /// Disassemble the buffer without releasing its allocation.
    #[inline]
    pub fn into_parts(self) -> (NonNull<T>, usize, usize, A) {
        let me = ManuallyDrop::new(self);
        (me.data, me.length, me.capacity, unsafe { ptr::read(&me.alloc) })
    }

    /// A buffer with storage for exactly `capacity` elements.
    pub fn try_with_capacity_in(capacity: usize, alloc: A) -> Result<Self, StorageError> {
        let mut buf = Self::new_in(alloc);
        if capacity > 0 {
            buf.try_realloc(capacity)?;
        }
        Ok(buf)
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub const fn length(&self) -> usize {
        self.length
    }

    /// # Safety
    /// The slots `[0, len)` must hold live elements and `len` must not
    /// exceed the capacity.
    #[inline]
    pub unsafe fn set_length(&mut self, len: usize) {
        debug_assert!(len <= self.capacity, "Length exceeds buffer capacity");
        self.length = len;
    }

    #[inline]
    pub const fn allocator(&self) -> &A {
        &self.alloc
    }

    #[inline]
    pub const fn data_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    #[inline]
    pub fn data_ptr_mut(&mut self) -> *mut T {
        self.data.as_ptr()
    }

    /// A pointer to the slot at `index`.
    ///
    /// # Safety
    /// `index` must not exceed the capacity.
    #[inline]
    pub unsafe fn slot(&self, index: usize) -> NonNull<T> {
        NonNull::new_unchecked(self.data.as_ptr().add(index))
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.data.as_ptr(), self.length) }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.data.as_ptr(), self.length) }
    }

    /// Move the live elements into a new allocation of exactly `capacity`
    /// slots and release the previous allocation.
    ///
    /// Nothing is changed if acquiring the new storage fails.
    pub fn try_realloc(&mut self, capacity: usize) -> Result<(), StorageError> {
        debug_assert!(capacity >= self.length, "Reallocation would discard elements");
        if capacity > Self::max_size() {
            return Err(StorageError::CapacityLimit);
        }
        let data = if capacity == 0 {
            NonNull::dangling()
        } else {
            self.alloc.acquire::<T>(capacity)?
        };
        unsafe {
            uninitialized_move(self.data, data, self.length);
            if self.capacity > 0 {
                self.alloc.release_array(self.data, self.capacity);
            }
        }
        self.data = data;
        self.capacity = capacity;
        Ok(())
    }

    /// Ensure the buffer can hold at least `required` elements, choosing
    /// the new capacity with the growth policy `G`.
    pub fn try_grow<G: Grow>(&mut self, required: usize) -> Result<(), StorageError> {
        if required <= self.capacity {
            return Ok(());
        }
        let max = Self::max_size();
        if required > max {
            return Err(StorageError::CapacityLimit);
        }
        let capacity = match G::next_capacity(self.capacity, required) {
            Some(cap) if cap <= max => cap,
            _ => max,
        };
        self.try_realloc(capacity)
    }

    /// Reduce the capacity to `max(capacity, length)`. Never grows.
    pub fn try_shrink_to(&mut self, capacity: usize) -> Result<(), StorageError> {
        let capacity = capacity.max(self.length);
        if capacity < self.capacity {
            self.try_realloc(capacity)
        } else {
            Ok(())
        }
    }
}

impl<T, A: RawAlloc> fmt::Debug for VecBuffer<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VecBuffer")
            .field("capacity", &self.capacity)
            .field("length", &self.length)
            .field("alloc", &self.alloc)
            .finish()
    }
}

impl<T, A: RawAlloc> Drop for VecBuffer<T, A> {
    fn drop(&mut self) {
        if self.capacity > 0 {
            unsafe { self.alloc.release_array(self.data, self.capacity) };
        }
    }
}

unsafe impl<T: Send, A: RawAlloc + Send> Send for VecBuffer<T, A> {}

unsafe impl<T: Sync, A: RawAlloc + Sync> Sync for VecBuffer<T, A> {}
