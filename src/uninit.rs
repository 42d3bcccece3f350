//! Construction of elements into raw storage.
//!
//! Raw storage is represented as a slice of `MaybeUninit<T>`. Elements are
//! placed into such storage by construction only: assignment requires a live
//! element on the receiving side and must never be used on raw slots. The
//! element-level methods of [`RawAlloc`] build their runs the same way.
//!
//! Each function returns the newly constructed run as a `&mut [T]`. The caller
//! becomes responsible for destroying those elements; if it does not, they are
//! leaked rather than dropped. If producing an element panics partway through
//! a run, the elements already constructed in that run are destroyed before
//! the panic continues.

use core::borrow::Borrow;
use core::marker::PhantomData;
use core::mem::{ManuallyDrop, MaybeUninit};
use core::ptr::{self, NonNull};
use core::slice;

use crate::alloc::RawAlloc;
use crate::cursor::InputCursor;

/// Tracks a run of elements constructed into raw slots, destroying them if
/// dropped before `complete` is called.
pub(crate) struct Initializer<'a, T> {
    data: NonNull<T>,
    cap: usize,
    end: usize,
    _pd: PhantomData<&'a mut [MaybeUninit<T>]>,
}

impl<'a, T> Initializer<'a, T> {
    #[inline]
    pub fn new(buf: &'a mut [MaybeUninit<T>]) -> Self {
        let cap = buf.len();
        // SAFETY: a slice pointer is never null
        unsafe { Self::from_raw(NonNull::new_unchecked(buf.as_mut_ptr().cast()), cap) }
    }

    /// # Safety
    /// The first `cap` slots at `data` must be valid for writes for `'a`, or
    /// for as many of them as are actually pushed.
    #[inline]
    pub unsafe fn from_raw(data: NonNull<T>, cap: usize) -> Self {
        Self {
            data,
            cap,
            end: 0,
            _pd: PhantomData,
        }
    }

    #[inline]
    pub fn push(&mut self, val: T) {
        if self.end == self.cap {
            panic!("Destination range is too small");
        }
        unsafe { self.data.as_ptr().add(self.end).write(val) };
        self.end += 1;
    }

    #[inline]
    pub fn push_clone(&mut self, val: &T)
    where
        T: Clone,
    {
        self.push(val.clone())
    }

    #[inline]
    pub fn complete(self) -> &'a mut [T] {
        let slf = ManuallyDrop::new(self);
        // SAFETY: the first `end` slots were initialized by `push`
        unsafe { slice::from_raw_parts_mut(slf.data.as_ptr(), slf.end) }
    }
}

impl<T> Drop for Initializer<'_, T> {
    #[inline]
    fn drop(&mut self) {
        if self.end > 0 {
            unsafe {
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                    self.data.as_ptr(),
                    self.end,
                ))
            };
        }
    }
}

/// Tracks a run of elements constructed through an allocator, destroying
/// them through the same allocator if dropped before `complete` is called.
pub(crate) struct AllocRun<'a, T, A: RawAlloc + ?Sized> {
    alloc: &'a A,
    data: NonNull<T>,
    cap: usize,
    end: usize,
}

impl<'a, T, A: RawAlloc + ?Sized> AllocRun<'a, T, A> {
    /// # Safety
    /// The first `cap` slots at `data` must be valid for writes and must not
    /// hold live elements.
    #[inline]
    pub unsafe fn new(alloc: &'a A, data: NonNull<T>, cap: usize) -> Self {
        Self {
            alloc,
            data,
            cap,
            end: 0,
        }
    }

    #[inline]
    pub fn push(&mut self, val: T) {
        if self.end == self.cap {
            panic!("Destination range is too small");
        }
        unsafe {
            let slot = NonNull::new_unchecked(self.data.as_ptr().add(self.end));
            self.alloc.construct(slot, val);
        }
        self.end += 1;
    }

    /// Keep the constructed run, returning its length.
    #[inline]
    pub fn complete(self) -> usize {
        ManuallyDrop::new(self).end
    }
}

impl<T, A: RawAlloc + ?Sized> Drop for AllocRun<'_, T, A> {
    #[inline]
    fn drop(&mut self) {
        if self.end > 0 {
            unsafe { self.alloc.destroy_n(self.data, self.end) };
        }
    }
}

/// Construct a clone of every element of `[first, last)` into consecutive
/// slots of `dest`, returning the constructed run.
///
/// Panics if `dest` is shorter than the source range.
///
/// ```
/// use core::mem::MaybeUninit;
/// use seqvec::{cursor::SliceCursor, uninit::uninitialized_copy};
///
/// let src = [String::from("a"), String::from("b")];
/// let mut raw: [MaybeUninit<String>; 4] = unsafe { MaybeUninit::uninit().assume_init() };
/// let copied = uninitialized_copy(SliceCursor::begin(&src), SliceCursor::end(&src), &mut raw);
/// assert_eq!(copied, &src[..]);
/// # unsafe { core::ptr::drop_in_place(copied) };
/// ```
pub fn uninitialized_copy<'d, T, C>(
    mut first: C,
    last: C,
    dest: &'d mut [MaybeUninit<T>],
) -> &'d mut [T]
where
    T: Clone,
    C: InputCursor<Value = T>,
    C::Item: Borrow<T>,
{
    let mut init = Initializer::new(dest);
    while first != last {
        let item = first.get();
        init.push_clone(<C::Item as Borrow<T>>::borrow(&item));
        first.step();
    }
    init.complete()
}

/// Construct a clone of `value` into every slot of `dest`, returning the
/// constructed run.
pub fn uninitialized_fill<'d, T: Clone>(dest: &'d mut [MaybeUninit<T>], value: &T) -> &'d mut [T] {
    let count = dest.len();
    let mut init = Initializer::new(dest);
    for _ in 0..count {
        init.push_clone(value);
    }
    init.complete()
}

/// Construct `count` clones of `value` into the leading slots of `dest`,
/// returning the constructed run.
///
/// Panics if `dest` holds fewer than `count` slots.
#[inline]
pub fn uninitialized_fill_n<'d, T: Clone>(
    dest: &'d mut [MaybeUninit<T>],
    count: usize,
    value: &T,
) -> &'d mut [T] {
    if count > dest.len() {
        panic!("Destination range is too small");
    }
    uninitialized_fill(&mut dest[..count], value)
}

/// Construct an element produced by `f` into every slot of `dest`, returning
/// the constructed run.
pub fn uninitialized_fill_with<'d, T, F>(dest: &'d mut [MaybeUninit<T>], mut f: F) -> &'d mut [T]
where
    F: FnMut() -> T,
{
    let count = dest.len();
    let mut init = Initializer::new(dest);
    for _ in 0..count {
        init.push(f());
    }
    init.complete()
}

/// Move `count` live elements from `src` into raw storage at `dest`.
///
/// Afterward the source slots are raw and must not be destroyed.
///
/// # Safety
/// `src` must hold `count` live elements, `dest` must be valid for `count`
/// writes, and the two ranges must not overlap.
#[inline]
pub unsafe fn uninitialized_move<T>(src: NonNull<T>, dest: NonNull<T>, count: usize) {
    if count > 0 {
        ptr::copy_nonoverlapping(src.as_ptr(), dest.as_ptr(), count);
    }
}
