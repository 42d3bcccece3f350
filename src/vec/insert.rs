use core::ptr;

use crate::alloc::RawAlloc;

use super::buffer::VecBuffer;

/// Constructs new elements into a gap opened within a vector buffer.
///
/// While the inserter is active the buffer length covers only the elements
/// before the gap. The trailing elements are parked after the gap, and are
/// moved back against the constructed run when the inserter completes or is
/// dropped. If it is dropped early, the elements it constructed are
/// destroyed first.
pub struct Inserter<'a, T, A: RawAlloc> {
    buf: &'a mut VecBuffer<T, A>,
    index: usize,
    gap: usize,
    written: usize,
    kept: usize,
    tail: usize,
}

impl<'a, T, A: RawAlloc> Inserter<'a, T, A> {
    /// Open a gap of `count` slots at `index`.
    ///
    /// The caller must have reserved capacity for `count` more elements and
    /// `index` must not exceed the length.
    #[inline]
    pub fn for_buffer_with_range(buf: &'a mut VecBuffer<T, A>, index: usize, count: usize) -> Self {
        let len = buf.length();
        assert!(index <= len && count <= buf.capacity() - len);
        let tail = len - index;
        unsafe {
            if tail > 0 && count > 0 {
                let head = buf.data_ptr_mut().add(index);
                ptr::copy(head, head.add(count), tail);
            }
            buf.set_length(index);
        }
        Self {
            buf,
            index,
            gap: count,
            written: 0,
            kept: 0,
            tail,
        }
    }

    /// Use the spare capacity at the end of the buffer as the gap.
    #[inline]
    pub fn for_buffer(buf: &'a mut VecBuffer<T, A>) -> Self {
        let len = buf.length();
        let spare = buf.capacity() - len;
        Self::for_buffer_with_range(buf, len, spare)
    }

    #[inline]
    pub fn full(&self) -> bool {
        self.written == self.gap
    }

    #[inline]
    pub fn push(&mut self, val: T) {
        if self.full() {
            panic!("Destination range is too small");
        }
        unsafe {
            let slot = self.buf.slot(self.index + self.written);
            self.buf.allocator().construct(slot, val);
        }
        self.written += 1;
    }

    #[inline]
    pub fn push_clone(&mut self, val: &T)
    where
        T: Clone,
    {
        self.push(val.clone())
    }

    /// Keep the constructed run and close any unused part of the gap,
    /// returning the number of elements added.
    #[inline]
    pub fn complete(mut self) -> usize {
        self.kept = self.written;
        self.written
    }
}

impl<T, A: RawAlloc> Drop for Inserter<'_, T, A> {
    #[inline]
    fn drop(&mut self) {
        let discard = self.written - self.kept;
        if discard > 0 {
            unsafe {
                let first = self.buf.slot(self.index + self.kept);
                self.buf.allocator().destroy_n(first, discard);
            }
        }
        let settled = self.index + self.kept;
        if self.tail > 0 && self.kept != self.gap {
            unsafe {
                let base = self.buf.data_ptr_mut();
                ptr::copy(base.add(self.index + self.gap), base.add(settled), self.tail);
            }
        }
        unsafe { self.buf.set_length(settled + self.tail) };
    }
}
