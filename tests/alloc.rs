#![cfg(feature = "alloc")]

use core::alloc::Layout;
#[cfg(feature = "zeroize")]
use core::borrow::Borrow;
use core::cell::Cell;
use core::mem::MaybeUninit;
use core::ptr::NonNull;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;

use rstest::rstest;

#[cfg(feature = "zeroize")]
use seqvec::cursor::InputCursor;

use seqvec::uninit::{uninitialized_fill, uninitialized_fill_n, uninitialized_fill_with};
use seqvec::{vector, Global, RawAlloc, StorageError, Vector};

/// An element which records how many instances have been dropped.
#[derive(Debug)]
struct Tracked {
    value: usize,
    drops: Rc<Cell<usize>>,
    clone_limit: Rc<Cell<usize>>,
}

impl Tracked {
    fn new(value: usize, drops: &Rc<Cell<usize>>) -> Self {
        Self {
            value,
            drops: drops.clone(),
            clone_limit: Rc::new(Cell::new(usize::MAX)),
        }
    }

    fn with_clone_limit(value: usize, drops: &Rc<Cell<usize>>, limit: usize) -> Self {
        Self {
            value,
            drops: drops.clone(),
            clone_limit: Rc::new(Cell::new(limit)),
        }
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        let remain = self.clone_limit.get();
        if remain == 0 {
            panic!("clone limit reached");
        }
        self.clone_limit.set(remain - 1);
        Self {
            value: self.value,
            drops: self.drops.clone(),
            clone_limit: self.clone_limit.clone(),
        }
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}

fn values<A: RawAlloc>(v: &Vector<Tracked, A>) -> Vec<usize> {
    v.iter().map(|t| t.value).collect()
}

/// An allocator which tracks outstanding allocations and element
/// lifetimes, and refuses requests larger than its limit.
#[derive(Debug)]
struct TestAlloc {
    limit: Cell<usize>,
    live_allocs: Cell<usize>,
    constructed: Cell<usize>,
    destroyed: Cell<usize>,
}

impl TestAlloc {
    fn new(limit: usize) -> Self {
        Self {
            limit: Cell::new(limit),
            live_allocs: Cell::new(0),
            constructed: Cell::new(0),
            destroyed: Cell::new(0),
        }
    }
}

impl RawAlloc for TestAlloc {
    fn try_alloc(&self, layout: Layout) -> Result<NonNull<[u8]>, StorageError> {
        if layout.size() > self.limit.get() {
            return Err(StorageError::AllocError);
        }
        let ptr = Global.try_alloc(layout)?;
        self.live_allocs.set(self.live_allocs.get() + 1);
        Ok(ptr)
    }

    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        self.live_allocs.set(self.live_allocs.get() - 1);
        Global.release(ptr, layout)
    }

    unsafe fn construct<T>(&self, ptr: NonNull<T>, value: T) {
        self.constructed.set(self.constructed.get() + 1);
        ptr.as_ptr().write(value);
    }

    unsafe fn destroy<T>(&self, ptr: NonNull<T>) {
        self.destroyed.set(self.destroyed.get() + 1);
        core::ptr::drop_in_place(ptr.as_ptr());
    }

    unsafe fn destroy_n<T>(&self, ptr: NonNull<T>, count: usize) {
        self.destroyed.set(self.destroyed.get() + count);
        core::ptr::drop_in_place(core::ptr::slice_from_raw_parts_mut(ptr.as_ptr(), count));
    }
}

#[test]
fn alloc_acquire_release() {
    let alloc = TestAlloc::new(1024);
    let ptr = alloc.acquire::<u64>(4).unwrap();
    assert_eq!(alloc.live_allocs.get(), 1);
    unsafe {
        alloc.construct_n(ptr, 4, &7u64);
        assert_eq!(*ptr.as_ptr().add(3), 7);
        alloc.destroy_n(ptr, 4);
        alloc.release_array(ptr, 4);
    }
    assert_eq!(alloc.live_allocs.get(), 0);
    // the bulk constructor is built on `construct`
    assert_eq!(alloc.constructed.get(), 4);
    assert_eq!(alloc.destroyed.get(), 4);
}

#[test]
fn alloc_construct_range() {
    use seqvec::cursor::SliceCursor;

    let src = [String::from("a"), String::from("b")];
    let ptr = Global.acquire::<String>(3).unwrap();
    unsafe {
        let count =
            Global.construct_range(ptr, 3, SliceCursor::begin(&src), SliceCursor::end(&src));
        assert_eq!(count, 2);
        assert_eq!(*ptr.as_ptr().add(1), "b");
        Global.destroy(ptr);
        Global.destroy(NonNull::new_unchecked(ptr.as_ptr().add(1)));
        Global.release_array(ptr, 3);
    }
}

#[test]
fn alloc_construct_range_too_small() {
    use seqvec::cursor::SliceCursor;

    let alloc = TestAlloc::new(1024);
    let src = [String::from("a"), String::from("b")];
    let ptr = alloc.acquire::<String>(1).unwrap();
    let res = catch_unwind(AssertUnwindSafe(|| unsafe {
        alloc.construct_range(ptr, 1, SliceCursor::begin(&src), SliceCursor::end(&src))
    }));
    assert!(res.is_err());
    // the element constructed before the overflow was destroyed
    assert_eq!(alloc.constructed.get(), 1);
    assert_eq!(alloc.destroyed.get(), 1);
    unsafe { alloc.release_array(ptr, 1) };
}

#[test]
fn alloc_layout_overflow() {
    assert!(matches!(
        Global.acquire::<u64>(usize::MAX),
        Err(StorageError::LayoutError(_))
    ));
}

#[test]
fn vec_routes_through_allocator() {
    let alloc = TestAlloc::new(1024);
    {
        let mut v = Vector::new_in(&alloc);
        for i in 0..10u32 {
            v.push_back(i);
        }
        v.insert(0, 99);
        v.truncate(5);
        assert_eq!(alloc.live_allocs.get(), 1);
        assert_eq!(alloc.constructed.get(), 11);
        assert_eq!(alloc.destroyed.get(), 6);

        v.resize(8, 7);
        assert_eq!(alloc.constructed.get(), 14);
        // eight assigned in place, two constructed
        v.assign_slice(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
        assert_eq!(alloc.constructed.get(), 16);
        assert_eq!(alloc.destroyed.get(), 6);

        v.pop_back();
        v.erase(0);
        assert_eq!(v, [2, 3, 4, 5, 6, 7, 8, 9]);
        assert_eq!(alloc.destroyed.get(), 8);

        // moved out to the caller rather than destroyed
        assert_eq!(v.pop(), Some(9));
        assert_eq!(v.remove(0), 2);
        assert_eq!(alloc.destroyed.get(), 8);

        v.resize_with(8, || 0);
        assert_eq!(v, [3, 4, 5, 6, 7, 8, 0, 0]);
        assert_eq!(alloc.constructed.get(), 18);
    }
    assert_eq!(alloc.live_allocs.get(), 0);
    assert_eq!(alloc.destroyed.get(), 16);
    assert_eq!(alloc.constructed.get() - alloc.destroyed.get(), 2);

    let v = Vector::from_elem_in(3, 5u32, &alloc);
    assert_eq!(v, [5, 5, 5]);
    assert_eq!(alloc.constructed.get(), 21);
    drop(v);
    assert_eq!(alloc.destroyed.get(), 19);

    let src = vector![1u32, 2, 3, 4];
    let v = Vector::from_range_in(src.begin(), src.end(), &alloc);
    assert_eq!(v, src);
    assert_eq!(alloc.constructed.get(), 25);
    drop(v);
    assert_eq!(alloc.destroyed.get(), 23);
    assert_eq!(alloc.live_allocs.get(), 0);
}

/// An allocator which replaces the bulk constructors and counts their use.
#[cfg(feature = "zeroize")]
#[derive(Debug, Default)]
struct BulkAlloc {
    bulk: Cell<usize>,
}

#[cfg(feature = "zeroize")]
impl RawAlloc for BulkAlloc {
    fn try_alloc(&self, layout: Layout) -> Result<NonNull<[u8]>, StorageError> {
        Global.try_alloc(layout)
    }

    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        Global.release(ptr, layout)
    }

    unsafe fn construct_n<T: Clone>(&self, ptr: NonNull<T>, count: usize, value: &T) {
        self.bulk.set(self.bulk.get() + 1);
        for i in 0..count {
            ptr.as_ptr().add(i).write(value.clone());
        }
    }

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
        self.bulk.set(self.bulk.get() + 1);
        let mut built = 0;
        while first != last {
            assert!(built < count);
            let item = first.get();
            ptr.as_ptr().add(built).write(<C::Item as Borrow<T>>::borrow(&item).clone());
            first.step();
            built += 1;
        }
        built
    }
}

#[cfg(feature = "zeroize")]
#[test]
fn zeroizing_alloc_forwards_bulk_construction() {
    use seqvec::ZeroizingAlloc;

    let alloc = BulkAlloc::default();
    let mut v = Vector::new_in(ZeroizingAlloc(&alloc));
    v.resize(3, 1u32);
    assert_eq!(alloc.bulk.get(), 1);
    v.assign_slice(&[4, 5, 6, 7]);
    assert_eq!(alloc.bulk.get(), 2);
    assert_eq!(v, [4, 5, 6, 7]);
    let w = Vector::from_elem_in(2, 9u32, ZeroizingAlloc(&alloc));
    assert_eq!(w, [9, 9]);
    assert_eq!(alloc.bulk.get(), 3);
}

#[test]
fn vec_resize_panic_destroys_through_allocator() {
    let alloc = TestAlloc::new(1024);
    let drops = Rc::new(Cell::new(0));
    let mut v = Vector::new_in(&alloc);
    v.push_back(Tracked::new(0, &drops));
    let value = Tracked::with_clone_limit(1, &drops, 2);
    let res = catch_unwind(AssertUnwindSafe(|| {
        v.resize(5, value);
    }));
    assert!(res.is_err());
    assert_eq!(v.len(), 1);
    // one push and two clones constructed, the clones destroyed
    assert_eq!(alloc.constructed.get(), 3);
    assert_eq!(alloc.destroyed.get(), 2);
    assert_eq!(drops.get(), 3);
}

#[test]
fn vec_alloc_failure_push() {
    let alloc = TestAlloc::new(4 * 8);
    let mut v = Vector::<u64, _>::new_in(&alloc);
    v.extend([1, 2, 3, 4]);
    assert_eq!(v.capacity(), 4);
    let err = v.try_push_back(5).unwrap_err();
    assert_eq!(err.error(), &StorageError::AllocError);
    assert_eq!(err.into_value(), 5);
    assert_eq!(v, [1, 2, 3, 4]);
    assert_eq!(v.capacity(), 4);
}

#[test]
fn vec_alloc_failure_insert() {
    let alloc = TestAlloc::new(2 * 8);
    let mut v = Vector::<u64, _>::new_in(&alloc);
    v.extend([1, 2]);
    let err = v.try_insert(1, 9).unwrap_err();
    assert_eq!(err.into_value(), 9);
    assert_eq!(v.try_insert_n(0, 4, 0), Err(StorageError::AllocError));
    assert_eq!(v.try_insert_slice(2, &[5, 6]), Err(StorageError::AllocError));
    assert_eq!(v.try_resize(10, 0), Err(StorageError::AllocError));
    assert_eq!(v.try_reserve(3), Err(StorageError::AllocError));
    assert_eq!(v, [1, 2]);
}

#[test]
#[should_panic(expected = "Allocation error")]
fn vec_alloc_failure_panics() {
    let alloc = TestAlloc::new(0);
    let mut v = Vector::<u64, _>::new_in(&alloc);
    v.push_back(1);
}

#[rstest]
#[case::capacity(usize::MAX)]
#[case::half(usize::MAX / 2)]
fn vec_capacity_limit(#[case] count: usize) {
    assert_eq!(
        Vector::<u64>::try_with_capacity(count).unwrap_err(),
        StorageError::CapacityLimit
    );
    let mut v = vector![1u64];
    assert_eq!(v.try_reserve(count), Err(StorageError::CapacityLimit));
    assert_eq!(v.try_insert_n(0, count, 0), Err(StorageError::CapacityLimit));
}

#[test]
fn vec_drops_each_element_once() {
    let drops = Rc::new(Cell::new(0));
    {
        let mut v = Vector::new();
        for i in 0..8 {
            v.push_back(Tracked::new(i, &drops));
        }
        v.pop_back();
        assert_eq!(drops.get(), 1);
        v.erase(0);
        assert_eq!(drops.get(), 2);
        v.erase_range(1..3);
        assert_eq!(drops.get(), 4);
        assert_eq!(values(&v), [1, 4, 5, 6]);
        v.resize(2, Tracked::new(0, &drops));
        assert_eq!(drops.get(), 7);
        v.clear();
        assert_eq!(drops.get(), 9);
        v.push_back(Tracked::new(10, &drops));
    }
    assert_eq!(drops.get(), 10);
}

#[test]
fn vec_assign_drops_excess() {
    let drops = Rc::new(Cell::new(0));
    let src: Vec<Tracked> = (0..2).map(|i| Tracked::new(i + 100, &drops)).collect();
    let mut v: Vector<Tracked> = (0..5).map(|i| Tracked::new(i, &drops)).collect();
    v.assign_slice(&src);
    assert_eq!(values(&v), [100, 101]);
    // two assigned over, three destroyed
    assert_eq!(drops.get(), 5);
    drop(v);
    drop(src);
    assert_eq!(drops.get(), 9);
}

#[test]
fn vec_into_iter_drops_remaining() {
    let drops = Rc::new(Cell::new(0));
    let v: Vector<Tracked> = (0..5).map(|i| Tracked::new(i, &drops)).collect();
    let mut iter = v.into_iter();
    let first = iter.next().unwrap();
    assert_eq!(first.value, 0);
    drop(iter);
    assert_eq!(drops.get(), 4);
    drop(first);
    assert_eq!(drops.get(), 5);
}

#[test]
fn vec_insert_n_panic_restores() {
    let drops = Rc::new(Cell::new(0));
    let mut v: Vector<Tracked> = (0..4).map(|i| Tracked::new(i, &drops)).collect();
    let value = Tracked::with_clone_limit(9, &drops, 2);
    let res = catch_unwind(AssertUnwindSafe(|| {
        v.insert_n(1, 5, value);
    }));
    assert!(res.is_err());
    // the two clones and the source value were dropped
    assert_eq!(drops.get(), 3);
    assert_eq!(values(&v), [0, 1, 2, 3]);
    drop(v);
    assert_eq!(drops.get(), 7);
}

#[test]
fn vec_resize_panic_keeps_length() {
    let drops = Rc::new(Cell::new(0));
    let mut v = Vector::new();
    v.push_back(Tracked::new(0, &drops));
    let value = Tracked::with_clone_limit(1, &drops, 1);
    let res = catch_unwind(AssertUnwindSafe(|| {
        v.resize(4, value);
    }));
    assert!(res.is_err());
    assert_eq!(v.len(), 1);
    assert_eq!(drops.get(), 2);
}

#[test]
fn vec_clone_panic_releases() {
    let alloc = TestAlloc::new(1024);
    let drops = Rc::new(Cell::new(0));
    let limit = Tracked::new(0, &drops);
    {
        let mut v = Vector::new_in(&alloc);
        for _ in 0..4 {
            v.push_back(limit.clone());
        }
        limit.clone_limit.set(2);
        let res = catch_unwind(AssertUnwindSafe(|| v.clone()));
        assert!(res.is_err());
        assert_eq!(alloc.live_allocs.get(), 1);
    }
    assert_eq!(alloc.live_allocs.get(), 0);
}

#[test]
fn uninit_fill() {
    let mut raw = [MaybeUninit::<u8>::uninit(); 6];
    assert_eq!(uninitialized_fill(&mut raw[..3], &4), &[4, 4, 4]);
    assert_eq!(uninitialized_fill_n(&mut raw[3..], 2, &5), &[5, 5]);
    let mut next = 0u8;
    let filled = uninitialized_fill_with(&mut raw[..], || {
        next += 1;
        next
    });
    assert_eq!(filled, &[1, 2, 3, 4, 5, 6]);
}

#[test]
fn uninit_fill_panic_drops_partial() {
    let drops = Rc::new(Cell::new(0));
    let value = Tracked::with_clone_limit(3, &drops, 2);
    let mut raw: [MaybeUninit<Tracked>; 4] = [
        MaybeUninit::uninit(),
        MaybeUninit::uninit(),
        MaybeUninit::uninit(),
        MaybeUninit::uninit(),
    ];
    let res = catch_unwind(AssertUnwindSafe(|| {
        uninitialized_fill(&mut raw, &value);
    }));
    assert!(res.is_err());
    assert_eq!(drops.get(), 2);
}

#[test]
#[should_panic(expected = "Destination range is too small")]
fn uninit_fill_n_too_small() {
    let mut raw = [MaybeUninit::<u8>::uninit(); 2];
    uninitialized_fill_n(&mut raw, 3, &0);
}
