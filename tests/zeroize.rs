#![cfg(all(feature = "alloc", feature = "zeroize"))]

use core::alloc::Layout;
use core::cell::RefCell;
use core::ptr::NonNull;
use core::slice;

use seqvec::vec::ZeroizingVector;
use seqvec::{vector, Global, RawAlloc, StorageError, Vector, ZeroizingAlloc};

#[derive(Debug)]
struct TestAlloc<A: RawAlloc> {
    alloc: A,
    released: RefCell<Vec<Vec<u8>>>,
}

impl<A: RawAlloc> TestAlloc<A> {
    fn new(alloc: A) -> Self {
        Self {
            alloc,
            released: RefCell::new(Vec::new()),
        }
    }
}

impl<A: RawAlloc> RawAlloc for TestAlloc<A> {
    fn try_alloc(&self, layout: Layout) -> Result<NonNull<[u8]>, StorageError> {
        self.alloc.try_alloc(layout)
    }

    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        let cp = Vec::from(unsafe { slice::from_raw_parts(ptr.as_ptr(), layout.size()) });
        self.released.borrow_mut().push(cp);
        self.alloc.release(ptr, layout)
    }
}

#[test]
fn test_alloc_log() {
    // check functioning of alloc log
    let alloc = TestAlloc::new(Global);
    let mut v = Vector::new_in(&alloc);
    v.push_back(99u32);
    drop(v);
    let log = alloc.released.borrow().clone();
    assert_eq!(log, &[99u32.to_ne_bytes()]);
}

#[test]
fn vec_zeroize_release() {
    let alloc = TestAlloc::new(Global);
    let mut v = Vector::new_in(ZeroizingAlloc(&alloc));
    v.push_back(1u32);
    v.push_back(2);
    v.push_back(3);
    assert_eq!(v.capacity(), 4);
    drop(v);
    let log = alloc.released.borrow().clone();
    // storage for one, two and four elements
    assert_eq!(log.len(), 3);
    assert_eq!(log.iter().map(Vec::len).collect::<Vec<_>>(), [4, 8, 16]);
    assert!(log.iter().flatten().all(|b| *b == 0));
}

#[test]
fn vec_zeroize_shrink() {
    let alloc = TestAlloc::new(Global);
    let mut v = vector![in ZeroizingAlloc(&alloc); 7u8, 7, 7];
    v.reserve(10);
    v.truncate(1);
    v.shrink_to_fit();
    assert_eq!(v, [7]);
    assert_eq!(alloc.released.borrow().len(), 2);
    assert!(alloc.released.borrow().iter().flatten().all(|b| *b == 0));
}

#[test]
fn vec_zeroize_trait() {
    use zeroize::Zeroize;

    let alloc = TestAlloc::new(Global);
    let mut v = Vector::new_in(ZeroizingAlloc(&alloc));
    v.extend([5u16, 6, 7]);
    v.zeroize();
    assert!(v.is_empty());
    assert_eq!(v.capacity(), 0);
    let log = alloc.released.borrow().clone();
    assert_eq!(log, &[[0u8; 8]]);
}

#[test]
fn vec_zeroize_alias() {
    // test type alias
    let mut v = ZeroizingVector::new_in(ZeroizingAlloc(Global));
    v.extend([1, 2, 3]);
    assert_eq!(v, [1, 2, 3]);
    let v: ZeroizingVector<usize> = Default::default();
    assert!(v.is_empty());
}

static SHARED_EMPTY: ZeroizingVector<u64> = ZeroizingVector::new_default();

#[test]
fn vec_zeroize_const_new() {
    const EMPTY: ZeroizingVector<u32> = ZeroizingVector::new_default();
    assert!(SHARED_EMPTY.is_empty());
    assert_eq!(SHARED_EMPTY.capacity(), 0);

    let mut v = EMPTY;
    v.push_back(5);
    assert_eq!(v, [5]);
    assert_eq!(v.allocator(), &ZeroizingAlloc(Global));
}
