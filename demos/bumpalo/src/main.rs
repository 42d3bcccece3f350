use bumpalo::Bump;
use seqvec::{cursor::InputCursor, vector, ApiAlloc, Vector};

fn main() {
    let bump = Bump::new();
    let mut vec: Vector<u32, ApiAlloc<&Bump>> = Vector::new_in(ApiAlloc(&bump));
    vec.push_back(83u32);
    assert_eq!(vec, &[83]);

    vec.insert_n(0, 3, 7);
    assert_eq!(vec, [7, 7, 7, 83]);
    assert_eq!(*vec.rbegin().get(), 83);

    let copy = Vector::from_range_in(vec.begin(), vec.end(), ApiAlloc(&bump));
    assert_eq!(copy, vec);

    let mut big = vector![in ApiAlloc(&bump)];
    big.extend(0..10000u32);
    assert_eq!(big.len(), 10000);
}
