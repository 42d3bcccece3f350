/// Create a [`Vector`](crate::vec::Vector) containing the arguments.
///
/// ```
/// use seqvec::vector;
///
/// let v = vector![1, 2, 3];
/// assert_eq!(v, [1, 2, 3]);
///
/// let w = vector![7; 2];
/// assert_eq!(w, [7, 7]);
/// ```
#[macro_export]
macro_rules! vector {
    (in $alloc:expr $(;)?) => (
        $crate::vec::Vector::new_in($alloc)
    );
    (in $alloc:expr; $elem:expr; $n:expr) => (
        $crate::vec::Vector::from_elem_in($n, $elem, $alloc)
    );
    (in $alloc:expr; $($x:expr),+ $(,)?) => (
        $crate::vec::from_array_in([$($x),+], $alloc)
    );
    () => (
        $crate::vec::Vector::new()
    );
    ($elem:expr; $n:expr) => (
        $crate::vec::Vector::from_elem($n, $elem)
    );
    ($($x:expr),+ $(,)?) => (
        $crate::vec::from_array([$($x),+])
    );
}
