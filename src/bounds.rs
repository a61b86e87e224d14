//! Lower and upper bound binary searches over sorted slices.
//!
//! All functions assume `x` is sorted (by the projected key for the `_by_key`
//! variants) and run in O(log n). With duplicate keys they return the
//! boundary of the run, never an arbitrary duplicate.

/// Index of the first element `>= v`, or `x.len()` if there is none.
#[inline]
pub fn lower_bound<T: Ord>(x: &[T], v: &T) -> usize {
    lower_bound_by_key(x, v, |e| e)
}

/// Index of the first element `> v`, or `x.len()` if there is none.
#[inline]
pub fn upper_bound<T: Ord>(x: &[T], v: &T) -> usize {
    upper_bound_by_key(x, v, |e| e)
}

/// Index of the first element whose key is `>= v`.
pub fn lower_bound_by_key<'a, T, K, F>(x: &'a [T], v: &K, mut key: F) -> usize
where
    K: Ord + ?Sized,
    F: FnMut(&'a T) -> &'a K,
    K: 'a,
{
    let (mut lo, mut hi) = (0, x.len());
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if key(&x[mid]) < v {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    lo
}

/// Index of the first element whose key is `> v`.
pub fn upper_bound_by_key<'a, T, K, F>(x: &'a [T], v: &K, mut key: F) -> usize
where
    K: Ord + ?Sized,
    F: FnMut(&'a T) -> &'a K,
    K: 'a,
{
    let (mut lo, mut hi) = (0, x.len());
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if v < key(&x[mid]) {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    lo
}
