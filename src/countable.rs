// src/countable.rs

//! Lazy index collections for SDL's "get count / get item" API pairs.
//!
//! SDL commonly exposes a resource list as `SDL_GetNumXxx()` plus a
//! per-index query, rather than returning a materialized array. A
//! [`CountableSet`] adapts that shape into an ordinary Rust collection:
//! it stores only the count and synthesizes each strongly-typed index
//! on demand, so enumerating drivers or displays allocates nothing and
//! queries nothing until an index is actually resolved.

use std::marker::PhantomData;

/// A strongly-typed wrapper around a native integer index.
///
/// Each index kind (render driver, video display, display mode) gets its
/// own newtype so the type system rejects mixing them, even though they
/// all wrap a `c_int`. An index value owns no resource; resolving it
/// against SDL is the job of the module that defines it.
pub trait IndexValue: Copy {
    /// Wraps a raw index.
    fn from_raw(raw: i32) -> Self;

    /// The raw index to pass to SDL.
    fn raw(self) -> i32;
}

/// A lazy, restartable sequence of index values over `[0, count)`.
///
/// The count is a snapshot taken at construction; if SDL's resource
/// count changes afterwards (a display is unplugged, say) the set does
/// not follow it, and stale indices fail at resolution time instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountableSet<T: IndexValue> {
    count: i32,
    _marker: PhantomData<T>,
}

impl<T: IndexValue> CountableSet<T> {
    /// Creates a set over `0..count`.
    ///
    /// # Panics
    ///
    /// Panics if `count` is negative. SDL's count queries return a
    /// negative value to signal an error; callers must check that
    /// before constructing a set, so a negative count here is a
    /// contract violation rather than a recoverable condition.
    pub fn new(count: i32) -> Self {
        assert!(count >= 0, "invalid negative count {}", count);
        Self {
            count,
            _marker: PhantomData,
        }
    }

    /// The snapshotted count.
    #[inline]
    pub fn len(self) -> usize {
        self.count as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.count == 0
    }

    /// The index value at `position`.
    ///
    /// Bounds are only checked with a debug assertion, mirroring the
    /// unchecked contract of the native per-index queries this wraps.
    #[inline]
    pub fn get(self, position: usize) -> T {
        debug_assert!(position < self.len(), "index {} out of range", position);
        T::from_raw(position as i32)
    }

    /// Iterates over the index values in ascending order.
    ///
    /// The iterator captures only the count and a cursor, so traversal
    /// is restartable: each call yields an independent pass over the
    /// same snapshot.
    pub fn iter(self) -> CountableSetIter<T> {
        CountableSetIter {
            set: self,
            position: 0,
        }
    }
}

/// Iterator over a [`CountableSet`], ascending from index `0`.
#[derive(Debug, Clone)]
pub struct CountableSetIter<T: IndexValue> {
    set: CountableSet<T>,
    position: usize,
}

impl<T: IndexValue> Iterator for CountableSetIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.position < self.set.len() {
            let value = self.set.get(self.position);
            self.position += 1;
            Some(value)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.set.len() - self.position;
        (remaining, Some(remaining))
    }
}

impl<T: IndexValue> ExactSizeIterator for CountableSetIter<T> {}

impl<T: IndexValue> IntoIterator for CountableSet<T> {
    type Item = T;
    type IntoIter = CountableSetIter<T>;

    fn into_iter(self) -> CountableSetIter<T> {
        self.iter()
    }
}

impl<T: IndexValue> IntoIterator for &CountableSet<T> {
    type Item = T;
    type IntoIter = CountableSetIter<T>;

    fn into_iter(self) -> CountableSetIter<T> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct TestIndex(i32);

    impl IndexValue for TestIndex {
        fn from_raw(raw: i32) -> Self {
            TestIndex(raw)
        }

        fn raw(self) -> i32 {
            self.0
        }
    }

    #[test]
    fn zero_count_is_empty() {
        let set = CountableSet::<TestIndex>::new(0);
        assert_eq!(set.len(), 0);
        assert!(set.is_empty());
        assert_eq!(set.iter().count(), 0);
    }

    #[test]
    fn yields_each_index_in_order() {
        let set = CountableSet::<TestIndex>::new(5);
        assert_eq!(set.len(), 5);

        // Direct indexed access.
        for i in 0..5 {
            assert_eq!(set.get(i).raw(), i as i32);
        }

        // Full traversal.
        let raws: Vec<i32> = set.iter().map(IndexValue::raw).collect();
        assert_eq!(raws, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn traversal_is_restartable() {
        let set = CountableSet::<TestIndex>::new(3);
        let first: Vec<TestIndex> = set.iter().collect();
        let second: Vec<TestIndex> = set.iter().collect();
        assert_eq!(first, second);
    }

    #[test]
    #[should_panic(expected = "invalid negative count")]
    fn negative_count_violates_the_contract() {
        let _ = CountableSet::<TestIndex>::new(-1);
    }

    #[test]
    fn iterator_reports_exact_size() {
        let set = CountableSet::<TestIndex>::new(4);
        let mut iter = set.iter();
        assert_eq!(iter.len(), 4);
        iter.next();
        assert_eq!(iter.len(), 3);
    }
}
