use core::mem;

use super::RingBuffer;
use crate::error::CapacityError;
use crate::storage::Storage;
use crate::utils::*;

impl<T, S: Storage<Item = T>> RingBuffer<T, S> {
    /// Appends every item of `items` at the back, evicting the oldest
    /// elements as needed.
    ///
    /// With `n` items and `available()` free slots:
    ///
    /// - `n <= available()`: the items are appended.
    /// - `n < capacity()`: the `n - available()` oldest elements are dropped
    ///   first, the buffer ends up full.
    /// - otherwise every element is dropped and only the last `capacity()`
    ///   items are kept.
    ///
    /// An iterator yielding fewer items than its reported length inserts
    /// fewer; extra items are left unconsumed.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_buffer::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = RingBuffer::with_capacity(5);
    /// buf.extend([1, 2, 3]);
    ///
    /// buf.insert_back([4, 5, 6]);
    /// assert_eq!(buf, [2, 3, 4, 5, 6]);
    ///
    /// buf.insert_back(10..20);
    /// assert_eq!(buf, [15, 16, 17, 18, 19]);
    /// ```
    pub fn insert_back<I>(&mut self, items: I)
        where I: IntoIterator<Item = T>,
              I::IntoIter: ExactSizeIterator
    {
        let mut iter = items.into_iter();
        let count = iter.len();
        let capacity = self.capacity();
        let available = self.available();

        if count <= available {
            self.append(iter, count);
        } else if count < capacity {
            let evicted = count - available;
            tracing::trace!(count, evicted, "insert_back overflows");
            self.drain(..evicted);
            self.append(iter, count);
        } else {
            let skipped = count - capacity;
            tracing::trace!(count, skipped, "insert_back replaces every element");
            if skipped > 0 {
                iter.nth(skipped - 1);
            }
            self.clear();
            self.append(iter, capacity);
        }
    }

    /// Prepends every item of `items` at the front, in iteration order,
    /// evicting the newest elements as needed.
    ///
    /// Mirror of [`insert_back`](#method.insert_back): the final content is
    /// all the items followed by the oldest elements that still fit. When
    /// there are at least `capacity()` items only the first `capacity()` are
    /// kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_buffer::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = RingBuffer::with_capacity(5);
    /// buf.extend([1, 2, 3]);
    ///
    /// buf.insert_front([7, 8, 9]);
    /// assert_eq!(buf, [7, 8, 9, 1, 2]);
    /// ```
    pub fn insert_front<I>(&mut self, items: I)
        where I: IntoIterator<Item = T>,
              I::IntoIter: ExactSizeIterator
    {
        let iter = items.into_iter();
        let count = iter.len();
        let capacity = self.capacity();
        let available = self.available();

        if count <= available {
            self.prepend(iter, count);
        } else if count < capacity {
            let evicted = count - available;
            tracing::trace!(count, evicted, "insert_front overflows");
            let keep = self.len - evicted;
            self.truncate(keep);
            self.prepend(iter, count);
        } else {
            tracing::trace!(count, kept = capacity, "insert_front replaces every element");
            self.clear();
            self.prepend(iter, capacity);
        }
    }

    /// Appends every item of `items` at the back if they all fit.
    ///
    /// # Errors
    ///
    /// Returns `Err(CapacityError { element })` carrying the untouched
    /// iterator if it reports more items than `available()`; the buffer is
    /// left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_buffer::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = RingBuffer::with_capacity(3);
    /// buf.try_insert_back([1, 2]).unwrap();
    ///
    /// let rejected = buf.try_insert_back([3, 4]).unwrap_err();
    /// assert_eq!(rejected.into_inner().collect::<Vec<_>>(), [3, 4]);
    /// assert_eq!(buf, [1, 2]);
    /// ```
    pub fn try_insert_back<I>(&mut self, items: I) -> Result<(), CapacityError<I::IntoIter>>
        where I: IntoIterator<Item = T>,
              I::IntoIter: ExactSizeIterator
    {
        let iter = items.into_iter();
        let count = iter.len();
        if count > self.available() {
            return Err(CapacityError::new(iter));
        }
        self.append(iter, count);
        Ok(())
    }

    /// Prepends every item of `items` at the front if they all fit.
    ///
    /// # Errors
    ///
    /// Returns `Err(CapacityError { element })` carrying the untouched
    /// iterator if it reports more items than `available()`; the buffer is
    /// left unchanged.
    pub fn try_insert_front<I>(&mut self, items: I) -> Result<(), CapacityError<I::IntoIter>>
        where I: IntoIterator<Item = T>,
              I::IntoIter: ExactSizeIterator
    {
        let iter = items.into_iter();
        let count = iter.len();
        if count > self.available() {
            return Err(CapacityError::new(iter));
        }
        self.prepend(iter, count);
        Ok(())
    }

    /// Writes up to `count` items into the free slots past the newest
    /// element. Nothing is committed until the iterator is done: if it
    /// panics, the items written so far are dropped and `len` is unchanged.
    pub(super) fn append<I>(&mut self, iter: I, count: usize)
        where I: Iterator<Item = T>
    {
        debug_assert!(count <= self.available());
        if count == 0 {
            return;
        }
        let capacity = self.capacity();
        let start = self.to_physical_idx(self.len);

        let mut guard = WriteGuard {
            ring: self,
            start,
            written: 0,
        };
        for element in iter.take(count) {
            let slot = wrap_add(start, guard.written, capacity);
            unsafe { guard.ring.buffer_write(slot, element) };
            guard.written += 1;
        }

        guard.ring.len += guard.written;
        mem::forget(guard);
    }

    /// Writes up to `count` items into the free slots before the oldest
    /// element, keeping their iteration order.
    fn prepend<I>(&mut self, iter: I, count: usize)
        where I: Iterator<Item = T>
    {
        debug_assert!(count <= self.available());
        if count == 0 {
            return;
        }
        let capacity = self.capacity();
        let start = wrap_sub(self.head, count, capacity);

        let mut guard = WriteGuard {
            ring: self,
            start,
            written: 0,
        };
        for element in iter.take(count) {
            let slot = wrap_add(start, guard.written, capacity);
            unsafe { guard.ring.buffer_write(slot, element) };
            guard.written += 1;
        }

        let written = guard.written;
        let ring = &mut *guard.ring;
        if written < count {
            // close the gap left by a short iterator
            let dst = wrap_sub(ring.head, written, capacity);
            unsafe { ring.wrap_copy(dst, start, written) };
        }
        ring.head = wrap_sub(ring.head, written, capacity);
        ring.len += written;
        mem::forget(guard);
    }
}

/// Drops the items written by `append` or `prepend` if the source iterator
/// panics before they are committed.
struct WriteGuard<'a, T: 'a, S: Storage<Item = T> + 'a> {
    ring: &'a mut RingBuffer<T, S>,
    start: usize,
    written: usize,
}

impl<'a, T: 'a, S: Storage<Item = T> + 'a> Drop for WriteGuard<'a, T, S> {
    fn drop(&mut self) {
        let capacity = self.ring.capacity();
        for i in 0..self.written {
            let slot = wrap_add(self.start, i, capacity);
            unsafe { self.ring.buffer_drop(slot) };
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{InlineRingBuffer, RingBuffer};

    // Reports more items than it yields.
    struct Short<I>(I, usize);

    impl<I: Iterator> Iterator for Short<I> {
        type Item = I::Item;
        fn next(&mut self) -> Option<I::Item> {
            self.0.next()
        }
        fn size_hint(&self) -> (usize, Option<usize>) {
            (self.1, Some(self.1))
        }
    }

    impl<I: Iterator> ExactSizeIterator for Short<I> {}

    fn wrapped(cap: usize, head: usize, items: &[i32]) -> RingBuffer<i32> {
        let mut buf = RingBuffer::with_capacity(cap);
        for _ in 0..head {
            buf.push_back(0);
            buf.pop_front();
        }
        buf.extend(items.iter().cloned());
        buf
    }

    #[test]
    fn insert_back_every_case_and_alignment() {
        const CAP: usize = 6;
        for head in 0..CAP {
            for len in 0..=CAP {
                for count in 0..CAP + 3 {
                    let old: Vec<i32> = (0..len as i32).collect();
                    let new: Vec<i32> = (100..100 + count as i32).collect();
                    let mut buf = wrapped(CAP, head, &old);
                    buf.insert_back(new.iter().cloned());

                    let mut expected = old.clone();
                    expected.extend(new.iter().cloned());
                    let expected = &expected[expected.len().saturating_sub(CAP)..];
                    assert_eq!(buf, expected, "head={} len={} count={}", head, len, count);
                }
            }
        }
    }

    #[test]
    fn insert_front_every_case_and_alignment() {
        const CAP: usize = 6;
        for head in 0..CAP {
            for len in 0..=CAP {
                for count in 0..CAP + 3 {
                    let old: Vec<i32> = (0..len as i32).collect();
                    let new: Vec<i32> = (100..100 + count as i32).collect();
                    let mut buf = wrapped(CAP, head, &old);
                    buf.insert_front(new.iter().cloned());

                    let mut expected = new.clone();
                    expected.extend(old.iter().cloned());
                    expected.truncate(CAP);
                    assert_eq!(buf, &expected[..], "head={} len={} count={}", head, len, count);
                }
            }
        }
    }

    #[test]
    fn partial_overflow_keeps_suffix_of_old() {
        // capacity C = 5, size S = 4, m = 3 new elements
        let mut buf = wrapped(5, 3, &[1, 2, 3, 4]);
        buf.insert_back([7, 8, 9]);
        assert!(buf.is_full());
        assert_eq!(buf, [3, 4, 7, 8, 9]);
    }

    #[test]
    fn short_iterator_inserts_fewer() {
        let mut buf = wrapped(6, 4, &[1, 2]);
        buf.insert_back(Short(10..12, 4));
        assert_eq!(buf, [1, 2, 10, 11]);

        let mut buf = wrapped(6, 1, &[1, 2]);
        buf.insert_front(Short(10..12, 4));
        assert_eq!(buf, [10, 11, 1, 2]);
        assert_eq!(buf.len(), 4);
    }

    #[test]
    fn try_insert_leaves_full_buffer_untouched() {
        let mut buf: InlineRingBuffer<i32, 4> = InlineRingBuffer::new();
        assert!(buf.try_insert_front([3, 4]).is_ok());
        assert!(buf.try_insert_back([5]).is_ok());
        let err = buf.try_insert_back(vec![6, 7]).unwrap_err();
        assert_eq!(err.element.len(), 2);
        assert!(buf.try_insert_front([1, 2]).is_err());
        assert_eq!(buf, [3, 4, 5]);
        assert!(buf.try_insert_front([2]).is_ok());
        assert_eq!(buf, [2, 3, 4, 5]);
    }

    #[test]
    fn zero_capacity_swallows_everything() {
        let mut buf: RingBuffer<i32> = RingBuffer::new();
        buf.insert_back([1, 2, 3]);
        buf.insert_front([1, 2, 3]);
        assert!(buf.is_empty());
        assert!(buf.try_insert_back(Vec::new()).is_ok());
    }
}
