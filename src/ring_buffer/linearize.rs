use core::slice;

use super::RingBuffer;
use crate::storage::Storage;

impl<T, S: Storage<Item = T>> RingBuffer<T, S> {
    /// Returns `true` if the elements occupy one contiguous run of slots,
    /// i.e. [`array_two`](#method.array_two) is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_buffer::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = RingBuffer::with_capacity(3);
    /// buf.extend([1, 2, 3]);
    /// assert!(buf.is_linearized());
    /// buf.push_back(4);
    /// assert!(!buf.is_linearized());
    /// ```
    #[inline]
    pub fn is_linearized(&self) -> bool {
        self.head + self.len <= self.capacity()
    }

    /// Rearranges the storage so that the elements are contiguous, and
    /// returns them as a slice in logical order.
    ///
    /// Does not move anything if the buffer is already linearized. Otherwise
    /// the oldest element ends up in the first slot.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_buffer::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = RingBuffer::with_capacity(5);
    /// buf.extend([0, 0, 0, 4, 5]);
    /// buf.extend([1, 2, 3]);
    /// assert_eq!(buf.array_two(), &[1, 2, 3]);
    ///
    /// assert_eq!(buf.linearize(), &[4, 5, 1, 2, 3]);
    /// assert!(buf.is_linearized());
    /// ```
    pub fn linearize(&mut self) -> &mut [T] {
        if self.is_linearized() {
            let head = self.head;
            let len = self.len;
            return unsafe { self.buffer_range_mut(head..head + len) };
        }

        let cap = self.capacity();
        let head = self.head;
        // the part before the storage end, and the wrapped part at the start
        let head_len = cap - head;
        let tail_len = self.len - head_len;
        let free = cap - self.len;

        unsafe {
            if head_len <= free {
                // the older part fits in the gap: shift the wrapped part
                // right, then move the older part in front of it
                //
                //        T             H
                // [n n n . . . . . . . o o]
                // [. . n n n . . . . . o o]
                // [o o n n n . . . . . . .]
                //
                tracing::trace!(head_len, tail_len, "linearize by shifting the wrapped part");
                self.copy(head_len, 0, tail_len);
                self.copy_nonoverlapping(0, head, head_len);
            } else {
                // slide the older part down against the wrapped part, then
                // rotate the run so that the older part comes first
                //
                //          T   H
                // [n n n n . . o o o o o o]
                // [n n n n o o o o o o . .]
                // [o o o o o o n n n n . .]
                //
                tracing::trace!(head_len, tail_len, "linearize by rotation");
                self.copy(tail_len, head, head_len);
                let base = self.ptr_mut();
                slice::from_raw_parts_mut(base, head_len + tail_len).rotate_left(tail_len);
            }
        }

        self.head = 0;
        let len = self.len;
        unsafe { self.buffer_range_mut(0..len) }
    }
}

#[cfg(test)]
mod tests {
    use crate::{InlineRingBuffer, RingBuffer};

    #[test]
    fn linearize_wrapped_scenario() {
        // 4, 5 in slots 3..5 and 1, 2, 3 in slots 0..3
        let mut buf: InlineRingBuffer<i32, 5> = InlineRingBuffer::new();
        buf.extend([0, 0, 0, 4, 5, 1, 2, 3]);
        assert_eq!(buf.array_one(), &[4, 5]);
        assert_eq!(buf.array_two(), &[1, 2, 3]);
        assert!(!buf.is_linearized());

        assert_eq!(buf.linearize(), &[4, 5, 1, 2, 3]);
        assert!(buf.is_linearized());
        assert_eq!(buf.array_one(), &[4, 5, 1, 2, 3]);
        assert!(buf.array_two().is_empty());
    }

    #[test]
    fn linearize_is_idempotent() {
        let mut buf: RingBuffer<i32> = RingBuffer::with_capacity(6);
        buf.extend([1, 2, 3]);
        buf.pop_front();
        let before = buf.array_one().as_ptr();
        assert_eq!(buf.linearize(), &[2, 3]);
        assert_eq!(buf.array_one().as_ptr(), before);
        assert_eq!(buf.linearize(), &[2, 3]);
    }

    #[test]
    fn linearize_every_alignment() {
        const CAP: usize = 7;
        for head in 0..CAP {
            for len in 0..=CAP {
                let mut buf: RingBuffer<String> = RingBuffer::with_capacity(CAP);
                for _ in 0..head {
                    buf.push_back(String::new());
                    buf.pop_front();
                }
                let expected: Vec<String> = (0..len).map(|i| i.to_string()).collect();
                buf.extend(expected.iter().cloned());
                assert_eq!(buf.linearize(), &expected[..], "head={} len={}", head, len);
                assert!(buf.is_linearized());
                assert_eq!(buf, expected);
            }
        }
    }
}
