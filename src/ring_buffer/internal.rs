use core::cmp;
use core::mem::MaybeUninit;
use core::ops::Range;
use core::ptr;
use core::slice;

use super::RingBuffer;
use crate::storage::Storage;
use crate::utils::*;

impl<T, S: Storage<Item = T>> RingBuffer<T, S> {
    #[inline]
    pub(super) fn ptr(&self) -> *const T {
        self.xs.as_ptr()
    }

    #[inline]
    pub(super) fn ptr_mut(&mut self) -> *mut T {
        self.xs.as_mut_ptr()
    }

    /// Physical slot of the element at logical position `idx`.
    #[inline]
    pub(super) fn to_physical_idx(&self, idx: usize) -> usize {
        wrap_add(self.head, idx, self.capacity())
    }

    /// Physical slot ranges covering the logical positions `start..end`,
    /// in logical order. The second range is empty unless the run wraps.
    pub(super) fn physical_ranges(&self, start: usize, end: usize) -> (Range<usize>, Range<usize>) {
        debug_assert!(start <= end && end <= self.capacity(),
                      "ranges start={} end={} cap={}",
                      start,
                      end,
                      self.capacity());
        let len = end - start;
        if len == 0 {
            return (0..0, 0..0);
        }
        let first = self.to_physical_idx(start);
        let pre_wrap_len = self.capacity() - first;
        if pre_wrap_len >= len {
            (first..first + len, 0..0)
        } else {
            (first..self.capacity(), 0..len - pre_wrap_len)
        }
    }

    /// Copies a contiguous block of memory len long from src to dst
    #[inline]
    pub(super) unsafe fn copy(&mut self, dst: usize, src: usize, len: usize) {
        debug_assert!(dst + len <= self.capacity(),
                      "cpy dst={} src={} len={} cap={}",
                      dst,
                      src,
                      len,
                      self.capacity());
        debug_assert!(src + len <= self.capacity(),
                      "cpy dst={} src={} len={} cap={}",
                      dst,
                      src,
                      len,
                      self.capacity());
        let base = self.ptr_mut();
        ptr::copy(base.add(src), base.add(dst), len);
    }

    /// Copies a contiguous block of memory len long from src to dst, the two
    /// blocks must not overlap.
    #[inline]
    pub(super) unsafe fn copy_nonoverlapping(&mut self, dst: usize, src: usize, len: usize) {
        debug_assert!(dst + len <= src || src + len <= dst,
                      "cno dst={} src={} len={}",
                      dst,
                      src,
                      len);
        let base = self.ptr_mut();
        ptr::copy_nonoverlapping(base.add(src), base.add(dst), len);
    }

    /// Copies a potentially wrapping block of memory len long from src to dest.
    /// (abs(dst - src) + len) must be no larger than cap() (There must be at
    /// most one continuous overlapping region between src and dest).
    pub(super) unsafe fn wrap_copy(&mut self, dst: usize, src: usize, len: usize) {
        let cap = self.capacity();
        fn diff(a: usize, b: usize) -> usize {
            if a <= b { b - a } else { a - b }
        }
        debug_assert!(cmp::min(diff(dst, src), cap - diff(dst, src)) + len <= cap,
                      "wrc dst={} src={} len={} cap={}",
                      dst,
                      src,
                      len,
                      cap);

        if src == dst || len == 0 {
            return;
        }

        let dst_after_src = wrap_sub(dst, src, cap) < len;

        let src_pre_wrap_len = cap - src;
        let dst_pre_wrap_len = cap - dst;
        let src_wraps = src_pre_wrap_len < len;
        let dst_wraps = dst_pre_wrap_len < len;

        match (dst_after_src, src_wraps, dst_wraps) {
            (_, false, false) => {
                // src doesn't wrap, dst doesn't wrap
                //
                //        S . . .
                // 1 [_ _ A A B B C C _]
                // 2 [_ _ A A A A B B _]
                //            D . . .
                //
                self.copy(dst, src, len);
            }
            (false, false, true) => {
                // dst before src, src doesn't wrap, dst wraps
                //
                //    S . . .
                // 1 [A A B B _ _ _ C C]
                // 2 [A A B B _ _ _ A A]
                // 3 [B B B B _ _ _ A A]
                //    . .           D .
                //
                self.copy(dst, src, dst_pre_wrap_len);
                self.copy(0, src + dst_pre_wrap_len, len - dst_pre_wrap_len);
            }
            (true, false, true) => {
                // src before dst, src doesn't wrap, dst wraps
                //
                //              S . . .
                // 1 [C C _ _ _ A A B B]
                // 2 [B B _ _ _ A A B B]
                // 3 [B B _ _ _ A A A A]
                //    . .           D .
                //
                self.copy(0, src + dst_pre_wrap_len, len - dst_pre_wrap_len);
                self.copy(dst, src, dst_pre_wrap_len);
            }
            (false, true, false) => {
                // dst before src, src wraps, dst doesn't wrap
                //
                //    . .           S .
                // 1 [C C _ _ _ A A B B]
                // 2 [C C _ _ _ B B B B]
                // 3 [C C _ _ _ B B C C]
                //              D . . .
                //
                self.copy(dst, src, src_pre_wrap_len);
                self.copy(dst + src_pre_wrap_len, 0, len - src_pre_wrap_len);
            }
            (true, true, false) => {
                // src before dst, src wraps, dst doesn't wrap
                //
                //    . .           S .
                // 1 [A A B B _ _ _ C C]
                // 2 [A A A A _ _ _ C C]
                // 3 [C C A A _ _ _ C C]
                //    D . . .
                //
                self.copy(dst + src_pre_wrap_len, 0, len - src_pre_wrap_len);
                self.copy(dst, src, src_pre_wrap_len);
            }
            (false, true, true) => {
                // dst before src, src wraps, dst wraps
                //
                //    . . .         S .
                // 1 [A B C D _ E F G H]
                // 2 [A B C D _ E G H H]
                // 3 [A B C D _ E G H A]
                // 4 [B C C D _ E G H A]
                //    . .         D . .
                //
                debug_assert!(dst_pre_wrap_len > src_pre_wrap_len);
                let delta = dst_pre_wrap_len - src_pre_wrap_len;
                self.copy(dst, src, src_pre_wrap_len);
                self.copy(dst + src_pre_wrap_len, 0, delta);
                self.copy(0, delta, len - dst_pre_wrap_len);
            }
            (true, true, true) => {
                // src before dst, src wraps, dst wraps
                //
                //    . .         S . .
                // 1 [A B C D _ E F G H]
                // 2 [A A B D _ E F G H]
                // 3 [H A B D _ E F G H]
                // 4 [H A B D _ E F F G]
                //    . . .         D .
                //
                debug_assert!(src_pre_wrap_len > dst_pre_wrap_len);
                let delta = src_pre_wrap_len - dst_pre_wrap_len;
                self.copy(delta, 0, len - src_pre_wrap_len);
                self.copy(0, cap - delta, delta);
                self.copy(dst, src, dst_pre_wrap_len);
            }
        }
    }

    /// The whole storage, live or not.
    #[inline]
    pub(super) unsafe fn buffer_as_slice(&self) -> &[MaybeUninit<T>] {
        slice::from_raw_parts(self.ptr().cast(), self.capacity())
    }

    /// Live elements in the physical slots `range`.
    #[inline]
    pub(super) unsafe fn buffer_range(&self, range: Range<usize>) -> &[T] {
        slice::from_raw_parts(self.ptr().add(range.start), range.end - range.start)
    }

    #[inline]
    pub(super) unsafe fn buffer_range_mut(&mut self, range: Range<usize>) -> &mut [T] {
        slice::from_raw_parts_mut(self.ptr_mut().add(range.start), range.end - range.start)
    }

    /// Moves an element out of a live slot, leaving it uninitialized.
    #[inline]
    pub(super) unsafe fn buffer_read(&mut self, offset: usize) -> T {
        ptr::read(self.ptr().add(offset))
    }

    /// Constructs an element in a free slot.
    #[inline]
    pub(super) unsafe fn buffer_write(&mut self, offset: usize, element: T) {
        ptr::write(self.ptr_mut().add(offset), element);
    }

    /// Destroys the element in a live slot in place.
    #[inline]
    pub(super) unsafe fn buffer_drop(&mut self, offset: usize) {
        ptr::drop_in_place(self.ptr_mut().add(offset));
    }
}

#[cfg(test)]
mod tests {
    use crate::RingBuffer;

    // Lays out `0..len` starting at physical slot `head` without going
    // through the public insertion paths.
    fn seeded(cap: usize, head: usize, len: usize) -> RingBuffer<usize> {
        let mut buf = RingBuffer::with_capacity(cap);
        buf.head = head;
        for i in 0..len {
            let slot = buf.to_physical_idx(i);
            unsafe { buf.buffer_write(slot, i) };
            buf.len += 1;
        }
        buf
    }

    #[test]
    fn physical_ranges_split_at_storage_end() {
        let buf = seeded(8, 6, 5);
        assert_eq!(buf.physical_ranges(0, 5), (6..8, 0..3));
        assert_eq!(buf.physical_ranges(2, 5), (0..3, 0..0));
        assert_eq!(buf.physical_ranges(1, 3), (7..8, 0..1));
        assert_eq!(buf.physical_ranges(5, 8), (3..6, 0..0));
        assert_eq!(buf.physical_ranges(4, 4), (0..0, 0..0));
    }

    #[test]
    fn wrap_copy_every_alignment() {
        const CAP: usize = 9;
        for src in 0..CAP {
            for dst in 0..CAP {
                for len in 0..4 {
                    let mut buf = seeded(CAP, 0, CAP);
                    let mut expected: Vec<usize> = (0..CAP).collect();
                    let distance = {
                        let d = if src > dst { src - dst } else { dst - src };
                        d.min(CAP - d)
                    };
                    if distance + len > CAP {
                        continue;
                    }
                    let moved: Vec<usize> = (0..len).map(|i| (src + i) % CAP).collect();
                    for (i, value) in moved.iter().enumerate() {
                        expected[(dst + i) % CAP] = *value;
                    }
                    unsafe { buf.wrap_copy(dst, src, len) };
                    let got: Vec<usize> = (0..len)
                        .map(|i| unsafe { *buf.ptr().add((dst + i) % CAP) })
                        .collect();
                    let want: Vec<usize> = (0..len).map(|i| expected[(dst + i) % CAP]).collect();
                    assert_eq!(got, want, "dst={} src={} len={}", dst, src, len);
                }
            }
        }
    }
}
