use core::iter::FusedIterator;
use core::ptr;

use super::*;
use crate::utils::*;

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Iter {
            ring: self.ring,
            head: self.head,
            front: self.front,
            back: self.back,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        if self.front == self.back {
            return None;
        }
        let slot = wrap_add(self.head, self.front, self.ring.len());
        self.front += 1;
        unsafe { Some(self.ring.get_unchecked(slot).assume_init_ref()) }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<&'a T> {
        if n >= self.back - self.front {
            self.front = self.back;
            return None;
        }
        self.front += n;
        self.next()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a T> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        let slot = wrap_add(self.head, self.back, self.ring.len());
        unsafe { Some(self.ring.get_unchecked(slot).assume_init_ref()) }
    }

    #[inline]
    fn nth_back(&mut self, n: usize) -> Option<&'a T> {
        if n >= self.back - self.front {
            self.back = self.front;
            return None;
        }
        self.back -= n;
        self.next_back()
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}

unsafe impl<'a, T: Send> Send for IterMut<'a, T> {}

unsafe impl<'a, T: Sync> Sync for IterMut<'a, T> {}

impl<'a, T> IterMut<'a, T> {
    #[inline]
    unsafe fn slot_mut(&mut self, pos: usize) -> &'a mut T {
        let slot = wrap_add(self.head, pos, self.capacity);
        &mut *self.ring.as_ptr().add(slot)
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<&'a mut T> {
        if self.front == self.back {
            return None;
        }
        let pos = self.front;
        self.front += 1;
        unsafe { Some(self.slot_mut(pos)) }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<&'a mut T> {
        if n >= self.back - self.front {
            self.front = self.back;
            return None;
        }
        self.front += n;
        self.next()
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a mut T> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        let pos = self.back;
        unsafe { Some(self.slot_mut(pos)) }
    }

    #[inline]
    fn nth_back(&mut self, n: usize) -> Option<&'a mut T> {
        if n >= self.back - self.front {
            self.back = self.front;
            return None;
        }
        self.back -= n;
        self.next_back()
    }
}

impl<'a, T> ExactSizeIterator for IterMut<'a, T> {}

impl<'a, T> FusedIterator for IterMut<'a, T> {}

impl<T, S: Storage<Item = T>> Iterator for IntoIter<T, S> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.inner.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.inner.len();
        (len, Some(len))
    }
}

impl<T, S: Storage<Item = T>> DoubleEndedIterator for IntoIter<T, S> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.inner.pop_back()
    }
}

impl<T, S: Storage<Item = T>> ExactSizeIterator for IntoIter<T, S> {}

impl<T, S: Storage<Item = T>> FusedIterator for IntoIter<T, S> {}

impl<T: Clone, S: Storage<Item = T>> Clone for IntoIter<T, S> {
    fn clone(&self) -> Self {
        IntoIter { inner: self.inner.clone() }
    }
}

unsafe impl<'a, T: Send, S: Storage<Item = T> + Send> Send for Drain<'a, T, S> {}

unsafe impl<'a, T: Sync, S: Storage<Item = T> + Sync> Sync for Drain<'a, T, S> {}

impl<'a, T: 'a, S: Storage<Item = T> + 'a> Drop for Drain<'a, T, S> {
    fn drop(&mut self) {
        for _ in self.by_ref() {}

        let ring = unsafe { self.ring.as_mut() };

        // H = ring head; d = drained run; t = kept tail
        //
        //        H       d       t
        // [. . . o o o o x x x x o o . .]
        //
        let head_len = ring.len;
        let tail_len = self.tail_len;
        let drain_len = self.drain_len;

        match (head_len, tail_len) {
            (0, 0) => ring.head = 0,
            (0, _) => ring.head = ring.to_physical_idx(drain_len),
            (_, 0) => {}
            _ => unsafe {
                if head_len <= tail_len {
                    let new_head = ring.to_physical_idx(drain_len);
                    let head = ring.head;
                    ring.wrap_copy(new_head, head, head_len);
                    ring.head = new_head;
                } else {
                    let dst = ring.to_physical_idx(head_len);
                    let src = ring.to_physical_idx(head_len + drain_len);
                    ring.wrap_copy(dst, src, tail_len);
                }
            },
        }
        ring.len = head_len + tail_len;
    }
}

impl<'a, T: 'a, S: Storage<Item = T> + 'a> Iterator for Drain<'a, T, S> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if self.remaining == 0 {
            return None;
        }
        let pos = self.drain_start + self.idx;
        self.idx += 1;
        self.remaining -= 1;
        unsafe {
            let ring = self.ring.as_mut();
            let slot = ring.to_physical_idx(pos);
            Some(ptr::read(ring.ptr().add(slot)))
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T: 'a, S: Storage<Item = T> + 'a> DoubleEndedIterator for Drain<'a, T, S> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let pos = self.drain_start + self.idx + self.remaining;
        unsafe {
            let ring = self.ring.as_mut();
            let slot = ring.to_physical_idx(pos);
            Some(ptr::read(ring.ptr().add(slot)))
        }
    }
}

impl<'a, T: 'a, S: Storage<Item = T> + 'a> ExactSizeIterator for Drain<'a, T, S> {}

impl<'a, T: 'a, S: Storage<Item = T> + 'a> FusedIterator for Drain<'a, T, S> {}
