//! Random-access cursors over a `RingBuffer`.
//!
//! A cursor is a logical position in `0..=len()` paired with a borrow of the
//! buffer; position `len()` is the past-the-end position. The borrow keeps
//! the buffer from being mutated (or moved) while the cursor lives, so a
//! cursor always resolves its position against the current layout.

use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, AddAssign, Sub, SubAssign};
use core::ptr;

use super::RingBuffer;
use crate::storage::{HeapStorage, Storage};

/// A read-only random-access cursor into a `RingBuffer`.
///
/// # Examples
///
/// ```
/// use ring_buffer::RingBuffer;
///
/// let mut buf: RingBuffer<_> = RingBuffer::with_capacity(3);
/// buf.extend([1, 2, 3, 4]);
///
/// let front = buf.cursor_front();
/// let end = buf.cursor_end();
/// assert_eq!(end - front, 3);
/// assert_eq!((front + 2).get(), Some(&4));
/// assert_eq!(front.peek(1), Some(&3));
/// assert_eq!(end.get(), None);
/// ```
pub struct Cursor<'a, T: 'a, S: Storage<Item = T> + 'a = HeapStorage<T>> {
    ring: &'a RingBuffer<T, S>,
    pos: usize,
}

/// A random-access cursor that can modify the element under it.
pub struct CursorMut<'a, T: 'a, S: Storage<Item = T> + 'a = HeapStorage<T>> {
    ring: &'a mut RingBuffer<T, S>,
    pos: usize,
}

// `pos` moved by `n`, or `None` if that leaves `0..=len`.
#[inline]
fn offset(pos: usize, n: isize, len: usize) -> Option<usize> {
    let target = if n >= 0 {
        pos.checked_add(n as usize)
    } else {
        pos.checked_sub(n.unsigned_abs())
    };
    target.filter(|&target| target <= len)
}

#[inline]
fn offset_or_panic(pos: usize, n: isize, len: usize) -> usize {
    match offset(pos, n, len) {
        Some(target) => target,
        None => {
            panic!("cursor offset {} from position {} leaves the buffer of len {}",
                   n,
                   pos,
                   len)
        }
    }
}

impl<'a, T: 'a, S: Storage<Item = T> + 'a> Cursor<'a, T, S> {
    #[inline]
    pub(super) fn new(ring: &'a RingBuffer<T, S>, pos: usize) -> Self {
        Cursor { ring, pos }
    }

    /// The logical position, `len()` at the end.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns `true` at the past-the-end position.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.pos == self.ring.len()
    }

    /// The element under the cursor, `None` at the end.
    #[inline]
    pub fn get(&self) -> Option<&'a T> {
        self.ring.get(self.pos)
    }

    /// The element `n` positions away from the cursor, `None` if there is no
    /// element there.
    #[inline]
    pub fn peek(&self, n: isize) -> Option<&'a T> {
        offset(self.pos, n, self.ring.len()).and_then(|pos| self.ring.get(pos))
    }

    /// Moves to the next position.
    ///
    /// # Panics
    ///
    /// Panics at the end position.
    #[inline]
    pub fn move_next(&mut self) {
        assert!(self.pos < self.ring.len(), "cursor moved past the end");
        self.pos += 1;
    }

    /// Moves to the previous position.
    ///
    /// # Panics
    ///
    /// Panics at position 0.
    #[inline]
    pub fn move_prev(&mut self) {
        assert!(self.pos > 0, "cursor moved before the front");
        self.pos -= 1;
    }
}

impl<'a, T, S: Storage<Item = T>> Clone for Cursor<'a, T, S> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T, S: Storage<Item = T>> Copy for Cursor<'a, T, S> {}

/// Moves the cursor by `n` positions.
///
/// # Panics
///
/// Panics if the target is outside `0..=len()`.
impl<'a, T, S: Storage<Item = T>> Add<isize> for Cursor<'a, T, S> {
    type Output = Cursor<'a, T, S>;

    #[inline]
    fn add(mut self, n: isize) -> Self {
        self += n;
        self
    }
}

impl<'a, T, S: Storage<Item = T>> Sub<isize> for Cursor<'a, T, S> {
    type Output = Cursor<'a, T, S>;

    #[inline]
    fn sub(mut self, n: isize) -> Self {
        self -= n;
        self
    }
}

impl<'a, T, S: Storage<Item = T>> AddAssign<isize> for Cursor<'a, T, S> {
    #[inline]
    fn add_assign(&mut self, n: isize) {
        self.pos = offset_or_panic(self.pos, n, self.ring.len());
    }
}

impl<'a, T, S: Storage<Item = T>> SubAssign<isize> for Cursor<'a, T, S> {
    #[inline]
    fn sub_assign(&mut self, n: isize) {
        let n = match n.checked_neg() {
            Some(n) => n,
            None => panic!("cursor offset {} overflows", n),
        };
        self.pos = offset_or_panic(self.pos, n, self.ring.len());
    }
}

/// Logical distance between two cursors of the same buffer.
///
/// # Panics
///
/// Panics if the cursors belong to different buffers.
impl<'a, T, S: Storage<Item = T>> Sub for Cursor<'a, T, S> {
    type Output = isize;

    #[inline]
    fn sub(self, other: Self) -> isize {
        assert!(ptr::eq(self.ring, other.ring), "cursors of different buffers");
        self.pos as isize - other.pos as isize
    }
}

impl<'a, T, S: Storage<Item = T>> PartialEq for Cursor<'a, T, S> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.ring, other.ring) && self.pos == other.pos
    }
}

impl<'a, T, S: Storage<Item = T>> Eq for Cursor<'a, T, S> {}

/// Cursors of different buffers are unordered.
impl<'a, T, S: Storage<Item = T>> PartialOrd for Cursor<'a, T, S> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if ptr::eq(self.ring, other.ring) {
            Some(self.pos.cmp(&other.pos))
        } else {
            None
        }
    }
}

impl<'a, T: fmt::Debug, S: Storage<Item = T>> fmt::Debug for Cursor<'a, T, S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("position", &self.pos)
            .field("element", &self.get())
            .finish()
    }
}

impl<'a, T: 'a, S: Storage<Item = T> + 'a> CursorMut<'a, T, S> {
    #[inline]
    pub(super) fn new(ring: &'a mut RingBuffer<T, S>, pos: usize) -> Self {
        CursorMut { ring, pos }
    }

    /// The logical position, `len()` at the end.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns `true` at the past-the-end position.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.pos == self.ring.len()
    }

    /// The element under the cursor, `None` at the end.
    #[inline]
    pub fn get(&self) -> Option<&T> {
        self.ring.get(self.pos)
    }

    /// The element under the cursor, mutably. `None` at the end.
    #[inline]
    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.ring.get_mut(self.pos)
    }

    /// Moves to the next position.
    ///
    /// # Panics
    ///
    /// Panics at the end position.
    #[inline]
    pub fn move_next(&mut self) {
        assert!(self.pos < self.ring.len(), "cursor moved past the end");
        self.pos += 1;
    }

    /// Moves to the previous position.
    ///
    /// # Panics
    ///
    /// Panics at position 0.
    #[inline]
    pub fn move_prev(&mut self) {
        assert!(self.pos > 0, "cursor moved before the front");
        self.pos -= 1;
    }

    /// Moves to logical position `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is greater than `len()`.
    #[inline]
    pub fn seek(&mut self, pos: usize) {
        assert!(pos <= self.ring.len(),
                "cursor position {} out of range 0..={}",
                pos,
                self.ring.len());
        self.pos = pos;
    }

    /// A read-only cursor at the same position.
    #[inline]
    pub fn as_cursor(&self) -> Cursor<'_, T, S> {
        Cursor::new(self.ring, self.pos)
    }
}

impl<'a, T: fmt::Debug, S: Storage<Item = T>> fmt::Debug for CursorMut<'a, T, S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("CursorMut")
            .field("position", &self.pos)
            .field("element", &self.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::{InlineRingBuffer, RingBuffer};

    fn wrapped() -> RingBuffer<i32> {
        let mut buf = RingBuffer::with_capacity(5);
        buf.extend([0, 0, 0, 1, 2, 3, 4, 5]);
        buf
    }

    #[test]
    fn cursor_walks_across_the_wrap() {
        let buf = wrapped();
        assert!(!buf.is_linearized());
        let mut cursor = buf.cursor_front();
        let mut seen = Vec::new();
        while let Some(x) = cursor.get() {
            seen.push(*x);
            cursor.move_next();
        }
        assert_eq!(seen, [1, 2, 3, 4, 5]);
        assert!(cursor.is_end());
        assert_eq!(cursor, buf.cursor_end());

        cursor.move_prev();
        assert_eq!(cursor, buf.cursor_back());
        assert_eq!(cursor.get(), Some(&5));
    }

    #[test]
    fn cursor_arithmetic() {
        let buf = wrapped();
        let front = buf.cursor_front();
        let mut c = front + 3;
        assert_eq!(c.get(), Some(&4));
        assert_eq!(c.peek(-3), Some(&1));
        assert_eq!(c.peek(2), None);
        assert_eq!(c.peek(-4), None);
        c -= 2;
        assert_eq!(c.position(), 1);
        c += -1;
        assert_eq!(c, front);
        assert_eq!(buf.cursor_end() - c, 5);
        assert_eq!(c - buf.cursor_end(), -5);
        assert!(c < buf.cursor_end());
        assert_eq!((buf.cursor_end() - 5).get(), Some(&1));
    }

    #[test]
    fn cursors_of_different_buffers_are_unordered() {
        let a = wrapped();
        let b = wrapped();
        assert_ne!(a.cursor_front(), b.cursor_front());
        assert_eq!(a.cursor_front().partial_cmp(&b.cursor_front()), None);
    }

    #[test]
    #[should_panic(expected = "cursor moved past the end")]
    fn cursor_past_end_panics() {
        let buf = wrapped();
        buf.cursor_end().move_next();
    }

    #[test]
    #[should_panic(expected = "leaves the buffer")]
    fn cursor_offset_before_front_panics() {
        let buf = wrapped();
        let _ = buf.cursor_front() - 1;
    }

    #[test]
    fn empty_buffer_cursors_are_at_the_end() {
        let buf: InlineRingBuffer<u8, 2> = InlineRingBuffer::new();
        assert!(buf.cursor_front().is_end());
        assert!(buf.cursor_back().is_end());
        assert_eq!(buf.cursor_front(), buf.cursor_end());
    }

    #[test]
    fn cursor_mut_edits_in_place() {
        let mut buf = wrapped();
        {
            let mut cursor = buf.cursor_front_mut();
            while let Some(x) = cursor.get_mut() {
                *x *= 10;
                cursor.move_next();
            }
            cursor.seek(1);
            assert_eq!(cursor.as_cursor().peek(1), Some(&30));
            cursor.move_prev();
            assert_eq!(cursor.get(), Some(&10));
        }
        assert_eq!(buf, [10, 20, 30, 40, 50]);
        let mut cursor = buf.cursor_at_mut(4);
        *cursor.get_mut().unwrap() = 0;
        assert_eq!(buf.back(), Some(&0));
    }
}
