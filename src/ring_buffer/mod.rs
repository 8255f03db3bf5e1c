use core::cmp;
use core::iter;
use core::marker::PhantomData;
use core::mem::MaybeUninit;
use core::ptr::{self, NonNull};

pub use odds::IndexRange as RangeArgument;

use crate::error::{AllocError, CapacityError, EmptyBufferError};
use crate::storage::{Allocate, HeapStorage, InlineStorage, Storage};

mod cursor;
mod insert;
mod internal;
mod iterator_impls;
mod linearize;
mod trait_impls;

pub use self::cursor::{Cursor, CursorMut};

/// A bounded double-ended circular buffer.
///
/// The buffer owns `capacity()` slots and keeps its elements in one logical
/// run starting at the oldest element. The run may wrap past the end of the
/// storage; indexing, iteration and the cursors all address elements by their
/// logical position, so the wrap is never observable except through
/// [`array_one`](#method.array_one) and [`array_two`](#method.array_two).
///
/// The "default" usage of this type as a queue is to use `push_back` to add to
/// the queue, and `pop_front` to remove from the queue. When the buffer is
/// full `push_back` evicts the oldest element; `try_push_back` refuses
/// instead.
///
/// The storage is heap allocated by default. Use [`InlineRingBuffer`] for a
/// fixed capacity buffer stored inline.
///
/// [`InlineRingBuffer`]: type.InlineRingBuffer.html
pub struct RingBuffer<T, S: Storage<Item = T> = HeapStorage<T>> {
    xs: S,
    // physical slot of the oldest element
    head: usize,
    len: usize,
    marker: PhantomData<T>,
}

/// A fixed capacity `RingBuffer` holding its `N` slots inline.
///
/// It can be stored directly on the stack if needed. Re-capacity and resize
/// are not available on it.
pub type InlineRingBuffer<T, const N: usize> = RingBuffer<T, InlineStorage<T, N>>;

/// A fixed capacity `RingBuffer` holding its slots in a `GenericArray`.
#[cfg(feature = "use_generic_array")]
pub type GenericRingBuffer<T, N> = RingBuffer<T, generic_array::GenericArray<MaybeUninit<T>, N>>;

/// `RingBuffer` iterator
#[must_use = "iterator adaptors are lazy and do nothing unless consumed"]
pub struct Iter<'a, T: 'a> {
    ring: &'a [MaybeUninit<T>],
    head: usize,
    // logical positions, `front..back` not yet yielded
    front: usize,
    back: usize,
}

/// `RingBuffer` mutable iterator
#[must_use = "iterator adaptors are lazy and do nothing unless consumed"]
pub struct IterMut<'a, T: 'a> {
    ring: NonNull<T>,
    capacity: usize,
    head: usize,
    front: usize,
    back: usize,
    marker: PhantomData<&'a mut T>,
}

/// A by-value `RingBuffer` iterator
#[must_use = "iterator adaptors are lazy and do nothing unless consumed"]
pub struct IntoIter<T, S: Storage<Item = T> = HeapStorage<T>> {
    inner: RingBuffer<T, S>,
}

/// A draining `RingBuffer` iterator
///
/// While it lives the buffer only owns the elements before the drained range;
/// the elements after it are moved back into place when the `Drain` is
/// dropped.
pub struct Drain<'a, T: 'a, S: Storage<Item = T> + 'a = HeapStorage<T>> {
    ring: NonNull<RingBuffer<T, S>>,
    // logical position of the first drained element
    drain_start: usize,
    drain_len: usize,
    // offset into the drained run of the next element from the front
    idx: usize,
    remaining: usize,
    tail_len: usize,
    marker: PhantomData<&'a mut RingBuffer<T, S>>,
}

impl<T, S: Storage<Item = T>> RingBuffer<T, S> {
    /// Creates an empty `RingBuffer`.
    ///
    /// A heap backed buffer starts out with no capacity; an inline buffer
    /// has all of its `N` slots available.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_buffer::{InlineRingBuffer, RingBuffer};
    ///
    /// let heap: RingBuffer<usize> = RingBuffer::new();
    /// assert_eq!(heap.capacity(), 0);
    ///
    /// let inline: InlineRingBuffer<usize, 3> = InlineRingBuffer::new();
    /// assert_eq!(inline.capacity(), 3);
    /// ```
    #[inline]
    pub fn new() -> RingBuffer<T, S> {
        RingBuffer::from_storage(S::empty())
    }

    #[inline]
    fn from_storage(xs: S) -> RingBuffer<T, S> {
        RingBuffer {
            xs,
            head: 0,
            len: 0,
            marker: PhantomData,
        }
    }

    /// Return the capacity of the `RingBuffer`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_buffer::RingBuffer;
    ///
    /// let buf: RingBuffer<usize> = RingBuffer::with_capacity(4);
    /// assert_eq!(buf.capacity(), 4);
    /// ```
    #[inline]
    pub fn capacity(&self) -> usize {
        self.xs.capacity()
    }

    /// Returns the number of elements in the `RingBuffer`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_buffer::RingBuffer;
    ///
    /// let mut v: RingBuffer<_> = RingBuffer::with_capacity(4);
    /// assert_eq!(v.len(), 0);
    /// v.push_back(1);
    /// assert_eq!(v.len(), 1);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the buffer contains no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if the buffer is full.
    ///
    /// A buffer without capacity is always full.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_buffer::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = RingBuffer::with_capacity(1);
    ///
    /// assert!(!buf.is_full());
    ///
    /// buf.push_back(1);
    ///
    /// assert!(buf.is_full());
    /// ```
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Returns the number of free slots, `capacity() - len()`.
    #[inline]
    pub fn available(&self) -> usize {
        self.capacity() - self.len
    }

    /// Retrieves an element in the `RingBuffer` by index.
    ///
    /// Element at index 0 is the oldest element.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_buffer::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = RingBuffer::with_capacity(4);
    /// buf.push_back(3);
    /// buf.push_back(4);
    /// buf.push_back(5);
    /// assert_eq!(buf.get(1), Some(&4));
    /// assert_eq!(buf.get(3), None);
    /// ```
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index < self.len {
            unsafe { Some(self.get_unchecked(index)) }
        } else {
            None
        }
    }

    /// Retrieves an element in the `RingBuffer` mutably by index.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_buffer::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = RingBuffer::with_capacity(4);
    /// buf.push_back(3);
    /// buf.push_back(4);
    /// if let Some(elem) = buf.get_mut(1) {
    ///     *elem = 7;
    /// }
    ///
    /// assert_eq!(buf[1], 7);
    /// ```
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index < self.len {
            unsafe { Some(self.get_unchecked_mut(index)) }
        } else {
            None
        }
    }

    /// Retrieves an element by index without bounds checking.
    ///
    /// # Safety
    ///
    /// `index` must be less than `len()`. This is only checked in debug
    /// builds.
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len,
                      "index out of bounds: the len is {} but the index is {}",
                      self.len,
                      index);
        &*self.ptr().add(self.to_physical_idx(index))
    }

    /// Retrieves an element mutably by index without bounds checking.
    ///
    /// # Safety
    ///
    /// `index` must be less than `len()`. This is only checked in debug
    /// builds.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len,
                      "index out of bounds: the len is {} but the index is {}",
                      self.len,
                      index);
        let idx = self.to_physical_idx(index);
        &mut *self.ptr_mut().add(idx)
    }

    /// Provides a reference to the oldest element, or `None` if the buffer is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_buffer::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = RingBuffer::with_capacity(3);
    /// assert_eq!(buf.front(), None);
    /// buf.push_back(1);
    /// buf.push_back(2);
    /// assert_eq!(buf.front(), Some(&1));
    /// ```
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    /// Provides a mutable reference to the oldest element, or `None` if the
    /// buffer is empty.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.get_mut(0)
    }

    /// Provides a reference to the newest element, or `None` if the buffer is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_buffer::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = RingBuffer::with_capacity(3);
    /// assert_eq!(buf.back(), None);
    /// buf.push_back(1);
    /// buf.push_back(2);
    /// assert_eq!(buf.back(), Some(&2));
    /// ```
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|idx| self.get(idx))
    }

    /// Provides a mutable reference to the newest element, or `None` if the
    /// buffer is empty.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.len.checked_sub(1).and_then(move |idx| self.get_mut(idx))
    }

    /// Swaps elements at indices `i` and `j`.
    ///
    /// `i` and `j` may be equal.
    ///
    /// # Panics
    ///
    /// Panics if there is no element with either index.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_buffer::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = RingBuffer::with_capacity(4);
    /// buf.push_back(3);
    /// buf.push_back(4);
    /// buf.push_back(5);
    /// buf.swap(0, 2);
    /// assert_eq!(buf[0], 5);
    /// assert_eq!(buf[2], 3);
    /// ```
    #[inline]
    pub fn swap(&mut self, i: usize, j: usize) {
        assert!(i < self.len);
        assert!(j < self.len);
        let ri = self.to_physical_idx(i);
        let rj = self.to_physical_idx(j);
        unsafe {
            let base = self.ptr_mut();
            ptr::swap(base.add(ri), base.add(rj))
        }
    }

    /// Returns `true` if the `RingBuffer` contains an element equal to the
    /// given value.
    pub fn contains(&self, x: &T) -> bool
        where T: PartialEq<T>
    {
        let (a, b) = self.as_slices();
        a.contains(x) || b.contains(x)
    }

    /// Returns a front-to-back iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_buffer::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = RingBuffer::with_capacity(3);
    /// buf.push_back(5);
    /// buf.push_back(3);
    /// buf.push_back(4);
    /// buf.push_back(6);
    /// let b: &[_] = &[&3, &4, &6];
    /// let c: Vec<&i32> = buf.iter().collect();
    /// assert_eq!(&c[..], b);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            ring: unsafe { self.buffer_as_slice() },
            head: self.head,
            front: 0,
            back: self.len,
        }
    }

    /// Returns a front-to-back iterator that returns mutable references.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_buffer::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = RingBuffer::with_capacity(3);
    /// buf.push_back(5);
    /// buf.push_back(3);
    /// buf.push_back(4);
    /// for num in buf.iter_mut() {
    ///     *num = *num - 2;
    /// }
    /// assert_eq!(buf, [3, 1, 2]);
    /// ```
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let capacity = self.capacity();
        IterMut {
            ring: unsafe { NonNull::new_unchecked(self.ptr_mut()) },
            capacity,
            head: self.head,
            front: 0,
            back: self.len,
            marker: PhantomData,
        }
    }

    /// Returns a pair of slices which contain, in order, the contents of the
    /// `RingBuffer`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_buffer::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = RingBuffer::with_capacity(5);
    ///
    /// buf.push_back(0);
    /// buf.push_back(1);
    /// buf.push_back(2);
    ///
    /// assert_eq!(buf.as_slices(), (&[0, 1, 2][..], &[][..]));
    ///
    /// buf.push_front(10);
    /// buf.push_front(9);
    ///
    /// assert_eq!(buf.as_slices(), (&[9, 10][..], &[0, 1, 2][..]));
    /// ```
    #[inline]
    pub fn as_slices(&self) -> (&[T], &[T]) {
        let (a, b) = self.physical_ranges(0, self.len);
        unsafe { (self.buffer_range(a), self.buffer_range(b)) }
    }

    /// Returns a pair of mutable slices which contain, in order, the contents
    /// of the `RingBuffer`.
    #[inline]
    pub fn as_mut_slices(&mut self) -> (&mut [T], &mut [T]) {
        let (a, b) = self.physical_ranges(0, self.len);
        unsafe {
            let base = self.ptr_mut();
            (core::slice::from_raw_parts_mut(base.add(a.start), a.len()),
             core::slice::from_raw_parts_mut(base.add(b.start), b.len()))
        }
    }

    /// The first contiguous run of elements, starting at the oldest one.
    ///
    /// It holds every element when the buffer is linearized.
    #[inline]
    pub fn array_one(&self) -> &[T] {
        self.as_slices().0
    }

    /// The second contiguous run of elements, starting at the first slot of
    /// the storage. Empty unless the elements wrap past the storage end.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_buffer::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = RingBuffer::with_capacity(3);
    /// buf.extend([1, 2, 3, 4]);
    /// assert_eq!(buf.array_one(), &[2, 3]);
    /// assert_eq!(buf.array_two(), &[4]);
    /// ```
    #[inline]
    pub fn array_two(&self) -> &[T] {
        self.as_slices().1
    }

    /// Mutable form of [`array_one`](#method.array_one).
    #[inline]
    pub fn array_one_mut(&mut self) -> &mut [T] {
        self.as_mut_slices().0
    }

    /// Mutable form of [`array_two`](#method.array_two).
    #[inline]
    pub fn array_two_mut(&mut self) -> &mut [T] {
        self.as_mut_slices().1
    }

    /// Adds an element to the back of the buffer, evicting the oldest element
    /// if the buffer is full.
    ///
    /// Returns `None` if the buffer still had room, or `Some(existing)` where
    /// `existing` is the evicted front element. A buffer without capacity
    /// hands `element` itself back.
    ///
    /// # Examples
    ///
    /// ```text
    /// [_, _, _] <-(+)- 1 => [_, _, 1] -> None
    /// [_, _, 1] <-(+)- 2 => [_, 1, 2] -> None
    /// [_, 1, 2] <-(+)- 3 => [1, 2, 3] -> None
    /// [1, 2, 3] <-(+)- 4 => [2, 3, 4] -> Some(1)
    /// ```
    ///
    /// ```
    /// use ring_buffer::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = RingBuffer::with_capacity(2);
    /// buf.push_back(1);
    /// buf.push_back(2);
    /// let overflow = buf.push_back(3);
    ///
    /// assert_eq!(buf.back(), Some(&3));
    /// assert_eq!(overflow, Some(1));
    /// ```
    pub fn push_back(&mut self, element: T) -> Option<T> {
        if self.capacity() == 0 {
            return Some(element);
        }
        if self.is_full() {
            // the slot past the newest element is the oldest element's slot
            let slot = self.head;
            unsafe {
                let existing = self.buffer_read(slot);
                self.buffer_write(slot, element);
                self.head = self.to_physical_idx(1);
                Some(existing)
            }
        } else {
            unsafe {
                let slot = self.to_physical_idx(self.len);
                self.buffer_write(slot, element);
            }
            self.len += 1;
            None
        }
    }

    /// Adds an element to the front of the buffer, evicting the newest element
    /// if the buffer is full.
    ///
    /// Returns `None` if the buffer still had room, or `Some(existing)` where
    /// `existing` is the evicted back element.
    ///
    /// # Examples
    ///
    /// ```text
    /// 1 -(+)-> [_, _, _] => [1, _, _] -> None
    /// 2 -(+)-> [1, _, _] => [2, 1, _] -> None
    /// 3 -(+)-> [2, 1, _] => [3, 2, 1] -> None
    /// 4 -(+)-> [3, 2, 1] => [4, 3, 2] -> Some(1)
    /// ```
    ///
    /// ```
    /// use ring_buffer::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = RingBuffer::with_capacity(2);
    /// buf.push_front(1);
    /// buf.push_front(2);
    /// let overflow = buf.push_front(3);
    ///
    /// assert_eq!(buf.front(), Some(&3));
    /// assert_eq!(overflow, Some(1));
    /// ```
    pub fn push_front(&mut self, element: T) -> Option<T> {
        let capacity = self.capacity();
        if capacity == 0 {
            return Some(element);
        }
        let slot = crate::utils::wrap_sub(self.head, 1, capacity);
        if self.is_full() {
            // the slot before the oldest element holds the newest one
            unsafe {
                let existing = self.buffer_read(slot);
                self.buffer_write(slot, element);
                self.head = slot;
                Some(existing)
            }
        } else {
            unsafe { self.buffer_write(slot, element) };
            self.head = slot;
            self.len += 1;
            None
        }
    }

    /// Adds an element to the back of the buffer if there is room for it.
    ///
    /// # Errors
    ///
    /// Returns `Err(CapacityError { element })` if the buffer is full; the
    /// buffer is left untouched.
    ///
    /// # Examples
    ///
    /// ```text
    /// [_, _, _] <-(+)- 1 => [_, _, 1] -> Ok(())
    /// [_, _, 1] <-(+)- 2 => [_, 1, 2] -> Ok(())
    /// [_, 1, 2] <-(+)- 3 => [1, 2, 3] -> Ok(())
    /// [1, 2, 3] <-(+)- 4 => [1, 2, 3] -> Err(CapacityError { element: 4 })
    /// ```
    ///
    /// ```
    /// use ring_buffer::{CapacityError, RingBuffer};
    ///
    /// let mut buf: RingBuffer<_> = RingBuffer::with_capacity(2);
    /// buf.try_push_back(1).unwrap();
    /// buf.try_push_back(2).unwrap();
    /// let overflow = buf.try_push_back(3);
    ///
    /// assert_eq!(buf.back(), Some(&2));
    /// assert_eq!(overflow, Err(CapacityError { element: 3 }));
    /// ```
    pub fn try_push_back(&mut self, element: T) -> Result<(), CapacityError<T>> {
        if self.is_full() {
            return Err(CapacityError::new(element));
        }
        let _ = self.push_back(element);
        Ok(())
    }

    /// Adds an element to the front of the buffer if there is room for it.
    ///
    /// # Errors
    ///
    /// Returns `Err(CapacityError { element })` if the buffer is full; the
    /// buffer is left untouched.
    pub fn try_push_front(&mut self, element: T) -> Result<(), CapacityError<T>> {
        if self.is_full() {
            return Err(CapacityError::new(element));
        }
        let _ = self.push_front(element);
        Ok(())
    }

    /// Removes the oldest element and returns it, or `None` if the buffer is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_buffer::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = RingBuffer::with_capacity(3);
    /// buf.push_back(1);
    /// buf.push_back(2);
    ///
    /// assert_eq!(buf.pop_front(), Some(1));
    /// assert_eq!(buf.pop_front(), Some(2));
    /// assert_eq!(buf.pop_front(), None);
    /// ```
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        unsafe {
            let head = self.head;
            let element = self.buffer_read(head);
            self.head = self.to_physical_idx(1);
            self.len -= 1;
            Some(element)
        }
    }

    /// Removes the newest element and returns it, or `None` if the buffer is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_buffer::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = RingBuffer::with_capacity(3);
    /// assert_eq!(buf.pop_back(), None);
    /// buf.push_back(1);
    /// buf.push_back(3);
    /// assert_eq!(buf.pop_back(), Some(3));
    /// ```
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        unsafe {
            let slot = self.to_physical_idx(self.len - 1);
            let element = self.buffer_read(slot);
            self.len -= 1;
            Some(element)
        }
    }

    /// Removes the oldest element and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyBufferError`] if the buffer is empty.
    ///
    /// [`EmptyBufferError`]: struct.EmptyBufferError.html
    #[inline]
    pub fn try_pop_front(&mut self) -> Result<T, EmptyBufferError> {
        self.pop_front().ok_or(EmptyBufferError)
    }

    /// Removes the newest element and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyBufferError`] if the buffer is empty.
    ///
    /// [`EmptyBufferError`]: struct.EmptyBufferError.html
    #[inline]
    pub fn try_pop_back(&mut self) -> Result<T, EmptyBufferError> {
        self.pop_back().ok_or(EmptyBufferError)
    }

    /// Moves up to `n` of the oldest elements into `sink`, oldest first.
    ///
    /// Returns the number of elements moved, which is `n` clamped to `len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_buffer::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = (0..6).collect();
    /// let mut out = Vec::new();
    ///
    /// assert_eq!(buf.pop_front_into(4, &mut out), 4);
    /// assert_eq!(out, [0, 1, 2, 3]);
    /// assert_eq!(buf.pop_front_into(4, &mut out), 2);
    /// assert_eq!(out, [0, 1, 2, 3, 4, 5]);
    /// ```
    pub fn pop_front_into<E>(&mut self, n: usize, sink: &mut E) -> usize
        where E: Extend<T>
    {
        let n = cmp::min(n, self.len);
        sink.extend(self.drain(..n));
        n
    }

    /// Moves up to `n` of the newest elements into `sink`, in logical order
    /// (the oldest of the removed run first).
    ///
    /// Returns the number of elements moved, which is `n` clamped to `len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_buffer::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = (0..6).collect();
    /// let mut out = Vec::new();
    ///
    /// assert_eq!(buf.pop_back_into(2, &mut out), 2);
    /// assert_eq!(out, [4, 5]);
    /// assert_eq!(buf, [0, 1, 2, 3]);
    /// ```
    pub fn pop_back_into<E>(&mut self, n: usize, sink: &mut E) -> usize
        where E: Extend<T>
    {
        let len = self.len;
        let n = cmp::min(n, len);
        sink.extend(self.drain(len - n..));
        n
    }

    /// Create a draining iterator that removes the specified range in the
    /// `RingBuffer` and yields the removed items.
    ///
    /// Note 1: The element range is removed even if the iterator is not
    /// consumed until the end.
    ///
    /// Note 2: It is unspecified how many elements are removed from the buffer,
    /// if the `Drain` value is not dropped, but the borrow it holds expires
    /// (eg. due to mem::forget).
    ///
    /// # Panics
    ///
    /// Panics if the starting point is greater than the end point or if
    /// the end point is greater than the length of the buffer.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_buffer::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = vec![1, 2, 3].into();
    /// let drain1: Vec<_> = buf.drain(2..).collect();
    /// assert_eq!(drain1, vec![3]);
    ///
    /// // A full range clears all contents
    /// let drain2: Vec<_> = buf.drain(..).collect();
    /// assert_eq!(drain2, vec![1, 2]);
    /// assert!(buf.is_empty());
    /// ```
    pub fn drain<R>(&mut self, range: R) -> Drain<'_, T, S>
        where R: RangeArgument<usize>
    {
        let len = self.len;
        let start = range.start().unwrap_or(0);
        let end = range.end().unwrap_or(len);
        assert!(start <= end, "drain lower bound was too large");
        assert!(end <= len, "drain upper bound was too large");

        // the buffer keeps only the elements before the range until the
        // drain is dropped
        self.len = start;

        Drain {
            ring: NonNull::from(self),
            drain_start: start,
            drain_len: end - start,
            idx: 0,
            remaining: end - start,
            tail_len: len - end,
            marker: PhantomData,
        }
    }

    /// Clears the buffer, removing all values.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_buffer::RingBuffer;
    ///
    /// let mut v: RingBuffer<_> = RingBuffer::with_capacity(4);
    /// v.push_back(1);
    /// v.clear();
    /// assert!(v.is_empty());
    /// assert_eq!(v.capacity(), 4);
    /// ```
    #[inline]
    pub fn clear(&mut self) {
        self.drain(..);
    }

    /// Shortens the buffer to `len` elements, dropping the newest ones.
    ///
    /// Has no effect if the buffer holds `len` elements or fewer.
    pub fn truncate(&mut self, len: usize) {
        if len < self.len {
            self.drain(len..);
        }
    }

    /// Returns a cursor on the oldest element.
    ///
    /// On an empty buffer the cursor is at the end position.
    #[inline]
    pub fn cursor_front(&self) -> Cursor<'_, T, S> {
        Cursor::new(self, 0)
    }

    /// Returns a cursor on the newest element.
    ///
    /// On an empty buffer the cursor is at the end position.
    #[inline]
    pub fn cursor_back(&self) -> Cursor<'_, T, S> {
        Cursor::new(self, self.len.saturating_sub(1))
    }

    /// Returns a cursor at the past-the-end position.
    #[inline]
    pub fn cursor_end(&self) -> Cursor<'_, T, S> {
        Cursor::new(self, self.len)
    }

    /// Returns a cursor at logical position `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is greater than `len()`.
    #[inline]
    pub fn cursor_at(&self, pos: usize) -> Cursor<'_, T, S> {
        assert!(pos <= self.len, "cursor position {} out of range 0..={}", pos, self.len);
        Cursor::new(self, pos)
    }

    /// Returns a mutable cursor on the oldest element.
    #[inline]
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, T, S> {
        CursorMut::new(self, 0)
    }

    /// Returns a mutable cursor at logical position `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is greater than `len()`.
    #[inline]
    pub fn cursor_at_mut(&mut self, pos: usize) -> CursorMut<'_, T, S> {
        assert!(pos <= self.len, "cursor position {} out of range 0..={}", pos, self.len);
        CursorMut::new(self, pos)
    }
}

impl<T, S: Allocate<Item = T>> RingBuffer<T, S> {
    /// Creates an empty `RingBuffer` with room for `capacity` elements.
    ///
    /// # Panics
    ///
    /// Panics if the storage cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_buffer::RingBuffer;
    ///
    /// let buf: RingBuffer<String> = RingBuffer::with_capacity(10);
    /// assert_eq!(buf.capacity(), 10);
    /// assert!(buf.is_empty());
    /// ```
    pub fn with_capacity(capacity: usize) -> RingBuffer<T, S> {
        match RingBuffer::try_with_capacity(capacity) {
            Ok(buf) => buf,
            Err(err) => panic!("ring buffer allocation failed: {}", err),
        }
    }

    /// Creates an empty `RingBuffer` with room for `capacity` elements.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] if the storage cannot be allocated.
    ///
    /// [`AllocError`]: enum.AllocError.html
    pub fn try_with_capacity(capacity: usize) -> Result<RingBuffer<T, S>, AllocError> {
        S::try_allocate(capacity).map(RingBuffer::from_storage)
    }

    /// Creates a buffer with room for `capacity` elements holding `count`
    /// clones of `value`.
    ///
    /// # Panics
    ///
    /// Panics if `count` is greater than `capacity`, or if the storage cannot
    /// be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_buffer::RingBuffer;
    ///
    /// let buf: RingBuffer<_> = RingBuffer::from_elem(4, 2, 'x');
    /// assert_eq!(buf.capacity(), 4);
    /// assert_eq!(buf, ['x', 'x']);
    /// ```
    pub fn from_elem(capacity: usize, count: usize, value: T) -> RingBuffer<T, S>
        where T: Clone
    {
        assert!(count <= capacity,
                "ring buffer size {} can't be greater than capacity {}",
                count,
                capacity);
        let mut buf = RingBuffer::with_capacity(capacity);
        buf.extend(iter::repeat(value).take(count));
        buf
    }

    /// Creates a full buffer of `capacity` clones of `value`.
    #[inline]
    pub fn filled(capacity: usize, value: T) -> RingBuffer<T, S>
        where T: Clone
    {
        RingBuffer::from_elem(capacity, capacity, value)
    }

    /// Drops every element and replaces the storage with `capacity` fresh
    /// slots.
    ///
    /// # Panics
    ///
    /// Panics if the storage cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_buffer::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = vec![1, 2, 3].into();
    /// buf.set_capacity(8);
    /// assert_eq!(buf.capacity(), 8);
    /// assert!(buf.is_empty());
    /// ```
    pub fn set_capacity(&mut self, capacity: usize) {
        if let Err(err) = self.try_set_capacity(capacity) {
            panic!("ring buffer allocation failed: {}", err);
        }
    }

    /// Drops every element and replaces the storage with `capacity` fresh
    /// slots.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] if the storage cannot be allocated, in which case
    /// the buffer is left untouched.
    ///
    /// [`AllocError`]: enum.AllocError.html
    pub fn try_set_capacity(&mut self, capacity: usize) -> Result<(), AllocError> {
        let xs = S::try_allocate(capacity)?;
        tracing::debug!(from = self.capacity(), to = capacity, "ring buffer set_capacity");
        self.clear();
        self.xs = xs;
        self.head = 0;
        Ok(())
    }

    /// Resizes the buffer so that it holds exactly `new_len` elements.
    ///
    /// - Beyond the current capacity the storage is reallocated to exactly
    ///   `new_len` slots, the elements are moved to the start of it in logical
    ///   order and the remaining slots are filled with clones of `value`.
    /// - Below the current capacity the newest elements are dropped, or clones
    ///   of `value` are appended, until `len() == new_len`.
    /// - At the current capacity the buffer is filled up with clones of
    ///   `value`.
    ///
    /// # Panics
    ///
    /// Panics if the storage cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_buffer::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = vec![1, 2, 3].into();
    /// buf.resize(5, 0);
    /// assert_eq!(buf, [1, 2, 3, 0, 0]);
    /// assert_eq!(buf.capacity(), 5);
    ///
    /// buf.resize(2, 0);
    /// assert_eq!(buf, [1, 2]);
    /// assert_eq!(buf.capacity(), 5);
    /// ```
    pub fn resize(&mut self, new_len: usize, value: T)
        where T: Clone
    {
        if let Err(err) = self.try_resize(new_len, value) {
            panic!("ring buffer allocation failed: {}", err);
        }
    }

    /// Resizes the buffer so that it holds exactly `new_len` elements, see
    /// [`resize`](#method.resize).
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] if growing the storage fails, in which case the
    /// buffer is left untouched.
    ///
    /// [`AllocError`]: enum.AllocError.html
    pub fn try_resize(&mut self, new_len: usize, value: T) -> Result<(), AllocError>
        where T: Clone
    {
        let capacity = self.capacity();
        if new_len > capacity {
            let mut xs = S::try_allocate(new_len)?;
            tracing::debug!(from = capacity, to = new_len, "growing ring buffer");
            let len = self.len;
            {
                let (a, b) = self.as_slices();
                let dst = xs.as_mut_ptr();
                unsafe {
                    ptr::copy_nonoverlapping(a.as_ptr(), dst, a.len());
                    ptr::copy_nonoverlapping(b.as_ptr(), dst.add(a.len()), b.len());
                }
            }
            // every element now lives in `xs`; the old slots are dead
            self.len = 0;
            self.xs = xs;
            self.head = 0;
            self.len = len;
        } else if self.len > new_len {
            self.truncate(new_len);
            return Ok(());
        }
        let missing = new_len - self.len;
        self.append(iter::repeat(value).take(missing), missing);
        Ok(())
    }
}

impl<T, const N: usize> RingBuffer<T, InlineStorage<T, N>> {
    /// Creates an inline buffer holding `count` clones of `value`.
    ///
    /// # Panics
    ///
    /// Panics if `count` is greater than `N`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_buffer::InlineRingBuffer;
    ///
    /// let buf: InlineRingBuffer<_, 4> = InlineRingBuffer::repeat(3, 0u8);
    /// assert_eq!(buf, [0, 0, 0]);
    /// assert_eq!(buf.available(), 1);
    /// ```
    pub fn repeat(count: usize, value: T) -> RingBuffer<T, InlineStorage<T, N>>
        where T: Clone
    {
        assert!(count <= N,
                "ring buffer size {} can't be greater than capacity {}",
                count,
                N);
        let mut buf = RingBuffer::new();
        buf.extend(iter::repeat(value).take(count));
        buf
    }
}
