use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter;
use core::ops::{Index, IndexMut};

use super::*;

/// Clones the elements into storage of the same capacity, keeping the
/// physical alignment of the source.
impl<T: Clone, S: Storage<Item = T>> Clone for RingBuffer<T, S> {
    fn clone(&self) -> RingBuffer<T, S> {
        let mut buf = RingBuffer::from_storage(self.xs.alloc_like());
        buf.head = self.head;
        for element in self.iter() {
            let slot = buf.to_physical_idx(buf.len);
            unsafe { buf.buffer_write(slot, element.clone()) };
            buf.len += 1;
        }
        buf
    }
}

impl<T, S: Storage<Item = T>> Drop for RingBuffer<T, S> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T, S: Storage<Item = T>> Default for RingBuffer<T, S> {
    #[inline]
    fn default() -> RingBuffer<T, S> {
        RingBuffer::new()
    }
}

// Compares two pairs of slices holding the same number of elements.
fn eq_split<T, U>((sa, sb): (&[T], &[T]), (oa, ob): (&[U], &[U])) -> bool
    where T: PartialEq<U>
{
    if sa.len() == oa.len() {
        sa == oa && sb == ob
    } else if sa.len() < oa.len() {
        // Always divisible in three sections, for example:
        // self:  [a b c|d e f]
        // other: [0 1 2 3|4 5]
        // front = 3, mid = 1,
        // [a b c] == [0 1 2] && [d] == [3] && [e f] == [4 5]
        let front = sa.len();
        let mid = oa.len() - front;

        let (oa_front, oa_mid) = oa.split_at(front);
        let (sb_mid, sb_back) = sb.split_at(mid);
        debug_assert_eq!(sa.len(), oa_front.len());
        debug_assert_eq!(sb_mid.len(), oa_mid.len());
        debug_assert_eq!(sb_back.len(), ob.len());
        sa == oa_front && sb_mid == oa_mid && sb_back == ob
    } else {
        let front = oa.len();
        let mid = sa.len() - front;

        let (sa_front, sa_mid) = sa.split_at(front);
        let (ob_mid, ob_back) = ob.split_at(mid);
        debug_assert_eq!(sa_front.len(), oa.len());
        debug_assert_eq!(sa_mid.len(), ob_mid.len());
        debug_assert_eq!(sb.len(), ob_back.len());
        sa_front == oa && sa_mid == ob_mid && sb == ob_back
    }
}

/// Buffers are equal when they hold equal elements in the same logical
/// order, whatever their capacity, storage or physical alignment.
impl<T, U, S1, S2> PartialEq<RingBuffer<U, S2>> for RingBuffer<T, S1>
    where T: PartialEq<U>,
          S1: Storage<Item = T>,
          S2: Storage<Item = U>
{
    fn eq(&self, other: &RingBuffer<U, S2>) -> bool {
        self.len() == other.len() && eq_split(self.as_slices(), other.as_slices())
    }
}

impl<T: Eq, S: Storage<Item = T>> Eq for RingBuffer<T, S> {}

impl<T, U, S: Storage<Item = T>> PartialEq<[U]> for RingBuffer<T, S>
    where T: PartialEq<U>
{
    fn eq(&self, other: &[U]) -> bool {
        if self.len() != other.len() {
            return false;
        }
        let (a, b) = self.as_slices();
        let (oa, ob) = other.split_at(a.len());
        a == oa && b == ob
    }
}

impl<'a, T, U, S: Storage<Item = T>> PartialEq<&'a [U]> for RingBuffer<T, S>
    where T: PartialEq<U>
{
    #[inline]
    fn eq(&self, other: &&'a [U]) -> bool {
        *self == **other
    }
}

impl<T, U, S: Storage<Item = T>> PartialEq<Vec<U>> for RingBuffer<T, S>
    where T: PartialEq<U>
{
    #[inline]
    fn eq(&self, other: &Vec<U>) -> bool {
        *self == other[..]
    }
}

impl<T, U, S: Storage<Item = T>, const M: usize> PartialEq<[U; M]> for RingBuffer<T, S>
    where T: PartialEq<U>
{
    #[inline]
    fn eq(&self, other: &[U; M]) -> bool {
        *self == other[..]
    }
}

impl<'a, T, U, S: Storage<Item = T>, const M: usize> PartialEq<&'a [U; M]> for RingBuffer<T, S>
    where T: PartialEq<U>
{
    #[inline]
    fn eq(&self, other: &&'a [U; M]) -> bool {
        *self == other[..]
    }
}

impl<T: PartialOrd, S: Storage<Item = T>> PartialOrd for RingBuffer<T, S> {
    fn partial_cmp(&self, other: &RingBuffer<T, S>) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord, S: Storage<Item = T>> Ord for RingBuffer<T, S> {
    #[inline]
    fn cmp(&self, other: &RingBuffer<T, S>) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash, S: Storage<Item = T>> Hash for RingBuffer<T, S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // one element at a time, so the wrap point never shows in the hash
        self.len().hash(state);
        self.iter().for_each(|element| element.hash(state));
    }
}

impl<T, S: Storage<Item = T>> Index<usize> for RingBuffer<T, S> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Some(element) => element,
            None => {
                panic!("index out of bounds: the len is {} but the index is {}",
                       self.len(),
                       index)
            }
        }
    }
}

impl<T, S: Storage<Item = T>> IndexMut<usize> for RingBuffer<T, S> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len();
        match self.get_mut(index) {
            Some(element) => element,
            None => {
                panic!("index out of bounds: the len is {} but the index is {}",
                       len,
                       index)
            }
        }
    }
}

/// Takes ownership of the elements; the capacity is exactly `vec.len()`.
impl<T> From<Vec<T>> for RingBuffer<T> {
    fn from(vec: Vec<T>) -> RingBuffer<T> {
        let len = vec.len();
        let mut buf = RingBuffer::from_storage(HeapStorage::from_vec(vec));
        buf.len = len;
        buf
    }
}

impl<T, const M: usize> From<[T; M]> for RingBuffer<T> {
    #[inline]
    fn from(array: [T; M]) -> RingBuffer<T> {
        RingBuffer::from(Vec::from(array))
    }
}

/// Collects into a full buffer whose capacity is the number of items.
impl<T> iter::FromIterator<T> for RingBuffer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        RingBuffer::from(iter.into_iter().collect::<Vec<T>>())
    }
}

/// Collects into an inline buffer, keeping the last `N` items.
impl<T, const N: usize> iter::FromIterator<T> for RingBuffer<T, InlineStorage<T, N>> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut buf = RingBuffer::new();
        buf.extend(iter);
        buf
    }
}

#[cfg(feature = "use_generic_array")]
impl<T, N> iter::FromIterator<T> for RingBuffer<T, generic_array::GenericArray<MaybeUninit<T>, N>>
    where N: generic_array::ArrayLength<MaybeUninit<T>>
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut buf = RingBuffer::new();
        buf.extend(iter);
        buf
    }
}

impl<T, S: Storage<Item = T>> IntoIterator for RingBuffer<T, S> {
    type Item = T;
    type IntoIter = IntoIter<T, S>;

    fn into_iter(self) -> IntoIter<T, S> {
        IntoIter { inner: self }
    }
}

impl<'a, T, S: Storage<Item = T>> IntoIterator for &'a RingBuffer<T, S> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T, S: Storage<Item = T>> IntoIterator for &'a mut RingBuffer<T, S> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

/// Extend the `RingBuffer` with an iterator.
///
/// Every item is pushed to the back; once the buffer is full each push
/// evicts the oldest element.
impl<T, S: Storage<Item = T>> Extend<T> for RingBuffer<T, S> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            let _ = self.push_back(element);
        }
    }
}

impl<'a, T: Copy + 'a, S: Storage<Item = T>> Extend<&'a T> for RingBuffer<T, S> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().cloned());
    }
}

impl<T: fmt::Debug, S: Storage<Item = T>> fmt::Debug for RingBuffer<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self).finish()
    }
}
