//! Raw slot storage backing a `RingBuffer`.
//!
//! A storage owns `capacity()` slots of possibly uninitialized items. It never
//! constructs or drops an item itself: the buffer decides which slots are
//! live and is responsible for their lifetime.

use alloc::vec::Vec;
use core::alloc::Layout;
use core::mem::MaybeUninit;

use crate::error::AllocError;

/// Trait for the raw storage of a ring buffer.
///
/// # Safety
///
/// Implementors must hand out a pointer to `capacity()` contiguous slots that
/// stays valid, and does not move, for as long as the storage value itself is
/// not moved or dropped. Dropping the storage must not drop any item.
pub unsafe trait Storage {
    /// The item type held in the slots
    type Item;

    /// Storage of a newly created, empty buffer.
    ///
    /// Allocating storage has no slots; inline storage has all of its slots.
    fn empty() -> Self;

    /// Returns the number of slots
    fn capacity(&self) -> usize;

    /// Storage with as many slots as `self`, used when cloning a buffer.
    ///
    /// # Panics
    ///
    /// Allocating storage panics if the memory cannot be obtained.
    fn alloc_like(&self) -> Self;

    /// Returns a raw pointer to the first slot.
    fn as_ptr(&self) -> *const Self::Item;

    /// Returns an unsafe mutable pointer to the first slot.
    fn as_mut_ptr(&mut self) -> *mut Self::Item;
}

/// Storage whose slots come from an allocator and can be obtained at any size.
///
/// Only buffers over an `Allocate` storage offer `set_capacity` and `resize`.
///
/// # Safety
///
/// `try_allocate(n)` must return a storage with exactly `n` slots.
pub unsafe trait Allocate: Storage + Sized {
    /// Obtains storage for `capacity` slots.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] when the size overflows or the allocator is
    /// exhausted.
    fn try_allocate(capacity: usize) -> Result<Self, AllocError>;
}

/// Heap allocated slots.
pub struct HeapStorage<T> {
    xs: Vec<MaybeUninit<T>>,
}

unsafe impl<T> Storage for HeapStorage<T> {
    type Item = T;

    #[inline]
    fn empty() -> Self {
        HeapStorage { xs: Vec::new() }
    }

    #[inline(always)]
    fn capacity(&self) -> usize {
        self.xs.len()
    }

    fn alloc_like(&self) -> Self {
        match Self::try_allocate(self.capacity()) {
            Ok(storage) => storage,
            Err(err) => panic!("ring buffer allocation failed: {}", err),
        }
    }

    #[inline(always)]
    fn as_ptr(&self) -> *const T {
        self.xs.as_ptr().cast()
    }

    #[inline(always)]
    fn as_mut_ptr(&mut self) -> *mut T {
        self.xs.as_mut_ptr().cast()
    }
}

impl<T> HeapStorage<T> {
    /// Storage with one live slot per element of `xs`.
    pub(crate) fn from_vec(xs: Vec<T>) -> HeapStorage<T> {
        HeapStorage { xs: xs.into_iter().map(MaybeUninit::new).collect() }
    }
}

unsafe impl<T> Allocate for HeapStorage<T> {
    fn try_allocate(capacity: usize) -> Result<Self, AllocError> {
        if Layout::array::<T>(capacity).is_err() {
            return Err(AllocError::CapacityOverflow);
        }
        let mut xs = Vec::new();
        if xs.try_reserve_exact(capacity).is_err() {
            tracing::warn!(capacity, "ring buffer storage allocation failed");
            return Err(AllocError::AllocFailed { capacity });
        }
        xs.resize_with(capacity, MaybeUninit::uninit);
        Ok(HeapStorage { xs })
    }
}

/// `N` slots stored inline, e.g. on the stack.
///
/// Inline storage has a fixed size: a buffer over it can neither be
/// re-capacitated nor resized.
pub struct InlineStorage<T, const N: usize> {
    xs: [MaybeUninit<T>; N],
}

unsafe impl<T, const N: usize> Storage for InlineStorage<T, N> {
    type Item = T;

    #[inline]
    fn empty() -> Self {
        InlineStorage { xs: [const { MaybeUninit::uninit() }; N] }
    }

    #[inline(always)]
    fn capacity(&self) -> usize {
        N
    }

    #[inline]
    fn alloc_like(&self) -> Self {
        Self::empty()
    }

    #[inline(always)]
    fn as_ptr(&self) -> *const T {
        self.xs.as_ptr().cast()
    }

    #[inline(always)]
    fn as_mut_ptr(&mut self) -> *mut T {
        self.xs.as_mut_ptr().cast()
    }
}

#[cfg(feature = "use_generic_array")]
mod generic_impl {
    use core::mem::MaybeUninit;

    use generic_array::sequence::GenericSequence;
    use generic_array::{ArrayLength, GenericArray};

    use super::Storage;

    unsafe impl<T, N> Storage for GenericArray<MaybeUninit<T>, N>
        where N: ArrayLength<MaybeUninit<T>>
    {
        type Item = T;

        #[inline]
        fn empty() -> Self {
            GenericArray::generate(|_| MaybeUninit::uninit())
        }

        #[inline(always)]
        fn capacity(&self) -> usize {
            self.as_slice().len()
        }

        #[inline]
        fn alloc_like(&self) -> Self {
            Self::empty()
        }

        #[inline(always)]
        fn as_ptr(&self) -> *const T {
            self.as_slice().as_ptr().cast()
        }

        #[inline(always)]
        fn as_mut_ptr(&mut self) -> *mut T {
            self.as_mut_slice().as_mut_ptr().cast()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heap_storage_sizes() {
        assert_eq!(HeapStorage::<String>::empty().capacity(), 0);
        let storage = HeapStorage::<String>::try_allocate(5).unwrap();
        assert_eq!(storage.capacity(), 5);
        let zst = HeapStorage::<()>::try_allocate(1000).unwrap();
        assert_eq!(zst.capacity(), 1000);
    }

    #[test]
    fn heap_storage_overflow() {
        let err = HeapStorage::<u64>::try_allocate(usize::MAX).err();
        assert_eq!(err, Some(AllocError::CapacityOverflow));
    }

    #[test]
    fn inline_storage_is_full_size() {
        let mut storage = InlineStorage::<u8, 6>::empty();
        assert_eq!(storage.capacity(), 6);
        assert_eq!(storage.as_ptr(), storage.as_mut_ptr() as *const u8);
    }
}
