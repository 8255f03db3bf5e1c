//! A bounded double-ended circular buffer.
//! Requires Rust 1.81+
//!
//! The buffer holds at most `capacity()` elements in a fixed run of slots and
//! can be used as a FIFO or a LIFO from either end. Inserting into a full
//! buffer evicts the element at the opposite end, so the buffer always keeps
//! the most recent window of data; every evicting operation has a `try_`
//! twin that refuses instead.
//!
//! Pushes and pops at both ends are `O(1)`, and so is indexing. Elements need
//! not be `Copy`, `Clone` or `Default`: slots are constructed and destroyed
//! one at a time as elements come and go.
//!
//! # Feature Flags
//! The **ring_buffer** crate has the following cargo feature flags:
//!
//! - `std`
//!   - Optional, enabled by default
//!   - Use libstd
//!
//!
//! - `use_generic_array`
//!   - Optional
//!   - Depend on generic-array and allow using it as inline storage
//!     through `GenericRingBuffer`.
//!
//!
//! # Usage
//!
//! First, add the following to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! ring_buffer = "0.1"
//! ```
//!
//! The crate links to the standard library by default. Heap storage only
//! needs `alloc`, so the buffer also works in a `#![no_std]` crate:
//!
//! ```toml
//! [dependencies]
//! ring_buffer = { version = "0.1", default-features = false }
//! ```
//!
//! # Storage
//!
//! `RingBuffer<T>` keeps its slots on the heap; the capacity is chosen at
//! construction and can be changed with `set_capacity` or `resize`.
//! `InlineRingBuffer<T, N>` keeps `N` slots inline and never allocates.
//!
//! # Examples
//! ```
//! use ring_buffer::RingBuffer;
//!
//! let mut buf: RingBuffer<_> = RingBuffer::with_capacity(4);
//! assert_eq!(buf.capacity(), 4);
//! assert_eq!(buf.len(), 0);
//!
//! buf.push_back(1);
//! buf.push_back(2);
//! assert_eq!(buf.len(), 2);
//!
//! assert_eq!(buf.pop_front(), Some(1));
//! assert_eq!(buf.pop_front(), Some(2));
//! assert_eq!(buf.pop_front(), None);
//! ```
//!
//! # Overflow
//! ```
//! use ring_buffer::{InlineRingBuffer, CapacityError};
//!
//! let mut buf: InlineRingBuffer<_, 3> = InlineRingBuffer::new();
//!
//! buf.extend(1..=3);
//! assert_eq!(buf.push_back(4), Some(1));
//! assert_eq!(buf.try_push_back(5), Err(CapacityError { element: 5 }));
//!
//! assert_eq!(format!("{:?}", buf), "[2, 3, 4]");
//! ```
//!
//! # Bulk Insert & Remove
//! ```
//! use ring_buffer::RingBuffer;
//!
//! let mut buf: RingBuffer<_> = RingBuffer::with_capacity(6);
//!
//! buf.insert_back(0..4);
//! buf.insert_front(vec![10, 11]);
//! assert_eq!(buf, [10, 11, 0, 1, 2, 3]);
//!
//! let mut out = Vec::new();
//! buf.pop_back_into(3, &mut out);
//! assert_eq!(out, [1, 2, 3]);
//! assert_eq!(buf, [10, 11, 0]);
//! ```
//!
//! # Iterator
//! ```
//! use ring_buffer::RingBuffer;
//!
//! let mut buf: RingBuffer<_> = RingBuffer::with_capacity(4);
//!
//! buf.extend(0..6);
//!
//! let items: Vec<_> = buf.into_iter().collect();
//! assert_eq!(items, vec![2, 3, 4, 5]);
//! ```
//!
//! # From Iterator
//! ```
//! use ring_buffer::{InlineRingBuffer, RingBuffer};
//!
//! let heap: RingBuffer<_> = (0..5).collect();
//! assert_eq!(heap.capacity(), 5);
//!
//! let inline: InlineRingBuffer<_, 3> = (0..5).collect();
//! assert_eq!(inline, [2, 3, 4]);
//!
//! assert_ne!(heap, inline);
//! ```

#![cfg_attr(not(any(feature = "std", test)), no_std)]

#![deny(missing_docs)]

extern crate alloc;

pub mod error;
mod ring_buffer;
pub mod storage;
mod utils;

pub use crate::error::{AllocError, CapacityError, EmptyBufferError};
#[cfg(feature = "use_generic_array")]
pub use crate::ring_buffer::GenericRingBuffer;
pub use crate::ring_buffer::{Cursor, CursorMut, Drain, InlineRingBuffer, IntoIter, Iter, IterMut,
                             RangeArgument, RingBuffer};
pub use crate::storage::{Allocate, HeapStorage, InlineStorage, Storage};


#[cfg(test)]
mod checks {
    use std::collections::VecDeque;
    use std::vec::Vec;

    use quickcheck::{quickcheck, Arbitrary, Gen};

    use super::*;

    #[derive(Clone, Debug)]
    enum Op {
        PushBack(u8),
        PushFront(u8),
        TryPushBack(u8),
        TryPushFront(u8),
        PopFront,
        PopBack,
        InsertBack(Vec<u8>),
        InsertFront(Vec<u8>),
        TryInsertBack(Vec<u8>),
        PopFrontInto(u8),
        PopBackInto(u8),
        Drain(u8, u8),
        Truncate(u8),
        Linearize,
    }

    impl Arbitrary for Op {
        fn arbitrary(g: &mut Gen) -> Op {
            match u8::arbitrary(g) % 14 {
                0 => Op::PushBack(u8::arbitrary(g)),
                1 => Op::PushFront(u8::arbitrary(g)),
                2 => Op::TryPushBack(u8::arbitrary(g)),
                3 => Op::TryPushFront(u8::arbitrary(g)),
                4 => Op::PopFront,
                5 => Op::PopBack,
                6 => Op::InsertBack(short_vec(g)),
                7 => Op::InsertFront(short_vec(g)),
                8 => Op::TryInsertBack(short_vec(g)),
                9 => Op::PopFrontInto(u8::arbitrary(g) % 10),
                10 => Op::PopBackInto(u8::arbitrary(g) % 10),
                11 => Op::Drain(u8::arbitrary(g), u8::arbitrary(g)),
                12 => Op::Truncate(u8::arbitrary(g) % 10),
                _ => Op::Linearize,
            }
        }
    }

    fn short_vec(g: &mut Gen) -> Vec<u8> {
        let len = usize::arbitrary(g) % 12;
        (0..len).map(|_| u8::arbitrary(g)).collect()
    }

    // Replays `op` on a `VecDeque` model bounded by `cap`, returning what
    // the buffer must report back.
    fn model_apply(model: &mut VecDeque<u8>, cap: usize, op: &Op) -> Vec<u8> {
        match *op {
            Op::PushBack(x) => {
                if cap == 0 {
                    return vec![x];
                }
                let evicted = if model.len() == cap { model.pop_front() } else { None };
                model.push_back(x);
                evicted.into_iter().collect()
            }
            Op::PushFront(x) => {
                if cap == 0 {
                    return vec![x];
                }
                let evicted = if model.len() == cap { model.pop_back() } else { None };
                model.push_front(x);
                evicted.into_iter().collect()
            }
            Op::TryPushBack(x) => {
                if model.len() == cap {
                    return vec![x];
                }
                model.push_back(x);
                Vec::new()
            }
            Op::TryPushFront(x) => {
                if model.len() == cap {
                    return vec![x];
                }
                model.push_front(x);
                Vec::new()
            }
            Op::PopFront => model.pop_front().into_iter().collect(),
            Op::PopBack => model.pop_back().into_iter().collect(),
            Op::InsertBack(ref xs) => {
                model.extend(xs.iter().cloned());
                while model.len() > cap {
                    model.pop_front();
                }
                Vec::new()
            }
            Op::InsertFront(ref xs) => {
                for &x in xs.iter().rev() {
                    model.push_front(x);
                }
                model.truncate(cap);
                Vec::new()
            }
            Op::TryInsertBack(ref xs) => {
                if xs.len() > cap - model.len() {
                    return xs.clone();
                }
                model.extend(xs.iter().cloned());
                Vec::new()
            }
            Op::PopFrontInto(n) => {
                let n = (n as usize).min(model.len());
                model.drain(..n).collect()
            }
            Op::PopBackInto(n) => {
                let n = (n as usize).min(model.len());
                let len = model.len();
                model.drain(len - n..).collect()
            }
            Op::Drain(a, b) => {
                let (start, end) = drain_range(model.len(), a, b);
                model.drain(start..end).collect()
            }
            Op::Truncate(n) => {
                model.truncate(n as usize);
                Vec::new()
            }
            Op::Linearize => Vec::new(),
        }
    }

    fn drain_range(len: usize, a: u8, b: u8) -> (usize, usize) {
        let start = a as usize % (len + 1);
        let end = start + b as usize % (len - start + 1);
        (start, end)
    }

    fn buffer_apply<S: Storage<Item = u8>>(buf: &mut RingBuffer<u8, S>, op: &Op) -> Vec<u8> {
        match *op {
            Op::PushBack(x) => buf.push_back(x).into_iter().collect(),
            Op::PushFront(x) => buf.push_front(x).into_iter().collect(),
            Op::TryPushBack(x) => {
                buf.try_push_back(x).err().map(|e| e.element).into_iter().collect()
            }
            Op::TryPushFront(x) => {
                buf.try_push_front(x).err().map(|e| e.element).into_iter().collect()
            }
            Op::PopFront => buf.pop_front().into_iter().collect(),
            Op::PopBack => buf.pop_back().into_iter().collect(),
            Op::InsertBack(ref xs) => {
                buf.insert_back(xs.iter().cloned());
                Vec::new()
            }
            Op::InsertFront(ref xs) => {
                buf.insert_front(xs.iter().cloned());
                Vec::new()
            }
            Op::TryInsertBack(ref xs) => match buf.try_insert_back(xs.iter().cloned()) {
                Ok(()) => Vec::new(),
                Err(err) => err.into_inner().collect(),
            },
            Op::PopFrontInto(n) => {
                let mut out = Vec::new();
                buf.pop_front_into(n as usize, &mut out);
                out
            }
            Op::PopBackInto(n) => {
                let mut out = Vec::new();
                buf.pop_back_into(n as usize, &mut out);
                out
            }
            Op::Drain(a, b) => {
                let (start, end) = drain_range(buf.len(), a, b);
                buf.drain(start..end).collect()
            }
            Op::Truncate(n) => {
                buf.truncate(n as usize);
                Vec::new()
            }
            Op::Linearize => {
                buf.linearize();
                assert!(buf.is_linearized());
                Vec::new()
            }
        }
    }

    fn agrees<S: Storage<Item = u8>>(buf: &RingBuffer<u8, S>, model: &VecDeque<u8>) -> bool {
        let (a, b) = buf.as_slices();
        let joined: Vec<u8> = a.iter().chain(b).cloned().collect();
        let expected: Vec<u8> = model.iter().cloned().collect();
        buf.len() <= buf.capacity() &&
        buf.is_empty() == (buf.len() == 0) &&
        buf.is_full() == (buf.len() == buf.capacity()) &&
        buf.is_linearized() == b.is_empty() &&
        joined == expected &&
        buf.iter().cloned().eq(model.iter().cloned()) &&
        buf.iter().rev().cloned().eq(model.iter().rev().cloned()) &&
        (0..model.len()).all(|i| buf[i] == model[i]) &&
        buf.front() == model.front() &&
        buf.back() == model.back()
    }

    fn replay<S: Storage<Item = u8>>(mut buf: RingBuffer<u8, S>, ops: &[Op]) -> bool {
        let cap = buf.capacity();
        let mut model = VecDeque::new();
        for op in ops {
            if buffer_apply(&mut buf, op) != model_apply(&mut model, cap, op) {
                return false;
            }
            if !agrees(&buf, &model) {
                return false;
            }
        }
        true
    }

    #[test]
    fn check_heap_against_model() {
        fn prop(cap: u8, ops: Vec<Op>) -> bool {
            replay(RingBuffer::<u8>::with_capacity(cap as usize % 9), &ops)
        }
        quickcheck(prop as fn(u8, Vec<Op>) -> bool);
    }

    #[test]
    fn check_inline_against_model() {
        fn prop(ops: Vec<Op>) -> bool {
            replay(InlineRingBuffer::<u8, 5>::new(), &ops)
        }
        quickcheck(prop as fn(Vec<Op>) -> bool);
    }

    #[test]
    fn check_clone_equivalence() {
        fn prop(cap: u8, xs: Vec<u8>) -> bool {
            let mut buf: RingBuffer<u8> = RingBuffer::with_capacity(cap as usize % 9 + 1);
            buf.extend(xs);
            buf == buf.clone()
        }
        quickcheck(prop as fn(u8, Vec<u8>) -> bool);
    }

    #[test]
    fn check_resize_preserves_prefix() {
        fn prop(cap: u8, xs: Vec<u8>, new_len: u8) -> bool {
            let mut buf: RingBuffer<u8> = RingBuffer::with_capacity(cap as usize % 9);
            buf.extend(xs);
            let before: Vec<u8> = buf.iter().cloned().collect();
            let new_len = new_len as usize % 16;
            buf.resize(new_len, 0xff);

            let mut expected = before;
            expected.resize(new_len, 0xff);
            buf.len() == new_len && buf == expected
        }
        quickcheck(prop as fn(u8, Vec<u8>, u8) -> bool);
    }
}

#[cfg(test)]
#[cfg(feature = "use_generic_array")]
mod test_generic_array {
    use generic_array::typenum::U41;

    use super::*;

    #[test]
    fn any_simple() {
        let mut buf: GenericRingBuffer<i32, U41> = GenericRingBuffer::new();

        assert_eq!(buf.len(), 0);
        assert_eq!(buf.capacity(), 41);
        buf.extend(0..50);
        assert_eq!(buf.len(), 41);
        assert_eq!(buf.front(), Some(&9));
        assert_eq!(buf.into_iter().take(5).collect::<Vec<_>>(), vec![9, 10, 11, 12, 13]);
    }
}
