//! Errors reported by the non-evicting and fallible operations.

use core::fmt;

use thiserror::Error;

/// Error value indicating insufficient capacity
///
/// Returned by the non-evicting insertions (`try_push_back`,
/// `try_insert_back`, ...). The rejected value is handed back untouched.
#[derive(Clone, Copy, Eq, Ord, PartialEq, PartialOrd, Error)]
#[error("insufficient capacity")]
pub struct CapacityError<T = ()> {
    /// The element that caused the error.
    pub element: T,
}

impl<T> CapacityError<T> {
    /// Creates a new `CapacityError` carrying `element`.
    #[inline]
    pub const fn new(element: T) -> CapacityError<T> {
        CapacityError { element }
    }

    /// Extracts the rejected element.
    #[inline]
    pub fn into_inner(self) -> T {
        self.element
    }

    /// Drops the rejected element, keeping only the error kind.
    #[inline]
    pub fn simplify(self) -> CapacityError {
        CapacityError { element: () }
    }
}

impl<T> fmt::Debug for CapacityError<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "CapacityError: insufficient capacity")
    }
}

/// Failure to obtain backing storage.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum AllocError {
    /// The requested number of slots does not fit in the address space.
    #[error("capacity overflow")]
    CapacityOverflow,
    /// The allocator reported exhaustion.
    #[error("memory allocation of {capacity} slots failed")]
    AllocFailed {
        /// Requested number of slots.
        capacity: usize,
    },
}

/// Error value returned when removing from an empty buffer.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Error)]
#[error("ring buffer is empty")]
pub struct EmptyBufferError;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(CapacityError::new(7).to_string(), "insufficient capacity");
        assert_eq!(format!("{:?}", CapacityError::new(7)),
                   "CapacityError: insufficient capacity");
        assert_eq!(AllocError::AllocFailed { capacity: 3 }.to_string(),
                   "memory allocation of 3 slots failed");
        assert_eq!(EmptyBufferError.to_string(), "ring buffer is empty");
    }

    #[test]
    fn capacity_error_hands_back_element() {
        let err = CapacityError::new(String::from("kept"));
        assert_eq!(err.clone().into_inner(), "kept");
        assert_eq!(err.simplify(), CapacityError { element: () });
    }
}
