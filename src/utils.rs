//! Wrapping slot arithmetic shared by the buffer and its iterators.
//!
//! Both helpers stay away from `%` so that a capacity of zero is well defined
//! as long as the offset is zero as well.

#[inline]
pub fn wrap_add(index: usize, addend: usize, capacity: usize) -> usize {
    debug_assert!(addend <= capacity && index <= capacity,
                  "wrap_add index={} addend={} cap={}",
                  index,
                  addend,
                  capacity);
    let logical = index.wrapping_add(addend);
    if logical >= capacity {
        logical.wrapping_sub(capacity)
    } else {
        logical
    }
}

#[inline]
pub fn wrap_sub(index: usize, subtrahend: usize, capacity: usize) -> usize {
    debug_assert!(subtrahend <= capacity && index <= capacity,
                  "wrap_sub index={} subtrahend={} cap={}",
                  index,
                  subtrahend,
                  capacity);
    wrap_add(index, capacity - subtrahend, capacity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_past_storage_end() {
        assert_eq!(wrap_add(3, 2, 4), 1);
        assert_eq!(wrap_add(3, 1, 4), 0);
        assert_eq!(wrap_add(0, 3, 4), 3);
        assert_eq!(wrap_add(0, 0, 0), 0);
    }

    #[test]
    fn wraps_before_storage_start() {
        assert_eq!(wrap_sub(0, 1, 4), 3);
        assert_eq!(wrap_sub(2, 2, 4), 0);
        assert_eq!(wrap_sub(1, 4, 4), 1);
        assert_eq!(wrap_sub(0, 0, 0), 0);
    }
}
