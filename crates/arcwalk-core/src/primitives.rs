//! # Kernel Constants
//!
//! Fixed tuning constants of the arcwalk kernel. They are compiled in and
//! immutable at runtime.

/// Capacity a growable buffer starts with when created without a hint.
pub const INITIAL_BUFFER_CAPACITY: usize = 16;

/// Below this capacity a growable buffer doubles when full.
pub const DOUBLING_LIMIT: usize = 1 << 16;

/// Below this capacity (and above [`DOUBLING_LIMIT`]) a growable buffer grows by half.
///
/// Above it the buffer grows by a quarter.
pub const HALF_GROWTH_LIMIT: usize = 1 << 24;

/// Largest element count an array of `T` can hold.
///
/// Allocations are limited to `isize::MAX` bytes.
#[must_use]
pub const fn max_array_len<T>() -> usize {
    let size = size_of::<T>();
    if size == 0 {
        usize::MAX
    } else {
        isize::MAX as usize / size
    }
}

/// Reason recorded when a [`crate::visitor::VisitLimit`] exhausts its budget.
pub const VISIT_LIMIT_REASON: &str = "visit limit reached";

/// Reason recorded when a reachability search finds its target.
pub const TARGET_FOUND_REASON: &str = "target reached";

/// Reason recorded when a DFS-based solver observes a back edge.
pub const BACK_EDGE_REASON: &str = "back edge observed";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growth_limits_are_ordered() {
        assert!(INITIAL_BUFFER_CAPACITY < DOUBLING_LIMIT);
        assert!(DOUBLING_LIMIT < HALF_GROWTH_LIMIT);
    }

    #[test]
    fn max_array_len_scales_with_element_size() {
        assert_eq!(max_array_len::<u8>(), isize::MAX as usize);
        assert_eq!(max_array_len::<u64>(), isize::MAX as usize / 8);
        assert_eq!(max_array_len::<()>(), usize::MAX);
    }
}
