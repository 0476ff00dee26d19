//! Assorted utilities and helpers.

/// Upper bound on the run length still reachable from a window start.
///
/// A run can use at most one resource per value, so it is limited both by
/// the number of distinct values left and by the number of resources.
#[inline]
pub fn theoretical_ceiling(remaining_values: usize, resources: usize) -> usize {
    remaining_values.min(resources)
}
