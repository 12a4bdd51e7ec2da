//! Assorted utilities and helpers.
//!
//! These are reference checks for search results, cheap enough to run in
//! tests and in the scaling probe.

use std::cmp::Ordering;

/// Length of the longest strictly increasing subsequence of `values`.
///
/// Patience-sorting style O(n log n): `tails[k]` is the smallest value that
/// ends an increasing run of length `k + 1`. This yields the length only and
/// is used to cross-check the exhaustive enumeration.
pub fn longest_increasing_len<T: PartialOrd + Clone>(values: &[T]) -> usize {
    let mut tails: Vec<T> = Vec::with_capacity(values.len());
    for value in values {
        // First tail not strictly below `value`; replacing it keeps runs strict.
        let pos = tails.partition_point(|tail| tail < value);
        if pos == tails.len() {
            tails.push(value.clone());
        } else {
            tails[pos] = value.clone();
        }
    }
    tails.len()
}

/// Returns true if `candidate` can be drawn from `sequence` at strictly
/// increasing indices with strictly increasing values.
///
/// Greedy earliest matching is sufficient: if any embedding exists, the
/// leftmost one does.
pub fn is_strictly_increasing_subsequence<T: PartialOrd>(candidate: &[T], sequence: &[T]) -> bool {
    if candidate
        .windows(2)
        .any(|w| w[0].partial_cmp(&w[1]) != Some(Ordering::Less))
    {
        return false;
    }
    let mut rest = sequence.iter();
    candidate
        .iter()
        .all(|wanted| rest.by_ref().any(|value| value == wanted))
}
