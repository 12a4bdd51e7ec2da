//! All longest strictly increasing subsequences, by exhaustive search.
//!
//! The decision tree has one node per strictly increasing index chain of
//! the input: the root is the empty chain, and a node's children extend it
//! by one later index whose value is strictly greater than the chain's last
//! value. Children are tried in ascending index order.
//!
//! Every node is scored on entry, not only leaves, since any prefix may turn
//! out to be maximal. The search never prunes, so the result includes every
//! chain of maximum length. The cost is exponential: a strictly increasing
//! input of length n has 2^n nodes.

use serde::Serialize;

use crate::engine::{SearchError, SearchLimits, SearchStats};
use crate::traits::{SearchProblem, Visit};
use crate::SearchEngine;

/// Search context for one enumeration.
///
/// Both the accumulator and the running maximum live here, so separate
/// calls never share state.
pub struct LisProblem<'a, T> {
    sequence: &'a [T],
    /// Indices of the chain currently being explored.
    picked: Vec<usize>,
    best: Vec<Vec<usize>>,
    max_len: usize,
}

/// Every longest strictly increasing subsequence, in discovery order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LongestIncreasing<T> {
    /// Common length of all members.
    pub length: usize,
    /// The subsequences as values.
    pub subsequences: Vec<Vec<T>>,
    /// The same subsequences as index chains into the input.
    pub indices: Vec<Vec<usize>>,
}

impl<T> LongestIncreasing<T> {
    /// `(BestSet, max_length)`.
    pub fn into_parts(self) -> (Vec<Vec<T>>, usize) {
        (self.subsequences, self.length)
    }

    pub fn len(&self) -> usize {
        self.subsequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subsequences.is_empty()
    }
}

impl<'a, T: PartialOrd + Clone> LisProblem<'a, T> {
    pub fn new(sequence: &'a [T]) -> Self {
        Self {
            sequence,
            picked: Vec::with_capacity(sequence.len()),
            best: Vec::new(),
            max_len: 0,
        }
    }

    fn last_value(&self) -> Option<&T> {
        self.picked.last().map(|&i| &self.sequence[i])
    }
}

impl<'a, T: PartialOrd + Clone> SearchProblem for LisProblem<'a, T> {
    type Move = usize;
    type Output = LongestIncreasing<T>;

    fn visit(&mut self, _depth: usize) -> Visit {
        let len = self.picked.len();
        if len > self.max_len {
            self.max_len = len;
            self.best.clear();
            self.best.push(self.picked.clone());
        } else if len == self.max_len {
            self.best.push(self.picked.clone());
        }
        Visit::Continue
    }

    fn candidates(&self, _depth: usize) -> Vec<usize> {
        let start = self.picked.last().map_or(0, |&i| i + 1);
        let last = self.last_value();
        (start..self.sequence.len())
            .filter(|&j| last.map_or(true, |l| self.sequence[j] > *l))
            .collect()
    }

    fn apply(&mut self, mv: usize) {
        self.picked.push(mv);
    }

    fn undo(&mut self, _mv: usize) {
        self.picked.pop();
    }

    fn finish(self, _accepted: bool) -> Self::Output {
        let subsequences = self
            .best
            .iter()
            .map(|chain| chain.iter().map(|&i| self.sequence[i].clone()).collect())
            .collect();
        LongestIncreasing {
            length: self.max_len,
            subsequences,
            indices: self.best,
        }
    }
}

/// Enumerate all longest strictly increasing subsequences of `sequence`.
///
/// ```
/// use dfs_backtrack::find_all_longest_increasing;
///
/// let best = find_all_longest_increasing(&[3, 1, 2]);
/// assert_eq!(best.length, 2);
/// assert_eq!(best.subsequences, vec![vec![1, 2]]);
/// ```
pub fn find_all_longest_increasing<T: PartialOrd + Clone>(sequence: &[T]) -> LongestIncreasing<T> {
    match SearchEngine::new(LisProblem::new(sequence)).run() {
        Ok((best, _stats)) => best,
        // `SearchError` only comes from a configured limit, and none is set.
        Err(err) => unreachable!("unlimited search reported {err}"),
    }
}

/// Index-chain form of [`find_all_longest_increasing`]; equal values at
/// different positions stay distinguishable.
pub fn find_all_longest_increasing_indices<T: PartialOrd + Clone>(sequence: &[T]) -> Vec<Vec<usize>> {
    find_all_longest_increasing(sequence).indices
}

/// Enumeration under explicit limits, also reporting search statistics.
pub fn find_all_longest_increasing_with<T: PartialOrd + Clone>(
    sequence: &[T],
    limits: SearchLimits,
) -> Result<(LongestIncreasing<T>, SearchStats), SearchError> {
    SearchEngine::with_limits(LisProblem::new(sequence), limits).run()
}
