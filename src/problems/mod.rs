//! Concrete backtracking searches for the DFS engine.
//!
//! These modules show how to implement [`SearchProblem`](crate::traits::SearchProblem)
//! for concrete searches:
//! - [`lis`]          : every longest strictly increasing subsequence (exhaustive).
//! - [`knights_tour`] : open or closed knight's tours with Warnsdorff ordering.

pub mod knights_tour;
pub mod lis;
