//! Exhaustive depth-first backtracking searches.
//!
//! This crate provides a small generic engine for backtracking searches over
//! a call-scoped search context, and two searches built on it.
//!
//! ## Core idea
//! 1. Model the search as a tree whose nodes are partial solutions.
//! 2. Implement the [`SearchProblem`] trait: judge a node, list its children
//!    in exploration order, and apply/undo a single step.
//! 3. Let [`SearchEngine`] walk the tree depth-first. It evaluates every node
//!    on entry, backtracks abandoned branches, and stops at an accepted node.
//!
//! The engine owns the problem for the duration of one run, so accumulators
//! never outlive a call and independent runs never interfere.
//!
//! ## Quick start
//! ```
//! use dfs_backtrack::{find_all_longest_increasing, solve, Square};
//!
//! let best = find_all_longest_increasing(&[4, 1, 13, 7, 0, 2, 8, 11, 3]);
//! assert_eq!(best.length, 4);
//! assert_eq!(best.subsequences[0], vec![4, 7, 8, 11]);
//!
//! let tour = solve(8, Square::new(0, 0), true).unwrap().expect("closed 8x8 tour");
//! assert!(tour.validate().is_ok());
//! ```
//!
//! ## Built-in searches
//! The `problems` module contains:
//! - All longest strictly increasing subsequences, by exhaustive enumeration
//! - Knight's tours (open or closed) with Warnsdorff move ordering
//!
//! Node-level tracing goes through `tracing` at `trace` level; per-run
//! summaries are emitted at `debug`.

pub mod board;
pub mod builder;
pub mod engine;
pub mod problems;
pub mod traits;
pub mod utils;

pub use crate::board::Square;
pub use crate::builder::SearchEngineBuilder;
pub use crate::engine::{SearchEngine, SearchError, SearchLimits, SearchStats};
pub use crate::problems::knights_tour::{solve, KnightsTour, Tour, TourError};
pub use crate::problems::lis::{find_all_longest_increasing, LongestIncreasing};
pub use crate::traits::{SearchProblem, Visit};
