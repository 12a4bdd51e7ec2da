//! Generic depth-first backtracking engine.
//!
//! The engine walks the decision tree described by a [`SearchProblem`]:
//! 1. Every node is evaluated on entry via [`SearchProblem::visit`].
//! 2. Continuing nodes are expanded in the order the problem yields.
//! 3. Each child is entered with `apply` and left with `undo`, unless the
//!    child's subtree accepted, in which case the accepted state is kept.
//!
//! Optional limits (node budget, wall-clock deadline) are checked between
//! node expansions. Hitting one aborts with a [`SearchError`], which is
//! distinct from a search that simply ran out of candidates.

use std::time::{Duration, Instant};

use serde::Serialize;
use thiserror::Error;

use crate::traits::{SearchProblem, Visit};

/// Deadline checks only read the clock every this many nodes.
const DEADLINE_STRIDE: u64 = 1 << 10;

/// Limits applied to a single run. `None` means unbounded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchLimits {
    pub node_limit: Option<u64>,
    pub deadline: Option<Duration>,
}

/// Counters collected during a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct SearchStats {
    /// Nodes entered, root included.
    pub nodes: u64,
    /// Deepest node entered.
    pub max_depth: usize,
    /// Whether some node accepted.
    pub accepted: bool,
    /// Wall-clock time spent in the search.
    pub elapsed: Duration,
}

/// A run that was cut short by one of its [`SearchLimits`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("node budget of {limit} exhausted before the search completed")]
    NodeLimit { limit: u64 },
    #[error("deadline of {deadline:?} passed after {elapsed:?}")]
    Deadline { deadline: Duration, elapsed: Duration },
}

/// Depth-first search engine for a given problem instance `P`.
///
/// Typical usage:
/// ```
/// use dfs_backtrack::{SearchEngine, problems::lis::LisProblem};
///
/// let sequence = [4, 1, 13, 7, 0, 2, 8, 11, 3];
/// let engine = SearchEngine::new(LisProblem::new(&sequence));
/// let (best, stats) = engine.run().expect("no limits configured");
/// assert_eq!(best.length, 4);
/// assert!(stats.nodes > 1);
/// ```
pub struct SearchEngine<P: SearchProblem> {
    problem: P,
    limits: SearchLimits,
}

impl<P: SearchProblem> SearchEngine<P> {
    /// Create an engine without limits.
    pub fn new(problem: P) -> Self {
        Self::with_limits(problem, SearchLimits::default())
    }

    /// Create an engine with explicit limits.
    pub fn with_limits(problem: P, limits: SearchLimits) -> Self {
        Self { problem, limits }
    }

    /// Return the configured limits.
    pub fn limits(&self) -> SearchLimits {
        self.limits
    }

    /// Run the search to completion (or until a limit fires).
    pub fn run(mut self) -> Result<(P::Output, SearchStats), SearchError> {
        let span = tracing::debug_span!(
            "search",
            node_limit = self.limits.node_limit,
            deadline_ms = self.limits.deadline.map(|d| d.as_millis() as u64)
        );
        let _enter = span.enter();

        let mut cursor = Cursor {
            limits: self.limits,
            started: Instant::now(),
            stats: SearchStats::default(),
        };
        let accepted = cursor.descend(&mut self.problem)?;
        cursor.stats.accepted = accepted;
        cursor.stats.elapsed = cursor.started.elapsed();

        tracing::debug!(
            nodes = cursor.stats.nodes,
            max_depth = cursor.stats.max_depth,
            accepted,
            elapsed_us = cursor.stats.elapsed.as_micros() as u64,
            "search finished"
        );

        Ok((self.problem.finish(accepted), cursor.stats))
    }
}

/// Per-run bookkeeping, kept apart from the problem so the walk can borrow
/// both mutably.
struct Cursor {
    limits: SearchLimits,
    started: Instant,
    stats: SearchStats,
}

/// One expanded node on the walk's stack: its untried moves, and the move
/// that led into it (`None` for the root).
struct Frame<M> {
    moves: std::vec::IntoIter<M>,
    via: Option<M>,
}

impl Cursor {
    /// Depth-first walk over an explicit stack, so tree depth is bounded by
    /// heap rather than by the thread's stack.
    fn descend<P: SearchProblem>(&mut self, problem: &mut P) -> Result<bool, SearchError> {
        let mut stack: Vec<Frame<P::Move>> = Vec::new();
        match self.enter(problem, 0)? {
            Visit::Accept => return Ok(true),
            Visit::Reject => return Ok(false),
            Visit::Continue => stack.push(Self::expand(problem, 0, None)),
        }

        loop {
            let depth = stack.len();
            let Some(frame) = stack.last_mut() else {
                break;
            };
            match frame.moves.next() {
                None => {
                    if let Some(mv) = stack.pop().and_then(|f| f.via) {
                        problem.undo(mv);
                    }
                }
                Some(mv) => {
                    problem.apply(mv);
                    match self.enter(problem, depth)? {
                        Visit::Accept => return Ok(true),
                        Visit::Reject => problem.undo(mv),
                        Visit::Continue => stack.push(Self::expand(problem, depth, Some(mv))),
                    }
                }
            }
        }
        Ok(false)
    }

    fn expand<P: SearchProblem>(problem: &P, depth: usize, via: Option<P::Move>) -> Frame<P::Move> {
        let moves = problem.candidates(depth);
        tracing::trace!(depth, candidates = moves.len(), "expand");
        Frame {
            moves: moves.into_iter(),
            via,
        }
    }

    /// Count the node against the limits, then let the problem judge it.
    fn enter<P: SearchProblem>(&mut self, problem: &mut P, depth: usize) -> Result<Visit, SearchError> {
        if let Some(limit) = self.limits.node_limit {
            if self.stats.nodes >= limit {
                return Err(SearchError::NodeLimit { limit });
            }
        }
        if let Some(deadline) = self.limits.deadline {
            if self.stats.nodes % DEADLINE_STRIDE == 0 {
                let elapsed = self.started.elapsed();
                if elapsed >= deadline {
                    return Err(SearchError::Deadline { deadline, elapsed });
                }
            }
        }
        self.stats.nodes += 1;
        self.stats.max_depth = self.stats.max_depth.max(depth);
        Ok(problem.visit(depth))
    }
}
