//! Core trait definitions for depth-first backtracking searches.
//!
//! To drive a search with [`SearchEngine`](crate::engine::SearchEngine),
//! implement [`SearchProblem`] for a struct that owns the *call-scoped*
//! search context: the fixed input plus whatever partial solution and
//! accumulator the search builds while it runs.
//!
//! The engine only ever uses these primitives:
//! - Node evaluation: every node, the root included, is judged on entry.
//! - Expansion: an ordered list of moves one step deeper.
//! - Apply / undo: explicit descent and backtrack on the shared state.
//! - Finish: consume the context into the externally visible result.
//!
//! Only one branch is live at a time, so the problem can keep a single
//! mutable partial solution and rely on `undo` to hand siblings a clean
//! state.

/// Verdict produced by [`SearchProblem::visit`] for the node being entered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visit {
    /// Keep going: expand this node's candidates.
    Continue,
    /// This node is a solution; stop the whole search and keep its state.
    Accept,
    /// Dead end; do not expand this node.
    Reject,
}

/// Trait for a backtracking search instance.
///
/// Semantics:
/// - The engine calls `visit(depth)` on entering a node (root has depth 0).
/// - On `Continue`, it walks `candidates(depth)` in order. For each move it
///   calls `apply`, enters the child at `depth + 1` and, unless the subtree
///   accepted, calls `undo` with the same move.
/// - `finish(accepted)` is called once, after the search returns.
pub trait SearchProblem {
    /// One step of descent (an index, a square, ...).
    type Move: Copy;

    /// Result handed back to the caller by [`SearchProblem::finish`].
    type Output;

    /// Evaluate the node currently represented by the problem state.
    fn visit(&mut self, depth: usize) -> Visit;

    /// Moves available from the current node, in exploration order.
    fn candidates(&self, depth: usize) -> Vec<Self::Move>;

    /// Descend by one move.
    fn apply(&mut self, mv: Self::Move);

    /// Revert a previous [`apply`](SearchProblem::apply) of `mv`.
    ///
    /// Must restore exactly the state that existed before the matching
    /// `apply`.
    fn undo(&mut self, mv: Self::Move);

    /// Consume the context into the search result.
    ///
    /// `accepted` is true when some node returned [`Visit::Accept`]; the
    /// problem state then still holds that node's partial solution.
    fn finish(self, accepted: bool) -> Self::Output;
}
