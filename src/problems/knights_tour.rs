//! Knight's Tour by backtracking with Warnsdorff move ordering.
//!
//! Layers correspond to move counts: a node at depth `d` has `d + 1` squares
//! on the knight's trail. From the trail's head the candidates are the
//! unvisited in-bounds knight destinations, sorted ascending by their own
//! number of unvisited destinations (fewest onward options first). The sort
//! is stable, so ties keep [`KNIGHT_OFFSETS`](crate::board::KNIGHT_OFFSETS)
//! order.
//!
//! A node holding all `n*n` squares accepts for an open tour. For a closed
//! tour it accepts only when the head is a knight move from the start;
//! otherwise it rejects and the caller backtracks.
//!
//! The ordering is a heuristic. It picks which tour is found first and how
//! quickly, never whether one is found.

use serde::Serialize;
use thiserror::Error;

use crate::board::{Board, Square};
use crate::engine::{SearchError, SearchLimits, SearchStats};
use crate::traits::{SearchProblem, Visit};
use crate::SearchEngine;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Configuration errors, kept apart from "no tour exists".
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TourError {
    #[error("board size must be at least 1 (got {size})")]
    InvalidBoardSize { size: usize },
    #[error("start square ({row}, {col}) is outside the {size}x{size} board")]
    StartOutOfBounds { row: usize, col: usize, size: usize },
    #[error(transparent)]
    Search(#[from] SearchError),
}

/// Structural problems found by [`Tour::validate`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TourDefect {
    #[error("expected {expected} squares in visit order, found {found}")]
    Incomplete { expected: usize, found: usize },
    #[error("tour does not begin at its start square {start}")]
    WrongStart { start: Square },
    #[error("{from} -> {to} is not a knight move")]
    NotKnightMove { from: Square, to: Square },
    #[error("closed tour cannot return from {end} to {start}")]
    NotClosed { end: Square, start: Square },
}

/// A completed tour: every square visited once, numbered in visit order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Tour {
    board: Board,
    start: Square,
    closed: bool,
}

impl Tour {
    pub fn size(&self) -> usize {
        self.board.size()
    }

    /// The visit-order grid.
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn start(&self) -> Square {
        self.start
    }

    /// Whether this tour was required to return to its start.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Squares in visit order, starting at [`Tour::start`].
    pub fn path(&self) -> Vec<Square> {
        self.board.visit_order()
    }

    pub fn move_index(&self, square: Square) -> Option<usize> {
        self.board.get(square)
    }

    /// Re-check the tour's structural guarantees.
    pub fn validate(&self) -> Result<(), TourDefect> {
        let path = self.path();
        let expected = self.size() * self.size();
        if path.len() != expected || self.board.visited() != expected {
            return Err(TourDefect::Incomplete {
                expected,
                found: path.len(),
            });
        }
        if path[0] != self.start {
            return Err(TourDefect::WrongStart { start: self.start });
        }
        if let Some(w) = path.windows(2).find(|w| !w[0].is_knight_move(w[1])) {
            return Err(TourDefect::NotKnightMove {
                from: w[0],
                to: w[1],
            });
        }
        let end = path[path.len() - 1];
        if self.closed && !end.is_knight_move(self.start) {
            return Err(TourDefect::NotClosed {
                end,
                start: self.start,
            });
        }
        Ok(())
    }
}

/// Search context for one tour attempt.
pub struct TourProblem {
    board: Board,
    start: Square,
    closed: bool,
    trail: Vec<Square>,
}

impl TourProblem {
    /// Fresh board with only `start` marked (move 0).
    ///
    /// Fails with the same configuration errors as [`KnightsTour`].
    pub fn new(size: usize, start: Square, closed: bool) -> Result<Self, TourError> {
        KnightsTour::new(size, closed)?.problem(start)
    }

    fn unchecked(size: usize, start: Square, closed: bool) -> Self {
        let mut board = Board::new(size);
        board.mark(start, 0);
        let mut trail = Vec::with_capacity(size * size);
        trail.push(start);
        Self {
            board,
            start,
            closed,
            trail,
        }
    }

    fn head(&self) -> Square {
        self.trail[self.trail.len() - 1]
    }
}

impl SearchProblem for TourProblem {
    type Move = Square;
    type Output = Option<Tour>;

    fn visit(&mut self, _depth: usize) -> Visit {
        let cells = self.board.size() * self.board.size();
        if self.trail.len() < cells {
            return Visit::Continue;
        }
        if !self.closed || self.head().is_knight_move(self.start) {
            Visit::Accept
        } else {
            Visit::Reject
        }
    }

    fn candidates(&self, _depth: usize) -> Vec<Square> {
        let mut moves: Vec<(usize, Square)> = self
            .board
            .open_moves(self.head())
            .map(|sq| (self.board.onward_degree(sq), sq))
            .collect();
        moves.sort_by_key(|&(degree, _)| degree);
        moves.into_iter().map(|(_, sq)| sq).collect()
    }

    fn apply(&mut self, mv: Square) {
        self.board.mark(mv, self.trail.len());
        self.trail.push(mv);
    }

    fn undo(&mut self, mv: Square) {
        self.board.clear(mv);
        self.trail.pop();
    }

    fn finish(self, accepted: bool) -> Self::Output {
        accepted.then(|| Tour {
            board: self.board,
            start: self.start,
            closed: self.closed,
        })
    }
}

/// Outcome of a configured solve, with search statistics.
#[derive(Clone, Debug, Serialize)]
pub struct TourReport {
    pub tour: Option<Tour>,
    pub stats: SearchStats,
}

/// A solver for one board size and closedness requirement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KnightsTour {
    size: usize,
    closed: bool,
}

impl KnightsTour {
    pub fn new(size: usize, closed: bool) -> Result<Self, TourError> {
        if size == 0 || size.checked_mul(size).is_none() {
            return Err(TourError::InvalidBoardSize { size });
        }
        Ok(Self { size, closed })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn closed(&self) -> bool {
        self.closed
    }

    /// Search for a tour from `start`. `Ok(None)` means none exists.
    pub fn solve_from(&self, start: Square) -> Result<Option<Tour>, TourError> {
        Ok(self.solve_with(start, SearchLimits::default())?.tour)
    }

    /// Search under explicit limits. A limit firing is reported as
    /// [`TourError::Search`], never as `tour: None`.
    pub fn solve_with(&self, start: Square, limits: SearchLimits) -> Result<TourReport, TourError> {
        let problem = self.problem(start)?;
        tracing::debug!(size = self.size, %start, closed = self.closed, "searching for knight's tour");
        let (tour, stats) = SearchEngine::with_limits(problem, limits).run()?;
        if tour.is_none() {
            tracing::debug!(%start, nodes = stats.nodes, "no tour from start");
        }
        Ok(TourReport { tour, stats })
    }

    fn problem(&self, start: Square) -> Result<TourProblem, TourError> {
        if start.row >= self.size || start.col >= self.size {
            return Err(TourError::StartOutOfBounds {
                row: start.row,
                col: start.col,
                size: self.size,
            });
        }
        Ok(TourProblem::unchecked(self.size, start, self.closed))
    }

    /// Every start square, row-major.
    pub fn squares(&self) -> Vec<Square> {
        (0..self.size)
            .flat_map(|row| (0..self.size).map(move |col| Square::new(row, col)))
            .collect()
    }

    /// Attempt a tour from every start square.
    ///
    /// Each start is an independent search with its own limits. With the
    /// `parallel` feature the starts are spread over rayon's pool; the
    /// entries come back in row-major order either way.
    pub fn survey(&self, limits: SearchLimits) -> Vec<SurveyEntry> {
        let squares = self.squares();
        #[cfg(feature = "parallel")]
        let iter = squares.par_iter();
        #[cfg(not(feature = "parallel"))]
        let iter = squares.iter();
        iter.map(|&start| self.survey_one(start, limits)).collect()
    }

    fn survey_one(&self, start: Square, limits: SearchLimits) -> SurveyEntry {
        match self.solve_with(start, limits) {
            Ok(report) => SurveyEntry {
                start,
                outcome: if report.tour.is_some() {
                    SurveyOutcome::Found
                } else {
                    SurveyOutcome::NotFound
                },
                nodes: Some(report.stats.nodes),
            },
            Err(err) => {
                tracing::debug!(%start, error = %err, "survey search abandoned");
                SurveyEntry {
                    start,
                    outcome: SurveyOutcome::Abandoned,
                    nodes: None,
                }
            }
        }
    }
}

/// What happened at one start square during a survey.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SurveyOutcome {
    Found,
    NotFound,
    /// A limit fired before the search could decide.
    Abandoned,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SurveyEntry {
    pub start: Square,
    pub outcome: SurveyOutcome,
    /// Nodes explored, when the search completed.
    pub nodes: Option<u64>,
}

/// Find one knight's tour of an `n × n` board from `start`.
///
/// ```
/// use dfs_backtrack::{solve, Square};
///
/// let tour = solve(5, Square::new(0, 0), false).unwrap().expect("5x5 open tour exists");
/// assert_eq!(tour.path().len(), 25);
/// assert!(tour.validate().is_ok());
/// ```
pub fn solve(n: usize, start: Square, closed: bool) -> Result<Option<Tour>, TourError> {
    KnightsTour::new(n, closed)?.solve_from(start)
}

/// Survey every start square of an `n × n` board.
pub fn survey(n: usize, closed: bool, limits: SearchLimits) -> Result<Vec<SurveyEntry>, TourError> {
    Ok(KnightsTour::new(n, closed)?.survey(limits))
}
