//! Square grid and knight-move geometry.
//!
//! A [`Board`] is an N×N grid where each cell holds either `None`
//! (unvisited) or the 0-based move index at which the knight landed there.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Knight offsets as `(row, col)` deltas, in the fixed exploration order.
pub const KNIGHT_OFFSETS: [(isize, isize); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

/// A cell coordinate, row first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    pub row: usize,
    pub col: usize,
}

impl Square {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The square `(dr, dc)` away, if it lies on a `size × size` board.
    pub fn offset(self, dr: isize, dc: isize, size: usize) -> Option<Square> {
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        (row < size && col < size).then_some(Square { row, col })
    }

    /// True if `other` is exactly one knight move away.
    pub fn is_knight_move(self, other: Square) -> bool {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        matches!((dr, dc), (1, 2) | (2, 1))
    }
}

impl From<(usize, usize)> for Square {
    fn from((row, col): (usize, usize)) -> Self {
        Square { row, col }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Visit-order grid for an N×N board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Board {
    size: usize,
    cells: Vec<Option<usize>>,
}

impl Board {
    /// An all-unvisited `size × size` board.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, square: Square) -> bool {
        square.row < self.size && square.col < self.size
    }

    #[inline]
    fn index(&self, square: Square) -> usize {
        debug_assert!(self.contains(square));
        square.row * self.size + square.col
    }

    /// Move index stored at `square`, `None` if unvisited or off the board.
    pub fn get(&self, square: Square) -> Option<usize> {
        if self.contains(square) {
            self.cells[self.index(square)]
        } else {
            None
        }
    }

    /// An on-board square not yet visited.
    pub fn is_unvisited(&self, square: Square) -> bool {
        self.contains(square) && self.cells[self.index(square)].is_none()
    }

    // Writers are only fed squares from `knight_moves` or a checked start.
    pub(crate) fn mark(&mut self, square: Square, move_index: usize) {
        let idx = self.index(square);
        self.cells[idx] = Some(move_index);
    }

    pub(crate) fn clear(&mut self, square: Square) {
        let idx = self.index(square);
        self.cells[idx] = None;
    }

    /// Number of visited cells.
    pub fn visited(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// In-bounds knight destinations from `square`, in offset order.
    pub fn knight_moves(&self, square: Square) -> impl Iterator<Item = Square> + '_ {
        KNIGHT_OFFSETS
            .iter()
            .filter_map(move |&(dr, dc)| square.offset(dr, dc, self.size))
    }

    /// Unvisited knight destinations from `square`, in offset order.
    pub fn open_moves(&self, square: Square) -> impl Iterator<Item = Square> + '_ {
        self.knight_moves(square).filter(|&sq| self.is_unvisited(sq))
    }

    /// Warnsdorff degree: how many unvisited squares are one knight move
    /// from `square`.
    pub fn onward_degree(&self, square: Square) -> usize {
        self.open_moves(square).count()
    }

    /// Rows of the grid, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<usize>]> {
        // `max(1)` keeps `chunks` happy on a zero-size board.
        self.cells.chunks(self.size.max(1))
    }

    /// Visited squares ordered by move index. Gaps in the numbering are
    /// skipped, so a partial board yields the squares it does hold.
    pub fn visit_order(&self) -> Vec<Square> {
        let mut slots: Vec<Option<Square>> = vec![None; self.cells.len()];
        for (idx, cell) in self.cells.iter().enumerate() {
            if let Some(step) = *cell {
                if step < slots.len() {
                    slots[step] = Some(Square::new(idx / self.size, idx % self.size));
                }
            }
        }
        slots.into_iter().flatten().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_has_two_knight_moves() {
        let board = Board::new(8);
        let moves: Vec<_> = board.knight_moves(Square::new(0, 0)).collect();
        assert_eq!(moves, vec![Square::new(2, 1), Square::new(1, 2)]);
    }

    #[test]
    fn centre_has_eight_knight_moves() {
        let board = Board::new(8);
        assert_eq!(board.knight_moves(Square::new(4, 4)).count(), 8);
    }

    #[test]
    fn degree_ignores_visited_squares() {
        let mut board = Board::new(5);
        let centre = Square::new(2, 2);
        assert_eq!(board.onward_degree(centre), 8);
        board.mark(Square::new(0, 1), 0);
        board.mark(Square::new(4, 3), 1);
        assert_eq!(board.onward_degree(centre), 6);
        board.clear(Square::new(0, 1));
        assert_eq!(board.onward_degree(centre), 7);
    }

    #[test]
    fn offset_respects_bounds() {
        let sq = Square::new(1, 0);
        assert_eq!(sq.offset(-2, 1, 3), None);
        assert_eq!(sq.offset(1, -1, 3), None);
        assert_eq!(sq.offset(1, 2, 3), Some(Square::new(2, 2)));
        assert_eq!(sq.offset(1, 2, 2), None);
    }

    #[test]
    fn knight_move_predicate() {
        let a = Square::new(3, 3);
        assert!(a.is_knight_move(Square::new(1, 2)));
        assert!(a.is_knight_move(Square::new(4, 5)));
        assert!(!a.is_knight_move(Square::new(3, 3)));
        assert!(!a.is_knight_move(Square::new(5, 5)));
    }

    #[test]
    fn off_board_reads_do_not_alias_other_cells() {
        let mut board = Board::new(5);
        board.mark(Square::new(1, 2), 3);
        assert_eq!(board.get(Square::new(0, 7)), None);
        assert!(!board.is_unvisited(Square::new(0, 7)));
        assert_eq!(board.get(Square::new(1, 2)), Some(3));
    }

    #[test]
    fn visit_order_follows_move_indices() {
        let mut board = Board::new(3);
        board.mark(Square::new(0, 0), 0);
        board.mark(Square::new(1, 2), 1);
        board.mark(Square::new(2, 0), 2);
        assert_eq!(board.visited(), 3);
        assert_eq!(
            board.visit_order(),
            vec![Square::new(0, 0), Square::new(1, 2), Square::new(2, 0)]
        );
    }
}
