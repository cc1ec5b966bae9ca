//! Board engine: replays a move history and detects wins and draws.
//!
//! [`evaluate`] is a pure function of the move sequence. It does not read
//! the clock or any shared state, so the same history always yields the
//! same [`BoardOutcome`].

use serde::Serialize;

use super::{Cell, Move, PlayerId};
use super::moves::BOARD_SIZE;

const SIDE: usize = BOARD_SIZE as usize;

/// Total number of squares; a history this long with no line is a draw.
pub const CELL_COUNT: usize = SIDE * SIDE;

/// The eight winning lines as zero-based `(row, col)` triples.
const LINES: [[(usize, usize); 3]; 8] = [
    // Rows
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    // Columns
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    // Diagonals
    [(0, 0), (1, 1), (2, 2)],
    [(2, 0), (1, 1), (0, 2)],
];

/// Result of replaying a move history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BoardOutcome {
    /// No line completed and free squares remain.
    Ongoing,
    /// A line was completed; play stops at the move that completed it.
    Won {
        /// The first move whose placement completed a line.
        winning_move: Move,
    },
    /// All nine squares are taken and no line was completed.
    Drawn,
}

impl BoardOutcome {
    /// Returns `true` for [`BoardOutcome::Won`] and [`BoardOutcome::Drawn`].
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Ongoing)
    }
}

/// 3×3 occupancy grid keyed by `(row, col)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Board {
    squares: [[Option<PlayerId>; SIDE]; SIDE],
}

impl Board {
    /// Creates an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the board for a move history, in replay order.
    ///
    /// Moves after a completed line are still placed; use [`evaluate`]
    /// for outcome detection.
    #[must_use]
    pub fn from_moves(moves: &[Move]) -> Self {
        let mut board = Self::new();
        for mv in replay_order(moves) {
            board.place(mv.cell, mv.player_id);
        }
        board
    }

    /// Returns the occupant of `cell`, if any.
    #[must_use]
    pub fn get(&self, cell: Cell) -> Option<PlayerId> {
        self.at(cell.offsets())
    }

    /// Returns the grid as rows of occupants, top row first.
    #[must_use]
    pub fn rows(&self) -> Vec<Vec<Option<PlayerId>>> {
        self.squares.iter().map(|row| row.to_vec()).collect()
    }

    /// Returns the number of occupied squares.
    #[must_use]
    pub fn occupied(&self) -> usize {
        self.squares.iter().flatten().filter(|s| s.is_some()).count()
    }

    fn at(&self, (row, col): (usize, usize)) -> Option<PlayerId> {
        self.squares.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    fn place(&mut self, cell: Cell, player: PlayerId) {
        let (row, col) = cell.offsets();
        if let Some(square) = self.squares.get_mut(row).and_then(|r| r.get_mut(col)) {
            *square = Some(player);
        }
    }

    /// Returns `true` if some line is held entirely by one player.
    fn has_line(&self) -> bool {
        LINES.iter().any(|[a, b, c]| match self.at(*a) {
            Some(owner) => self.at(*b) == Some(owner) && self.at(*c) == Some(owner),
            None => false,
        })
    }
}

/// Evaluates an ordered move history against the win conditions.
///
/// Moves are replayed in ascending [`super::MoveId`] order. After each
/// placement the eight lines are checked; the first move that completes one
/// is the winning move and evaluation stops there. If no line is completed
/// and nine moves have been placed the game is drawn, otherwise ongoing.
///
/// The caller guarantees no two moves share a cell.
#[must_use]
pub fn evaluate(moves: &[Move]) -> BoardOutcome {
    let mut board = Board::new();
    let mut placed = 0usize;

    for mv in replay_order(moves) {
        board.place(mv.cell, mv.player_id);
        placed += 1;
        if board.has_line() {
            return BoardOutcome::Won {
                winning_move: mv.clone(),
            };
        }
    }

    if placed >= CELL_COUNT {
        BoardOutcome::Drawn
    } else {
        BoardOutcome::Ongoing
    }
}

fn replay_order(moves: &[Move]) -> Vec<&Move> {
    let mut ordered: Vec<&Move> = moves.iter().collect();
    ordered.sort_by_key(|mv| mv.id);
    ordered
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{GameId, MoveId};
    use chrono::Utc;

    fn history(p1: PlayerId, p2: PlayerId, cells: &[(u8, u8)]) -> Vec<Move> {
        let game_id = GameId::new();
        let mut id = MoveId::FIRST;
        cells
            .iter()
            .enumerate()
            .map(|(i, &(row, col))| {
                let Ok(cell) = Cell::new(row, col) else {
                    panic!("bad test cell ({row},{col})");
                };
                let mv = Move {
                    id,
                    game_id,
                    player_id: if i % 2 == 0 { p1 } else { p2 },
                    cell,
                    played_at: Utc::now(),
                };
                id = id.next();
                mv
            })
            .collect()
    }

    #[test]
    fn empty_history_is_ongoing() {
        assert_eq!(evaluate(&[]), BoardOutcome::Ongoing);
    }

    #[test]
    fn diagonal_win_on_fifth_move() {
        let (p1, p2) = (PlayerId::new(), PlayerId::new());
        let moves = history(p1, p2, &[(1, 1), (1, 2), (2, 2), (3, 1), (3, 3)]);
        let BoardOutcome::Won { winning_move } = evaluate(&moves) else {
            panic!("expected a win");
        };
        assert_eq!(winning_move.player_id, p1);
        assert_eq!(winning_move.id, MoveId::new(5));
    }

    #[test]
    fn anti_diagonal_and_column_wins() {
        let (p1, p2) = (PlayerId::new(), PlayerId::new());
        let anti = history(p1, p2, &[(3, 1), (1, 1), (2, 2), (1, 2), (1, 3)]);
        assert!(matches!(evaluate(&anti), BoardOutcome::Won { .. }));

        // p2 takes column 3 while p1 scatters.
        let column = history(p1, p2, &[(1, 1), (1, 3), (2, 1), (2, 3), (3, 2), (3, 3)]);
        let BoardOutcome::Won { winning_move } = evaluate(&column) else {
            panic!("expected a column win");
        };
        assert_eq!(winning_move.player_id, p2);
    }

    #[test]
    fn ninth_move_line_wins_otherwise_draw() {
        let (p1, p2) = (PlayerId::new(), PlayerId::new());
        let moves = history(
            p1,
            p2,
            &[(1, 1), (1, 2), (1, 3), (2, 1), (2, 2), (2, 3), (3, 2), (3, 1), (3, 3)],
        );
        // p1 holds (1,1),(1,3),(2,2),(3,2),(3,3): (1,1)-(2,2)-(3,3) is a line.
        assert!(matches!(evaluate(&moves), BoardOutcome::Won { .. }));

        let draw = history(
            p1,
            p2,
            &[(1, 1), (1, 2), (1, 3), (2, 1), (2, 3), (2, 2), (3, 1), (3, 3), (3, 2)],
        );
        assert_eq!(evaluate(&draw), BoardOutcome::Drawn);
    }

    #[test]
    fn evaluation_replays_by_move_id_not_slice_order() {
        let (p1, p2) = (PlayerId::new(), PlayerId::new());
        let mut moves = history(p1, p2, &[(1, 1), (1, 2), (2, 2), (3, 1), (3, 3)]);
        moves.reverse();
        let BoardOutcome::Won { winning_move } = evaluate(&moves) else {
            panic!("expected a win");
        };
        assert_eq!(winning_move.id, MoveId::new(5));
    }

    #[test]
    fn first_completed_line_wins() {
        let (p1, p2) = (PlayerId::new(), PlayerId::new());
        // Row 1 completes at move 5; the trailing moves must not matter.
        let moves = history(
            p1,
            p2,
            &[(1, 1), (2, 1), (1, 2), (2, 2), (1, 3), (2, 3)],
        );
        let BoardOutcome::Won { winning_move } = evaluate(&moves) else {
            panic!("expected a win");
        };
        assert_eq!(winning_move.id, MoveId::new(5));
        assert_eq!(winning_move.player_id, p1);
    }

    #[test]
    fn board_tracks_occupancy() {
        let (p1, p2) = (PlayerId::new(), PlayerId::new());
        let moves = history(p1, p2, &[(2, 2), (1, 3)]);
        let board = Board::from_moves(&moves);
        assert_eq!(board.occupied(), 2);
        let (Ok(center), Ok(corner), Ok(empty)) =
            (Cell::new(2, 2), Cell::new(1, 3), Cell::new(3, 3))
        else {
            panic!("valid cells");
        };
        assert_eq!(board.get(center), Some(p1));
        assert_eq!(board.get(corner), Some(p2));
        assert_eq!(board.get(empty), None);
    }
}
