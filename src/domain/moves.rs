//! Board coordinates and the immutable move record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{GameId, MoveId, PlayerId};

/// Number of rows (and columns) on the board.
pub const BOARD_SIZE: u8 = 3;

/// A coordinate outside the 3×3 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cell ({row},{col}) is off the board; rows and columns run 1..=3")]
pub struct InvalidCell {
    /// Requested row.
    pub row: i64,
    /// Requested column.
    pub col: i64,
}

/// Wire shape of a [`Cell`] before range validation.
#[derive(Debug, Deserialize)]
struct RawCell {
    row: i64,
    col: i64,
}

/// A board square addressed by 1-based `(row, col)`.
///
/// Construction goes through [`Cell::new`], so a `Cell` value is always on
/// the board. Deserialization applies the same check.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(try_from = "RawCell")]
pub struct Cell {
    /// Row, 1..=3.
    row: u8,
    /// Column, 1..=3.
    col: u8,
}

impl Cell {
    /// Creates a cell, validating both coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCell`] if `row` or `col` is outside `1..=3`.
    pub const fn new(row: u8, col: u8) -> Result<Self, InvalidCell> {
        if row == 0 || row > BOARD_SIZE || col == 0 || col > BOARD_SIZE {
            return Err(InvalidCell {
                row: row as i64,
                col: col as i64,
            });
        }
        Ok(Self { row, col })
    }

    /// Creates a cell from untrusted wide integers, such as request fields.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCell`] carrying the values as given if either is
    /// outside `1..=3`.
    pub fn from_coords(row: i64, col: i64) -> Result<Self, InvalidCell> {
        match (u8::try_from(row), u8::try_from(col)) {
            (Ok(r), Ok(c)) => Self::new(r, c),
            _ => Err(InvalidCell { row, col }),
        }
    }

    /// Returns the 1-based row.
    #[must_use]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Returns the 1-based column.
    #[must_use]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Zero-based `(row, col)` for grid storage.
    pub(crate) const fn offsets(self) -> (usize, usize) {
        ((self.row - 1) as usize, (self.col - 1) as usize)
    }
}

impl TryFrom<RawCell> for Cell {
    type Error = InvalidCell;

    fn try_from(raw: RawCell) -> Result<Self, Self::Error> {
        Self::from_coords(raw.row, raw.col)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// One accepted move. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Move {
    /// Sequence number within the game; ascending order is replay order.
    pub id: MoveId,
    /// Game the move belongs to.
    pub game_id: GameId,
    /// Player who made the move.
    pub player_id: PlayerId,
    /// Square that was claimed.
    pub cell: Cell,
    /// When the move was accepted.
    pub played_at: DateTime<Utc>,
}
