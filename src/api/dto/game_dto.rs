//! Game, join and move DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Board, GameSummary, Move, PlayerId};

/// Request body for `POST /games`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct StartGameRequest {
    /// Player opening the game.
    pub player_id: PlayerId,
}

/// Request body for `POST /games/:id/moves`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct MoveRequest {
    /// Player making the move.
    pub player_id: PlayerId,
    /// Row, 1 to 3. Out-of-range values are reported as an invalid cell.
    pub row: i64,
    /// Column, 1 to 3.
    pub col: i64,
}

/// A game together with its rendered board.
#[derive(Debug, Serialize, ToSchema)]
pub struct GameDetailResponse {
    /// Game state.
    #[serde(flatten)]
    pub game: GameSummary,
    /// Occupancy grid, row-major, `null` for empty squares.
    pub board: Vec<Vec<Option<PlayerId>>>,
}

impl From<GameSummary> for GameDetailResponse {
    fn from(game: GameSummary) -> Self {
        let board = Board::from_moves(&game.moves).rows();
        Self { game, board }
    }
}

/// Response body for `GET /players/:id/games`.
#[derive(Debug, Serialize, ToSchema)]
pub struct GameListResponse {
    /// Matching games, oldest first.
    pub data: Vec<GameSummary>,
    /// Number of games.
    pub total: usize,
}

/// Response body for `POST /games/:id/moves`.
#[derive(Debug, Serialize, ToSchema)]
pub struct MoveResponse {
    /// The accepted move.
    #[serde(rename = "move")]
    pub applied: Move,
    /// Game state after the move.
    pub game: GameDetailResponse,
}
