//! Database models for games, moves and the event log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{GameSummary, Move};

/// A row of the `games` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    /// Game identifier.
    pub id: Uuid,
    /// Roster player ids in join order.
    pub player_ids: Vec<Uuid>,
    /// Derived status at the time of the write.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Start timestamp.
    pub started_at: Option<DateTime<Utc>>,
    /// Finish timestamp.
    pub finished_at: Option<DateTime<Utc>>,
    /// Winner, if any.
    pub winner_id: Option<Uuid>,
}

impl From<&GameSummary> for GameRecord {
    fn from(game: &GameSummary) -> Self {
        Self {
            id: game.game_id.into(),
            player_ids: game.players.iter().map(|p| (*p).into()).collect(),
            status: game.status.as_str().to_string(),
            created_at: game.created_at,
            started_at: game.started_at,
            finished_at: game.finished_at,
            winner_id: game.winner_id.map(Into::into),
        }
    }
}

/// A row of the `moves` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Game the move belongs to.
    pub game_id: Uuid,
    /// Sequence number within the game.
    pub seq: i64,
    /// Player who made the move.
    pub player_id: Uuid,
    /// 1-based row.
    pub row: i16,
    /// 1-based column.
    pub col: i16,
    /// When the move was accepted.
    pub played_at: DateTime<Utc>,
}

impl From<&Move> for MoveRecord {
    fn from(mv: &Move) -> Self {
        Self {
            game_id: mv.game_id.into(),
            seq: i64::try_from(mv.id.get()).unwrap_or(i64::MAX),
            player_id: mv.player_id.into(),
            row: i16::from(mv.cell.row()),
            col: i16::from(mv.cell.col()),
            played_at: mv.played_at,
        }
    }
}
