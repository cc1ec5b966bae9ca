//! Move service: validates and applies moves, then announces the result.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use crate::domain::{
    Cell, GameEvent, GameId, GameRegistry, GameRuleError, GameStatus, GameSummary, LobbyRegistry,
    Move, Notifier, PlayerId, PresenceStatus, notify_best_effort,
};
use crate::error::GatewayError;

/// A move that was accepted, with the game state right after it.
#[derive(Debug, Clone, Serialize)]
pub struct PlayedMove {
    /// The accepted move.
    #[serde(rename = "move")]
    pub applied: Move,
    /// Game state after the move was applied and evaluated.
    pub game: GameSummary,
}

/// Applies moves to games held in the [`GameRegistry`].
///
/// Every call follows the pattern: lock the game → check it is in progress
/// → apply the move through the aggregate → emit events → release the lock.
/// Event delivery failure never undoes the move.
#[derive(Debug, Clone)]
pub struct MoveService {
    games: Arc<GameRegistry>,
    lobby: Arc<LobbyRegistry>,
    notifier: Arc<dyn Notifier>,
}

impl MoveService {
    /// Creates a new `MoveService`.
    #[must_use]
    pub fn new(
        games: Arc<GameRegistry>,
        lobby: Arc<LobbyRegistry>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            games,
            lobby,
            notifier,
        }
    }

    /// Plays `player`'s move on `cell` in the given game.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::PlayerNotFound`] / [`GatewayError::GameNotFound`] for
    ///   unknown ids.
    /// - [`GatewayError::GameNotActive`] if the game is not in progress.
    /// - [`GatewayError::OutOfTurn`] if it is the other player's turn, or the
    ///   player is not on the roster.
    /// - [`GatewayError::InvalidMove`] if the cell is already taken.
    pub async fn play_move(
        &self,
        game_id: GameId,
        player_id: PlayerId,
        cell: Cell,
    ) -> Result<PlayedMove, GatewayError> {
        if self.lobby.players().get(player_id).is_none() {
            return Err(GatewayError::PlayerNotFound(*player_id.as_uuid()));
        }
        let handle = self
            .games
            .get(game_id)
            .await
            .ok_or(GatewayError::GameNotFound(*game_id.as_uuid()))?;

        let mut game = handle.lock().await;
        let status = game.status();
        if status != GameStatus::InProgress {
            return Err(GatewayError::GameNotActive(status));
        }

        let (applied, outcome) = game
            .apply_move(player_id, cell, Utc::now())
            .map_err(|err| match err {
                GameRuleError::CellOccupied(cell) => GatewayError::InvalidMove(cell),
                GameRuleError::NotYourTurn { expected } => GatewayError::OutOfTurn { expected },
                GameRuleError::WrongState { status } => GatewayError::GameNotActive(status),
                other => GatewayError::from(other),
            })?;
        let summary = GameSummary::from(&*game);

        tracing::debug!(
            %game_id,
            %player_id,
            row = cell.row(),
            col = cell.col(),
            move_id = %applied.id,
            "move applied"
        );

        // Announced under the game lock so events leave in commit order.
        notify_best_effort(
            self.notifier.as_ref(),
            GameEvent::game_update(summary.clone(), Some(applied.clone())),
        );

        if outcome.is_terminal() {
            for member in &summary.players {
                self.lobby.set_player_status(*member, PresenceStatus::Online);
            }
            // Last: once released, the players can be admitted elsewhere.
            self.games.release_game(game_id, &summary.players).await;
        }
        drop(game);

        Ok(PlayedMove {
            applied,
            game: summary,
        })
    }
}
