//! Matchmaking service: binds players to games and starts them.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;

use crate::domain::{
    Game, GameEvent, GameId, GameRegistry, GameStatus, GameSummary, LobbyRegistry, Notifier,
    Player, PlayerId, PresenceStatus, notify_best_effort,
};
use crate::error::{GatewayError, JoinViolation};

/// Orchestrates player ↔ game binding.
///
/// Admissions (start and join) run one at a time behind an async admission
/// lock, so the "player is busy" check and the roster insert it guards are
/// atomic. Moves never take this lock; they only lock their own game.
#[derive(Debug, Clone)]
pub struct MatchmakingService {
    games: Arc<GameRegistry>,
    lobby: Arc<LobbyRegistry>,
    notifier: Arc<dyn Notifier>,
    admission: Arc<Mutex<()>>,
}

impl MatchmakingService {
    /// Creates a new `MatchmakingService`.
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
            admission: Arc::new(Mutex::new(())),
        }
    }

    /// Returns a reference to the inner [`GameRegistry`].
    #[must_use]
    pub fn games(&self) -> &Arc<GameRegistry> {
        &self.games
    }

    /// Creates a new game with `player` as its first roster member.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::PlayerNotFound`] if the player does not exist.
    /// - [`GatewayError::PlayerBusy`] if the player is already on the roster
    ///   of a game that has not finished.
    pub async fn start_game(&self, player_id: PlayerId) -> Result<GameSummary, GatewayError> {
        let player = self.player(player_id)?;

        let admission = self.admission.lock().await;
        if self.is_busy(player.id).await {
            return Err(GatewayError::PlayerBusy(player.id));
        }

        let now = Utc::now();
        let mut game = Game::new(GameId::new(), now);
        game.add_player(player.id, now)?;
        let summary = GameSummary::from(&game);
        let _ = self.games.insert(game).await;
        self.games.bind_player(player.id, summary.game_id).await;

        tracing::info!(game_id = %summary.game_id, player_id = %player.id, "game created");
        // Published before admission is released so no join of this game
        // can announce itself first.
        notify_best_effort(
            self.notifier.as_ref(),
            GameEvent::game_update(summary.clone(), None),
        );
        drop(admission);
        Ok(summary)
    }

    /// Adds `player` to a `Starting` game, starting it when the roster fills.
    ///
    /// All join preconditions are checked together; a rejection lists every
    /// one that failed.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::PlayerNotFound`] / [`GatewayError::GameNotFound`] for
    ///   unknown ids.
    /// - [`GatewayError::JoinRejected`] carrying any of
    ///   [`JoinViolation::GameNotJoinable`], [`JoinViolation::PlayerBusy`]
    ///   and [`JoinViolation::GameFull`].
    pub async fn join_game(
        &self,
        game_id: GameId,
        player_id: PlayerId,
    ) -> Result<GameSummary, GatewayError> {
        let player = self.player(player_id)?;
        let handle = self
            .games
            .get(game_id)
            .await
            .ok_or(GatewayError::GameNotFound(*game_id.as_uuid()))?;

        let admission = self.admission.lock().await;
        let busy = self.is_busy(player.id).await;

        let mut game = handle.lock().await;
        let mut violations = Vec::new();
        if game.status() != GameStatus::Starting {
            violations.push(JoinViolation::GameNotJoinable);
        }
        if busy {
            violations.push(JoinViolation::PlayerBusy);
        }
        if game.is_full() {
            violations.push(JoinViolation::GameFull);
        }
        if !violations.is_empty() {
            tracing::debug!(%game_id, player_id = %player.id, ?violations, "join rejected");
            return Err(GatewayError::JoinRejected {
                player: player.name,
                violations,
            });
        }

        let status = game.add_player(player.id, Utc::now())?;
        let summary = GameSummary::from(&*game);
        self.games.bind_player(player.id, game_id).await;

        tracing::info!(%game_id, player_id = %player.id, "player joined game");
        if status == GameStatus::InProgress {
            // Still under the game lock: the first move cannot be announced
            // ahead of the start.
            notify_best_effort(
                self.notifier.as_ref(),
                GameEvent::game_update(summary.clone(), None),
            );
            for member in &summary.players {
                self.lobby.set_player_status(*member, PresenceStatus::Playing);
            }
        }
        drop(game);
        drop(admission);
        Ok(summary)
    }

    /// Returns the in-progress games `player` is playing in, together with
    /// every game still waiting for players.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PlayerNotFound`] if the player does not exist.
    pub async fn list_joinable_or_active_games_for(
        &self,
        player_id: PlayerId,
    ) -> Result<Vec<GameSummary>, GatewayError> {
        let player = self.player(player_id)?;
        Ok(self
            .games
            .collect(|game| match game.status() {
                GameStatus::Starting => true,
                GameStatus::InProgress => game.has_player(player.id),
                GameStatus::Finished => false,
            })
            .await)
    }

    /// Returns every game `player` has been on the roster of, finished
    /// games included.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PlayerNotFound`] if the player does not exist.
    pub async fn list_games_for(
        &self,
        player_id: PlayerId,
    ) -> Result<Vec<GameSummary>, GatewayError> {
        let player = self.player(player_id)?;
        Ok(self.games.collect(|game| game.has_player(player.id)).await)
    }

    /// Returns the current state of one game.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::GameNotFound`] if the game does not exist.
    pub async fn get_game(&self, game_id: GameId) -> Result<GameSummary, GatewayError> {
        self.games
            .summary(game_id)
            .await
            .ok_or(GatewayError::GameNotFound(*game_id.as_uuid()))
    }

    fn player(&self, player_id: PlayerId) -> Result<Player, GatewayError> {
        self.lobby
            .players()
            .get(player_id)
            .ok_or(GatewayError::PlayerNotFound(*player_id.as_uuid()))
    }

    /// A player is busy while on the roster of any game not yet finished.
    async fn is_busy(&self, player: PlayerId) -> bool {
        self.games.active_game_of(player).await.is_some()
    }
}
