//! Concurrent game storage with per-game exclusive locking.
//!
//! [`GameRegistry`] keeps every game behind its own [`tokio::sync::Mutex`].
//! Holding that mutex is the single mutation token for the game: roster
//! changes and moves on one game are strictly serialized, while different
//! games proceed in parallel.
//!
//! Alongside the games, the registry indexes each player's unfinished game
//! so admission checks never have to visit game history.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use super::{Game, GameId, GameSummary, PlayerId};

/// Central store for all games, live and finished.
///
/// # Concurrency
///
/// - The outer `RwLock` only guards membership of the map.
/// - Each game is an `Arc<Mutex<Game>>`; callers lock it for the duration
///   of one read or one mutating call.
/// - The active-game index is written by the services while they hold the
///   game's mutex, so it never runs ahead of the game it describes.
#[derive(Debug, Default)]
pub struct GameRegistry {
    games: RwLock<HashMap<GameId, Arc<Mutex<Game>>>>,
    /// Player → the one game they are on the roster of that has not finished.
    active: RwLock<HashMap<PlayerId, GameId>>,
}

impl GameRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a game and returns its lock handle.
    ///
    /// Game ids are UUID v4, so an existing entry is never replaced.
    pub async fn insert(&self, game: Game) -> Arc<Mutex<Game>> {
        let id = game.id();
        let mut map = self.games.write().await;
        Arc::clone(map.entry(id).or_insert_with(|| Arc::new(Mutex::new(game))))
    }

    /// Returns the lock handle for a game, if it exists.
    pub async fn get(&self, id: GameId) -> Option<Arc<Mutex<Game>>> {
        self.games.read().await.get(&id).cloned()
    }

    /// Returns a summary of one game, if it exists.
    pub async fn summary(&self, id: GameId) -> Option<GameSummary> {
        let handle = self.get(id).await?;
        let game = handle.lock().await;
        Some(GameSummary::from(&*game))
    }

    /// Returns summaries of every game matching `filter`.
    ///
    /// Each game is locked briefly on its own; the result is not an atomic
    /// snapshot across games.
    pub async fn collect<F>(&self, filter: F) -> Vec<GameSummary>
    where
        F: Fn(&Game) -> bool,
    {
        let handles: Vec<Arc<Mutex<Game>>> = self.games.read().await.values().cloned().collect();
        let mut summaries = Vec::with_capacity(handles.len());
        for handle in handles {
            let game = handle.lock().await;
            if filter(&game) {
                summaries.push(GameSummary::from(&*game));
            }
        }
        summaries.sort_by_key(|s| s.created_at);
        summaries
    }

    /// Records `player` as seated in the unfinished game `game_id`.
    pub async fn bind_player(&self, player: PlayerId, game_id: GameId) {
        self.active.write().await.insert(player, game_id);
    }

    /// Returns the unfinished game `player` is seated in, if any.
    pub async fn active_game_of(&self, player: PlayerId) -> Option<GameId> {
        self.active.read().await.get(&player).copied()
    }

    /// Clears the index entries that point at `game_id` for `players`.
    ///
    /// Returns how many players were released.
    pub async fn release_game(&self, game_id: GameId, players: &[PlayerId]) -> usize {
        let mut active = self.active.write().await;
        let mut released = 0;
        for player in players {
            if active.get(player) == Some(&game_id) {
                active.remove(player);
                released += 1;
            }
        }
        released
    }

    /// Returns the number of games in the registry.
    pub async fn len(&self) -> usize {
        self.games.read().await.len()
    }

    /// Returns `true` if the registry contains no games.
    pub async fn is_empty(&self) -> bool {
        self.games.read().await.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{GameStatus, PlayerId};
    use chrono::Utc;

    #[tokio::test]
    async fn insert_and_get() {
        let registry = GameRegistry::new();
        let id = GameId::new();
        let _ = registry.insert(Game::new(id, Utc::now())).await;

        let Some(handle) = registry.get(id).await else {
            panic!("game not found");
        };
        assert_eq!(handle.lock().await.id(), id);
        assert!(registry.get(GameId::new()).await.is_none());
    }

    #[tokio::test]
    async fn mutations_through_handle_are_visible() {
        let registry = GameRegistry::new();
        let id = GameId::new();
        let handle = registry.insert(Game::new(id, Utc::now())).await;
        {
            let mut game = handle.lock().await;
            let _ = game.add_player(PlayerId::new(), Utc::now());
            let _ = game.add_player(PlayerId::new(), Utc::now());
        }
        let Some(summary) = registry.summary(id).await else {
            panic!("game not found");
        };
        assert_eq!(summary.status, GameStatus::InProgress);
    }

    #[tokio::test]
    async fn collect_filters() {
        let registry = GameRegistry::new();
        let player = PlayerId::new();
        let mut joined = Game::new(GameId::new(), Utc::now());
        let _ = joined.add_player(player, Utc::now());
        let _ = registry.insert(joined).await;
        let _ = registry.insert(Game::new(GameId::new(), Utc::now())).await;

        assert_eq!(registry.len().await, 2);
        assert_eq!(registry.collect(|_| true).await.len(), 2);
        assert_eq!(registry.collect(|g| g.has_player(player)).await.len(), 1);
    }

    #[tokio::test]
    async fn active_index_binds_and_releases() {
        let registry = GameRegistry::new();
        let (p1, p2) = (PlayerId::new(), PlayerId::new());
        let (finished, other) = (GameId::new(), GameId::new());

        registry.bind_player(p1, finished).await;
        registry.bind_player(p2, other).await;
        assert_eq!(registry.active_game_of(p1).await, Some(finished));

        // Only entries pointing at the finished game are cleared.
        assert_eq!(registry.release_game(finished, &[p1, p2]).await, 1);
        assert_eq!(registry.active_game_of(p1).await, None);
        assert_eq!(registry.active_game_of(p2).await, Some(other));
        assert_eq!(registry.release_game(finished, &[p1]).await, 0);
    }

    #[tokio::test]
    async fn empty_registry() {
        let registry = GameRegistry::new();
        assert!(registry.is_empty().await);
        assert!(registry.collect(|_| true).await.is_empty());
    }
}
