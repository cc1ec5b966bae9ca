//! Notification events emitted after game and lobby mutations.
//!
//! Events go out through a [`super::Notifier`] (normally the
//! [`super::EventBus`]) to WebSocket subscribers and the optional
//! PostgreSQL event recorder.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{GameId, GameSummary, Move, PresenceEntry, SessionId};

/// One lobby member in a `lobby_update` snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LobbyMember {
    /// Session holding the presence entry.
    pub session_id: SessionId,
    /// The presence entry itself.
    #[serde(flatten)]
    pub entry: PresenceEntry,
}

/// Event published after a state change.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum GameEvent {
    /// A game was created, started, moved on, or finished.
    GameUpdate {
        /// Game state after the change.
        game: GameSummary,
        /// The move that caused the change, if any.
        #[serde(rename = "move", skip_serializing_if = "Option::is_none")]
        last_move: Option<Move>,
        /// Publication timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Lobby membership or a member's status changed.
    LobbyUpdate {
        /// Snapshot of current lobby membership.
        players: Vec<LobbyMember>,
        /// Publication timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl GameEvent {
    /// Builds a `game_update` event stamped now.
    #[must_use]
    pub fn game_update(game: GameSummary, last_move: Option<Move>) -> Self {
        Self::GameUpdate {
            game,
            last_move,
            timestamp: Utc::now(),
        }
    }

    /// Builds a `lobby_update` event stamped now.
    #[must_use]
    pub fn lobby_update(players: Vec<LobbyMember>) -> Self {
        Self::LobbyUpdate {
            players,
            timestamp: Utc::now(),
        }
    }

    /// Returns the game this event concerns, if it is a game event.
    #[must_use]
    pub const fn game_id(&self) -> Option<GameId> {
        match self {
            Self::GameUpdate { game, .. } => Some(game.game_id),
            Self::LobbyUpdate { .. } => None,
        }
    }

    /// Returns the event type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::GameUpdate { .. } => "game_update",
            Self::LobbyUpdate { .. } => "lobby_update",
        }
    }
}
