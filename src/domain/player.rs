//! Player identity and lobby presence records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::PlayerId;

/// Durable player identity. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct Player {
    /// Player identifier.
    pub id: PlayerId,
    /// Display name; the lookup key on registration.
    pub name: String,
}

/// Connection state of a lobby session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PresenceStatus {
    /// In the lobby and free to play.
    Online,
    /// On the roster of a game that is in progress.
    Playing,
    /// Known but not currently connected.
    Offline,
}

/// Ephemeral lobby membership of one session.
///
/// References a [`Player`] by id; it never owns the player record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PresenceEntry {
    /// Player this session is bound to.
    pub player_id: PlayerId,
    /// Player name at registration time.
    pub display_name: String,
    /// When the session registered.
    pub logged_in_at: DateTime<Utc>,
    /// Current presence status.
    pub status: PresenceStatus,
}

impl PresenceEntry {
    /// Creates an `online` entry for `player` stamped at `at`.
    #[must_use]
    pub fn online(player: &Player, at: DateTime<Utc>) -> Self {
        Self {
            player_id: player.id,
            display_name: player.name.clone(),
            logged_in_at: at,
            status: PresenceStatus::Online,
        }
    }
}
