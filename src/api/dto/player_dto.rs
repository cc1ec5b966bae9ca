//! Player registration DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Player, PlayerId, SessionId};

/// Request body for `POST /players`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePlayerRequest {
    /// Display name; an existing name resolves to the same player.
    pub name: String,
}

/// Response body for `POST /players` (201 Created).
#[derive(Debug, Serialize, ToSchema)]
pub struct PlayerResponse {
    /// Player identifier.
    pub player_id: PlayerId,
    /// Display name.
    pub name: String,
    /// Session the player is now bound to in the lobby.
    pub session_id: SessionId,
}

impl PlayerResponse {
    /// Pairs a player with the session it was registered under.
    #[must_use]
    pub fn new(player: Player, session_id: SessionId) -> Self {
        Self {
            player_id: player.id,
            name: player.name,
            session_id,
        }
    }
}
