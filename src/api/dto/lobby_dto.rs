//! Lobby listing DTOs.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{LobbyMember, PlayerId, PresenceStatus, SessionId};

/// One lobby entry as returned by `GET /lobby` and `GET /lobby/me`.
#[derive(Debug, Serialize, ToSchema)]
pub struct LobbyEntryDto {
    /// Session holding the entry.
    pub session_id: SessionId,
    /// Player bound to the session.
    pub player_id: PlayerId,
    /// Display name at registration time.
    pub display_name: String,
    /// Registration timestamp.
    pub logged_in_at: DateTime<Utc>,
    /// Current presence status.
    pub status: PresenceStatus,
}

impl From<LobbyMember> for LobbyEntryDto {
    fn from(member: LobbyMember) -> Self {
        Self {
            session_id: member.session_id,
            player_id: member.entry.player_id,
            display_name: member.entry.display_name,
            logged_in_at: member.entry.logged_in_at,
            status: member.entry.status,
        }
    }
}

/// Response body for `GET /lobby`.
#[derive(Debug, Serialize, ToSchema)]
pub struct LobbyResponse {
    /// Current lobby members.
    pub players: Vec<LobbyEntryDto>,
    /// Number of members.
    pub total: usize,
}
