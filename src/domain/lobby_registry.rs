//! Lobby presence tracking, keyed by session and decoupled from identity.
//!
//! Player identities live in the [`PlayerDirectory`]; the lobby only holds
//! per-session [`PresenceEntry`] records in a [`PresenceStore`]. Every
//! mutation publishes a `lobby_update` snapshot on a best-effort basis.

use std::sync::Arc;

use chrono::Utc;

use super::event_bus::notify_best_effort;
use super::{
    GameEvent, LobbyMember, Notifier, Player, PlayerDirectory, PlayerId, PresenceEntry,
    PresenceStatus, PresenceStore, SessionId,
};
use crate::error::GatewayError;

/// Longest accepted player name, in characters.
pub const MAX_NAME_LEN: usize = 64;

/// Registry of online sessions and their players.
#[derive(Debug)]
pub struct LobbyRegistry {
    presence: Arc<dyn PresenceStore>,
    players: Arc<PlayerDirectory>,
    notifier: Arc<dyn Notifier>,
}

impl LobbyRegistry {
    /// Creates a registry over the given stores and notifier.
    #[must_use]
    pub fn new(
        presence: Arc<dyn PresenceStore>,
        players: Arc<PlayerDirectory>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            presence,
            players,
            notifier,
        }
    }

    /// Returns the player directory backing this lobby.
    #[must_use]
    pub fn players(&self) -> &Arc<PlayerDirectory> {
        &self.players
    }

    /// Resolves or creates the player named `name` and marks `session`
    /// online for them, overwriting any previous entry for the session.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] if the name is blank or
    /// longer than [`MAX_NAME_LEN`] characters.
    pub fn register(&self, session: SessionId, name: &str) -> Result<Player, GatewayError> {
        if name.trim().is_empty() {
            return Err(GatewayError::InvalidRequest(
                "player name must not be empty".to_string(),
            ));
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(GatewayError::InvalidRequest(format!(
                "player name longer than {MAX_NAME_LEN} characters"
            )));
        }

        let (player, created) = self.players.resolve_or_create(name);
        if created {
            tracing::info!(player_id = %player.id, name, "player created");
        }

        self.presence
            .put(session.clone(), PresenceEntry::online(&player, Utc::now()));
        tracing::info!(%session, player_id = %player.id, "session joined lobby");

        self.broadcast();
        Ok(player)
    }

    /// Returns the player bound to `session`, if the session is present and
    /// the player record still exists.
    #[must_use]
    pub fn lookup_by_session(&self, session: &SessionId) -> Option<Player> {
        let entry = self.presence.get(session)?;
        self.players.get(entry.player_id)
    }

    /// Returns the raw presence entry for `session`.
    #[must_use]
    pub fn lookup_entry(&self, session: &SessionId) -> Option<PresenceEntry> {
        self.presence.get(session)
    }

    /// Returns a snapshot of current lobby membership, unordered.
    #[must_use]
    pub fn list(&self) -> Vec<LobbyMember> {
        self.presence
            .entries()
            .into_iter()
            .map(|(session_id, entry)| LobbyMember { session_id, entry })
            .collect()
    }

    /// Removes `session` from the lobby. Removing an absent session is not
    /// an error.
    pub fn deregister(&self, session: &SessionId) {
        if self.presence.remove(session).is_some() {
            tracing::info!(%session, "session left lobby");
        } else {
            tracing::debug!(%session, "deregister of unknown session");
        }
        self.broadcast();
    }

    /// Sets the status of every session bound to `player`.
    ///
    /// Returns the number of sessions updated; publishes a lobby update
    /// only if that is non-zero.
    pub fn set_player_status(&self, player: PlayerId, status: PresenceStatus) -> usize {
        let sessions: Vec<SessionId> = self
            .presence
            .entries()
            .into_iter()
            .filter(|(_, entry)| entry.player_id == player && entry.status != status)
            .map(|(session, _)| session)
            .collect();

        let updated = sessions
            .iter()
            .filter(|session| {
                self.presence
                    .update(session, &|entry: &mut PresenceEntry| entry.status = status)
            })
            .count();

        if updated > 0 {
            tracing::debug!(%player, ?status, updated, "presence status changed");
            self.broadcast();
        }
        updated
    }

    fn broadcast(&self) {
        notify_best_effort(self.notifier.as_ref(), GameEvent::lobby_update(self.list()));
    }
}
