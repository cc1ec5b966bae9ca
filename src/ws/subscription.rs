//! Per-connection subscription manager.
//!
//! Tracks which channels a WebSocket client listens to and provides
//! server-side event filtering.

use std::collections::HashSet;

use super::messages::Channel;
use crate::domain::{GameEvent, GameId};

/// Manages the channel subscriptions of a single WebSocket connection.
#[derive(Debug, Default)]
pub struct SubscriptionManager {
    lobby: bool,
    game_ids: HashSet<GameId>,
    /// Wildcard `game:*`. Explicit ids are kept underneath it.
    all_games: bool,
}

impl SubscriptionManager {
    /// Creates a new empty subscription manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds channels to the subscription set.
    pub fn subscribe(&mut self, channels: &[Channel]) {
        for channel in channels {
            match channel {
                Channel::Lobby => self.lobby = true,
                Channel::Game(id) => {
                    self.game_ids.insert(*id);
                }
                Channel::AllGames => self.all_games = true,
            }
        }
    }

    /// Removes channels from the subscription set.
    pub fn unsubscribe(&mut self, channels: &[Channel]) {
        for channel in channels {
            match channel {
                Channel::Lobby => self.lobby = false,
                Channel::Game(id) => {
                    self.game_ids.remove(id);
                }
                Channel::AllGames => self.all_games = false,
            }
        }
    }

    /// Returns `true` if `event` should be forwarded to this client.
    #[must_use]
    pub fn matches(&self, event: &GameEvent) -> bool {
        match event.game_id() {
            Some(id) => self.all_games || self.game_ids.contains(&id),
            None => self.lobby,
        }
    }

    /// Returns the active channels, explicit games included.
    #[must_use]
    pub fn channels(&self) -> Vec<Channel> {
        let mut out = Vec::with_capacity(self.game_ids.len() + 2);
        if self.lobby {
            out.push(Channel::Lobby);
        }
        if self.all_games {
            out.push(Channel::AllGames);
        }
        out.extend(self.game_ids.iter().copied().map(Channel::Game));
        out
    }
}
