//! In-process store of player identities, resolved by exact name.

use std::collections::HashMap;

use parking_lot::RwLock;

use super::{Player, PlayerId};

#[derive(Debug, Default)]
struct Players {
    by_id: HashMap<PlayerId, Player>,
    by_name: HashMap<String, PlayerId>,
}

/// System of record for [`Player`] identities.
///
/// Names are matched case-sensitively; registering a known name returns
/// the existing record. Players are never removed.
#[derive(Debug, Default)]
pub struct PlayerDirectory {
    inner: RwLock<Players>,
}

impl PlayerDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the player named `name`, creating it on first use.
    ///
    /// The returned flag is `true` when a new record was created.
    pub fn resolve_or_create(&self, name: &str) -> (Player, bool) {
        if let Some(player) = self.find_by_name(name) {
            return (player, false);
        }

        let mut players = self.inner.write();
        // Another writer may have created it between the read and the write.
        if let Some(player) = players
            .by_name
            .get(name)
            .and_then(|id| players.by_id.get(id))
        {
            return (player.clone(), false);
        }

        let player = Player {
            id: PlayerId::new(),
            name: name.to_string(),
        };
        players.by_name.insert(player.name.clone(), player.id);
        players.by_id.insert(player.id, player.clone());
        (player, true)
    }

    /// Looks a player up by id.
    #[must_use]
    pub fn get(&self, id: PlayerId) -> Option<Player> {
        self.inner.read().by_id.get(&id).cloned()
    }

    /// Looks a player up by exact name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<Player> {
        let players = self.inner.read();
        players
            .by_name
            .get(name)
            .and_then(|id| players.by_id.get(id))
            .cloned()
    }

    /// Returns the number of known players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().by_id.len()
    }

    /// Returns `true` if no player has registered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().by_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_name_resolves_to_same_player() {
        let directory = PlayerDirectory::new();
        let (first, created) = directory.resolve_or_create("grace");
        assert!(created);
        let (second, created) = directory.resolve_or_create("grace");
        assert!(!created);
        assert_eq!(first.id, second.id);
        assert_eq!(directory.len(), 1);
    }

    #[test]
    fn names_are_case_sensitive() {
        let directory = PlayerDirectory::new();
        let (lower, _) = directory.resolve_or_create("grace");
        let (upper, _) = directory.resolve_or_create("Grace");
        assert_ne!(lower.id, upper.id);
    }

    #[test]
    fn get_by_id() {
        let directory = PlayerDirectory::new();
        assert!(directory.is_empty());
        let (player, _) = directory.resolve_or_create("linus");
        assert_eq!(directory.get(player.id), Some(player));
        assert_eq!(directory.get(PlayerId::new()), None);
    }
}
