//! Type-safe identifiers for players, games, moves and lobby sessions.
//!
//! [`PlayerId`] and [`GameId`] wrap [`uuid::Uuid`] (v4) so the two kinds of
//! identity cannot be swapped by accident. [`MoveId`] is a per-game
//! sequence number and [`SessionId`] an opaque client session token.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Unique identifier for a registered player.
///
/// Generated once when a name is first registered and reused for every
/// later registration of the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct PlayerId(uuid::Uuid);

/// Unique identifier for a game.
///
/// Used as the key in [`super::GameRegistry`], the discriminator of
/// `game_update` events, and the WebSocket subscription target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct GameId(uuid::Uuid);

macro_rules! uuid_id {
    ($name:ident) => {
        impl $name {
            /// Creates a new random identifier (UUID v4).
            #[must_use]
            pub fn new() -> Self {
                Self(uuid::Uuid::new_v4())
            }

            /// Creates an identifier from an existing [`uuid::Uuid`].
            #[must_use]
            pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner [`uuid::Uuid`].
            #[must_use]
            pub const fn as_uuid(&self) -> &uuid::Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<uuid::Uuid> for $name {
            fn from(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for uuid::Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

uuid_id!(PlayerId);
uuid_id!(GameId);

/// Position of a move within its game's history.
///
/// Starts at 1 for the first move and increases by one per accepted move,
/// so ascending `MoveId` is the authoritative replay order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct MoveId(u64);

impl MoveId {
    /// The id assigned to the first move of a game.
    pub const FIRST: Self = Self(1);

    /// Wraps a raw sequence number.
    #[must_use]
    pub const fn new(seq: u64) -> Self {
        Self(seq)
    }

    /// Returns the raw sequence number.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns the id that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for MoveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque client session token keying a lobby presence entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Wraps a client-supplied session token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Generates a fresh random session token.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Returns the token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn new_generates_unique_ids() {
        assert_ne!(PlayerId::new(), PlayerId::new());
        assert_ne!(GameId::new(), GameId::new());
    }

    #[test]
    fn display_is_uuid_format() {
        let s = format!("{}", GameId::new());
        assert_eq!(s.len(), 36);
        assert!(s.contains('-'));
    }

    #[test]
    fn player_id_serializes_transparently() {
        let uuid = uuid::Uuid::new_v4();
        let id = PlayerId::from_uuid(uuid);
        let Ok(json) = serde_json::to_string(&id) else {
            panic!("serialization failed");
        };
        assert_eq!(json, format!("\"{uuid}\""));
    }

    #[test]
    fn move_id_sequence() {
        assert_eq!(MoveId::FIRST.get(), 1);
        assert_eq!(MoveId::FIRST.next(), MoveId::new(2));
        assert!(MoveId::new(3) > MoveId::new(2));
    }

    #[test]
    fn session_id_generate_is_unique() {
        let a = SessionId::generate();
        let b = SessionId::generate();
        assert_ne!(a, b);
        assert_eq!(SessionId::new("abc").as_str(), "abc");
    }
}
