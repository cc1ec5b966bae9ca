//! WebSocket message types: envelope, commands, and channels.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::GameId;

/// Top-level WebSocket message envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WsMessage {
    /// Client-provided ID for requests; server-generated for events.
    pub id: String,
    /// Message type discriminator.
    #[serde(rename = "type")]
    pub msg_type: WsMessageType,
    /// ISO-8601 timestamp.
    pub timestamp: DateTime<Utc>,
    /// Variant-specific payload.
    pub payload: serde_json::Value,
}

impl WsMessage {
    /// Builds a server-originated message stamped now.
    #[must_use]
    pub fn server(id: String, msg_type: WsMessageType, payload: serde_json::Value) -> Self {
        Self {
            id,
            msg_type,
            timestamp: Utc::now(),
            payload,
        }
    }
}

/// Discriminator for WebSocket message types.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WsMessageType {
    /// Client → Server command.
    Command,
    /// Server → Client response to a command.
    Response,
    /// Server → Client broadcast event.
    Event,
    /// Server → Client error.
    Error,
}

/// Commands that a client can send over WebSocket.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum WsCommand {
    /// Start receiving events on the listed channels.
    Subscribe {
        /// Channel names, e.g. `"lobby"`, `"game:<uuid>"`, `"game:*"`.
        channels: Vec<String>,
    },
    /// Stop receiving events on the listed channels.
    Unsubscribe {
        /// Channel names.
        channels: Vec<String>,
    },
}

/// An event stream a client can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Lobby membership snapshots.
    Lobby,
    /// Updates for one game.
    Game(GameId),
    /// Updates for every game.
    AllGames,
}

/// A channel name that is not `lobby`, `game:*` or `game:<uuid>`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown channel: {0}")]
pub struct UnknownChannel(pub String);

impl FromStr for Channel {
    type Err = UnknownChannel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lobby" => Ok(Self::Lobby),
            "game:*" => Ok(Self::AllGames),
            other => other
                .strip_prefix("game:")
                .and_then(|id| id.parse::<uuid::Uuid>().ok())
                .map(|uuid| Self::Game(GameId::from_uuid(uuid)))
                .ok_or_else(|| UnknownChannel(other.to_string())),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lobby => f.write_str("lobby"),
            Self::Game(id) => write!(f, "game:{id}"),
            Self::AllGames => f.write_str("game:*"),
        }
    }
}
