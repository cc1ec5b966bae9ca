//! WebSocket layer: connection handling, message routing, subscriptions.
//!
//! The WebSocket endpoint at `/ws` streams `lobby_update` and
//! `game_update` events to clients subscribed to the matching channels.

pub mod connection;
pub mod handler;
pub mod messages;
pub mod subscription;
