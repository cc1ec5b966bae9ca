//! Persistence layer: optional PostgreSQL record of games, moves and events.
//!
//! The in-memory registries stay authoritative. When persistence is
//! enabled, [`recorder::spawn_event_recorder`] subscribes to the event bus
//! and mirrors every published event through [`PostgresPersistence`].

pub mod models;
pub mod postgres;
pub mod recorder;

pub use postgres::PostgresPersistence;
pub use recorder::spawn_event_recorder;
