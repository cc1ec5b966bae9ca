//! Domain layer: board engine, game aggregate, lobby and event system.
//!
//! This module contains the server-side domain model: typed identities,
//! the pure board evaluator, the game aggregate with its lifecycle rules,
//! the lobby presence registry, the event bus for broadcasting state
//! changes, and the game registry for concurrent game storage.

pub mod board;
pub mod event_bus;
pub mod game;
pub mod game_event;
pub mod game_registry;
pub mod ids;
pub mod lobby_registry;
pub mod moves;
pub mod player;
pub mod player_directory;
pub mod presence_store;

pub use board::{Board, BoardOutcome, evaluate};
pub use event_bus::{EventBus, Notifier, NotifyError, notify_best_effort};
pub use game::{Game, GameRuleError, GameStatus, GameSummary, MAX_PLAYERS};
pub use game_event::{GameEvent, LobbyMember};
pub use game_registry::GameRegistry;
pub use ids::{GameId, MoveId, PlayerId, SessionId};
pub use lobby_registry::LobbyRegistry;
pub use moves::{Cell, InvalidCell, Move};
pub use player::{Player, PresenceEntry, PresenceStatus};
pub use player_directory::PlayerDirectory;
pub use presence_store::{InMemoryPresenceStore, PresenceStore};
