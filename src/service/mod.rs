//! Service layer: business logic orchestration.
//!
//! [`MatchmakingService`] binds players to games and [`MoveService`]
//! applies moves. Both lock games through the shared
//! [`super::domain::GameRegistry`] and emit events through a
//! [`super::domain::Notifier`].

pub mod matchmaking_service;
pub mod move_service;

pub use matchmaking_service::MatchmakingService;
pub use move_service::{MoveService, PlayedMove};
