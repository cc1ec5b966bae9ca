//! Data Transfer Objects for REST request/response serialization.

pub mod game_dto;
pub mod lobby_dto;
pub mod player_dto;

pub use game_dto::*;
pub use lobby_dto::*;
pub use player_dto::*;
