//! # tictactoe-gateway
//!
//! Lobby, matchmaking and move-validation service for two-player
//! tic-tac-toe, exposed over REST and WebSocket.
//!
//! Players register in a lobby under a session, open or join games, and
//! take turns on a 3×3 board. The game aggregate owns every rule: who may
//! join, whose turn it is, and whether the move history ends in a win or
//! a draw. Every state change is announced on an in-process event bus.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Handler (ws/)
//!     │
//!     ├── MatchmakingService, MoveService (service/)
//!     ├── EventBus (domain/)
//!     │
//!     ├── LobbyRegistry, GameRegistry (domain/)
//!     ├── Game aggregate + board engine (domain/)
//!     │
//!     └── PostgreSQL event recorder (persistence/, optional)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
pub mod ws;
