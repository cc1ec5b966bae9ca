//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::config::GatewayConfig;
use crate::domain::{
    EventBus, GameRegistry, InMemoryPresenceStore, LobbyRegistry, Notifier, PlayerDirectory,
};
use crate::service::{MatchmakingService, MoveService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Lobby presence and player registration.
    pub lobby: Arc<LobbyRegistry>,
    /// Game creation, joining and listing.
    pub matchmaking: Arc<MatchmakingService>,
    /// Move validation and application.
    pub moves: Arc<MoveService>,
    /// Event bus for WebSocket subscriptions.
    pub event_bus: EventBus,
}

impl AppState {
    /// Wires the in-process stores, registries and services together.
    #[must_use]
    pub fn from_config(config: &GatewayConfig) -> Self {
        let event_bus = EventBus::new(config.event_bus_capacity);
        let notifier: Arc<dyn Notifier> = Arc::new(event_bus.clone());

        let lobby = Arc::new(LobbyRegistry::new(
            Arc::new(InMemoryPresenceStore::with_ttl_secs(config.presence_ttl_secs)),
            Arc::new(PlayerDirectory::new()),
            Arc::clone(&notifier),
        ));
        let games = Arc::new(GameRegistry::new());

        let matchmaking = Arc::new(MatchmakingService::new(
            Arc::clone(&games),
            Arc::clone(&lobby),
            Arc::clone(&notifier),
        ));
        let moves = Arc::new(MoveService::new(games, Arc::clone(&lobby), notifier));

        Self {
            lobby,
            matchmaking,
            moves,
            event_bus,
        }
    }
}
