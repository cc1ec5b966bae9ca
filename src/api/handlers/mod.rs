//! REST endpoint handlers organized by resource.

pub mod game;
pub mod lobby;
pub mod player;
pub mod system;

use axum::Router;
use axum::http::HeaderMap;

use crate::app_state::AppState;
use crate::domain::SessionId;

/// Header carrying the caller's lobby session token.
pub const SESSION_HEADER: &str = "x-session-id";

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(player::routes())
        .merge(lobby::routes())
        .merge(game::routes())
}

/// Reads the session token from [`SESSION_HEADER`], ignoring blank values.
pub(crate) fn session_from_headers(headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(SessionId::new)
}
