//! Lobby presence endpoints.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{delete, get};
use axum::{Json, Router};

use super::session_from_headers;
use crate::api::dto::{LobbyEntryDto, LobbyResponse};
use crate::app_state::AppState;
use crate::domain::{LobbyMember, SessionId};
use crate::error::{ErrorResponse, GatewayError};

/// `GET /lobby` — Current lobby members.
#[utoipa::path(
    get,
    path = "/api/v1/lobby",
    tag = "Lobby",
    summary = "List lobby members",
    responses(
        (status = 200, description = "Lobby snapshot", body = LobbyResponse),
    )
)]
pub async fn list_lobby(State(state): State<AppState>) -> impl IntoResponse {
    let players: Vec<LobbyEntryDto> = state.lobby.list().into_iter().map(Into::into).collect();
    let total = players.len();
    Json(LobbyResponse { players, total })
}

/// `GET /lobby/me` — The caller's own lobby entry.
///
/// # Errors
///
/// - [`GatewayError::InvalidRequest`] if no session header was sent.
/// - [`GatewayError::SessionNotFound`] if the session is not in the lobby.
#[utoipa::path(
    get,
    path = "/api/v1/lobby/me",
    tag = "Lobby",
    summary = "Look up own session",
    params(
        ("x-session-id" = String, Header, description = "Lobby session token"),
    ),
    responses(
        (status = 200, description = "Lobby entry", body = LobbyEntryDto),
        (status = 400, description = "Missing session header", body = ErrorResponse),
        (status = 404, description = "Session not in lobby", body = ErrorResponse),
    )
)]
pub async fn lobby_me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, GatewayError> {
    let session = session_from_headers(&headers)
        .ok_or_else(|| GatewayError::InvalidRequest("missing x-session-id header".to_string()))?;
    let entry = state
        .lobby
        .lookup_entry(&session)
        .ok_or_else(|| GatewayError::SessionNotFound(session.as_str().to_string()))?;
    Ok(Json(LobbyEntryDto::from(LobbyMember {
        session_id: session,
        entry,
    })))
}

/// `DELETE /lobby/:session_id` — Leave the lobby.
///
/// Idempotent: unknown sessions also yield 204.
#[utoipa::path(
    delete,
    path = "/api/v1/lobby/{session_id}",
    tag = "Lobby",
    summary = "Deregister a session",
    params(
        ("session_id" = String, Path, description = "Lobby session token"),
    ),
    responses(
        (status = 204, description = "Session removed"),
    )
)]
pub async fn leave_lobby(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    state.lobby.deregister(&SessionId::new(session_id));
    StatusCode::NO_CONTENT
}

/// Lobby routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/lobby", get(list_lobby))
        .route("/lobby/me", get(lobby_me))
        .route("/lobby/{session_id}", delete(leave_lobby))
}
