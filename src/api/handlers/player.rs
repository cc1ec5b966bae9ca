//! Player registration and per-player game listing.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use super::session_from_headers;
use crate::api::dto::{CreatePlayerRequest, GameListResponse, PlayerResponse};
use crate::app_state::AppState;
use crate::domain::{PlayerId, SessionId};
use crate::error::{ErrorResponse, GatewayError};

/// `POST /players` — Register a player in the lobby.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] for a blank or oversized name.
#[utoipa::path(
    post,
    path = "/api/v1/players",
    tag = "Players",
    summary = "Register a player",
    description = "Resolves or creates the player with this name and binds it to the caller's session. The session comes from the `x-session-id` header, or a fresh one is issued.",
    params(
        ("x-session-id" = Option<String>, Header, description = "Lobby session token"),
    ),
    request_body = CreatePlayerRequest,
    responses(
        (status = 201, description = "Player registered", body = PlayerResponse),
        (status = 400, description = "Invalid name", body = ErrorResponse),
    )
)]
pub async fn create_player(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreatePlayerRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let session = session_from_headers(&headers).unwrap_or_else(SessionId::generate);
    let player = state.lobby.register(session.clone(), &req.name)?;
    Ok((
        StatusCode::CREATED,
        Json(PlayerResponse::new(player, session)),
    ))
}

/// `GET /players/:id/games` — Games the player can join or is playing.
///
/// # Errors
///
/// Returns [`GatewayError::PlayerNotFound`] if the player does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/players/{id}/games",
    tag = "Players",
    summary = "List joinable or active games",
    description = "Returns every game waiting for players plus the in-progress games this player is in.",
    params(
        ("id" = uuid::Uuid, Path, description = "Player UUID"),
    ),
    responses(
        (status = 200, description = "Game list", body = GameListResponse),
        (status = 404, description = "Player not found", body = ErrorResponse),
    )
)]
pub async fn list_player_games(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, GatewayError> {
    let data = state
        .matchmaking
        .list_joinable_or_active_games_for(PlayerId::from_uuid(id))
        .await?;
    let total = data.len();
    Ok(Json(GameListResponse { data, total }))
}

/// `GET /players/:id/history` — Every game the player has been seated in.
///
/// # Errors
///
/// Returns [`GatewayError::PlayerNotFound`] if the player does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/players/{id}/history",
    tag = "Players",
    summary = "List a player's games",
    description = "Returns every game the player is or was on the roster of, finished games included, oldest first.",
    params(
        ("id" = uuid::Uuid, Path, description = "Player UUID"),
    ),
    responses(
        (status = 200, description = "Game history", body = GameListResponse),
        (status = 404, description = "Player not found", body = ErrorResponse),
    )
)]
pub async fn player_history(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, GatewayError> {
    let data = state
        .matchmaking
        .list_games_for(PlayerId::from_uuid(id))
        .await?;
    let total = data.len();
    Ok(Json(GameListResponse { data, total }))
}

/// Player routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/players", post(create_player))
        .route("/players/{id}/games", get(list_player_games))
        .route("/players/{id}/history", get(player_history))
}
