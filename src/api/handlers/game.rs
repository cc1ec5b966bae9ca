//! Game endpoints: start, inspect, join, move.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};

use crate::api::dto::{GameDetailResponse, MoveRequest, MoveResponse, StartGameRequest};
use crate::app_state::AppState;
use crate::domain::{Cell, GameId, PlayerId};
use crate::error::{ErrorResponse, GatewayError};

/// `POST /games` — Open a game with the caller as first player.
///
/// # Errors
///
/// - [`GatewayError::PlayerNotFound`] for an unknown player.
/// - [`GatewayError::PlayerBusy`] if the player is already in a game.
#[utoipa::path(
    post,
    path = "/api/v1/games",
    tag = "Games",
    summary = "Start a game",
    description = "Creates a game in `starting` with the player on its roster.",
    request_body = StartGameRequest,
    responses(
        (status = 201, description = "Game created", body = GameDetailResponse),
        (status = 404, description = "Player not found", body = ErrorResponse),
        (status = 422, description = "Player already in a game", body = ErrorResponse),
    )
)]
pub async fn start_game(
    State(state): State<AppState>,
    Json(req): Json<StartGameRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let game = state.matchmaking.start_game(req.player_id).await?;
    Ok((StatusCode::CREATED, Json(GameDetailResponse::from(game))))
}

/// `GET /games/:id` — Game state and board.
///
/// # Errors
///
/// Returns [`GatewayError::GameNotFound`] if the game does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/games/{id}",
    tag = "Games",
    summary = "Get a game",
    params(
        ("id" = uuid::Uuid, Path, description = "Game UUID"),
    ),
    responses(
        (status = 200, description = "Game details", body = GameDetailResponse),
        (status = 404, description = "Game not found", body = ErrorResponse),
    )
)]
pub async fn get_game(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, GatewayError> {
    let game = state.matchmaking.get_game(GameId::from_uuid(id)).await?;
    Ok(Json(GameDetailResponse::from(game)))
}

/// `PUT /games/:id/players/:player_id` — Join a waiting game.
///
/// # Errors
///
/// - [`GatewayError::PlayerNotFound`] / [`GatewayError::GameNotFound`] for
///   unknown ids.
/// - [`GatewayError::JoinRejected`] listing every violated precondition.
#[utoipa::path(
    put,
    path = "/api/v1/games/{id}/players/{player_id}",
    tag = "Games",
    summary = "Join a game",
    description = "Adds the player to a `starting` game; the game starts once two players are seated. A rejection lists every failed precondition.",
    params(
        ("id" = uuid::Uuid, Path, description = "Game UUID"),
        ("player_id" = uuid::Uuid, Path, description = "Player UUID"),
    ),
    responses(
        (status = 200, description = "Player joined", body = GameDetailResponse),
        (status = 404, description = "Game or player not found", body = ErrorResponse),
        (status = 422, description = "Join rejected", body = ErrorResponse),
    )
)]
pub async fn join_game(
    State(state): State<AppState>,
    Path((id, player_id)): Path<(uuid::Uuid, uuid::Uuid)>,
) -> Result<impl IntoResponse, GatewayError> {
    let game = state
        .matchmaking
        .join_game(GameId::from_uuid(id), PlayerId::from_uuid(player_id))
        .await?;
    Ok(Json(GameDetailResponse::from(game)))
}

/// `POST /games/:id/moves` — Play a move.
///
/// # Errors
///
/// - [`GatewayError::InvalidCell`] for coordinates outside the board.
/// - [`GatewayError::GameNotActive`] if the game is not in progress.
/// - [`GatewayError::OutOfTurn`] if it is not the player's turn.
/// - [`GatewayError::InvalidMove`] if the cell is taken.
#[utoipa::path(
    post,
    path = "/api/v1/games/{id}/moves",
    tag = "Games",
    summary = "Play a move",
    params(
        ("id" = uuid::Uuid, Path, description = "Game UUID"),
    ),
    request_body = MoveRequest,
    responses(
        (status = 200, description = "Move accepted", body = MoveResponse),
        (status = 403, description = "Not the player's turn", body = ErrorResponse),
        (status = 404, description = "Game or player not found", body = ErrorResponse),
        (status = 422, description = "Illegal move", body = ErrorResponse),
    )
)]
pub async fn play_move(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
    Json(req): Json<MoveRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let cell = Cell::from_coords(req.row, req.col)?;
    let played = state
        .moves
        .play_move(GameId::from_uuid(id), req.player_id, cell)
        .await?;
    Ok(Json(MoveResponse {
        applied: played.applied,
        game: GameDetailResponse::from(played.game),
    }))
}

/// Game routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/games", post(start_game))
        .route("/games/{id}", get(get_game))
        .route("/games/{id}/players/{player_id}", put(join_game))
        .route("/games/{id}/moves", post(play_move))
}
