//! OpenAPI document for the REST surface.

use utoipa::OpenApi;

use super::dto::{
    CreatePlayerRequest, GameDetailResponse, GameListResponse, LobbyEntryDto, LobbyResponse,
    MoveRequest, MoveResponse, PlayerResponse, StartGameRequest,
};
use super::handlers::{game, lobby, player, system};
use crate::domain::{
    Cell, GameId, GameStatus, GameSummary, Move, MoveId, PlayerId, PresenceStatus, SessionId,
};
use crate::error::{ErrorBody, ErrorResponse, JoinViolation};

/// Aggregated OpenAPI specification.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "tictactoe-gateway",
        description = "Lobby, matchmaking and move validation for two-player tic-tac-toe."
    ),
    paths(
        player::create_player,
        player::list_player_games,
        player::player_history,
        lobby::list_lobby,
        lobby::lobby_me,
        lobby::leave_lobby,
        game::start_game,
        game::get_game,
        game::join_game,
        game::play_move,
        system::health_handler,
    ),
    components(schemas(
        CreatePlayerRequest,
        PlayerResponse,
        LobbyEntryDto,
        LobbyResponse,
        StartGameRequest,
        MoveRequest,
        MoveResponse,
        GameDetailResponse,
        GameListResponse,
        GameSummary,
        GameStatus,
        Move,
        MoveId,
        Cell,
        PlayerId,
        GameId,
        SessionId,
        PresenceStatus,
        ErrorResponse,
        ErrorBody,
        JoinViolation,
        system::HealthResponse,
    )),
    tags(
        (name = "Players", description = "Player registration"),
        (name = "Lobby", description = "Lobby presence"),
        (name = "Games", description = "Matchmaking and play"),
        (name = "System", description = "Service health"),
    )
)]
pub struct ApiDoc;
