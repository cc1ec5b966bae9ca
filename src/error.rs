//! Gateway error types with HTTP status code mapping.
//!
//! [`GatewayError`] is the caller-facing error type of every lobby,
//! matchmaking and move operation. Each variant maps to an
//! [`ErrorClass`], a numeric code, and a structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Cell, GameRuleError, GameStatus, InvalidCell, PlayerId};

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 4002,
///     "message": "unable to join player ada to game: game not ready & max players already in-game",
///     "reasons": ["game_not_joinable", "game_full"]
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see code ranges on [`GatewayError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Every violated precondition, for multi-cause rejections.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reasons: Vec<JoinViolation>,
}

/// A precondition violated by a join attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum JoinViolation {
    /// The game is not in `Starting`.
    GameNotJoinable,
    /// The player is already on the roster of a non-finished game.
    PlayerBusy,
    /// The roster is at capacity.
    GameFull,
}

impl JoinViolation {
    /// Returns the user-facing description of the violation.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::GameNotJoinable => "game not ready",
            Self::PlayerBusy => "player already in-game",
            Self::GameFull => "max players already in-game",
        }
    }
}

impl std::fmt::Display for JoinViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Broad category of a failure, as seen by a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Malformed input that never reached the domain.
    BadRequest,
    /// The request was understood but violates a game or lobby rule.
    Validation,
    /// The caller is not allowed to act right now.
    Authorization,
    /// A referenced player, game or session does not exist.
    NotFound,
    /// Infrastructure failure.
    Server,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category          | HTTP Status                  |
/// |-----------|-------------------|------------------------------|
/// | 1000–1999 | Malformed input   | 400 Bad Request / 422        |
/// | 2000–2999 | Not found         | 404 Not Found                |
/// | 3000–3999 | Server            | 500 Internal Server Error    |
/// | 4000–4099 | Game rules        | 422 Unprocessable Entity     |
/// | 4100–4199 | Turn ownership    | 403 Forbidden                |
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Player with the given ID was not found.
    #[error("player not found: {0}")]
    PlayerNotFound(uuid::Uuid),

    /// Game with the given ID was not found.
    #[error("game not found: {0}")]
    GameNotFound(uuid::Uuid),

    /// No lobby entry for the given session.
    #[error("session not in lobby: {0}")]
    SessionNotFound(String),

    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Move coordinates are off the board.
    #[error(transparent)]
    InvalidCell(#[from] InvalidCell),

    /// Player is already on the roster of a non-finished game.
    #[error("player {0} is already in a game")]
    PlayerBusy(PlayerId),

    /// Join rejected; every violated precondition is listed.
    #[error("unable to join player {player} to game: {}", join_reasons(.violations))]
    JoinRejected {
        /// Display name of the player who tried to join.
        player: String,
        /// Violated preconditions, in check order.
        violations: Vec<JoinViolation>,
    },

    /// Move targets a cell that is already taken.
    #[error("invalid move: cell {0} is already taken")]
    InvalidMove(Cell),

    /// Move submitted by the player whose turn it is not.
    #[error("not your turn; waiting on player {expected}")]
    OutOfTurn {
        /// Player whose turn it is.
        expected: PlayerId,
    },

    /// Move submitted against a game that is not in progress.
    #[error("game is not active (status: {0})")]
    GameNotActive(GameStatus),

    /// Operation invalid for the game's current lifecycle phase.
    #[error("operation not allowed while game is {0}")]
    WrongState(GameStatus),

    /// Roster already at capacity.
    #[error("game roster is full")]
    RosterFull,

    /// Persistence layer failure.
    #[error("persistence error: {0}")]
    PersistenceError(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

fn join_reasons(violations: &[JoinViolation]) -> String {
    violations
        .iter()
        .map(|v| v.message())
        .collect::<Vec<_>>()
        .join(" & ")
}

impl From<GameRuleError> for GatewayError {
    fn from(err: GameRuleError) -> Self {
        match err {
            GameRuleError::WrongState { status } => Self::WrongState(status),
            GameRuleError::RosterFull => Self::RosterFull,
            GameRuleError::AlreadyInRoster(player) => Self::PlayerBusy(player),
            GameRuleError::NotYourTurn { expected } => Self::OutOfTurn { expected },
            GameRuleError::CellOccupied(cell) => Self::InvalidMove(cell),
        }
    }
}

impl GatewayError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::InvalidCell(_) => 1002,
            Self::PlayerNotFound(_) => 2001,
            Self::GameNotFound(_) => 2002,
            Self::SessionNotFound(_) => 2003,
            Self::Internal(_) => 3000,
            Self::PersistenceError(_) => 3001,
            Self::PlayerBusy(_) => 4001,
            Self::JoinRejected { .. } => 4002,
            Self::InvalidMove(_) => 4003,
            Self::GameNotActive(_) => 4004,
            Self::WrongState(_) => 4005,
            Self::RosterFull => 4006,
            Self::OutOfTurn { .. } => 4101,
        }
    }

    /// Returns the client-facing category of this error.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidRequest(_) => ErrorClass::BadRequest,
            Self::InvalidCell(_)
            | Self::PlayerBusy(_)
            | Self::JoinRejected { .. }
            | Self::InvalidMove(_)
            | Self::GameNotActive(_)
            | Self::WrongState(_)
            | Self::RosterFull => ErrorClass::Validation,
            Self::OutOfTurn { .. } => ErrorClass::Authorization,
            Self::PlayerNotFound(_) | Self::GameNotFound(_) | Self::SessionNotFound(_) => {
                ErrorClass::NotFound
            }
            Self::PersistenceError(_) | Self::Internal(_) => ErrorClass::Server,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self.class() {
            ErrorClass::BadRequest => StatusCode::BAD_REQUEST,
            ErrorClass::Validation => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorClass::Authorization => StatusCode::FORBIDDEN,
            ErrorClass::NotFound => StatusCode::NOT_FOUND,
            ErrorClass::Server => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the violated join preconditions, empty for other variants.
    #[must_use]
    pub fn join_violations(&self) -> &[JoinViolation] {
        match self {
            Self::JoinRejected { violations, .. } => violations,
            _ => &[],
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
                reasons: self.join_violations().to_vec(),
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
