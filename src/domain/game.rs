//! Game aggregate: roster, move history and lifecycle of one game.
//!
//! The lifecycle is `Starting → InProgress → Finished` and never moves
//! backwards. Status is not stored; it is derived from `started_at` and
//! `finished_at` on every read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::board::{self, Board, BoardOutcome};
use super::{Cell, GameId, Move, MoveId, PlayerId};

/// Roster capacity; the game starts when this many players have joined.
pub const MAX_PLAYERS: usize = 2;

/// Lifecycle phase of a game, derived from its timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum GameStatus {
    /// Waiting for the roster to fill.
    Starting,
    /// Both players joined; moves are accepted.
    InProgress,
    /// A terminal board state was reached.
    Finished,
}

impl GameStatus {
    /// Returns the wire name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Starting => "starting",
            Self::InProgress => "in-progress",
            Self::Finished => "finished",
        }
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rule violations raised by the aggregate. No state changes on error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameRuleError {
    /// Operation is not valid in the game's current phase.
    #[error("operation not allowed while game is {status}")]
    WrongState {
        /// Phase the game was in.
        status: GameStatus,
    },

    /// The roster already holds [`MAX_PLAYERS`] players.
    #[error("roster already has {MAX_PLAYERS} players")]
    RosterFull,

    /// The player is already on this game's roster.
    #[error("player {0} is already on the roster")]
    AlreadyInRoster(PlayerId),

    /// The move came from someone other than the player to move.
    #[error("not your turn; waiting on player {expected}")]
    NotYourTurn {
        /// Player whose turn it is.
        expected: PlayerId,
    },

    /// The target cell already holds a move.
    #[error("cell {0} is already taken")]
    CellOccupied(Cell),
}

/// A single game and its exclusively owned move history.
#[derive(Debug, Clone)]
pub struct Game {
    id: GameId,
    roster: Vec<PlayerId>,
    moves: Vec<Move>,
    created_at: DateTime<Utc>,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
    winner_id: Option<PlayerId>,
}

impl Game {
    /// Creates an empty game in [`GameStatus::Starting`].
    #[must_use]
    pub fn new(id: GameId, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            roster: Vec::with_capacity(MAX_PLAYERS),
            moves: Vec::new(),
            created_at,
            started_at: None,
            finished_at: None,
            winner_id: None,
        }
    }

    /// Returns the game identifier.
    #[must_use]
    pub const fn id(&self) -> GameId {
        self.id
    }

    /// Derives the lifecycle phase from the timestamps.
    #[must_use]
    pub const fn status(&self) -> GameStatus {
        match (self.started_at, self.finished_at) {
            (_, Some(_)) => GameStatus::Finished,
            (Some(_), None) => GameStatus::InProgress,
            (None, None) => GameStatus::Starting,
        }
    }

    /// Returns the roster in join order.
    #[must_use]
    pub fn roster(&self) -> &[PlayerId] {
        &self.roster
    }

    /// Returns `true` if `player` is on the roster.
    #[must_use]
    pub fn has_player(&self, player: PlayerId) -> bool {
        self.roster.contains(&player)
    }

    /// Returns `true` once the roster holds [`MAX_PLAYERS`] players.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.roster.len() >= MAX_PLAYERS
    }

    /// Returns the move history in replay order.
    #[must_use]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the second player joined, if they have.
    #[must_use]
    pub const fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Returns when a terminal board state was reached, if it has been.
    #[must_use]
    pub const fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    /// Returns the winner. Empty while unfinished and on a draw.
    #[must_use]
    pub const fn winner_id(&self) -> Option<PlayerId> {
        self.winner_id
    }

    /// Returns `true` if the game finished without a winner.
    #[must_use]
    pub const fn is_draw(&self) -> bool {
        self.finished_at.is_some() && self.winner_id.is_none()
    }

    /// Returns the current board.
    #[must_use]
    pub fn board(&self) -> Board {
        Board::from_moves(&self.moves)
    }

    /// Adds a player to the roster, starting the game when it fills.
    ///
    /// Returns the status after the call.
    ///
    /// # Errors
    ///
    /// - [`GameRuleError::WrongState`] unless the game is `Starting`.
    /// - [`GameRuleError::RosterFull`] if the roster is at capacity.
    /// - [`GameRuleError::AlreadyInRoster`] if the player already joined.
    pub fn add_player(
        &mut self,
        player: PlayerId,
        at: DateTime<Utc>,
    ) -> Result<GameStatus, GameRuleError> {
        let status = self.status();
        if status != GameStatus::Starting {
            return Err(GameRuleError::WrongState { status });
        }
        if self.is_full() {
            return Err(GameRuleError::RosterFull);
        }
        if self.has_player(player) {
            return Err(GameRuleError::AlreadyInRoster(player));
        }

        self.roster.push(player);
        if self.is_full() {
            self.started_at = Some(at);
            tracing::info!(game_id = %self.id, "game started");
        }
        Ok(self.status())
    }

    /// Returns `true` if no move in this game occupies `cell`.
    #[must_use]
    pub fn is_valid_move(&self, cell: Cell) -> bool {
        !self.moves.iter().any(|mv| mv.cell == cell)
    }

    /// Returns the player expected to move next.
    ///
    /// The first-joined player moves first; afterwards it is whichever
    /// roster member did not make the most recent move. `None` only for an
    /// empty roster.
    #[must_use]
    pub fn next_turn_player(&self) -> Option<PlayerId> {
        match self.moves.last() {
            None => self.roster.first().copied(),
            Some(last) => self
                .roster
                .iter()
                .copied()
                .find(|player| *player != last.player_id),
        }
    }

    /// Applies `player`'s move to `cell` and re-evaluates the board.
    ///
    /// On a win the game finishes with the winning move's player as winner;
    /// on a draw it finishes with no winner.
    ///
    /// # Errors
    ///
    /// - [`GameRuleError::WrongState`] unless the game is `InProgress`.
    /// - [`GameRuleError::NotYourTurn`] if `player` is not next to move.
    /// - [`GameRuleError::CellOccupied`] if `cell` is already taken.
    pub fn apply_move(
        &mut self,
        player: PlayerId,
        cell: Cell,
        at: DateTime<Utc>,
    ) -> Result<(Move, BoardOutcome), GameRuleError> {
        let status = self.status();
        if status != GameStatus::InProgress {
            return Err(GameRuleError::WrongState { status });
        }
        let Some(expected) = self.next_turn_player() else {
            return Err(GameRuleError::WrongState { status });
        };
        if expected != player {
            return Err(GameRuleError::NotYourTurn { expected });
        }
        if !self.is_valid_move(cell) {
            return Err(GameRuleError::CellOccupied(cell));
        }

        let id = self.moves.last().map_or(MoveId::FIRST, |last| last.id.next());
        let mv = Move {
            id,
            game_id: self.id,
            player_id: player,
            cell,
            played_at: at,
        };
        self.moves.push(mv.clone());

        let outcome = board::evaluate(&self.moves);
        match &outcome {
            BoardOutcome::Won { winning_move } => {
                self.finished_at = Some(at);
                self.winner_id = Some(winning_move.player_id);
                tracing::info!(game_id = %self.id, winner = %winning_move.player_id, "game won");
            }
            BoardOutcome::Drawn => {
                self.finished_at = Some(at);
                tracing::info!(game_id = %self.id, "game drawn");
            }
            BoardOutcome::Ongoing => {}
        }

        Ok((mv, outcome))
    }
}

/// Serializable view of a game for events, responses and persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GameSummary {
    /// Game identifier.
    pub game_id: GameId,
    /// Derived lifecycle phase.
    pub status: GameStatus,
    /// Roster in join order.
    pub players: Vec<PlayerId>,
    /// Player to move, while in progress.
    pub next_turn: Option<PlayerId>,
    /// Winner, if the game was won.
    pub winner_id: Option<PlayerId>,
    /// `true` if the game finished without a winner.
    pub is_draw: bool,
    /// Move history in replay order.
    pub moves: Vec<Move>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Start timestamp.
    pub started_at: Option<DateTime<Utc>>,
    /// Finish timestamp.
    pub finished_at: Option<DateTime<Utc>>,
}

impl From<&Game> for GameSummary {
    fn from(game: &Game) -> Self {
        let status = game.status();
        Self {
            game_id: game.id,
            status,
            players: game.roster.clone(),
            next_turn: (status == GameStatus::InProgress)
                .then(|| game.next_turn_player())
                .flatten(),
            winner_id: game.winner_id,
            is_draw: game.is_draw(),
            moves: game.moves.clone(),
            created_at: game.created_at,
            started_at: game.started_at,
            finished_at: game.finished_at,
        }
    }
}
