//! PostgreSQL implementation of the persistence layer.

use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use super::models::{GameRecord, MoveRecord};
use crate::config::GatewayConfig;
use crate::error::GatewayError;

/// PostgreSQL-backed persistence layer using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresPersistence {
    pool: PgPool,
}

impl PostgresPersistence {
    /// Creates a new persistence layer with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool sized from the gateway configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError::PersistenceError`] if the database is
    /// unreachable within the configured timeout.
    pub async fn connect(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await
            .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;
        Ok(Self::new(pool))
    }

    /// Applies the embedded schema migrations.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError::PersistenceError`] if a migration fails.
    pub async fn run_migrations(&self) -> Result<(), GatewayError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| GatewayError::PersistenceError(e.to_string()))
    }

    /// Inserts or refreshes the row for a game.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError::PersistenceError`] on database failure.
    pub async fn save_game(&self, game: &GameRecord) -> Result<(), GatewayError> {
        sqlx::query(
            "INSERT INTO games (id, player_ids, status, created_at, started_at, finished_at, winner_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT (id) DO UPDATE SET \
             player_ids = EXCLUDED.player_ids, status = EXCLUDED.status, \
             started_at = EXCLUDED.started_at, finished_at = EXCLUDED.finished_at, \
             winner_id = EXCLUDED.winner_id",
        )
        .bind(game.id)
        .bind(&game.player_ids)
        .bind(&game.status)
        .bind(game.created_at)
        .bind(game.started_at)
        .bind(game.finished_at)
        .bind(game.winner_id)
        .execute(&self.pool)
        .await
        .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        Ok(())
    }

    /// Records a move. Replays of the same `(game_id, seq)` are ignored.
    ///
    /// Returns `true` if a new row was written.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError::PersistenceError`] on database failure.
    pub async fn save_move(&self, mv: &MoveRecord) -> Result<bool, GatewayError> {
        let result = sqlx::query(
            "INSERT INTO moves (game_id, seq, player_id, row, col, played_at) \
             VALUES ($1, $2, $3, $4, $5, $6) ON CONFLICT (game_id, seq) DO NOTHING",
        )
        .bind(mv.game_id)
        .bind(mv.seq)
        .bind(mv.player_id)
        .bind(mv.row)
        .bind(mv.col)
        .bind(mv.played_at)
        .execute(&self.pool)
        .await
        .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    /// Appends an event to the event log.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError::PersistenceError`] on database failure.
    pub async fn save_event(
        &self,
        game_id: Option<Uuid>,
        event_type: &str,
        payload: &serde_json::Value,
    ) -> Result<i64, GatewayError> {
        let row = sqlx::query_scalar::<_, i64>(
            "INSERT INTO events (game_id, event_type, payload) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(game_id)
        .bind(event_type)
        .bind(payload)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        Ok(row)
    }
}
