//! Background task mirroring bus events into PostgreSQL.

use tokio::sync::broadcast::Receiver;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use uuid::Uuid;

use super::models::{GameRecord, MoveRecord};
use super::postgres::PostgresPersistence;
use crate::domain::GameEvent;
use crate::error::GatewayError;

/// Spawns a task that writes every event from `events` to the database.
///
/// The task ends when the bus is dropped. Write failures are logged and
/// never reach the request path.
pub fn spawn_event_recorder(
    mut events: Receiver<GameEvent>,
    persistence: PostgresPersistence,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    if let Err(e) = record(&persistence, &event).await {
                        tracing::error!(
                            event_type = event.event_type_str(),
                            error = %e,
                            "failed to record event"
                        );
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "event recorder lagged, events dropped");
                }
                Err(RecvError::Closed) => break,
            }
        }
        tracing::info!("event recorder stopped");
    })
}

async fn record(persistence: &PostgresPersistence, event: &GameEvent) -> Result<(), GatewayError> {
    if let GameEvent::GameUpdate {
        game, last_move, ..
    } = event
    {
        persistence.save_game(&GameRecord::from(game)).await?;
        if let Some(mv) = last_move {
            persistence.save_move(&MoveRecord::from(mv)).await?;
        }
    }

    let payload = serde_json::to_value(event)
        .map_err(|e| GatewayError::Internal(format!("event encoding failed: {e}")))?;
    persistence
        .save_event(event.game_id().map(Uuid::from), event.event_type_str(), &payload)
        .await?;
    Ok(())
}
