//! Notification channel for domain events.
//!
//! [`Notifier`] is the fire-and-forget publish contract the services depend
//! on. [`EventBus`] implements it over a [`tokio::sync::broadcast`] channel
//! that WebSocket connections and the event recorder subscribe to.

use std::fmt;

use tokio::sync::broadcast;

use super::GameEvent;

/// Failure to hand an event to the notification transport.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("notification delivery failed: {0}")]
pub struct NotifyError(pub String);

/// Fire-and-forget publisher for [`GameEvent`]s.
pub trait Notifier: Send + Sync + fmt::Debug {
    /// Publishes an event, returning how many receivers it reached.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError`] if the transport rejected the event.
    fn publish(&self, event: GameEvent) -> Result<usize, NotifyError>;
}

/// Publishes `event` and absorbs any failure with a warning.
///
/// Delivery problems never reach the caller: the state change the event
/// describes is already committed.
pub fn notify_best_effort(notifier: &dyn Notifier, event: GameEvent) {
    let event_type = event.event_type_str();
    let game_id = event.game_id();
    match notifier.publish(event) {
        Ok(receivers) => tracing::debug!(event_type, receivers, "event published"),
        Err(e) => tracing::warn!(
            event_type,
            game_id = ?game_id,
            error = %e,
            "failed to publish event"
        ),
    }
}

/// Broadcast bus for [`GameEvent`]s.
///
/// Backed by a `tokio::broadcast` channel with a configurable capacity.
/// When the ring buffer is full, the oldest events are dropped for lagging
/// receivers.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<GameEvent>,
}

impl EventBus {
    /// Creates a new `EventBus` with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Creates a new receiver that will receive all future events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<GameEvent> {
        self.sender.subscribe()
    }

    /// Returns the current number of active receivers.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Notifier for EventBus {
    /// Sends to all current subscribers. Having none is not a failure.
    fn publish(&self, event: GameEvent) -> Result<usize, NotifyError> {
        Ok(self.sender.send(event).unwrap_or(0))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{Game, GameId, GameSummary};
    use chrono::Utc;

    fn make_event(game_id: GameId) -> GameEvent {
        let game = Game::new(game_id, Utc::now());
        GameEvent::game_update(GameSummary::from(&game), None)
    }

    #[test]
    fn publish_without_receivers_returns_zero() {
        let bus = EventBus::new(16);
        assert_eq!(bus.publish(make_event(GameId::new())), Ok(0));
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_event() {
        let bus = EventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        let id = GameId::new();
        assert_eq!(bus.publish(make_event(id)), Ok(2));

        let (Ok(e1), Ok(e2)) = (rx1.recv().await, rx2.recv().await) else {
            panic!("subscribers missed the event");
        };
        assert_eq!(e1.game_id(), Some(id));
        assert_eq!(e2.game_id(), Some(id));
    }

    #[test]
    fn receiver_count_tracks_subscribers() {
        let bus = EventBus::new(16);
        assert_eq!(bus.receiver_count(), 0);
        let rx = bus.subscribe();
        assert_eq!(bus.receiver_count(), 1);
        drop(rx);
        assert_eq!(bus.receiver_count(), 0);
    }

    #[derive(Debug)]
    struct Broken;

    impl Notifier for Broken {
        fn publish(&self, _event: GameEvent) -> Result<usize, NotifyError> {
            Err(NotifyError("transport down".to_string()))
        }
    }

    #[test]
    fn best_effort_swallows_failures() {
        notify_best_effort(&Broken, make_event(GameId::new()));
    }
}
