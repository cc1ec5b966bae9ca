//! WebSocket connection state machine.
//!
//! Handles the read/write loop for a single WebSocket connection,
//! dispatching subscription commands and forwarding filtered events.

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use super::messages::{Channel, WsCommand, WsMessage, WsMessageType};
use super::subscription::SubscriptionManager;
use crate::domain::GameEvent;

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Reads commands from the client and updates its subscriptions.
/// - Forwards matching events from the [`broadcast::Receiver`] to the client.
pub async fn run_connection(socket: WebSocket, mut event_rx: broadcast::Receiver<GameEvent>) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut subs = SubscriptionManager::new();

    loop {
        tokio::select! {
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let response = handle_text_message(&text, &mut subs);
                        if let Some(resp_json) = response
                            && ws_tx.send(Message::text(resp_json)).await.is_err() {
                                break;
                            }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
            event = event_rx.recv() => {
                match event {
                    Ok(game_event) => {
                        if subs.matches(&game_event) {
                            let msg = WsMessage::server(
                                uuid::Uuid::new_v4().to_string(),
                                WsMessageType::Event,
                                serde_json::to_value(&game_event).unwrap_or_default(),
                            );
                            let json = serde_json::to_string(&msg).unwrap_or_default();
                            if ws_tx.send(Message::text(json)).await.is_err() {
                                break;
                            }
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(lagged = n, "ws client lagged behind event bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    tracing::debug!("ws connection closed");
}

/// Handles a text message from the client, returning an optional JSON response.
fn handle_text_message(text: &str, subs: &mut SubscriptionManager) -> Option<String> {
    let Ok(msg) = serde_json::from_str::<WsMessage>(text) else {
        return error_reply(String::new(), 400, "malformed JSON");
    };
    if msg.msg_type != WsMessageType::Command {
        return error_reply(msg.id, 400, "expected a command message");
    }
    let Ok(command) = serde_json::from_value::<WsCommand>(msg.payload) else {
        return error_reply(msg.id, 404, "unknown command");
    };

    let payload = match command {
        WsCommand::Subscribe { channels } => {
            let (accepted, rejected) = parse_channels(&channels);
            subs.subscribe(&accepted);
            serde_json::json!({
                "subscribed": names(&accepted),
                "rejected": rejected,
                "channels": names(&subs.channels()),
            })
        }
        WsCommand::Unsubscribe { channels } => {
            let (accepted, rejected) = parse_channels(&channels);
            subs.unsubscribe(&accepted);
            serde_json::json!({
                "unsubscribed": names(&accepted),
                "rejected": rejected,
                "channels": names(&subs.channels()),
            })
        }
    };

    let response = WsMessage::server(msg.id, WsMessageType::Response, payload);
    serde_json::to_string(&response).ok()
}

/// Splits raw channel names into parsed channels and rejected names.
fn parse_channels(raw: &[String]) -> (Vec<Channel>, Vec<String>) {
    let mut accepted = Vec::new();
    let mut rejected = Vec::new();
    for name in raw {
        match name.parse::<Channel>() {
            Ok(channel) => accepted.push(channel),
            Err(_) => rejected.push(name.clone()),
        }
    }
    (accepted, rejected)
}

fn names(channels: &[Channel]) -> Vec<String> {
    channels.iter().map(ToString::to_string).collect()
}

fn error_reply(id: String, code: u16, message: &str) -> Option<String> {
    let err = WsMessage::server(
        id,
        WsMessageType::Error,
        serde_json::json!({
            "code": code,
            "message": message,
        }),
    );
    serde_json::to_string(&err).ok()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::GameId;

    fn command(payload: serde_json::Value) -> String {
        serde_json::json!({
            "id": "req-1",
            "type": "command",
            "timestamp": chrono::Utc::now(),
            "payload": payload,
        })
        .to_string()
    }

    fn reply(text: &str, subs: &mut SubscriptionManager) -> serde_json::Value {
        let Some(raw) = handle_text_message(text, subs) else {
            panic!("expected a reply");
        };
        let Ok(value) = serde_json::from_str(&raw) else {
            panic!("reply is not JSON");
        };
        value
    }

    #[test]
    fn subscribe_reports_accepted_and_rejected() {
        let mut subs = SubscriptionManager::new();
        let id = GameId::new();
        let value = reply(
            &command(serde_json::json!({
                "command": "subscribe",
                "channels": ["lobby", format!("game:{id}"), "bogus"],
            })),
            &mut subs,
        );
        assert_eq!(value["type"], "response");
        assert_eq!(value["id"], "req-1");
        assert_eq!(value["payload"]["rejected"], serde_json::json!(["bogus"]));
        assert!(subs.matches(&GameEvent::lobby_update(Vec::new())));
    }

    #[test]
    fn unsubscribe_clears_lobby() {
        let mut subs = SubscriptionManager::new();
        subs.subscribe(&[Channel::Lobby]);
        let value = reply(
            &command(serde_json::json!({"command": "unsubscribe", "channels": ["lobby"]})),
            &mut subs,
        );
        assert_eq!(value["payload"]["channels"], serde_json::json!([]));
        assert!(!subs.matches(&GameEvent::lobby_update(Vec::new())));
    }

    #[test]
    fn malformed_and_unknown_commands_are_errors() {
        let mut subs = SubscriptionManager::new();
        let value = reply("not json", &mut subs);
        assert_eq!(value["type"], "error");
        assert_eq!(value["payload"]["code"], 400);

        let value = reply(&command(serde_json::json!({"command": "swap"})), &mut subs);
        assert_eq!(value["type"], "error");
        assert_eq!(value["payload"]["code"], 404);
    }
}
