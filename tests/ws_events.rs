//! WebSocket fan-out against the real router.

#![allow(clippy::panic)]

mod common;

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use common::{body_json, register, spawn_app};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn connect(addr: std::net::SocketAddr) -> Socket {
    let Ok((socket, _)) = tokio_tungstenite::connect_async(format!("ws://{addr}/ws")).await else {
        panic!("ws handshake failed");
    };
    socket
}

async fn send_command(socket: &mut Socket, command: &str, channels: &[String]) {
    let msg = json!({
        "id": "cmd-1",
        "type": "command",
        "timestamp": chrono::Utc::now(),
        "payload": { "command": command, "channels": channels },
    });
    let Ok(()) = socket.send(Message::text(msg.to_string())).await else {
        panic!("ws send failed");
    };
}

/// Reads the next text frame as JSON, failing after two seconds.
async fn next_json(socket: &mut Socket) -> Value {
    loop {
        let Ok(frame) = tokio::time::timeout(Duration::from_secs(2), socket.next()).await else {
            panic!("timed out waiting for a ws frame");
        };
        let Some(Ok(msg)) = frame else {
            panic!("ws stream ended");
        };
        if let Message::Text(text) = msg {
            let Ok(value) = serde_json::from_str(text.as_str()) else {
                panic!("ws frame is not JSON");
            };
            return value;
        }
    }
}

#[tokio::test]
async fn lobby_subscribers_see_registrations() {
    let addr = spawn_app().await;
    let base = format!("http://{addr}");
    let client = reqwest::Client::new();
    let mut socket = connect(addr).await;

    send_command(&mut socket, "subscribe", &["lobby".to_string()]).await;
    let ack = next_json(&mut socket).await;
    assert_eq!(ack["type"], "response");
    assert_eq!(ack["payload"]["channels"], json!(["lobby"]));

    let alice = register(&client, &base, "s-alice", "alice").await;
    let event = next_json(&mut socket).await;
    assert_eq!(event["type"], "event");
    assert_eq!(event["payload"]["event_type"], "lobby_update");
    assert_eq!(event["payload"]["players"][0]["player_id"], alice.as_str());
    assert_eq!(event["payload"]["players"][0]["session_id"], "s-alice");
}

#[tokio::test]
async fn game_subscribers_see_each_move() {
    let addr = spawn_app().await;
    let base = format!("http://{addr}");
    let client = reqwest::Client::new();

    let alice = register(&client, &base, "s-alice", "alice").await;
    let bob = register(&client, &base, "s-bob", "bob").await;

    let Ok(resp) = client
        .post(format!("{base}/api/v1/games"))
        .json(&json!({ "player_id": alice }))
        .send()
        .await
    else {
        panic!("start request failed");
    };
    let created = body_json(resp).await;
    let Some(game) = created["game_id"].as_str().map(str::to_string) else {
        panic!("missing game_id");
    };

    let mut socket = connect(addr).await;
    send_command(&mut socket, "subscribe", &[format!("game:{game}")]).await;
    let _ack = next_json(&mut socket).await;

    let Ok(_) = client
        .put(format!("{base}/api/v1/games/{game}/players/{bob}"))
        .send()
        .await
    else {
        panic!("join request failed");
    };
    let started = next_json(&mut socket).await;
    assert_eq!(started["payload"]["event_type"], "game_update");
    assert_eq!(started["payload"]["game"]["status"], "in-progress");
    assert!(started["payload"].get("move").is_none());

    let Ok(_) = client
        .post(format!("{base}/api/v1/games/{game}/moves"))
        .json(&json!({ "player_id": alice, "row": 2, "col": 2 }))
        .send()
        .await
    else {
        panic!("move request failed");
    };
    let moved = next_json(&mut socket).await;
    assert_eq!(moved["payload"]["move"]["cell"], json!({ "row": 2, "col": 2 }));
    assert_eq!(moved["payload"]["move"]["player_id"], alice.as_str());
    assert_eq!(moved["payload"]["game"]["next_turn"], bob.as_str());
}

#[tokio::test]
async fn unknown_channels_are_reported() {
    let addr = spawn_app().await;
    let mut socket = connect(addr).await;

    send_command(&mut socket, "subscribe", &["pools".to_string(), "game:*".to_string()]).await;
    let ack = next_json(&mut socket).await;
    assert_eq!(ack["payload"]["rejected"], json!(["pools"]));
    assert_eq!(ack["payload"]["channels"], json!(["game:*"]));
}
