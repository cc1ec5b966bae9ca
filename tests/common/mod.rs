//! Shared helpers for integration tests.

#![allow(clippy::panic, dead_code)]

use std::net::SocketAddr;

use serde_json::Value;
use tictactoe_gateway::api;
use tictactoe_gateway::app_state::AppState;
use tictactoe_gateway::config::GatewayConfig;

/// Serves the full router on an ephemeral port and returns its address.
pub async fn spawn_app() -> SocketAddr {
    let config = GatewayConfig::default();
    let state = AppState::from_config(&config);
    let app = api::build_app(state, &config);
    let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
        panic!("bind ephemeral port");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("listener has no address");
    };
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

/// Registers `name` under `session` and returns the new player id.
pub async fn register(client: &reqwest::Client, base: &str, session: &str, name: &str) -> String {
    let Ok(resp) = client
        .post(format!("{base}/api/v1/players"))
        .header("x-session-id", session)
        .json(&serde_json::json!({ "name": name }))
        .send()
        .await
    else {
        panic!("register request failed");
    };
    assert_eq!(resp.status(), reqwest::StatusCode::CREATED);
    let body = body_json(resp).await;
    let Some(id) = body["player_id"].as_str() else {
        panic!("missing player_id in {body}");
    };
    id.to_string()
}

/// Decodes a response body as JSON.
pub async fn body_json(resp: reqwest::Response) -> Value {
    let Ok(value) = resp.json::<Value>().await else {
        panic!("response is not JSON");
    };
    value
}
