//! End-to-end REST flows against the real router.

#![allow(clippy::panic)]

mod common;

use reqwest::StatusCode;
use serde_json::{Value, json};

use common::{body_json, register, spawn_app};

async fn play(
    client: &reqwest::Client,
    base: &str,
    game: &str,
    player: &str,
    row: i64,
    col: i64,
) -> (StatusCode, Value) {
    let Ok(resp) = client
        .post(format!("{base}/api/v1/games/{game}/moves"))
        .json(&json!({ "player_id": player, "row": row, "col": col }))
        .send()
        .await
    else {
        panic!("move request failed");
    };
    (resp.status(), body_json(resp).await)
}

async fn start_and_join(client: &reqwest::Client, base: &str, p1: &str, p2: &str) -> String {
    let Ok(resp) = client
        .post(format!("{base}/api/v1/games"))
        .json(&json!({ "player_id": p1 }))
        .send()
        .await
    else {
        panic!("start request failed");
    };
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created = body_json(resp).await;
    assert_eq!(created["status"], "starting");
    let Some(game) = created["game_id"].as_str() else {
        panic!("missing game_id in {created}");
    };

    let Ok(resp) = client
        .put(format!("{base}/api/v1/games/{game}/players/{p2}"))
        .send()
        .await
    else {
        panic!("join request failed");
    };
    assert_eq!(resp.status(), StatusCode::OK);
    let joined = body_json(resp).await;
    assert_eq!(joined["status"], "in-progress");
    assert_eq!(joined["next_turn"], p1);
    game.to_string()
}

#[tokio::test]
async fn full_game_reaches_a_win() {
    let addr = spawn_app().await;
    let base = format!("http://{addr}");
    let client = reqwest::Client::new();

    let alice = register(&client, &base, "s-alice", "alice").await;
    let bob = register(&client, &base, "s-bob", "bob").await;
    let game = start_and_join(&client, &base, &alice, &bob).await;

    let Ok(resp) = client.get(format!("{base}/api/v1/lobby")).send().await else {
        panic!("lobby request failed");
    };
    let lobby = body_json(resp).await;
    assert_eq!(lobby["total"], 2);
    let Some(players) = lobby["players"].as_array() else {
        panic!("players is not an array");
    };
    assert!(players.iter().all(|p| p["status"] == "playing"));

    for (player, row, col) in [
        (&alice, 1, 1),
        (&bob, 2, 1),
        (&alice, 1, 2),
        (&bob, 2, 2),
    ] {
        let (status, body) = play(&client, &base, &game, player, row, col).await;
        assert_eq!(status, StatusCode::OK, "{body}");
    }

    let (status, body) = play(&client, &base, &game, &alice, 1, 3).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["move"]["cell"], json!({ "row": 1, "col": 3 }));
    assert_eq!(body["game"]["status"], "finished");
    assert_eq!(body["game"]["winner_id"], alice.as_str());
    assert_eq!(body["game"]["is_draw"], false);
    assert_eq!(body["game"]["board"][0], json!([alice, alice, alice]));

    let (status, body) = play(&client, &base, &game, &bob, 3, 3).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], 4004);

    let Ok(resp) = client
        .get(format!("{base}/api/v1/lobby/me"))
        .header("x-session-id", "s-bob")
        .send()
        .await
    else {
        panic!("lobby/me request failed");
    };
    assert_eq!(body_json(resp).await["status"], "online");

    let Ok(resp) = client
        .get(format!("{base}/api/v1/players/{alice}/history"))
        .send()
        .await
    else {
        panic!("history request failed");
    };
    let history = body_json(resp).await;
    assert_eq!(history["total"], 1);
    assert_eq!(history["data"][0]["status"], "finished");
}

#[tokio::test]
async fn illegal_moves_are_rejected_with_their_class() {
    let addr = spawn_app().await;
    let base = format!("http://{addr}");
    let client = reqwest::Client::new();

    let alice = register(&client, &base, "s-alice", "alice").await;
    let bob = register(&client, &base, "s-bob", "bob").await;
    let game = start_and_join(&client, &base, &alice, &bob).await;

    let (status, body) = play(&client, &base, &game, &bob, 1, 1).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], 4101);

    for (row, col) in [(4, 1), (-1, 2), (1, 256)] {
        let (status, body) = play(&client, &base, &game, &alice, row, col).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], 1002, "({row},{col}) gave {body}");
    }

    let (status, _) = play(&client, &base, &game, &alice, 2, 2).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = play(&client, &base, &game, &bob, 2, 2).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], 4003);

    let Ok(resp) = client
        .get(format!("{base}/api/v1/games/{game}"))
        .send()
        .await
    else {
        panic!("get game failed");
    };
    let state = body_json(resp).await;
    assert_eq!(state["moves"].as_array().map(Vec::len), Some(1));
    assert_eq!(state["next_turn"], bob.as_str());
}

#[tokio::test]
async fn join_rejection_lists_every_reason() {
    let addr = spawn_app().await;
    let base = format!("http://{addr}");
    let client = reqwest::Client::new();

    let alice = register(&client, &base, "s-alice", "alice").await;
    let bob = register(&client, &base, "s-bob", "bob").await;
    let carol = register(&client, &base, "s-carol", "carol").await;
    let game = start_and_join(&client, &base, &alice, &bob).await;

    let Ok(resp) = client
        .put(format!("{base}/api/v1/games/{game}/players/{carol}"))
        .send()
        .await
    else {
        panic!("join request failed");
    };
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(resp).await;
    assert_eq!(body["error"]["code"], 4002);
    assert_eq!(
        body["error"]["reasons"],
        json!(["game_not_joinable", "game_full"])
    );
    assert_eq!(
        body["error"]["message"],
        "unable to join player carol to game: game not ready & max players already in-game"
    );

    let Ok(resp) = client
        .get(format!("{base}/api/v1/players/{carol}/games"))
        .send()
        .await
    else {
        panic!("list request failed");
    };
    assert_eq!(body_json(resp).await["total"], 0);
}

#[tokio::test]
async fn lobby_membership_lifecycle() {
    let addr = spawn_app().await;
    let base = format!("http://{addr}");
    let client = reqwest::Client::new();

    let first = register(&client, &base, "s-1", "dana").await;
    let second = register(&client, &base, "s-2", "dana").await;
    assert_eq!(first, second);

    let Ok(resp) = client
        .post(format!("{base}/api/v1/players"))
        .json(&json!({ "name": "   " }))
        .send()
        .await
    else {
        panic!("register request failed");
    };
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    for _ in 0..2 {
        let Ok(resp) = client
            .delete(format!("{base}/api/v1/lobby/s-1"))
            .send()
            .await
        else {
            panic!("delete request failed");
        };
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }

    let Ok(resp) = client
        .get(format!("{base}/api/v1/lobby/me"))
        .header("x-session-id", "s-1")
        .send()
        .await
    else {
        panic!("lobby/me request failed");
    };
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let Ok(resp) = client.get(format!("{base}/api/v1/lobby")).send().await else {
        panic!("lobby request failed");
    };
    assert_eq!(body_json(resp).await["total"], 1);
}

#[tokio::test]
async fn unknown_ids_and_health() {
    let addr = spawn_app().await;
    let base = format!("http://{addr}");
    let client = reqwest::Client::new();

    let missing = uuid::Uuid::new_v4();
    let Ok(resp) = client
        .get(format!("{base}/api/v1/games/{missing}"))
        .send()
        .await
    else {
        panic!("get game failed");
    };
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await["error"]["code"], 2002);

    let Ok(resp) = client
        .post(format!("{base}/api/v1/games"))
        .json(&json!({ "player_id": missing }))
        .send()
        .await
    else {
        panic!("start request failed");
    };
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await["error"]["code"], 2001);

    let Ok(resp) = client.get(format!("{base}/health")).send().await else {
        panic!("health request failed");
    };
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["status"], "healthy");
}
