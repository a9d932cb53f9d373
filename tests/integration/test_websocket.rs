//! Integration tests for WebSocket real-time event streaming.

mod common;

use std::time::Duration;

use common::{connect_client, receive_event, spawn_test_server};
use mastery_server::MasteryEvent;
use mastery_tutor::ScriptedGenerator;
use serde_json::json;

// ============================================================================
// Connection Tests
// ============================================================================

/// Tests that a client receives the full snapshot on connection.
#[tokio::test]
async fn test_client_receives_connected_snapshot() {
    let server = spawn_test_server(ScriptedGenerator::new()).await;

    let mut client = connect_client(&server.ws_url).await;
    let event = receive_event(&mut client).await;

    assert_eq!(event["event"], "connected");
    assert_eq!(event["payload"]["playgrounds"].as_array().unwrap().len(), 5);
    assert_eq!(
        event["payload"]["chat"]["messages"][0]["text"],
        "Hi! I am your AI CSS Tutor. Ask me anything about selectors, layout, or design!"
    );
    assert_eq!(event["payload"]["chat"]["busy"], false);
}

/// Tests that the snapshot reflects earlier changes.
#[tokio::test]
async fn test_connected_snapshot_contains_current_state() {
    let server = spawn_test_server(ScriptedGenerator::new()).await;
    server
        .state
        .playgrounds
        .lock()
        .await
        .set_parameter(
            mastery_playground::Topic::Flex,
            "item-count",
            &mastery_playground::ParamValue::Integer(7),
        )
        .unwrap();

    let mut client = connect_client(&server.ws_url).await;
    let event = receive_event(&mut client).await;

    let flex = &event["payload"]["playgrounds"][1];
    assert_eq!(flex["topic"], "flex");
    assert_eq!(flex["parameters"]["item-count"], 7);
}

/// Tests that multiple clients can connect concurrently.
#[tokio::test]
async fn test_multiple_clients_can_connect() {
    let server = spawn_test_server(ScriptedGenerator::new()).await;

    let mut clients = Vec::new();
    for _ in 0..3 {
        clients.push(connect_client(&server.ws_url).await);
    }
    for client in &mut clients {
        assert_eq!(receive_event(client).await["event"], "connected");
    }
}

// ============================================================================
// Event Broadcast Tests
// ============================================================================

/// Tests that a parameter change reaches every client.
#[tokio::test]
async fn test_playground_change_broadcast_to_all_clients() {
    let server = spawn_test_server(ScriptedGenerator::new()).await;
    let mut client1 = connect_client(&server.ws_url).await;
    let mut client2 = connect_client(&server.ws_url).await;
    receive_event(&mut client1).await;
    receive_event(&mut client2).await;

    reqwest::Client::new()
        .put(server.url("/api/playgrounds/box-model/parameters/margin"))
        .json(&json!({"value": 35}))
        .send()
        .await
        .expect("Request failed");

    for client in [&mut client1, &mut client2] {
        let event = receive_event(client).await;
        assert_eq!(event["event"], "playground_changed");
        assert_eq!(event["payload"]["topic"], "box-model");
        assert_eq!(event["payload"]["descriptor"]["margin"], "35px");
        assert_eq!(event["payload"]["derived"]["totalWidth"], 330);
    }
}

/// Tests the event sequence of one tutor exchange.
#[tokio::test]
async fn test_chat_exchange_events() {
    let server = spawn_test_server(
        ScriptedGenerator::new()
            .reply("Use `display: grid`.")
            .delay(Duration::from_millis(50)),
    )
    .await;
    let mut client = connect_client(&server.ws_url).await;
    receive_event(&mut client).await;

    reqwest::Client::new()
        .post(server.url("/api/tutor/messages"))
        .json(&json!({"text": "  How do I make a grid?  "}))
        .send()
        .await
        .expect("Request failed");

    let user = receive_event(&mut client).await;
    assert_eq!(user["event"], "message_appended");
    assert_eq!(user["payload"]["role"], "user");
    assert_eq!(user["payload"]["text"], "How do I make a grid?");

    let busy = receive_event(&mut client).await;
    assert_eq!(busy["event"], "busy_changed");
    assert_eq!(busy["payload"]["busy"], true);

    let reply = receive_event(&mut client).await;
    assert_eq!(reply["event"], "message_appended");
    assert_eq!(reply["payload"]["role"], "assistant");
    assert_eq!(reply["payload"]["text"], "Use `display: grid`.");

    let idle = receive_event(&mut client).await;
    assert_eq!(idle["event"], "busy_changed");
    assert_eq!(idle["payload"]["busy"], false);
}

/// Tests that directly broadcast events are forwarded.
#[tokio::test]
async fn test_panel_toggle_event_forwarded() {
    let server = spawn_test_server(ScriptedGenerator::new()).await;
    let mut client = connect_client(&server.ws_url).await;
    receive_event(&mut client).await;

    server.state.broadcaster.send(MasteryEvent::panel_toggled(true));

    let event = receive_event(&mut client).await;
    assert_eq!(event["event"], "panel_toggled");
    assert_eq!(event["payload"]["open"], true);
}
