//! Integration tests for the HTTP API.
//!
//! These drive a real server over TCP with `reqwest`. The tutor runs against
//! a scripted generator, so no network access is needed.

mod common;

use std::sync::Arc;

use common::{spawn_test_server, wait_until_idle};
use mastery_tutor::{ScriptedGenerator, TutorError};
use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio::sync::Notify;

async fn get_json(url: &str) -> (StatusCode, Value) {
    let response = reqwest::get(url).await.expect("Request failed");
    let status = response.status();
    (status, response.json().await.expect("Invalid JSON"))
}

async fn send_json(method: reqwest::Method, url: &str, body: Value) -> (StatusCode, Value) {
    let response = reqwest::Client::new()
        .request(method, url)
        .json(&body)
        .send()
        .await
        .expect("Request failed");
    let status = response.status();
    (status, response.json().await.expect("Invalid JSON"))
}

// ============================================================================
// Playground Tests
// ============================================================================

/// Tests the grid scenario end to end: 3 rows, 4 fixed columns.
#[tokio::test]
async fn test_grid_template_scenario() {
    let server = spawn_test_server(ScriptedGenerator::new()).await;
    let put = reqwest::Method::PUT;

    send_json(put.clone(), &server.url("/api/playgrounds/grid/parameters/rows"), json!({"value": 3})).await;
    send_json(put.clone(), &server.url("/api/playgrounds/grid/parameters/columns"), json!({"value": 4})).await;
    let (status, view) = send_json(
        put,
        &server.url("/api/playgrounds/grid/parameters/column-track-size"),
        json!({"value": "100px"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["descriptor"]["grid-template-columns"], "repeat(4, 100px)");
    assert_eq!(view["descriptor"]["grid-template-rows"], "repeat(3, 1fr)");
    assert!(view["snippet"]
        .as_str()
        .unwrap()
        .contains("grid-template-columns: repeat(4, 100px);"));

    let (_, fetched) = get_json(&server.url("/api/playgrounds/grid")).await;
    assert_eq!(fetched, view);
}

/// Tests that reading a playground twice without a change yields the same view.
#[tokio::test]
async fn test_views_are_stable_between_mutations() {
    let server = spawn_test_server(ScriptedGenerator::new()).await;
    let (_, first) = get_json(&server.url("/api/playgrounds")).await;
    let (_, second) = get_json(&server.url("/api/playgrounds")).await;
    assert_eq!(first, second);
}

/// Tests the positioning playground hides offsets while static.
#[tokio::test]
async fn test_positioning_offsets_follow_mode() {
    let server = spawn_test_server(ScriptedGenerator::new()).await;
    let put = reqwest::Method::PUT;

    let (_, view) = send_json(
        put.clone(),
        &server.url("/api/playgrounds/positioning/parameters/top"),
        json!({"value": 75}),
    )
    .await;
    assert_eq!(view["descriptor"]["top"], "auto");

    let (_, view) = send_json(
        put,
        &server.url("/api/playgrounds/positioning/parameters/position"),
        json!({"value": "absolute"}),
    )
    .await;
    assert_eq!(view["descriptor"]["top"], "75px");
    assert_eq!(view["descriptor"]["left"], "20px");
}

/// Tests breakpoint classification through the API.
#[tokio::test]
async fn test_responsive_breakpoints() {
    let server = spawn_test_server(ScriptedGenerator::new()).await;
    let url = server.url("/api/playgrounds/responsive/parameters/viewport-width");

    for (width, expected) in [(39, "mobile"), (40, "tablet"), (69, "tablet"), (70, "desktop")] {
        let (_, view) = send_json(reqwest::Method::PUT, &url, json!({"value": width})).await;
        assert_eq!(view["derived"]["breakpoint"], expected, "width {width}");
    }
}

/// Tests that contract violations come back as 400 with an error body.
#[tokio::test]
async fn test_invalid_parameter_is_bad_request() {
    let server = spawn_test_server(ScriptedGenerator::new()).await;
    let (status, body) = send_json(
        reqwest::Method::PUT,
        &server.url("/api/playgrounds/box-model/parameters/outline"),
        json!({"value": 4}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("outline"));
}

// ============================================================================
// Tutor Tests
// ============================================================================

/// Tests the chat scenario with a successful reply.
#[tokio::test]
async fn test_chat_success_scenario() {
    let gate = Arc::new(Notify::new());
    let server = spawn_test_server(
        ScriptedGenerator::new()
            .reply("Flexbox is a one-dimensional layout model.")
            .gated(Arc::clone(&gate)),
    )
    .await;

    let (_, snapshot) = get_json(&server.url("/api/tutor")).await;
    assert_eq!(snapshot["messages"].as_array().unwrap().len(), 1);

    let (_, ask) = send_json(
        reqwest::Method::POST,
        &server.url("/api/tutor/messages"),
        json!({"text": "What is flexbox?"}),
    )
    .await;
    assert_eq!(ask["accepted"], true);
    assert_eq!(ask["transcriptLength"], 2);

    let (_, snapshot) = get_json(&server.url("/api/tutor")).await;
    assert_eq!(snapshot["busy"], true);

    gate.notify_one();
    wait_until_idle(&server).await;
    let (_, snapshot) = get_json(&server.url("/api/tutor")).await;
    let messages = snapshot["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1]["role"], "user");
    assert_eq!(messages[2]["role"], "assistant");
    assert_eq!(messages[2]["isError"], false);
    assert_eq!(snapshot["busy"], false);
}

/// Tests the chat scenario with a failing service.
#[tokio::test]
async fn test_chat_failure_scenario() {
    let server = spawn_test_server(
        ScriptedGenerator::new().fail(TutorError::Network("connection refused".into())),
    )
    .await;

    let (_, ask) = send_json(
        reqwest::Method::POST,
        &server.url("/api/tutor/messages"),
        json!({"text": "What is flexbox?", "wait": true}),
    )
    .await;
    assert_eq!(ask["transcriptLength"], 3);

    let (_, snapshot) = get_json(&server.url("/api/tutor")).await;
    let last = &snapshot["messages"][2];
    assert_eq!(
        last["text"],
        "Sorry, I encountered an error connecting to the AI service."
    );
    assert_eq!(last["isError"], true);
    assert_eq!(snapshot["busy"], false);
}

/// Tests that a second question is dropped while the first is outstanding.
#[tokio::test]
async fn test_second_question_dropped_while_busy() {
    let gate = Arc::new(Notify::new());
    let server = spawn_test_server(
        ScriptedGenerator::new()
            .reply("first answer")
            .reply("never used")
            .gated(Arc::clone(&gate)),
    )
    .await;
    let url = server.url("/api/tutor/messages");

    let (_, first) = send_json(reqwest::Method::POST, &url, json!({"text": "one"})).await;
    let (_, second) = send_json(reqwest::Method::POST, &url, json!({"text": "two"})).await;
    assert_eq!(first["accepted"], true);
    assert_eq!(second["accepted"], false);
    assert_eq!(second["transcriptLength"], 2);

    gate.notify_one();
    wait_until_idle(&server).await;
    let snapshot = server.state.tutor.snapshot();
    assert_eq!(snapshot.messages.len(), 3);
    assert_eq!(snapshot.messages[2].text, "first answer");
}

/// Tests that blank input changes nothing.
#[tokio::test]
async fn test_blank_question_ignored() {
    let server = spawn_test_server(ScriptedGenerator::new()).await;
    let (status, ask) = send_json(
        reqwest::Method::POST,
        &server.url("/api/tutor/messages"),
        json!({"text": " \n "}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ask["accepted"], false);
    assert_eq!(ask["transcriptLength"], 1);
    assert!(!server.state.tutor.is_busy());
}

/// Tests that closing the panel mid-request keeps the late reply.
#[tokio::test]
async fn test_reply_survives_panel_close() {
    let gate = Arc::new(Notify::new());
    let server = spawn_test_server(
        ScriptedGenerator::new()
            .reply("late but kept")
            .gated(Arc::clone(&gate)),
    )
    .await;

    send_json(reqwest::Method::POST, &server.url("/api/tutor/open"), json!({"open": true})).await;
    send_json(
        reqwest::Method::POST,
        &server.url("/api/tutor/messages"),
        json!({"text": "question"}),
    )
    .await;
    let (_, snapshot) =
        send_json(reqwest::Method::POST, &server.url("/api/tutor/open"), json!({"open": false})).await;
    assert_eq!(snapshot["open"], false);
    assert_eq!(snapshot["busy"], true);

    gate.notify_one();
    wait_until_idle(&server).await;
    let snapshot = server.state.tutor.snapshot();
    assert!(!snapshot.open);
    assert_eq!(snapshot.messages[2].text, "late but kept");
}
