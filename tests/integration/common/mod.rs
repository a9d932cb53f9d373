//! Helpers shared by the integration test binaries.

#![allow(dead_code)]

use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use mastery_server::{create_router, AppState, Config};
use mastery_tutor::ScriptedGenerator;
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tungstenite::Message;

/// Helper type for WebSocket client
pub type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// A running test server.
pub struct TestServer {
    /// `http://host:port`
    pub base_url: String,
    /// `ws://host:port/ws`
    pub ws_url: String,
    /// Shared state, for inspecting the session directly.
    pub state: AppState,
    _handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Absolute URL for an API path such as `/api/tutor`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Helper to find an available port for testing.
fn find_available_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind to port")
        .local_addr()
        .expect("Failed to get local addr")
        .port()
}

/// Spawns a server whose tutor replays `generator`.
pub async fn spawn_test_server(generator: ScriptedGenerator) -> TestServer {
    let port = find_available_port();
    let config = Config {
        port,
        ..Config::default()
    };
    let addr = config.bind_address();
    let state = AppState::with_generator(config, Arc::new(generator));

    let router = create_router(state.clone());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind");

    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Server failed");
    });

    // Give the server a moment to start
    tokio::time::sleep(Duration::from_millis(50)).await;

    TestServer {
        base_url: format!("http://{addr}"),
        ws_url: format!("ws://{addr}/ws"),
        state,
        _handle: handle,
    }
}

/// Connects a WebSocket client to the given URL.
pub async fn connect_client(url: &str) -> WsClient {
    let (ws_stream, _) = connect_async(url)
        .await
        .expect("Failed to connect to WebSocket");
    ws_stream
}

/// Receives the next event as JSON, answering pings along the way.
pub async fn receive_event(client: &mut WsClient) -> Value {
    loop {
        let msg = timeout(Duration::from_secs(5), client.next())
            .await
            .expect("Timeout waiting for message")
            .expect("Stream ended")
            .expect("WebSocket error");

        match msg {
            Message::Text(text) => {
                return serde_json::from_str(&text).expect("Failed to parse event");
            }
            Message::Ping(data) => {
                client
                    .send(Message::Pong(data))
                    .await
                    .expect("Failed to send pong");
            }
            Message::Pong(_) => {}
            other => panic!("Expected text message, got: {other:?}"),
        }
    }
}

/// Polls until the tutor is idle or two seconds pass.
pub async fn wait_until_idle(server: &TestServer) {
    for _ in 0..100 {
        if !server.state.tutor.is_busy() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("Tutor stayed busy");
}
