//! WebSocket event types and broadcasting for live rendering.
//!
//! Every connected client receives a `connected` snapshot first, then every
//! change as it happens.
//!
//! # Event Types
//!
//! - `connected` - Sent when a client connects, includes every playground and the chat
//! - `playground_changed` - A parameter was set or a topic was reset
//! - `message_appended` - A transcript entry was added
//! - `busy_changed` - A tutor request started or settled
//! - `panel_toggled` - The chat panel was shown or hidden

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use mastery_playground::PlaygroundView;
use mastery_tutor::{ChatMessage, ChatSnapshot};
use serde::Serialize;
use tokio::sync::broadcast;
use tokio::time::interval;
use tracing::{debug, info, warn};

use crate::api::AppState;

// ============================================================================
// Event Payloads
// ============================================================================

/// Payload for the `connected` event.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectedPayload {
    /// Every playground, in topic order.
    pub playgrounds: Vec<PlaygroundView>,
    /// The chat session.
    pub chat: ChatSnapshot,
}

/// Payload for the `busy_changed` event.
#[derive(Debug, Clone, Serialize)]
pub struct BusyPayload {
    /// Whether a tutor request is outstanding.
    pub busy: bool,
}

/// Payload for the `panel_toggled` event.
#[derive(Debug, Clone, Serialize)]
pub struct PanelPayload {
    /// Whether the chat panel is visible.
    pub open: bool,
}

// ============================================================================
// Event Enum
// ============================================================================

/// Events pushed to rendering clients.
///
/// Serialized as JSON objects with "event" and "payload" fields.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "payload", rename_all = "snake_case")]
pub enum MasteryEvent {
    /// Sent when a client connects.
    Connected(ConnectedPayload),
    /// Sent with the fresh view after a playground mutation.
    PlaygroundChanged(PlaygroundView),
    /// Sent when a transcript entry is appended.
    MessageAppended(ChatMessage),
    /// Sent when the busy flag flips.
    BusyChanged(BusyPayload),
    /// Sent when the chat panel is shown or hidden.
    PanelToggled(PanelPayload),
}

impl MasteryEvent {
    /// Creates a `Connected` event.
    #[must_use]
    pub const fn connected(playgrounds: Vec<PlaygroundView>, chat: ChatSnapshot) -> Self {
        Self::Connected(ConnectedPayload { playgrounds, chat })
    }

    /// Creates a `BusyChanged` event.
    #[must_use]
    pub const fn busy_changed(busy: bool) -> Self {
        Self::BusyChanged(BusyPayload { busy })
    }

    /// Creates a `PanelToggled` event.
    #[must_use]
    pub const fn panel_toggled(open: bool) -> Self {
        Self::PanelToggled(PanelPayload { open })
    }

    /// Returns the event name as a string.
    #[must_use]
    pub const fn event_name(&self) -> &'static str {
        match self {
            Self::Connected(_) => "connected",
            Self::PlaygroundChanged(_) => "playground_changed",
            Self::MessageAppended(_) => "message_appended",
            Self::BusyChanged(_) => "busy_changed",
            Self::PanelToggled(_) => "panel_toggled",
        }
    }
}

// ============================================================================
// Event Broadcaster
// ============================================================================

/// Fans events out to all connected WebSocket clients.
///
/// Events are not kept for clients that connect later; the `connected`
/// snapshot covers that.
#[derive(Debug, Clone)]
pub struct EventBroadcaster {
    sender: broadcast::Sender<MasteryEvent>,
}

impl EventBroadcaster {
    /// Creates a broadcaster buffering `capacity` events per subscriber.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Creates a new subscriber.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<MasteryEvent> {
        self.sender.subscribe()
    }

    /// Broadcasts an event and returns how many subscribers will see it.
    pub fn send(&self, event: MasteryEvent) -> usize {
        debug!(event = event.event_name(), "Broadcasting event");
        // Err only means nobody is listening.
        self.sender.send(event).unwrap_or(0)
    }

    /// Returns the number of active subscribers.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBroadcaster {
    fn default() -> Self {
        Self::new(100)
    }
}

// ============================================================================
// WebSocket Handler
// ============================================================================

/// Heartbeat ping interval.
const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(30);

/// Maximum number of missed pong responses before disconnecting.
const MAX_MISSED_PONGS: u8 = 3;

/// Handler for `GET /ws`.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> Response {
    info!("New WebSocket connection request");
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Serves one client until it leaves or stops answering pings.
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    // Subscribe before taking the snapshot so nothing falls in between.
    let mut event_receiver = state.broadcaster.subscribe();

    let playgrounds = state.playgrounds.lock().await.views();
    let connected = MasteryEvent::connected(playgrounds, state.tutor.snapshot());
    let connected_json = match serde_json::to_string(&connected) {
        Ok(json) => json,
        Err(e) => {
            warn!("Failed to serialize connected event: {}", e);
            return;
        }
    };

    if sender.send(Message::Text(connected_json)).await.is_err() {
        debug!("Client disconnected before receiving connected event");
        return;
    }

    info!("WebSocket client connected, sent initial snapshot");

    let mut heartbeat_interval = interval(HEARTBEAT_INTERVAL);
    // The first tick is immediate; skip it.
    heartbeat_interval.tick().await;
    let mut missed_pongs = 0u8;

    loop {
        tokio::select! {
            msg = receiver.next() => {
                match msg {
                    Some(Ok(Message::Pong(_))) => {
                        missed_pongs = 0;
                        debug!("Received pong from client");
                    }
                    Some(Ok(Message::Close(_))) => {
                        info!("Client requested close");
                        break;
                    }
                    Some(Ok(Message::Text(_) | Message::Binary(_))) => {
                        // Input goes through the HTTP API.
                        debug!("Ignoring message from client");
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if sender.send(Message::Pong(data)).await.is_err() {
                            debug!("Failed to send pong, client disconnected");
                            break;
                        }
                    }
                    Some(Err(e)) => {
                        debug!("WebSocket error: {}", e);
                        break;
                    }
                    None => {
                        debug!("WebSocket stream ended");
                        break;
                    }
                }
            }

            event = event_receiver.recv() => {
                match event {
                    Ok(event) => {
                        let json = match serde_json::to_string(&event) {
                            Ok(j) => j,
                            Err(e) => {
                                warn!("Failed to serialize event: {}", e);
                                continue;
                            }
                        };

                        if sender.send(Message::Text(json)).await.is_err() {
                            debug!("Failed to send event, client disconnected");
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        warn!("Client lagged, missed {} events", n);
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        info!("Broadcaster closed");
                        break;
                    }
                }
            }

            _ = heartbeat_interval.tick() => {
                if sender.send(Message::Ping(vec![])).await.is_err() {
                    debug!("Failed to send ping, client disconnected");
                    break;
                }
                missed_pongs += 1;
                if missed_pongs >= MAX_MISSED_PONGS {
                    info!("Client missed {} pongs, closing connection", MAX_MISSED_PONGS);
                    break;
                }
            }
        }
    }

    info!("WebSocket client disconnected");
}

// ============================================================================
// Tests
// ============================================================================
