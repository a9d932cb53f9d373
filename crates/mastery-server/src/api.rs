//! HTTP API endpoints for the CSS Mastery playgrounds and tutor.
//!
//! # Endpoints
//!
//! - `GET /api/playgrounds` - Every playground view
//! - `GET /api/playgrounds/:topic` - One playground view
//! - `PUT /api/playgrounds/:topic/parameters/:name` - Set one parameter
//! - `POST /api/playgrounds/:topic/reset` - Restore topic defaults
//! - `GET /api/tutor` - Chat snapshot
//! - `POST /api/tutor/messages` - Ask the tutor a question
//! - `POST /api/tutor/open` - Show or hide the chat panel
//! - `GET /ws` - Live event stream
//!
//! # Example
//!
//! ```no_run
//! use mastery_server::{create_router, AppState, Config};
//!
//! # async fn example() {
//! let state = AppState::new(Config::default());
//! let router = create_router(state);
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await.unwrap();
//! axum::serve(listener, router).await.unwrap();
//! # }
//! ```

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use mastery_playground::{ParamValue, PlaygroundError, PlaygroundSet, PlaygroundView, Topic};
use mastery_tutor::{ChatSnapshot, PendingReply, TextGenerator, Tutor};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::websocket::{ws_handler, EventBroadcaster, MasteryEvent};
use crate::Config;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for setting a parameter.
#[derive(Debug, Clone, Deserialize)]
pub struct SetParameterRequest {
    /// New value: an integer for ranges, a keyword for choices.
    pub value: ParamValue,
}

/// Request body for asking the tutor.
#[derive(Debug, Clone, Deserialize)]
pub struct AskRequest {
    /// The learner's question.
    pub text: String,
    /// Respond only after the reply has been appended.
    #[serde(default)]
    pub wait: bool,
}

/// Response body for asking the tutor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AskResponse {
    /// Whether the question was accepted. Blank text or an outstanding
    /// request rejects it.
    pub accepted: bool,
    /// Transcript length after the call.
    pub transcript_length: usize,
}

/// Request body for the panel toggle.
#[derive(Debug, Clone, Deserialize)]
pub struct PanelRequest {
    /// Show (`true`) or hide (`false`) the chat panel.
    pub open: bool,
}

/// Error response body returned on failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Description of the error.
    pub error: String,
}

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the HTTP server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Config,
    /// One controller per topic.
    pub playgrounds: Arc<Mutex<PlaygroundSet>>,
    /// The chat session.
    pub tutor: Tutor,
    /// Event fan-out to WebSocket clients.
    pub broadcaster: EventBroadcaster,
}

impl AppState {
    /// Creates state using the generator named in `config.tutor`.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let generator = config.tutor.generator();
        Self::with_generator(config, generator)
    }

    /// Creates state with an explicit generator.
    #[must_use]
    pub fn with_generator(config: Config, generator: Arc<dyn TextGenerator>) -> Self {
        let broadcaster = EventBroadcaster::new(config.event_capacity);
        Self {
            config,
            playgrounds: Arc::new(Mutex::new(PlaygroundSet::new())),
            tutor: Tutor::new(generator),
            broadcaster,
        }
    }
}

// ============================================================================
// API Error Type
// ============================================================================

/// Internal error type for API handlers.
#[derive(Debug)]
enum ApiError {
    /// No such topic.
    NotFound(String),
    /// The request broke a playground contract.
    BadRequest(String),
}

impl From<PlaygroundError> for ApiError {
    fn from(err: PlaygroundError) -> Self {
        match err {
            PlaygroundError::UnknownTopic(_) => Self::NotFound(err.to_string()),
            _ => Self::BadRequest(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

// ============================================================================
// Router Setup
// ============================================================================

/// Creates the HTTP router with all API endpoints and the event stream.
///
/// All API routes live under `/api`; the router carries permissive CORS and
/// request tracing.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/playgrounds", get(handle_list_playgrounds))
        .route("/playgrounds/:topic", get(handle_get_playground))
        .route(
            "/playgrounds/:topic/parameters/:name",
            put(handle_set_parameter),
        )
        .route("/playgrounds/:topic/reset", post(handle_reset))
        .route("/tutor", get(handle_tutor_snapshot))
        .route("/tutor/messages", post(handle_ask))
        .route("/tutor/open", post(handle_panel));

    Router::new()
        .nest("/api", api_routes)
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::new(state))
}

// ============================================================================
// Playground Handlers
// ============================================================================

/// Handler for `GET /api/playgrounds`.
async fn handle_list_playgrounds(State(state): State<Arc<AppState>>) -> Json<Vec<PlaygroundView>> {
    Json(state.playgrounds.lock().await.views())
}

/// Handler for `GET /api/playgrounds/:topic`.
async fn handle_get_playground(
    State(state): State<Arc<AppState>>,
    Path(topic): Path<String>,
) -> Result<Json<PlaygroundView>, ApiError> {
    let topic: Topic = topic.parse()?;
    Ok(Json(state.playgrounds.lock().await.get(topic).view()))
}

/// Handler for `PUT /api/playgrounds/:topic/parameters/:name`.
async fn handle_set_parameter(
    State(state): State<Arc<AppState>>,
    Path((topic, name)): Path<(String, String)>,
    Json(request): Json<SetParameterRequest>,
) -> Result<Json<PlaygroundView>, ApiError> {
    let topic: Topic = topic.parse()?;

    let view = state
        .playgrounds
        .lock()
        .await
        .set_parameter(topic, &name, &request.value)
        .map_err(|e| {
            warn!(topic = %topic, name = %name, error = %e, "Rejected parameter update");
            e
        })?;

    state
        .broadcaster
        .send(MasteryEvent::PlaygroundChanged(view.clone()));
    Ok(Json(view))
}

/// Handler for `POST /api/playgrounds/:topic/reset`.
async fn handle_reset(
    State(state): State<Arc<AppState>>,
    Path(topic): Path<String>,
) -> Result<Json<PlaygroundView>, ApiError> {
    let topic: Topic = topic.parse()?;
    let view = state.playgrounds.lock().await.reset(topic);
    info!(topic = %topic, "Playground reset");

    state
        .broadcaster
        .send(MasteryEvent::PlaygroundChanged(view.clone()));
    Ok(Json(view))
}

// ============================================================================
// Tutor Handlers
// ============================================================================

/// Handler for `GET /api/tutor`.
async fn handle_tutor_snapshot(State(state): State<Arc<AppState>>) -> Json<ChatSnapshot> {
    Json(state.tutor.snapshot())
}

/// Handler for `POST /api/tutor/messages`.
///
/// A rejected submission is reported in the body, not as an HTTP error. With
/// `wait` the response follows the reply; without it the handler returns as
/// soon as the question is recorded.
async fn handle_ask(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AskRequest>,
) -> Json<AskResponse> {
    let Some(pending) = state.tutor.submit(&request.text) else {
        return Json(AskResponse {
            accepted: false,
            transcript_length: state.tutor.snapshot().messages.len(),
        });
    };

    state
        .broadcaster
        .send(MasteryEvent::MessageAppended(pending.user_message().clone()));
    state.broadcaster.send(MasteryEvent::busy_changed(true));

    // Detached: dropping this handler must not cancel the call or its events.
    let delivery = tokio::spawn({
        let state = Arc::clone(&state);
        async move { deliver_reply(&state, pending).await }
    });
    if request.wait {
        if let Err(e) = delivery.await {
            warn!(error = %e, "Reply delivery task failed");
        }
    }

    Json(AskResponse {
        accepted: true,
        transcript_length: state.tutor.snapshot().messages.len(),
    })
}

/// Resolves the outstanding request and announces the outcome.
async fn deliver_reply(state: &AppState, pending: PendingReply) {
    if let Some(reply) = pending.resolve().await {
        state.broadcaster.send(MasteryEvent::MessageAppended(reply));
    }
    state.broadcaster.send(MasteryEvent::busy_changed(false));
}

/// Handler for `POST /api/tutor/open`.
async fn handle_panel(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PanelRequest>,
) -> Json<ChatSnapshot> {
    state.tutor.set_open(request.open);
    state
        .broadcaster
        .send(MasteryEvent::panel_toggled(request.open));
    Json(state.tutor.snapshot())
}

// ============================================================================
// Tests
// ============================================================================
