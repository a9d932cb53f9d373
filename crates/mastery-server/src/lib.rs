//! CSS Mastery Server
//!
//! Serves the playground controllers and the tutor over HTTP, and pushes
//! every change to WebSocket clients.

pub mod api;
pub mod config;
pub mod error;
pub mod websocket;

pub use api::{
    create_router, AppState, AskRequest, AskResponse, ErrorResponse, PanelRequest,
    SetParameterRequest,
};
pub use config::{Config, LlmProvider, TutorConfig, CONFIG_FILE_NAME};
pub use error::{Result, ServerError};
pub use websocket::{EventBroadcaster, MasteryEvent};

use tokio::net::TcpListener;
use tracing::info;

/// Binds the listener and serves `state` until the server stops.
///
/// # Errors
///
/// Returns `ServerError::Bind` if the address cannot be bound, and
/// `ServerError::Io` if serving fails.
pub async fn serve(state: AppState) -> Result<()> {
    let addr = state.config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| ServerError::bind(&addr, e.to_string()))?;
    info!(addr = %addr, "CSS Mastery server listening");

    axum::serve(listener, create_router(state)).await?;
    Ok(())
}
