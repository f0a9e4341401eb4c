//! Router and shared application state.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::agent::Agent;
use crate::config::Config;
use crate::session::SessionStore;

use super::{chat, ui};

/// State shared by every handler.
pub struct AppState {
    pub config: Config,
    pub agent: Arc<Agent>,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(config: Config, agent: Arc<Agent>) -> Self {
        Self {
            config,
            agent,
            sessions: SessionStore::new(),
        }
    }
}

/// Build the HTTP router: the chat page plus the JSON API.
pub fn router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/health", get(chat::health))
        .route("/tools", get(chat::list_tools))
        .route("/chat", post(chat::chat))
        .route("/sessions", post(chat::create_session))
        .route("/sessions/:id", axum::routing::delete(chat::delete_session))
        .route("/sessions/:id/messages", get(chat::session_messages))
        .route("/sessions/:id/chat", post(chat::session_chat))
        .layer(CorsLayer::permissive());

    Router::new()
        .route("/", get(ui::index))
        .route("/chat", post(ui::submit))
        .route("/reset", post(ui::reset))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
