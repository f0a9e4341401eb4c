//! JSON chat API.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::agent::{AgentError, ChatReply};
use crate::tools::ToolInfo;

use super::routes::AppState;
use super::types::{
    ChatRequest, CreateSessionResponse, HealthResponse, SessionChatRequest,
    SessionMessagesResponse,
};

/// Map an agent failure to an HTTP error.
pub(super) fn agent_error(err: AgentError) -> (StatusCode, String) {
    match err {
        AgentError::EmptyQuery => (StatusCode::BAD_REQUEST, "query is required".to_string()),
        other => {
            tracing::error!(error = %other, "Chat turn failed");
            (StatusCode::BAD_GATEWAY, other.to_string())
        }
    }
}

fn session_not_found(id: Uuid) -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, format!("Session {} not found", id))
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model: state.agent.model().to_string(),
    })
}

pub async fn list_tools(State(state): State<Arc<AppState>>) -> Json<Vec<ToolInfo>> {
    Json(state.agent.tools().list_tools())
}

/// Stateless turn: `chat(query, history) -> {response}`.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatReply>, (StatusCode, String)> {
    tracing::info!(
        query_len = req.query.len(),
        history_len = req.history.len(),
        "Received chat request"
    );
    let reply = state
        .agent
        .chat(&req.query, &req.history)
        .await
        .map_err(agent_error)?;
    Ok(Json(reply))
}

pub async fn create_session(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<CreateSessionResponse>) {
    let (id, _) = state.sessions.create().await;
    (StatusCode::CREATED, Json(CreateSessionResponse { id }))
}

pub async fn session_messages(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionMessagesResponse>, (StatusCode, String)> {
    let messages = state
        .sessions
        .history(id)
        .await
        .ok_or_else(|| session_not_found(id))?;
    Ok(Json(SessionMessagesResponse { id, messages }))
}

pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    if state.sessions.delete(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(session_not_found(id))
    }
}

/// Turn against a server-side session; the exchange is recorded on success.
pub async fn session_chat(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<SessionChatRequest>,
) -> Result<Json<ChatReply>, (StatusCode, String)> {
    let handle = state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| session_not_found(id))?;

    // Held for the whole turn so one session never runs two turns at once.
    let mut session = handle.lock().await;
    let reply = state
        .agent
        .chat(&req.query, session.history())
        .await
        .map_err(agent_error)?;
    session.record_exchange(req.query, reply.response.clone());

    tracing::info!(
        session_id = %id,
        messages = session.messages.len(),
        tools_used = reply.tool_calls.len(),
        "Session turn complete"
    );
    Ok(Json(reply))
}
