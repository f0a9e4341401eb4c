//! API request and response types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::session::Message;

/// Stateless chat request: the caller owns the history.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    /// The user's question
    pub query: String,

    /// Prior messages, oldest first
    #[serde(default)]
    pub history: Vec<Message>,
}

/// Chat request against a server-side session.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionChatRequest {
    pub query: String,
}

/// Form body posted by the chat page.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatForm {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateSessionResponse {
    pub id: Uuid,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionMessagesResponse {
    pub id: Uuid,
    pub messages: Vec<Message>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,

    /// Model used for chat turns
    pub model: String,
}
