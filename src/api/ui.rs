//! Server-rendered chat page.
//!
//! The browser holds a session cookie; the message log lives in the
//! [`SessionStore`](crate::session::SessionStore) and is rendered as chat
//! bubbles on every request.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    Form,
};
use uuid::Uuid;

use crate::session::{Message, MessageRole, SessionHandle};

use super::routes::AppState;
use super::types::ChatForm;

pub const SESSION_COOKIE: &str = "space_chat_session";

const EMPTY_INPUT_WARNING: &str = "Input must be a valid string. Please try again.";

const STYLE: &str = r#"
    .chat-container {
        max-width: 700px;
        margin: auto;
        overflow: hidden;
    }
    .user-message {
        background-color: #1B3A73; /* NASA Blue */
        color: white;
        padding: 10px;
        border-radius: 15px;
        margin: 10px 0;
        display: inline-block;
        max-width: 60%;
        float: right;
    }
    .bot-message {
        text-align: left;
        background-color: #D9D9D6; /* Light Gray */
        color: black;
        padding: 10px;
        border-radius: 15px;
        margin: 10px 0;
        display: inline-block;
        max-width: 60%;
    }
    .icon {
        vertical-align: middle;
        margin-right: 5px;
    }
    .error {
        max-width: 700px;
        margin: 10px auto;
        padding: 10px;
        border-radius: 8px;
        background-color: #5C1A1A;
        color: #FFDADA;
    }
    form.chat-input {
        max-width: 700px;
        margin: 20px auto;
        display: flex;
        gap: 8px;
    }
    form.chat-input input {
        flex: 1;
        padding: 10px;
        border-radius: 8px;
        border: none;
    }
    body {
        background-color: #0B0D17; /* Dark Space Gray */
        color: white;
        font-family: sans-serif;
    }
"#;

/// Session id carried by the request cookie, if any.
pub(super) fn session_from_cookie(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

/// Browser-session cookie (no expiry: it ends with the browser session).
fn session_cookie(id: Uuid) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, id)
}

fn expired_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
}

/// Escape text for inclusion in HTML; newlines become line breaks.
pub(super) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
        .replace('\n', "<br>")
}

fn render_bubble(message: &Message) -> String {
    let (class, icon) = match message.role {
        MessageRole::User => ("user-message", "👩🏽‍🚀"),
        MessageRole::Assistant => ("bot-message", "🚀"),
    };
    format!(
        r#"<div class="chat-container"><div class="{class}"><span class="icon">{icon}</span>{}</div></div>"#,
        html_escape(&message.content)
    )
}

/// Render the whole page for a message log and an optional warning.
pub(super) fn render_page(messages: &[Message], error: Option<&str>) -> String {
    let bubbles = messages
        .iter()
        .map(render_bubble)
        .collect::<Vec<_>>()
        .join("\n");
    let error = error
        .map(|e| format!(r#"<div class="error">{}</div>"#, html_escape(e)))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Space Chat</title>
<style>{STYLE}</style>
</head>
<body>
<h1>🚀 Space Chat</h1>
<p>Ask me cool things about space, and I'll fetch the data for you!</p>
{bubbles}
{error}
<form class="chat-input" method="post" action="/chat">
<input type="text" name="query" placeholder="Type your message here..." autocomplete="off" autofocus>
<button type="submit">Send</button>
</form>
<form class="chat-input" method="post" action="/reset">
<button type="submit">New chat</button>
</form>
</body>
</html>
"#
    )
}

fn page_response(status: StatusCode, session_id: Uuid, body: String) -> Response {
    (
        status,
        [(header::SET_COOKIE, session_cookie(session_id))],
        Html(body),
    )
        .into_response()
}

/// The cookie's session, if the store still knows it.
async fn known_session(state: &AppState, headers: &HeaderMap) -> Option<(Uuid, SessionHandle)> {
    let id = session_from_cookie(headers)?;
    let handle = state.sessions.get(id).await?;
    Some((id, handle))
}

/// Render the chat page. Visiting never creates a session; the first real
/// question does.
pub async fn index(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let Some((id, handle)) = known_session(&state, &headers).await else {
        return Html(render_page(&[], None)).into_response();
    };
    let session = handle.lock().await;
    page_response(StatusCode::OK, id, render_page(session.history(), None))
}

pub async fn submit(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(form): Form<ChatForm>,
) -> Response {
    let existing = known_session(&state, &headers).await;

    if form.query.trim().is_empty() {
        let history = match &existing {
            Some((_, handle)) => handle.lock().await.history().to_vec(),
            None => Vec::new(),
        };
        return (
            StatusCode::BAD_REQUEST,
            Html(render_page(&history, Some(EMPTY_INPUT_WARNING))),
        )
            .into_response();
    }

    let (id, handle) = match existing {
        Some(found) => found,
        None => state.sessions.create().await,
    };
    let mut session = handle.lock().await;

    let reply = match state.agent.chat(&form.query, session.history()).await {
        Ok(reply) => reply,
        Err(err) => {
            tracing::error!(session_id = %id, error = %err, "Chat turn failed");
            let message = format!("Sorry, I couldn't get an answer: {}", err);
            return page_response(
                StatusCode::BAD_GATEWAY,
                id,
                render_page(session.history(), Some(&message)),
            );
        }
    };

    session.record_exchange(form.query, reply.response);
    (
        StatusCode::SEE_OTHER,
        [
            (header::LOCATION, "/".to_string()),
            (header::SET_COOKIE, session_cookie(id)),
        ],
    )
        .into_response()
}

/// End the current session and start over.
pub async fn reset(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    if let Some(id) = session_from_cookie(&headers) {
        state.sessions.delete(id).await;
    }
    (
        StatusCode::SEE_OTHER,
        [
            (header::LOCATION, "/".to_string()),
            (header::SET_COOKIE, expired_cookie()),
        ],
    )
        .into_response()
}
