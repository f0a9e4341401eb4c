//! OpenAI Chat Completions client.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use tracing::debug;

use super::{ChatMessage, ChatOptions, ChatResponse, LlmClient, LlmError, ToolCall, ToolSchema};

/// Client for any OpenAI-compatible `/chat/completions` endpoint.
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Ok(val) = HeaderValue::from_str(&format!("Bearer {}", self.api_key)) {
            headers.insert(AUTHORIZATION, val);
        }
        headers
    }
}

/// Build the request body. Tool fields are only sent when tools are offered.
pub(crate) fn build_request_body(
    model: &str,
    messages: &[ChatMessage],
    tools: Option<&[ToolSchema]>,
    options: ChatOptions,
) -> serde_json::Value {
    let mut body = serde_json::json!({
        "model": model,
        "messages": messages,
    });

    if let Some(tools) = tools.filter(|t| !t.is_empty()) {
        if let Some(obj) = body.as_object_mut() {
            obj.insert("tools".into(), serde_json::json!(tools));
            obj.insert("tool_choice".into(), serde_json::json!(options.tool_choice));
            obj.insert(
                "parallel_tool_calls".into(),
                options.parallel_tool_calls.into(),
            );
        }
    }

    body
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn chat_completion(
        &self,
        model: &str,
        messages: &[ChatMessage],
        tools: Option<&[ToolSchema]>,
        options: ChatOptions,
    ) -> Result<ChatResponse, LlmError> {
        let body = build_request_body(model, messages, tools, options);
        let url = format!("{}/chat/completions", self.base_url);

        debug!(
            model,
            messages = messages.len(),
            tool_choice = ?options.tool_choice,
            "chat completion"
        );

        let resp = self
            .client
            .post(&url)
            .headers(self.headers())
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        let text = resp.text().await?;
        if status != 200 {
            return Err(LlmError::from_status(status, &text));
        }

        let data: OpenAiChatResponse = serde_json::from_str(&text)?;
        let choice = data.choices.into_iter().next().ok_or(LlmError::NoChoices)?;

        Ok(ChatResponse {
            content: choice.message.content,
            tool_calls: choice.message.tool_calls,
            finish_reason: choice.finish_reason,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiChatResponse {
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
    tool_calls: Option<Vec<ToolCall>>,
}
