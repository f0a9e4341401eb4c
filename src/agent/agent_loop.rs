//! Core agent turn implementation.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::config::Config;
use crate::fetchers::SpaceApiClient;
use crate::llm::{
    ChatMessage, ChatOptions, LlmClient, OpenAiClient, Role, ToolCall, ToolChoice,
};
use crate::session::Message;
use crate::tools::ToolRegistry;

use super::prompt::{build_prompt, build_system_prompt};
use super::AgentError;

/// The conversational agent: one model handle and a fixed tool set.
///
/// The agent keeps no conversation state; callers pass the history in on
/// every turn.
pub struct Agent {
    model: String,
    llm: Arc<dyn LlmClient>,
    tools: ToolRegistry,
}

/// A tool call made during a turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolInvocation {
    pub name: String,
    pub arguments: Value,
    pub output: String,
}

/// Result of one `chat` turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatReply {
    pub response: String,
    pub tool_calls: Vec<ToolInvocation>,
}

impl Agent {
    /// Create an agent backed by the configured chat-completions endpoint and
    /// the space-data tools.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let llm = Arc::new(OpenAiClient::new(
            config.api_key.clone(),
            config.llm_base_url.clone(),
        ));
        let client = SpaceApiClient::new(config.space_apis.clone())?;
        let tools = ToolRegistry::space(client);

        Ok(Self::with_parts(llm, tools, config.default_model.clone()))
    }

    pub fn with_parts(llm: Arc<dyn LlmClient>, tools: ToolRegistry, model: String) -> Self {
        Self { model, llm, tools }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Answer `query` in the context of `history`.
    ///
    /// At most one tool runs per turn: the first completion may request a
    /// call (parallel calls disabled), and if it does, the second completion
    /// is made with tool use switched off so the model must answer.
    pub async fn chat(&self, query: &str, history: &[Message]) -> Result<ChatReply, AgentError> {
        if query.trim().is_empty() {
            return Err(AgentError::EmptyQuery);
        }

        let tool_schemas = self.tools.get_tool_schemas();
        let mut messages = vec![
            ChatMessage::system(build_system_prompt(&self.tools)),
            ChatMessage::user(build_prompt(history, query)),
        ];

        tracing::debug!(
            model = %self.model,
            history_len = history.len(),
            "Starting chat turn"
        );

        let first = self
            .llm
            .chat_completion(
                &self.model,
                &messages,
                Some(&tool_schemas),
                ChatOptions {
                    parallel_tool_calls: false,
                    tool_choice: ToolChoice::Auto,
                },
            )
            .await?;

        let mut requested = first.tool_calls.unwrap_or_default().into_iter();
        let Some(tool_call) = requested.next() else {
            return final_text(first.content).map(|response| ChatReply {
                response,
                tool_calls: Vec::new(),
            });
        };

        let dropped = requested.count();
        if dropped > 0 {
            tracing::warn!(
                tool = %tool_call.function.name,
                dropped,
                "Model requested more than one tool; running only the first"
            );
        }

        messages.push(ChatMessage {
            role: Role::Assistant,
            content: first.content,
            tool_calls: Some(vec![tool_call.clone()]),
            tool_call_id: None,
        });

        let invocation = self.execute_tool_call(&tool_call).await;
        messages.push(ChatMessage::tool_result(
            tool_call.id.clone(),
            invocation.output.clone(),
        ));

        let second = self
            .llm
            .chat_completion(
                &self.model,
                &messages,
                Some(&tool_schemas),
                ChatOptions {
                    parallel_tool_calls: false,
                    tool_choice: ToolChoice::None,
                },
            )
            .await?;

        if second.tool_calls.as_ref().is_some_and(|c| !c.is_empty()) {
            tracing::warn!("Model requested a second tool in one turn; ignoring it");
        }

        let response = final_text(second.content)?;
        Ok(ChatReply {
            response,
            tool_calls: vec![invocation],
        })
    }

    /// Execute a single tool call. Failures become text for the model.
    async fn execute_tool_call(&self, tool_call: &ToolCall) -> ToolInvocation {
        let name = tool_call.function.name.clone();
        let arguments: Value =
            serde_json::from_str(&tool_call.function.arguments).unwrap_or(Value::Null);

        tracing::info!(tool = %name, args = %arguments, "Calling tool");

        let output = match self.tools.execute(&name, arguments.clone()).await {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!(tool = %name, error = %e, "Tool call failed");
                format!("Error: {}", e)
            }
        };

        tracing::debug!(tool = %name, result = %truncate_for_log(&output, 1000), "Tool returned");

        ToolInvocation {
            name,
            arguments,
            output,
        }
    }
}

fn final_text(content: Option<String>) -> Result<String, AgentError> {
    content
        .filter(|c| !c.trim().is_empty())
        .ok_or(AgentError::EmptyResponse)
}

/// Truncate a string for logging purposes without splitting a character.
fn truncate_for_log(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut idx = max_len;
    while idx > 0 && !s.is_char_boundary(idx) {
        idx -= 1;
    }
    format!("{}... [truncated]", &s[..idx])
}
