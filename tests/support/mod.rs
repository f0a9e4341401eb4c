#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use space_chat::config::SpaceApiConfig;
use space_chat::llm::{
    ChatMessage, ChatOptions, ChatResponse, FunctionCall, LlmClient, LlmError, Role, ToolCall,
    ToolSchema,
};
use space_chat::tools::Tool;

/// What the agent sent on one completion request.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub tool_names: Vec<String>,
    pub options: ChatOptions,
}

impl RecordedRequest {
    /// Content of the (single) user message carrying the flattened prompt.
    pub fn user_prompt(&self) -> String {
        self.messages
            .iter()
            .find(|m| m.role == Role::User)
            .and_then(|m| m.content.clone())
            .expect("user prompt")
    }
}

/// LLM stub that replays canned responses in order and records requests.
pub struct ScriptedLlm {
    responses: Mutex<VecDeque<Result<ChatResponse, LlmError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedLlm {
    pub fn new(responses: Vec<ChatResponse>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into_iter().map(Ok).collect()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(error: LlmError) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(VecDeque::from([Err(error)])),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn chat_completion(
        &self,
        model: &str,
        messages: &[ChatMessage],
        tools: Option<&[ToolSchema]>,
        options: ChatOptions,
    ) -> Result<ChatResponse, LlmError> {
        self.requests
            .lock()
            .expect("requests lock")
            .push(RecordedRequest {
                model: model.to_string(),
                messages: messages.to_vec(),
                tool_names: tools
                    .unwrap_or_default()
                    .iter()
                    .map(|t| t.function.name.clone())
                    .collect(),
                options,
            });
        self.responses
            .lock()
            .expect("responses lock")
            .pop_front()
            .unwrap_or_else(|| {
                Err(LlmError::Api {
                    status: 500,
                    message: "script exhausted".to_string(),
                })
            })
    }
}

pub fn text(content: &str) -> ChatResponse {
    ChatResponse {
        content: Some(content.to_string()),
        tool_calls: None,
        finish_reason: Some("stop".to_string()),
    }
}

pub fn tool_call(id: &str, name: &str, arguments: &str) -> ToolCall {
    ToolCall {
        id: id.to_string(),
        call_type: "function".to_string(),
        function: FunctionCall {
            name: name.to_string(),
            arguments: arguments.to_string(),
        },
    }
}

pub fn calls(tool_calls: Vec<ToolCall>) -> ChatResponse {
    ChatResponse {
        content: None,
        tool_calls: Some(tool_calls),
        finish_reason: Some("tool_calls".to_string()),
    }
}

/// Tool that returns a fixed output and counts its invocations.
pub struct RecordingTool {
    name: &'static str,
    output: &'static str,
    calls: Arc<AtomicUsize>,
    args: Arc<Mutex<Vec<Value>>>,
}

impl RecordingTool {
    pub fn new(name: &'static str, output: &'static str) -> Self {
        Self {
            name,
            output,
            calls: Arc::new(AtomicUsize::new(0)),
            args: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    pub fn seen_args(&self) -> Arc<Mutex<Vec<Value>>> {
        Arc::clone(&self.args)
    }
}

#[async_trait]
impl Tool for RecordingTool {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        "Test tool."
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({"type": "object", "properties": {}})
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.args.lock().expect("args lock").push(args);
        Ok(self.output.to_string())
    }
}

/// Point every space API at one mock server.
pub fn mock_apis(base: &str) -> SpaceApiConfig {
    SpaceApiConfig {
        nasa_api_key: Some("nasa-test-key".to_string()),
        weather_api_key: Some("weather-test-key".to_string()),
        nasa_base_url: base.to_string(),
        weather_base_url: base.to_string(),
        open_notify_base_url: base.to_string(),
        timeout: None,
    }
}
