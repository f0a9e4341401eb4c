//! Agent module - the tool-calling conversational core.
//!
//! A turn follows a bounded "tool then answer" pattern:
//! 1. Flatten the caller's history and the new query into one prompt
//! 2. Call the LLM with the tool set, parallel tool calls disabled
//! 3. If the LLM requests a tool, run the first request only and feed the result back
//! 4. Ask the LLM for its final answer with tool use switched off

mod agent_loop;
mod prompt;

use thiserror::Error;

use crate::llm::LlmError;

pub use agent_loop::{Agent, ChatReply, ToolInvocation};
pub use prompt::{build_prompt, build_system_prompt};

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Query must be a non-empty string")]
    EmptyQuery,

    #[error("Language model request failed: {0}")]
    Llm(#[from] LlmError),

    #[error("Language model returned an empty response")]
    EmptyResponse,
}
