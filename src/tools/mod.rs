//! Tool system for the agent.
//!
//! Each tool wraps one data fetcher behind a stable name and description.
//! The names and descriptions are what the model selects on, so they are
//! kept word for word.

mod nasa;
mod open_notify;
mod weather;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::fetchers::{FetchError, SpaceApiClient};
use crate::llm::ToolSchema;

pub use nasa::{FetchApod, FetchMarsRoverPhotos, FetchSpaceWeather};
pub use open_notify::{FetchIssLocation, FetchPeopleInSpace};
pub use weather::FetchMoonPhase;

/// A tool the agent may call.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Name the model uses to select this tool.
    fn name(&self) -> &str;

    /// Natural-language description consumed by the model.
    fn description(&self) -> &str;

    /// JSON Schema for the tool's arguments.
    fn parameters_schema(&self) -> Value;

    /// Run the tool. Upstream HTTP errors come back as `Ok` text for the
    /// model; `Err` means the call itself could not complete.
    async fn execute(&self, args: Value) -> anyhow::Result<String>;
}

/// Name and description of a registered tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
}

/// Fixed, ordered set of tools. Built once per agent.
#[derive(Clone)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// The six space-data tools, in advertised order.
    pub fn space(client: SpaceApiClient) -> Self {
        let client = Arc::new(client);
        Self {
            tools: vec![
                Arc::new(FetchApod::new(Arc::clone(&client))),
                Arc::new(FetchMarsRoverPhotos::new(Arc::clone(&client))),
                Arc::new(FetchMoonPhase::new(Arc::clone(&client))),
                Arc::new(FetchIssLocation::new(Arc::clone(&client))),
                Arc::new(FetchPeopleInSpace::new(Arc::clone(&client))),
                Arc::new(FetchSpaceWeather::new(client)),
            ],
        }
    }

    /// Build a registry from arbitrary tools. Names must be unique.
    pub fn from_tools(tools: Vec<Arc<dyn Tool>>) -> anyhow::Result<Self> {
        for (i, tool) in tools.iter().enumerate() {
            if tools[..i].iter().any(|t| t.name() == tool.name()) {
                anyhow::bail!("Duplicate tool name: {}", tool.name());
            }
        }
        Ok(Self { tools })
    }

    pub fn list_tools(&self) -> Vec<ToolInfo> {
        self.tools
            .iter()
            .map(|t| ToolInfo {
                name: t.name().to_string(),
                description: t.description().to_string(),
            })
            .collect()
    }

    pub fn get_tool_schemas(&self) -> Vec<ToolSchema> {
        self.tools
            .iter()
            .map(|t| ToolSchema::function(t.name(), t.description(), t.parameters_schema()))
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Execute a tool by name.
    pub async fn execute(&self, name: &str, args: Value) -> anyhow::Result<String> {
        let tool = self
            .get(name)
            .ok_or_else(|| anyhow::anyhow!("Unknown tool: {}", name))?;
        tool.execute(args).await
    }
}

/// Optional string argument; blank strings count as absent.
fn opt_str(args: &Value, key: &str) -> Option<String> {
    args[key]
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Optional unsigned argument. Models sometimes quote numbers, so numeric
/// strings are accepted too.
fn opt_u32(args: &Value, key: &str) -> anyhow::Result<Option<u32>> {
    match &args[key] {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .map(Some)
            .ok_or_else(|| anyhow::anyhow!("Invalid '{}' argument: {}", key, n)),
        Value::String(s) => s
            .trim()
            .parse::<u32>()
            .map(Some)
            .map_err(|_| anyhow::anyhow!("Invalid '{}' argument: {}", key, s)),
        other => Err(anyhow::anyhow!("Invalid '{}' argument: {}", key, other)),
    }
}

/// Split a fetch outcome into model-facing text or a hard failure.
///
/// `render_status` turns an upstream non-200 into the text the model sees.
fn status_as_text<T>(
    result: Result<T, FetchError>,
    render_status: impl FnOnce(u16, &FetchError) -> String,
) -> anyhow::Result<Result<T, String>> {
    match result {
        Ok(value) => Ok(Ok(value)),
        Err(err) => {
            if let FetchError::Status { status, .. } = err {
                return Ok(Err(render_status(status, &err)));
            }
            Err(err.into())
        }
    }
}
