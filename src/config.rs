//! Configuration management for Space Chat.
//!
//! Configuration can be set via environment variables (a `.env` file in the
//! working directory is loaded first by the binary):
//! - `OPENAI_API_KEY` - Required. Credential for the chat-completions endpoint.
//! - `OPENAI_BASE_URL` - Optional. Defaults to `https://api.openai.com/v1`.
//! - `DEFAULT_MODEL` - Optional. The model used by the agent. Defaults to `gpt-4o`.
//! - `NASA_API_KEY` - Optional. Sent to the NASA endpoints; not validated up front.
//! - `WEATHER_API_KEY` - Optional. Sent to Visual Crossing; not validated up front.
//! - `NASA_API_BASE`, `WEATHER_API_BASE`, `OPEN_NOTIFY_API_BASE` - Optional endpoint overrides.
//! - `HOST` - Optional. Server host. Defaults to `127.0.0.1`.
//! - `PORT` - Optional. Server port. Defaults to `3000`.
//! - `TOOL_TIMEOUT_SECS` - Optional. Per-request timeout for data fetchers. Unset means no timeout.
//! - `SESSION_IDLE_SECS` - Optional. Chat sessions idle this long are discarded. Defaults to `3600`.

use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_NASA_API_BASE: &str = "https://api.nasa.gov";
pub const DEFAULT_WEATHER_API_BASE: &str = "https://weather.visualcrossing.com";
pub const DEFAULT_OPEN_NOTIFY_API_BASE: &str = "http://api.open-notify.org";
pub const DEFAULT_SESSION_IDLE_SECS: u64 = 3600;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Credentials and endpoints for the public space-data APIs.
#[derive(Debug, Clone)]
pub struct SpaceApiConfig {
    /// NASA api.nasa.gov key (APOD, Mars photos, DONKI)
    pub nasa_api_key: Option<String>,

    /// Visual Crossing weather key
    pub weather_api_key: Option<String>,

    pub nasa_base_url: String,
    pub weather_base_url: String,
    pub open_notify_base_url: String,

    /// Request timeout for a single fetch; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl Default for SpaceApiConfig {
    fn default() -> Self {
        Self {
            nasa_api_key: None,
            weather_api_key: None,
            nasa_base_url: DEFAULT_NASA_API_BASE.to_string(),
            weather_base_url: DEFAULT_WEATHER_API_BASE.to_string(),
            open_notify_base_url: DEFAULT_OPEN_NOTIFY_API_BASE.to_string(),
            timeout: None,
        }
    }
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Chat-completions API key
    pub api_key: String,

    /// Chat-completions base URL
    pub llm_base_url: String,

    /// Model identifier used for every turn
    pub default_model: String,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Data-fetcher configuration
    pub space_apis: SpaceApiConfig,

    /// How long a chat session may sit idle before it is discarded
    pub session_idle_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `OPENAI_API_KEY` is not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("OPENAI_API_KEY".to_string()))?;

        let llm_base_url = std::env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string());

        let default_model =
            std::env::var("DEFAULT_MODEL").unwrap_or_else(|_| "gpt-4o".to_string());

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("PORT".to_string(), format!("{}", e)))?;

        let timeout = std::env::var("TOOL_TIMEOUT_SECS")
            .ok()
            .map(|v| {
                v.trim().parse::<u64>().map_err(|e| {
                    ConfigError::InvalidValue("TOOL_TIMEOUT_SECS".to_string(), format!("{}", e))
                })
            })
            .transpose()?
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        let session_idle_secs = std::env::var("SESSION_IDLE_SECS")
            .unwrap_or_else(|_| DEFAULT_SESSION_IDLE_SECS.to_string())
            .trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidValue("SESSION_IDLE_SECS".to_string(), format!("{}", e)))?;
        if session_idle_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "SESSION_IDLE_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        // A missing key surfaces as an upstream auth error at request time.
        let space_apis = SpaceApiConfig {
            nasa_api_key: non_empty_env("NASA_API_KEY"),
            weather_api_key: non_empty_env("WEATHER_API_KEY"),
            nasa_base_url: std::env::var("NASA_API_BASE")
                .unwrap_or_else(|_| DEFAULT_NASA_API_BASE.to_string()),
            weather_base_url: std::env::var("WEATHER_API_BASE")
                .unwrap_or_else(|_| DEFAULT_WEATHER_API_BASE.to_string()),
            open_notify_base_url: std::env::var("OPEN_NOTIFY_API_BASE")
                .unwrap_or_else(|_| DEFAULT_OPEN_NOTIFY_API_BASE.to_string()),
            timeout,
        };

        Ok(Self {
            api_key,
            llm_base_url,
            default_model,
            host,
            port,
            space_apis,
            session_idle_timeout: Duration::from_secs(session_idle_secs),
        })
    }

    /// Create a config with custom values (useful for testing).
    pub fn new(api_key: String, default_model: String) -> Self {
        Self {
            api_key,
            llm_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            default_model,
            host: "127.0.0.1".to_string(),
            port: 3000,
            space_apis: SpaceApiConfig::default(),
            session_idle_timeout: Duration::from_secs(DEFAULT_SESSION_IDLE_SECS),
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
