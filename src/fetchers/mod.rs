//! Read-only clients for the public space-data APIs.
//!
//! Every operation performs exactly one HTTP GET. A non-200 answer is
//! returned as [`FetchError::Status`] so the tool layer can hand it to the
//! model as ordinary text; there is no retry, pagination loop or caching.

mod nasa;
mod open_notify;
mod weather;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::config::SpaceApiConfig;

pub use nasa::{
    ApodEntry, ApodPayload, ApodQuery, MarsCamera, MarsPhoto, MarsPhotoQuery, MarsRover,
    SpaceWeatherEvent, SpaceWeatherReport,
};
pub use open_notify::{Astronaut, Astronauts, IssNow, IssPosition};
pub use weather::{DayConditions, MoonQuery};

#[derive(Debug, Error)]
pub enum FetchError {
    /// Upstream answered with something other than 200.
    #[error("upstream returned HTTP {status}")]
    Status { status: u16, body: String },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected response shape: {0}")]
    Decode(String),

    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

impl FetchError {
    /// Raw response body of an upstream error; empty for other failures.
    pub fn body(&self) -> &str {
        match self {
            FetchError::Status { body, .. } => body,
            _ => "",
        }
    }

    /// Human-readable message supplied by the server, if the body carries one.
    ///
    /// NASA answers with either `{"msg": ...}` or `{"error": {"message": ...}}`.
    pub fn server_message(&self) -> Option<String> {
        let FetchError::Status { body, .. } = self else {
            return None;
        };
        let json: Value = serde_json::from_str(body).ok()?;
        json.get("msg")
            .and_then(Value::as_str)
            .or_else(|| {
                json.get("error")
                    .and_then(|e| e.get("message"))
                    .and_then(Value::as_str)
            })
            .map(str::to_string)
    }
}

/// Shared HTTP client plus endpoint/key configuration.
#[derive(Debug, Clone)]
pub struct SpaceApiClient {
    http: reqwest::Client,
    config: SpaceApiConfig,
}

impl SpaceApiClient {
    pub fn new(config: SpaceApiConfig) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            config,
        })
    }

    /// Issue the single GET and return the body of a 200 response.
    async fn get_text(&self, url: Url, query: &[(&str, String)]) -> Result<String, FetchError> {
        debug!(url = %url, params = query.len(), "Fetching upstream data");

        let response = self.http.get(url).query(query).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            tracing::warn!(status = status.as_u16(), "Upstream returned an error status");
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        let body = self.get_text(url, query).await?;
        decode(&body)
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, FetchError> {
    serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))
}

/// Append percent-encoded path segments to a base URL.
fn endpoint(base: &str, segments: &[&str]) -> Result<Url, FetchError> {
    let mut url = Url::parse(base).map_err(|e| FetchError::InvalidEndpoint(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| FetchError::InvalidEndpoint(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Render a JSON scalar the way it reads in prose: strings unquoted.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
