//! NASA tools: Astronomy Picture of the Day, Mars rover photos, DONKI.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{opt_str, opt_u32, status_as_text, Tool};
use crate::fetchers::{ApodQuery, MarsPhotoQuery, SpaceApiClient};

/// Structured error value handed to the model for NASA JSON endpoints.
fn nasa_error(status: u16, message: Option<String>) -> String {
    json!({
        "error": message.unwrap_or_else(|| "Unable to fetch data".to_string()),
        "status": status,
    })
    .to_string()
}

/// Astronomy Picture of the Day.
pub struct FetchApod {
    client: Arc<SpaceApiClient>,
}

impl FetchApod {
    pub fn new(client: Arc<SpaceApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for FetchApod {
    fn name(&self) -> &str {
        "fetch_apod_data"
    }

    fn description(&self) -> &str {
        "Fetch Astronomy Picture of the Day data from NASA's API."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "date": {
                    "type": "string",
                    "description": "Date in YYYY-MM-DD format for which to fetch data. Defaults to today."
                },
                "count": {
                    "type": "integer",
                    "description": "Number of random images to fetch."
                },
                "thumbs": {
                    "type": "boolean",
                    "description": "Include thumbnail URLs for video entries (default: false)"
                }
            }
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let query = ApodQuery {
            date: opt_str(&args, "date"),
            count: opt_u32(&args, "count")?,
            thumbs: args["thumbs"].as_bool().unwrap_or(false),
        };

        let result = self.client.fetch_apod(&query).await;
        match status_as_text(result, |status, err| nasa_error(status, err.server_message()))? {
            Ok(payload) => Ok(serde_json::to_string_pretty(&payload)?),
            Err(text) => Ok(text),
        }
    }
}

/// Mars rover photos for one sol.
pub struct FetchMarsRoverPhotos {
    client: Arc<SpaceApiClient>,
}

impl FetchMarsRoverPhotos {
    pub fn new(client: Arc<SpaceApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for FetchMarsRoverPhotos {
    fn name(&self) -> &str {
        "fetch_mars_rover_photos"
    }

    fn description(&self) -> &str {
        "Fetch photos taken by Mars rovers."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "rover_name": {
                    "type": "string",
                    "description": "Name of the Mars rover (curiosity, opportunity, spirit). Defaults to curiosity."
                },
                "sol": {
                    "type": "integer",
                    "description": "Martian sol (day) on which images were taken. Defaults to 1000."
                },
                "camera": {
                    "type": "string",
                    "description": "Camera name (e.g., FHAZ, RHAZ, MAST)."
                },
                "page": {
                    "type": "integer",
                    "description": "Page number of the results. Defaults to 1."
                }
            }
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let defaults = MarsPhotoQuery::default();
        let query = MarsPhotoQuery {
            rover: opt_str(&args, "rover_name")
                .map(|r| r.to_lowercase())
                .unwrap_or(defaults.rover),
            sol: opt_u32(&args, "sol")?.unwrap_or(defaults.sol),
            camera: opt_str(&args, "camera"),
            page: opt_u32(&args, "page")?.unwrap_or(defaults.page),
        };

        let result = self.client.fetch_mars_rover_photos(&query).await;
        match status_as_text(result, |status, err| nasa_error(status, err.server_message()))? {
            Ok(photos) => Ok(serde_json::to_string_pretty(&photos)?),
            Err(text) => Ok(text),
        }
    }
}

/// Recent space weather notifications from DONKI.
pub struct FetchSpaceWeather {
    client: Arc<SpaceApiClient>,
}

impl FetchSpaceWeather {
    pub fn new(client: Arc<SpaceApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for FetchSpaceWeather {
    fn name(&self) -> &str {
        "fetch_space_weather"
    }

    fn description(&self) -> &str {
        "Fetch recent space weather events from NASA's DONKI API."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "event_type": {
                    "type": "string",
                    "description": "Type of space weather event (e.g., FLR, GST, CME). Defaults to FLR."
                }
            }
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let event_type = opt_str(&args, "event_type").unwrap_or_else(|| "FLR".to_string());

        let result = self.client.fetch_space_weather(&event_type).await;
        match status_as_text(result, |status, err| {
            format!(
                "Could not fetch space weather data. Error: {} - {}",
                status,
                err.body()
            )
        })? {
            Ok(report) => Ok(report.to_string()),
            Err(text) => Ok(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nasa_error_carries_status_and_message() {
        let value: Value =
            serde_json::from_str(&nasa_error(429, Some("OVER_RATE_LIMIT".to_string())))
                .expect("json");
        assert_eq!(value, json!({"error": "OVER_RATE_LIMIT", "status": 429}));

        let value: Value = serde_json::from_str(&nasa_error(500, None)).expect("json");
        assert_eq!(value["error"], "Unable to fetch data");
        assert_eq!(value["status"], 500);
    }
}
