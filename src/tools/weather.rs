//! Moon phase and local weather tool.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{opt_str, status_as_text, Tool};
use crate::fetchers::{MoonQuery, SpaceApiClient};

pub struct FetchMoonPhase {
    client: Arc<SpaceApiClient>,
}

impl FetchMoonPhase {
    pub fn new(client: Arc<SpaceApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for FetchMoonPhase {
    fn name(&self) -> &str {
        "fetch_moon_phase"
    }

    fn description(&self) -> &str {
        "Fetch the current moon phase, illumination, and weather details for a specific location."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "location": {
                    "type": "string",
                    "description": "Location in \"City,State\" or latitude,longitude format. Defaults to Santa Clara,CA."
                },
                "date": {
                    "type": "string",
                    "description": "Date for weather and moon phase data (e.g., \"2023-01-22\" or \"today\")."
                }
            }
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let defaults = MoonQuery::default();
        let query = MoonQuery {
            location: opt_str(&args, "location").unwrap_or(defaults.location),
            date: opt_str(&args, "date").unwrap_or(defaults.date),
        };

        let result = self.client.fetch_moon_phase_and_weather(&query).await;
        match status_as_text(result, |status, err| {
            format!("Could not fetch data. Error: {} - {}", status, err.body())
        })? {
            Ok(conditions) => Ok(conditions.to_string()),
            Err(text) => Ok(text),
        }
    }
}
