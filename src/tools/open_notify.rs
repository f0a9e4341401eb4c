//! ISS position and crew tools (no credentials needed).

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{status_as_text, Tool};
use crate::fetchers::SpaceApiClient;

pub struct FetchIssLocation {
    client: Arc<SpaceApiClient>,
}

impl FetchIssLocation {
    pub fn new(client: Arc<SpaceApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for FetchIssLocation {
    fn name(&self) -> &str {
        "fetch_iss_location"
    }

    fn description(&self) -> &str {
        "Fetch the current location of the International Space Station (ISS)."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(&self, _args: Value) -> anyhow::Result<String> {
        let result = self.client.fetch_iss_location().await;
        match status_as_text(result, |status, _| {
            format!("Could not fetch ISS location. Error: {}", status)
        })? {
            Ok(now) => Ok(now.to_string()),
            Err(text) => Ok(text),
        }
    }
}

pub struct FetchPeopleInSpace {
    client: Arc<SpaceApiClient>,
}

impl FetchPeopleInSpace {
    pub fn new(client: Arc<SpaceApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for FetchPeopleInSpace {
    fn name(&self) -> &str {
        "fetch_people_in_space"
    }

    fn description(&self) -> &str {
        "Fetch the list of people currently in space and their respective spacecraft."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(&self, _args: Value) -> anyhow::Result<String> {
        let result = self.client.fetch_people_in_space().await;
        match status_as_text(result, |status, _| {
            format!(
                "Could not fetch data about people in space. Error: {}",
                status
            )
        })? {
            Ok(crew) => Ok(crew.to_string()),
            Err(text) => Ok(text),
        }
    }
}
