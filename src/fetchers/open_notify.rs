//! Open Notify endpoints (unauthenticated): ISS position and crew in space.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use super::{display_value, endpoint, FetchError, SpaceApiClient};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IssNow {
    pub timestamp: Value,
    pub iss_position: IssPosition,
}

/// Coordinates arrive as decimal strings; kept verbatim.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IssPosition {
    pub latitude: Value,
    pub longitude: Value,
}

impl fmt::Display for IssNow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "The ISS is currently at latitude {} and longitude {} (timestamp: {}).",
            display_value(&self.iss_position.latitude),
            display_value(&self.iss_position.longitude),
            display_value(&self.timestamp),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Astronauts {
    pub number: Value,
    pub people: Vec<Astronaut>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Astronaut {
    pub name: String,
    pub craft: String,
}

impl fmt::Display for Astronauts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let people = self
            .people
            .iter()
            .map(|p| format!("{} ({})", p.name, p.craft))
            .collect::<Vec<_>>()
            .join(", ");
        write!(
            f,
            "There are currently {} people in space: {}.",
            display_value(&self.number),
            people
        )
    }
}

impl SpaceApiClient {
    pub async fn fetch_iss_location(&self) -> Result<IssNow, FetchError> {
        let url = endpoint(&self.config.open_notify_base_url, &["iss-now.json"])?;
        self.get_json(url, &[]).await
    }

    pub async fn fetch_people_in_space(&self) -> Result<Astronauts, FetchError> {
        let url = endpoint(&self.config.open_notify_base_url, &["astros.json"])?;
        self.get_json(url, &[]).await
    }
}
