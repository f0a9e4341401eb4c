//! NASA api.nasa.gov endpoints: APOD, Mars rover photos and DONKI.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{decode, endpoint, FetchError, SpaceApiClient};

/// Parameters for the Astronomy Picture of the Day endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApodQuery {
    /// `YYYY-MM-DD`; today when absent
    pub date: Option<String>,
    /// Number of random images; yields a list
    pub count: Option<u32>,
    pub thumbs: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApodEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hdurl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_version: Option<String>,
    /// Fields this struct does not name, passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// APOD returns one object, or an array when `count` is given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApodPayload {
    Many(Vec<ApodEntry>),
    Single(ApodEntry),
}

/// Parameters for the Mars rover photos endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarsPhotoQuery {
    pub rover: String,
    pub sol: u32,
    pub camera: Option<String>,
    pub page: u32,
}

impl Default for MarsPhotoQuery {
    fn default() -> Self {
        Self {
            rover: "curiosity".to_string(),
            sol: 1000,
            camera: None,
            page: 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarsPhoto {
    pub id: u64,
    pub sol: u32,
    pub camera: MarsCamera,
    pub img_src: String,
    pub earth_date: String,
    pub rover: MarsRover,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarsCamera {
    pub name: String,
    pub full_name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarsRover {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landing_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub launch_date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct MarsPhotosResponse {
    #[serde(default)]
    photos: Vec<MarsPhoto>,
}

/// One DONKI notification. Only the fields the summary needs are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpaceWeatherEvent {
    #[serde(rename = "beginTime", default)]
    pub begin_time: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

/// Recent DONKI events of one type, rendered as a short bulleted summary.
#[derive(Debug, Clone, PartialEq)]
pub struct SpaceWeatherReport {
    pub event_type: String,
    pub events: Vec<SpaceWeatherEvent>,
}

const MAX_REPORTED_EVENTS: usize = 5;

impl fmt::Display for SpaceWeatherReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.events.is_empty() {
            return write!(f, "No recent {} events found.", self.event_type);
        }
        write!(f, "Here are the most recent {} events:", self.event_type)?;
        for event in self.events.iter().take(MAX_REPORTED_EVENTS) {
            write!(
                f,
                "\n- Event started on {}: {}",
                event.begin_time.as_deref().unwrap_or("Unknown start time"),
                event
                    .note
                    .as_deref()
                    .unwrap_or("No additional details available.")
            )?;
        }
        Ok(())
    }
}

impl SpaceApiClient {
    fn nasa_key_param(&self) -> Vec<(&'static str, String)> {
        self.config
            .nasa_api_key
            .clone()
            .map(|key| vec![("api_key", key)])
            .unwrap_or_default()
    }

    /// Astronomy Picture of the Day.
    pub async fn fetch_apod(&self, query: &ApodQuery) -> Result<ApodPayload, FetchError> {
        let url = endpoint(&self.config.nasa_base_url, &["planetary", "apod"])?;

        let mut params = self.nasa_key_param();
        if let Some(date) = &query.date {
            params.push(("date", date.clone()));
        }
        if let Some(count) = query.count {
            params.push(("count", count.to_string()));
        }
        params.push(("thumbs", query.thumbs.to_string()));

        self.get_json(url, &params).await
    }

    /// One page of photos for a rover on a given sol.
    pub async fn fetch_mars_rover_photos(
        &self,
        query: &MarsPhotoQuery,
    ) -> Result<Vec<MarsPhoto>, FetchError> {
        let url = endpoint(
            &self.config.nasa_base_url,
            &["mars-photos", "api", "v1", "rovers", query.rover.as_str(), "photos"],
        )?;

        let mut params = self.nasa_key_param();
        params.push(("sol", query.sol.to_string()));
        if let Some(camera) = &query.camera {
            params.push(("camera", camera.clone()));
        }
        params.push(("page", query.page.to_string()));

        let response: MarsPhotosResponse = self.get_json(url, &params).await?;
        Ok(response.photos)
    }

    /// Recent DONKI notifications of `event_type` (`FLR`, `GST`, `CME`, ...).
    pub async fn fetch_space_weather(
        &self,
        event_type: &str,
    ) -> Result<SpaceWeatherReport, FetchError> {
        let url = endpoint(&self.config.nasa_base_url, &["DONKI", event_type])?;
        let body = self.get_text(url, &self.nasa_key_param()).await?;

        // DONKI answers an empty window with an empty body rather than `[]`.
        let events = if body.trim().is_empty() {
            Vec::new()
        } else {
            decode(&body)?
        };

        Ok(SpaceWeatherReport {
            event_type: event_type.to_string(),
            events,
        })
    }
}
