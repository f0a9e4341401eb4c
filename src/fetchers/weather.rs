//! Visual Crossing timeline endpoint: moon phase plus the day's weather.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use super::{display_value, endpoint, FetchError, SpaceApiClient};

/// Location and date for the moon/weather lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoonQuery {
    /// `City,State` or `lat,lon`
    pub location: String,
    /// `YYYY-MM-DD` or a Visual Crossing keyword such as `today`
    pub date: String,
}

impl Default for MoonQuery {
    fn default() -> Self {
        Self {
            location: "Santa Clara,CA".to_string(),
            date: "today".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TimelineResponse {
    #[serde(default)]
    days: Vec<DayConditions>,
}

/// The first day of a timeline response.
///
/// Fields stay as raw JSON so the summary can print exactly what the API sent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DayConditions {
    #[serde(default)]
    pub moonphase: Option<Value>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub temp: Option<Value>,
    #[serde(default)]
    pub feelslike: Option<Value>,
    #[serde(default)]
    pub humidity: Option<Value>,
}

impl DayConditions {
    /// Illumination as a percentage. Only a fractional JSON number is
    /// converted; anything else (integers included) reads as `Unknown`.
    pub fn moon_phase_percentage(&self) -> String {
        match &self.moonphase {
            Some(Value::Number(n)) if n.is_f64() => match n.as_f64() {
                Some(phase) => format!("{:.1}%", phase * 100.0),
                None => "Unknown".to_string(),
            },
            _ => "Unknown".to_string(),
        }
    }
}

fn or_na(value: &Option<Value>) -> String {
    value
        .as_ref()
        .filter(|v| !v.is_null())
        .map(display_value)
        .unwrap_or_else(|| "N/A".to_string())
}

impl fmt::Display for DayConditions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Moon Phase: {}\nWeather: {}\nTemperature: {}°C (Feels like {}°C)\nHumidity: {}%",
            self.moon_phase_percentage(),
            self.description
                .as_deref()
                .unwrap_or("No weather description available"),
            or_na(&self.temp),
            or_na(&self.feelslike),
            or_na(&self.humidity),
        )
    }
}

impl SpaceApiClient {
    /// Moon phase and weather for one location and date.
    pub async fn fetch_moon_phase_and_weather(
        &self,
        query: &MoonQuery,
    ) -> Result<DayConditions, FetchError> {
        let url = endpoint(
            &self.config.weather_base_url,
            &[
                "VisualCrossingWebServices",
                "rest",
                "services",
                "timeline",
                query.location.as_str(),
                query.date.as_str(),
            ],
        )?;

        let mut params = Vec::new();
        if let Some(key) = &self.config.weather_api_key {
            params.push(("key", key.clone()));
        }
        params.push(("include", "days".to_string()));

        let timeline: TimelineResponse = self.get_json(url, &params).await?;
        timeline
            .days
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::Decode("timeline contained no days".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn day(value: serde_json::Value) -> DayConditions {
        serde_json::from_value(value).expect("day conditions")
    }

    #[test]
    fn half_moon_is_fifty_percent() {
        let conditions = day(json!({"moonphase": 0.5}));
        assert_eq!(conditions.moon_phase_percentage(), "50.0%");
    }

    #[test]
    fn non_fractional_phase_is_unknown() {
        assert_eq!(
            day(json!({"moonphase": "waxing"})).moon_phase_percentage(),
            "Unknown"
        );
        assert_eq!(day(json!({"moonphase": 0})).moon_phase_percentage(), "Unknown");
        assert_eq!(day(json!({})).moon_phase_percentage(), "Unknown");
    }

    #[test]
    fn full_summary_template() {
        let conditions = day(json!({
            "moonphase": 0.25,
            "description": "Clear conditions throughout the day.",
            "temp": 18.4,
            "feelslike": 18.0,
            "humidity": 61.2
        }));
        assert_eq!(
            conditions.to_string(),
            "Moon Phase: 25.0%\nWeather: Clear conditions throughout the day.\nTemperature: 18.4°C (Feels like 18.0°C)\nHumidity: 61.2%"
        );
    }

    #[test]
    fn missing_fields_fall_back() {
        assert_eq!(
            day(json!({"moonphase": "n/a"})).to_string(),
            "Moon Phase: Unknown\nWeather: No weather description available\nTemperature: N/A°C (Feels like N/A°C)\nHumidity: N/A%"
        );
    }
}
