use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// Location to ask the provider about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationQuery {
    pub country: String,
    pub region: String,
}

impl LocationQuery {
    pub fn new(country: impl Into<String>, region: impl Into<String>) -> Self {
        Self { country: country.into(), region: region.into() }
    }
}

/// Full payload of the `current` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherResponse {
    pub request: Request,
    pub location: Location,
    pub current: Current,
}

/// Query parameters as echoed back by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Request {
    #[serde(rename = "type")]
    pub kind: String,
    pub query: String,
    pub language: String,
    pub unit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub name: String,
    pub country: String,
    pub region: String,
    /// Coordinates stay textual, exactly as the API sends them.
    pub lat: String,
    pub lon: String,
    pub timezone_id: String,
    pub localtime: String,
    pub localtime_epoch: i64,
    pub utc_offset: String,
}

impl Location {
    /// `localtime_epoch` as a UTC instant. `None` when the epoch is absent.
    pub fn local_timestamp(&self) -> Option<DateTime<Utc>> {
        if self.localtime_epoch == 0 {
            return None;
        }
        DateTime::from_timestamp(self.localtime_epoch, 0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Current {
    pub observation_time: String,
    pub temperature: i32,
    pub weather_code: i32,
    pub weather_icons: Vec<String>,
    pub weather_descriptions: Vec<String>,
    pub astro: Astro,
    pub wind_speed: i32,
    pub wind_degree: i32,
    pub wind_dir: String,
    pub pressure: i32,
    pub precip: f64,
    pub humidity: i32,
    pub cloudcover: i32,
    pub feelslike: i32,
    pub uv_index: i32,
    pub visibility: i32,
    pub is_day: String,
}

impl Current {
    pub fn primary_description(&self) -> Result<&str, DataError> {
        first_entry(&self.weather_descriptions, "weather_descriptions")
    }

    pub fn primary_icon(&self) -> Result<&str, DataError> {
        first_entry(&self.weather_icons, "weather_icons")
    }
}

fn first_entry<'a>(list: &'a [String], field: &'static str) -> Result<&'a str, DataError> {
    list.first().map(String::as_str).ok_or(DataError::EmptyList { field })
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Astro {
    pub sunrise: String,
    pub sunset: String,
    pub moonrise: String,
    pub moonset: String,
    pub moon_phase: String,
    /// Percent, 0..=100.
    pub moon_illumination: i32,
}
