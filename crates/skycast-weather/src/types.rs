use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::direction::resolve_direction;
use crate::uv::UvSeverity;

/// Measurement system requested from the weather API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Imperial,
    Metric,
    Standard,
}

impl Units {
    /// Value of the `units` query parameter
    pub fn as_query(&self) -> &'static str {
        match self {
            Self::Imperial => "imperial",
            Self::Metric => "metric",
            Self::Standard => "standard",
        }
    }

    pub fn temperature_suffix(&self) -> &'static str {
        match self {
            Self::Imperial => "°F",
            Self::Metric => "°C",
            Self::Standard => "K",
        }
    }

    pub fn speed_suffix(&self) -> &'static str {
        match self {
            Self::Imperial => "MPH",
            Self::Metric | Self::Standard => "m/s",
        }
    }
}

/// Geographic location resolved from a city search.
///
/// Two locations refer to the same place when their coordinates are exactly
/// equal; the name fields are informational only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub state: String,
}

impl GeoLocation {
    pub fn new(lat: f64, lon: f64, city: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            lat,
            lon,
            city: city.into(),
            country: country.into(),
            state: String::new(),
        }
    }

    #[must_use]
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = state.into();
        self
    }

    /// Exact `(lat, lon)` comparison with no tolerance.
    #[allow(clippy::float_cmp)]
    pub fn same_coordinates(&self, other: &GeoLocation) -> bool {
        self.lat == other.lat && self.lon == other.lon
    }

    /// Human-readable place name, e.g. "San Diego, California, US".
    /// Falls back to coordinates when every name field is empty.
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [&self.city, &self.state, &self.country]
            .into_iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect();

        if parts.is_empty() {
            self.format_coordinates()
        } else {
            parts.join(", ")
        }
    }

    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.lat, self.lon)
    }
}

/// One normalized weather record: current conditions or one forecast day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub date: NaiveDate,
    pub icon_code: String,
    pub description: String,
    pub temp_max: i64,
    pub wind_speed: i64,
    /// Wind bearing in degrees (0-360, where 0/360 is North)
    pub wind_degrees: u16,
    /// Relative humidity in percent
    pub humidity: u8,
    pub uv_index: f64,
}

impl WeatherSnapshot {
    /// Compass label for the wind bearing
    pub fn wind_direction(&self) -> &'static str {
        resolve_direction(f64::from(self.wind_degrees))
    }

    pub fn uv_severity(&self) -> UvSeverity {
        UvSeverity::from_index(self.uv_index)
    }
}

/// Current conditions plus the daily forecast for one location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location: GeoLocation,
    pub current: WeatherSnapshot,
    pub forecast: Vec<WeatherSnapshot>,
    pub units: Units,
    pub fetched_at: DateTime<Utc>,
}

/// One Call API response. Only the blocks the dashboard needs are modeled;
/// both are optional so that a missing block is reported by the normalizer.
#[derive(Debug, Clone, Deserialize)]
pub struct RawWeather {
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub current: Option<RawCurrent>,
    #[serde(default)]
    pub daily: Option<Vec<RawDaily>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCurrent {
    #[serde(default)]
    pub dt: i64,
    pub temp: f64,
    pub wind_speed: f64,
    pub wind_deg: u16,
    pub humidity: u8,
    pub uvi: f64,
    #[serde(default)]
    pub weather: Vec<RawCondition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawDaily {
    #[serde(default)]
    pub dt: i64,
    pub temp: RawDailyTemp,
    pub wind_speed: f64,
    pub wind_deg: u16,
    pub humidity: u8,
    pub uvi: f64,
    #[serde(default)]
    pub weather: Vec<RawCondition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawDailyTemp {
    pub day: f64,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCondition {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub main: String,
    pub description: String,
    pub icon: String,
}

/// Weather pipeline errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Search query is empty")]
    EmptyQuery,
    #[error("Location not found: {0}")]
    LocationNotFound(String),
    #[error("HTTP {status}: {reason}")]
    Http { status: u16, reason: String },
    #[error("Request timed out")]
    Timeout,
    #[error("Connection failed: {0}")]
    Connection(String),
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    #[error("HTTP client error: {0}")]
    Client(String),
}

impl WeatherError {
    /// Map a reqwest failure onto the transport variants.
    pub fn from_reqwest(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else if error.is_decode() {
            Self::MalformedResponse(error.to_string())
        } else if let Some(status) = error.status() {
            Self::Http {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown error").to_string(),
            }
        } else if error.is_builder() {
            Self::Client(error.to_string())
        } else {
            Self::Connection(error.to_string())
        }
    }

    /// Whether the failure happened while talking to the remote service.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Http { .. } | Self::Timeout | Self::Connection(_)
        )
    }

    /// HTTP status code, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for WeatherError {
    fn from(error: reqwest::Error) -> Self {
        Self::from_reqwest(error)
    }
}
