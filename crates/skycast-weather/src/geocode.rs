//! Forward geocoding: city name to coordinates.
//! Uses the OpenWeatherMap direct geocoding endpoint.

use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::http::{build_client, check_response, read_json};
use crate::types::{GeoLocation, WeatherError};

/// Largest `limit` the geocoding API accepts
pub const MAX_GEOCODE_LIMIT: u8 = 5;

/// A normalized, non-empty city query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Trim and collapse runs of whitespace. Blank input is rejected.
    pub fn parse(raw: &str) -> Result<Self, WeatherError> {
        let normalized = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        if normalized.is_empty() {
            return Err(WeatherError::EmptyQuery);
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One element of the geocoding response array
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodingCandidate {
    #[serde(default)]
    pub name: Option<String>,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

impl GeocodingCandidate {
    fn into_location(self, query: &SearchQuery) -> GeoLocation {
        let city = self
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| query.as_str().to_string());
        GeoLocation::new(self.lat, self.lon, city, self.country.unwrap_or_default())
            .with_state(self.state.unwrap_or_default())
    }
}

/// Geocoding API client
#[derive(Debug, Clone)]
pub struct GeocodingClient {
    client: Arc<Client>,
    endpoint: Url,
    api_key: String,
    limit: u8,
}

impl GeocodingClient {
    pub fn new(endpoint: Url, api_key: impl Into<String>, timeout: Duration) -> Result<Self, WeatherError> {
        Ok(Self {
            client: Arc::new(build_client(timeout)?),
            endpoint,
            api_key: api_key.into(),
            limit: 1,
        })
    }

    /// Number of candidates requested, clamped to `1..=5`.
    #[must_use]
    pub fn with_limit(mut self, limit: u8) -> Self {
        self.limit = limit.clamp(1, MAX_GEOCODE_LIMIT);
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Resolve `query` to the first matching location.
    pub async fn geocode(&self, query: &SearchQuery) -> Result<GeoLocation, WeatherError> {
        tracing::debug!("Geocoding '{}' via {}", query, self.endpoint.path());

        let limit = self.limit.to_string();
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[
                ("q", query.as_str()),
                ("limit", limit.as_str()),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let response = check_response(response).await?;
        let candidates: Vec<GeocodingCandidate> = read_json(response).await?;

        let location = candidates
            .into_iter()
            .next()
            .map(|c| c.into_location(query))
            .ok_or_else(|| WeatherError::LocationNotFound(query.to_string()))?;

        tracing::info!(
            "Geocoded '{}' to {} ({})",
            query,
            location.display_name(),
            location.format_coordinates()
        );
        Ok(location)
    }
}
