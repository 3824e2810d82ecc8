//! One Call weather client.

use chrono::Local;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::http::{build_client, check_response, read_json};
use crate::normalize::normalize_report;
use crate::types::{GeoLocation, RawWeather, Units, WeatherError, WeatherReport};

/// Blocks the dashboard never reads
const EXCLUDED_BLOCKS: &str = "minutely,hourly,alerts";

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    endpoint: Url,
    api_key: String,
    units: Units,
}

impl WeatherProvider {
    pub fn new(
        endpoint: Url,
        api_key: impl Into<String>,
        units: Units,
        timeout: Duration,
    ) -> Result<Self, WeatherError> {
        Ok(Self {
            client: Arc::new(build_client(timeout)?),
            endpoint,
            api_key: api_key.into(),
            units,
        })
    }

    pub fn units(&self) -> Units {
        self.units
    }

    /// Fetch the raw One Call payload for `location`.
    pub async fn fetch(&self, location: &GeoLocation) -> Result<RawWeather, WeatherError> {
        tracing::debug!(
            "Fetching weather for {} via {}",
            location.format_coordinates(),
            self.endpoint.path()
        );

        let lat = location.lat.to_string();
        let lon = location.lon.to_string();
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("units", self.units.as_query()),
                ("exclude", EXCLUDED_BLOCKS),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let response = check_response(response).await?;
        read_json(response).await
    }

    /// Fetch and normalize, dating the current snapshot with the local date.
    pub async fn fetch_report(&self, location: &GeoLocation) -> Result<WeatherReport, WeatherError> {
        let raw = self.fetch(location).await?;
        let report = normalize_report(location.clone(), &raw, self.units, Local::now().date_naive())?;
        tracing::info!(
            "Weather for {}: {}{}, {}",
            report.location.display_name(),
            report.current.temp_max,
            self.units.temperature_suffix(),
            report.current.description
        );
        Ok(report)
    }
}
