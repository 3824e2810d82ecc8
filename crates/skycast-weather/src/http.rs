// Shared HTTP plumbing for the OpenWeatherMap clients

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use crate::types::WeatherError;

const USER_AGENT: &str = concat!("skycast/", env!("CARGO_PKG_VERSION"));

/// Error body returned by OpenWeatherMap, e.g. `{"cod":401,"message":"Invalid API key"}`
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
}

pub(crate) fn build_client(timeout: Duration) -> Result<Client, WeatherError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| WeatherError::Client(e.to_string()))
}

/// Turn a non-success response into `WeatherError::Http`, preferring the
/// API's own message over the canonical status reason.
pub(crate) async fn check_response(response: Response) -> Result<Response, WeatherError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let reason = serde_json::from_str::<ApiErrorBody>(&body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        });

    tracing::warn!("Request failed with status {}: {}", status.as_u16(), reason);
    Err(WeatherError::Http {
        status: status.as_u16(),
        reason,
    })
}

/// Read the body and decode it; undecodable bodies are malformed responses.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, WeatherError> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| WeatherError::MalformedResponse(e.to_string()))
}
