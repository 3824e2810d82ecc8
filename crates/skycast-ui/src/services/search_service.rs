//! Search backend: geocode, fetch and normalize off the controller task.
//! Results are sent back over an mpsc channel tagged with their generation.

use std::sync::Arc;

use skycast_services::HistoryError;
use skycast_weather::{GeoLocation, GeocodingClient, SearchQuery, WeatherError, WeatherProvider, WeatherReport};
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;

/// Error type for search operations
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error(transparent)]
    Weather(#[from] WeatherError),

    /// Persisting the history failed after a successful lookup
    #[error("History error: {0}")]
    History(#[from] HistoryError),

    /// 0-based index with no history entry behind it
    #[error("No history entry at index {0}")]
    InvalidIndex(usize),
}

/// Shared network clients used by every search
#[derive(Debug, Clone)]
pub struct WeatherServices {
    pub geocoder: Arc<GeocodingClient>,
    pub provider: Arc<WeatherProvider>,
}

impl WeatherServices {
    pub fn new(geocoder: GeocodingClient, provider: WeatherProvider) -> Self {
        Self {
            geocoder: Arc::new(geocoder),
            provider: Arc::new(provider),
        }
    }
}

/// What to look up
#[derive(Debug, Clone)]
pub enum SearchRequest {
    /// Free-text city; geocoded first
    City(SearchQuery),
    /// Stored history entry; geocoding is skipped
    Saved(GeoLocation),
}

/// Messages sent from search tasks back to the controller
#[derive(Debug)]
pub enum SearchServiceMessage {
    Done {
        generation: u64,
        result: Result<WeatherReport, SearchError>,
    },
}

/// Geocode (when needed), fetch and normalize.
pub async fn run_search(
    services: &WeatherServices,
    request: SearchRequest,
) -> Result<WeatherReport, WeatherError> {
    let location = match request {
        SearchRequest::City(query) => services.geocoder.geocode(&query).await?,
        SearchRequest::Saved(location) => location,
    };
    services.provider.fetch_report(&location).await
}

/// Spawn a search. Sends `Done` on the channel when complete; a cancelled
/// search sends nothing.
pub fn request_search(
    tx: &UnboundedSender<SearchServiceMessage>,
    services: WeatherServices,
    request: SearchRequest,
    generation: u64,
    token: CancellationToken,
) {
    let tx = tx.clone();

    tokio::spawn(async move {
        tokio::select! {
            _ = token.cancelled() => {
                tracing::debug!("Search {} cancelled", generation);
            }
            result = run_search(&services, request) => {
                let _ = tx.send(SearchServiceMessage::Done {
                    generation,
                    result: result.map_err(SearchError::from),
                });
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_error_display() {
        let err = SearchError::from(WeatherError::Timeout);
        assert_eq!(err.to_string(), "Request timed out");
        assert!(SearchError::InvalidIndex(4).to_string().contains('4'));
    }
}
