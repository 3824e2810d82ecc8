//! Builds the search controller and its services from the loaded configuration.

use anyhow::{Context, Result};
use url::Url;

use skycast_core::{Config, UnitSystem};
use skycast_services::{HistoryPolicy, HistoryStore, MemorySlotStorage, SlotStorage, SqliteSlotStorage};
use skycast_weather::{GeocodingClient, Units, WeatherProvider};

use crate::controller::SearchController;
use crate::services::WeatherServices;

pub fn units_for(system: UnitSystem) -> Units {
    match system {
        UnitSystem::Imperial => Units::Imperial,
        UnitSystem::Metric => Units::Metric,
        UnitSystem::Standard => Units::Standard,
    }
}

/// HTTP clients for geocoding and weather lookups
pub fn weather_services(config: &Config) -> Result<WeatherServices> {
    let weather = &config.weather;
    let api_key = weather.api_key.clone().unwrap_or_default();

    let geocode_url = Url::parse(&weather.geocode_url).context("Invalid weather.geocode_url")?;
    let onecall_url = Url::parse(&weather.onecall_url).context("Invalid weather.onecall_url")?;

    let geocoder = GeocodingClient::new(geocode_url, api_key.clone(), weather.timeout())
        .context("Failed to create geocoding client")?
        .with_limit(weather.geocode_limit);
    let provider = WeatherProvider::new(onecall_url, api_key, units_for(weather.units), weather.timeout())
        .context("Failed to create weather client")?;

    Ok(WeatherServices::new(geocoder, provider))
}

/// Search history backed by the SQLite file in the config directory, or by
/// process memory when `ephemeral` is set.
pub fn history_store(config: &Config, ephemeral: bool) -> Result<HistoryStore> {
    let storage: Box<dyn SlotStorage> = if ephemeral {
        tracing::info!("Using in-memory search history");
        Box::new(MemorySlotStorage::new())
    } else {
        let path = config.database_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create data directory")?;
        }
        tracing::info!("Search history at {}", path.display());
        Box::new(SqliteSlotStorage::new(&path).context("Failed to open history database")?)
    };

    let policy = HistoryPolicy {
        max_entries: config.history.max_entries,
    };
    Ok(HistoryStore::new(storage, config.history.slot.clone(), policy))
}

pub fn build_controller(config: &Config, ephemeral: bool) -> Result<SearchController> {
    let services = weather_services(config)?;
    let history = history_store(config, ephemeral)?;
    Ok(SearchController::new(services, history))
}
