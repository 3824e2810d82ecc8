//! Weather pipeline for Skycast
//!
//! Geocodes a city name, fetches current conditions and a daily forecast
//! from the OpenWeatherMap One Call API, and normalizes them into
//! display-ready snapshots.

pub mod direction;
pub mod geocode;
mod http;
pub mod normalize;
pub mod provider;
pub mod types;
pub mod uv;

pub use direction::resolve_direction;
pub use geocode::{GeocodingClient, SearchQuery};
pub use normalize::{normalize_current, normalize_forecast, normalize_report, FORECAST_DAYS};
pub use provider::WeatherProvider;
pub use types::*;
pub use uv::{color_for_uv_index, UvSeverity};
