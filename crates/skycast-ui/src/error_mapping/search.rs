use crate::services::SearchError;
use skycast_core::{AppError, WeatherError};

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::Weather(e) => super::weather::into_app_error(e),
            SearchError::History(e) => super::history::into_app_error(e),
            SearchError::InvalidIndex(index) => {
                AppError::Weather(WeatherError::HistoryEntryNotFound(index + 1))
            }
        }
    }
}
