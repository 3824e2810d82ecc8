//! Centralized error types for Skycast.
//!
//! Domain crates keep their own error enums; front ends convert them into
//! `AppError` and show `user_message()` to the user while logging the
//! full error.

use thiserror::Error;

/// Top-level application error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Weather service error: {0}")]
    Weather(#[from] WeatherError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Network(e) => e.user_message(),
            AppError::Database(e) => e.user_message().to_string(),
            AppError::Weather(e) => e.user_message(),
            AppError::Io(_) => "A file operation failed. Please try again.".to_string(),
            AppError::Other(_) => "An unexpected error occurred. Please try again.".to_string(),
        }
    }
}

/// Network-related errors (HTTP, connectivity).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl NetworkError {
    /// Server errors always carry the numeric status so it is visible to the user.
    pub fn user_message(&self) -> String {
        match self {
            NetworkError::ConnectionFailed(_) => {
                "Unable to connect. Check your internet connection.".to_string()
            }
            NetworkError::Timeout => "The request timed out. Please try again.".to_string(),
            NetworkError::ServerError { status, message } if *status >= 500 => format!(
                "The weather service is having issues ({status} {message}). Please try again later."
            ),
            NetworkError::ServerError { status, message } => {
                format!("Request failed with status {status} ({message}).")
            }
            NetworkError::InvalidResponse(_) => {
                "Received an unexpected response. Please try again.".to_string()
            }
        }
    }
}

/// Database/storage errors (SQLite, local state).
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Data corruption detected: {0}")]
    Corruption(String),
}

impl DatabaseError {
    pub fn user_message(&self) -> &'static str {
        match self {
            DatabaseError::QueryFailed(_) => "Saving your search history failed.",
            DatabaseError::Corruption(_) => {
                "Saved searches may be corrupted. Consider clearing the history."
            }
        }
    }
}

/// Weather lookup errors that are not transport failures.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Location not found: {0}")]
    LocationNotFound(String),

    #[error("Invalid search: {0}")]
    InvalidQuery(String),

    #[error("No history entry #{0}")]
    HistoryEntryNotFound(usize),

    #[error("Weather API error: {0}")]
    ApiError(String),
}

impl WeatherError {
    pub fn user_message(&self) -> String {
        match self {
            WeatherError::LocationNotFound(query) => {
                format!("No location found for \"{query}\". Check the spelling and try again.")
            }
            WeatherError::InvalidQuery(_) => "Enter a city name to search.".to_string(),
            WeatherError::HistoryEntryNotFound(n) => format!("There is no saved search #{n}."),
            WeatherError::ApiError(_) => "Weather service error. Please try again.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_message_contains_status() {
        let err = AppError::from(NetworkError::ServerError {
            status: 404,
            message: "Not Found".into(),
        });
        let message = err.user_message();
        assert!(message.contains("404"));
        assert!(message.contains("Not Found"));

        let err = AppError::from(NetworkError::ServerError {
            status: 503,
            message: "Service Unavailable".into(),
        });
        assert!(err.user_message().contains("503"));
    }

    #[test]
    fn test_location_not_found_names_query() {
        let err = AppError::from(WeatherError::LocationNotFound("Atlantis".into()));
        assert!(err.user_message().contains("Atlantis"));
    }

    #[test]
    fn test_user_messages_are_non_empty() {
        let errors = vec![
            AppError::from(NetworkError::Timeout),
            AppError::from(NetworkError::ConnectionFailed("refused".into())),
            AppError::from(NetworkError::InvalidResponse("bad json".into())),
            AppError::from(DatabaseError::QueryFailed("locked".into())),
            AppError::from(WeatherError::HistoryEntryNotFound(3)),
            AppError::from(anyhow::anyhow!("boom")),
        ];

        for err in errors {
            assert!(!err.user_message().is_empty(), "empty message for {err:?}");
        }
    }

    #[test]
    fn test_app_error_conversion() {
        let app_err: AppError = DatabaseError::Corruption("bad page".into()).into();
        assert!(matches!(app_err, AppError::Database(DatabaseError::Corruption(_))));
        assert!(app_err.to_string().contains("bad page"));
    }
}
