use skycast_core::{AppError, NetworkError, WeatherError};
use skycast_weather::WeatherError as LookupError;

pub(super) fn into_app_error(e: LookupError) -> AppError {
    match e {
        LookupError::EmptyQuery => AppError::Weather(WeatherError::InvalidQuery("empty query".into())),
        LookupError::LocationNotFound(query) => AppError::Weather(WeatherError::LocationNotFound(query)),
        LookupError::Http { status, reason } => AppError::Network(NetworkError::ServerError {
            status,
            message: reason,
        }),
        LookupError::Timeout => AppError::Network(NetworkError::Timeout),
        LookupError::Connection(s) => AppError::Network(NetworkError::ConnectionFailed(s)),
        LookupError::MalformedResponse(s) => AppError::Network(NetworkError::InvalidResponse(s)),
        LookupError::Client(s) => AppError::Weather(WeatherError::ApiError(s)),
    }
}
