pub mod config;
pub mod error;

pub use config::{Config, HistoryConfig, LoggingConfig, UnitSystem, ValidationResult, WeatherConfig};
pub use error::{AppError, DatabaseError, NetworkError, WeatherError};

use anyhow::Result;

/// Install the global tracing subscriber. Logs go to stderr so they never
/// interleave with the dashboard on stdout. `RUST_LOG` takes precedence
/// over `level`.
pub fn init(level: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    tracing::debug!("Skycast core initialized");
    Ok(())
}
