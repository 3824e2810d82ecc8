use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use skycast_core::Config;
use skycast_ui::terminal::{print_outcome, run_interactive};
use skycast_ui::SearchOutcome;

#[derive(Parser)]
#[command(name = "skycast", version, about = "City weather dashboard with a saved search history")]
struct Cli {
    /// Config file (default: <config dir>/skycast/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Keep the search history in memory only
    #[arg(long)]
    ephemeral: bool,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,

    /// City to look up; starts an interactive prompt when omitted
    city: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let level = if cli.verbose { "debug" } else { config.logging.level.as_str() };
    skycast_core::init(level)?;

    let validation = config.validate();
    for warning in &validation.warnings {
        tracing::warn!("Config warning: {}", warning);
    }
    if !validation.is_valid() {
        anyhow::bail!("Configuration validation failed: {}", validation.error_summary());
    }

    let mut controller = skycast_ui::build_controller(&config, cli.ephemeral)?;
    tracing::info!("Skycast started");

    let mut stdout = std::io::stdout();

    if cli.city.is_empty() {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        run_interactive(&mut controller, stdin, &mut stdout).await?;
        return Ok(ExitCode::SUCCESS);
    }

    let query = cli.city.join(" ");
    match controller.search(&query).await {
        Some(outcome) => {
            print_outcome(&mut stdout, &controller, &outcome)?;
            Ok(match outcome {
                SearchOutcome::Success { .. } => ExitCode::SUCCESS,
                SearchOutcome::Failed { .. } => ExitCode::FAILURE,
            })
        }
        None => {
            eprintln!("error: enter a city name to search");
            Ok(ExitCode::FAILURE)
        }
    }
}
