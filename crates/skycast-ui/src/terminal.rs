//! Plain-text front end: formats view-models and runs the interactive prompt.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::commands::{Command, HELP};
use crate::controller::{SearchController, SearchOutcome, SearchPhase};
use crate::render::{DashboardViewModel, HistoryButton, WeatherCard};

pub fn format_card(card: &WeatherCard) -> String {
    format!(
        "{} {}\n  {}\n  {}\n  {}\n  {}\n  UV Index: {} ({}, {})",
        card.day_of_week,
        card.date,
        card.description,
        card.temperature,
        card.wind,
        card.humidity,
        card.uv_index,
        card.uv_severity.label(),
        card.uv_color,
    )
}

pub fn format_dashboard(view: &DashboardViewModel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", view.location_label);
    let _ = writeln!(out, "{}", "=".repeat(view.location_label.chars().count()));
    let _ = writeln!(out, "{}", format_card(&view.current));

    if !view.forecast.is_empty() {
        let _ = writeln!(out, "\n{}-Day Forecast", view.forecast.len());
        for card in &view.forecast {
            let _ = writeln!(out, "{}", format_card(card));
        }
    }
    out
}

/// Numbered list, 1-based to match `/N`
pub fn format_history(buttons: &[HistoryButton]) -> String {
    if buttons.is_empty() {
        return "No saved searches.".to_string();
    }
    buttons
        .iter()
        .enumerate()
        .map(|(i, b)| format!("{:>3}. {}", i + 1, b.label))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Print the result of a finished search.
pub fn print_outcome<W: Write>(
    out: &mut W,
    controller: &SearchController,
    outcome: &SearchOutcome,
) -> Result<()> {
    match outcome {
        SearchOutcome::Success { .. } => {
            if let Some(view) = controller.dashboard() {
                write!(out, "{}", format_dashboard(view))?;
            }
            // A success can still carry a history persistence warning
            if let Some(message) = controller.error_message() {
                writeln!(out, "warning: {message}")?;
            }
        }
        SearchOutcome::Failed { message } => writeln!(out, "error: {message}")?,
    }
    Ok(())
}

/// Shown while a search is in flight
pub const LOADING_MESSAGE: &str = "Searching...";

/// Wait for search `generation`, showing the loading line while it runs.
async fn finish_search<W: Write>(
    controller: &mut SearchController,
    generation: u64,
    out: &mut W,
) -> Result<()> {
    if controller.phase() == SearchPhase::Loading {
        writeln!(out, "{LOADING_MESSAGE}")?;
        out.flush()?;
    }
    if let Some(outcome) = controller.wait_for(generation).await {
        print_outcome(out, controller, &outcome)?;
    }
    Ok(())
}

/// Run the interactive prompt until `/quit` or end of input.
pub async fn run_interactive<R, W>(controller: &mut SearchController, input: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    writeln!(out, "{HELP}")?;

    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match Command::parse(&line) {
            Command::Empty => {}
            Command::Quit => break,
            Command::Help => writeln!(out, "{HELP}")?,
            Command::History => writeln!(out, "{}", format_history(controller.history_buttons()))?,
            Command::Unknown(text) => writeln!(out, "Unknown command: {text} (try /help)")?,
            Command::Search(text) => {
                if let Some(generation) = controller.submit(&text) {
                    finish_search(controller, generation, out).await?;
                }
            }
            Command::Select(index) => match controller.select_history(index) {
                Some(generation) => finish_search(controller, generation, out).await?,
                None => {
                    if let Some(message) = controller.error_message() {
                        writeln!(out, "error: {message}")?;
                    }
                }
            },
            Command::Clear => {
                let count = controller.history().len();
                if count == 0 {
                    writeln!(out, "No saved searches.")?;
                    continue;
                }

                controller.request_clear_history();
                write!(out, "Clear {count} saved searches? [y/N] ")?;
                out.flush()?;

                let answer = lines.next_line().await?.unwrap_or_default();
                if matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
                    if controller.confirm_clear_history() {
                        writeln!(out, "Search history cleared.")?;
                    } else if let Some(message) = controller.error_message() {
                        writeln!(out, "error: {message}")?;
                    }
                } else {
                    controller.cancel_clear_history();
                    writeln!(out, "Kept search history.")?;
                }
            }
        }
    }

    Ok(())
}
