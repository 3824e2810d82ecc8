//! Skycast front end: search controller, dashboard view-models and the
//! terminal interface.

pub mod app_services;
pub mod commands;
pub mod controller;
mod error_mapping;
pub mod render;
pub mod services;
pub mod terminal;

pub use app_services::build_controller;
pub use commands::Command;
pub use controller::{SearchController, SearchOutcome, SearchPhase};
pub use render::{history_buttons, render_dashboard, DashboardViewModel, HistoryButton, WeatherCard};
pub use services::{SearchError, WeatherServices};
