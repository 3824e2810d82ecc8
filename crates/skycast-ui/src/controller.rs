//! Search controller: owns the history and the displayed state, and drives
//! one search at a time through the search service.
//!
//! Every search gets a generation number. Starting a new search cancels the
//! previous one, and any result carrying an older generation is dropped, so
//! a slow response can never overwrite a newer one.

use skycast_core::AppError;
use skycast_services::{ClearConfirmation, HistoryStore};
use skycast_weather::{GeoLocation, SearchQuery, WeatherError};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::render::{history_buttons, render_dashboard, DashboardViewModel, HistoryButton};
use crate::services::{request_search, SearchError, SearchRequest, SearchServiceMessage, WeatherServices};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    Loading,
}

/// How a finished search ended
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Success {
        location: GeoLocation,
        /// False when the location was already in the history
        added_to_history: bool,
    },
    Failed {
        message: String,
    },
}

impl SearchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

pub struct SearchController {
    services: WeatherServices,
    history: HistoryStore,
    tx: mpsc::UnboundedSender<SearchServiceMessage>,
    rx: mpsc::UnboundedReceiver<SearchServiceMessage>,
    generation: u64,
    in_flight: Option<CancellationToken>,
    phase: SearchPhase,
    dashboard: Option<DashboardViewModel>,
    buttons: Vec<HistoryButton>,
    error_message: Option<String>,
    pending_clear: Option<ClearConfirmation>,
}

impl SearchController {
    pub fn new(services: WeatherServices, history: HistoryStore) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let buttons = history_buttons(history.entries());
        Self {
            services,
            history,
            tx,
            rx,
            generation: 0,
            in_flight: None,
            phase: SearchPhase::Idle,
            dashboard: None,
            buttons,
            error_message: None,
            pending_clear: None,
        }
    }

    /// Start a search for free-text input. Blank input is ignored: no state
    /// change and no request. Returns the generation of the new search.
    pub fn submit(&mut self, raw: &str) -> Option<u64> {
        match SearchQuery::parse(raw) {
            Ok(query) => Some(self.start(SearchRequest::City(query))),
            Err(WeatherError::EmptyQuery) => None,
            Err(e) => {
                self.show_error(SearchError::from(e));
                None
            }
        }
    }

    /// Re-query the history entry at `index` (0-based) with its stored
    /// coordinates, skipping geocoding.
    pub fn select_history(&mut self, index: usize) -> Option<u64> {
        match self.history.get(index).cloned() {
            Some(location) => Some(self.start(SearchRequest::Saved(location))),
            None => {
                self.show_error(SearchError::InvalidIndex(index));
                None
            }
        }
    }

    fn start(&mut self, request: SearchRequest) -> u64 {
        if let Some(token) = self.in_flight.take() {
            tracing::debug!("Cancelling search {}", self.generation);
            token.cancel();
        }

        self.generation += 1;
        let token = CancellationToken::new();
        self.in_flight = Some(token.clone());
        self.phase = SearchPhase::Loading;
        self.error_message = None;

        tracing::info!("Search {} started: {:?}", self.generation, request);
        request_search(&self.tx, self.services.clone(), request, self.generation, token);
        self.generation
    }

    /// Apply a message from a search task. Stale generations are ignored and
    /// yield `None`.
    pub fn apply(&mut self, message: SearchServiceMessage) -> Option<SearchOutcome> {
        let SearchServiceMessage::Done { generation, result } = message;

        if generation != self.generation {
            tracing::debug!("Dropping stale result for search {}", generation);
            return None;
        }

        self.phase = SearchPhase::Idle;
        self.in_flight = None;

        let outcome = match result {
            Ok(report) => {
                self.dashboard = Some(render_dashboard(&report));
                let location = report.location;

                let added_to_history = match self.history.add_if_new(location.clone()) {
                    Ok(added) => added,
                    Err(e) => {
                        // Dashboard stays and the in-memory entry is kept
                        self.show_error(SearchError::from(e));
                        true
                    }
                };
                self.buttons = history_buttons(self.history.entries());

                SearchOutcome::Success {
                    location,
                    added_to_history,
                }
            }
            Err(e) => {
                let message = self.show_error(e);
                SearchOutcome::Failed { message }
            }
        };

        Some(outcome)
    }

    /// Apply every message already waiting on the channel.
    pub fn poll(&mut self) -> Vec<SearchOutcome> {
        let mut outcomes = Vec::new();
        while let Ok(message) = self.rx.try_recv() {
            outcomes.extend(self.apply(message));
        }
        outcomes
    }

    /// Wait until search `generation` finishes. Returns `None` if it is not
    /// (or stops being) the current search.
    pub async fn wait_for(&mut self, generation: u64) -> Option<SearchOutcome> {
        while generation == self.generation && self.phase == SearchPhase::Loading {
            let message = self.rx.recv().await?;
            if let Some(outcome) = self.apply(message) {
                return Some(outcome);
            }
        }
        None
    }

    /// Submit and wait for the outcome.
    pub async fn search(&mut self, raw: &str) -> Option<SearchOutcome> {
        let generation = self.submit(raw)?;
        self.wait_for(generation).await
    }

    /// Select a history entry and wait for the outcome.
    pub async fn search_history(&mut self, index: usize) -> Option<SearchOutcome> {
        let generation = self.select_history(index)?;
        self.wait_for(generation).await
    }

    /// First step of clearing the history; nothing is removed until
    /// [`confirm_clear_history`](Self::confirm_clear_history).
    pub fn request_clear_history(&mut self) {
        self.pending_clear = Some(self.history.prepare_clear());
    }

    /// Clear the history if a clear was requested. Returns whether it was cleared.
    pub fn confirm_clear_history(&mut self) -> bool {
        let Some(confirmation) = self.pending_clear.take() else {
            return false;
        };

        let result = self.history.clear(confirmation);
        self.buttons = history_buttons(self.history.entries());

        match result {
            Ok(()) => true,
            Err(e) => {
                self.show_error(SearchError::from(e));
                false
            }
        }
    }

    pub fn cancel_clear_history(&mut self) {
        self.pending_clear = None;
    }

    fn show_error(&mut self, error: SearchError) -> String {
        tracing::warn!("Search failed: {}", error);
        let message = AppError::from(error).user_message();
        self.error_message = Some(message.clone());
        message
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The dashboard from the last successful search. Kept when a later search fails.
    pub fn dashboard(&self) -> Option<&DashboardViewModel> {
        self.dashboard.as_ref()
    }

    pub fn history_buttons(&self) -> &[HistoryButton] {
        &self.buttons
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn is_clear_pending(&self) -> bool {
        self.pending_clear.is_some()
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }
}

impl std::fmt::Debug for SearchController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchController")
            .field("generation", &self.generation)
            .field("phase", &self.phase)
            .field("history", &self.history)
            .field("error_message", &self.error_message)
            .finish()
    }
}
