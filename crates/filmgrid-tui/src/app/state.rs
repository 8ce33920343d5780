//! Application state: the search bundle plus presentation-only state.

use std::time::Instant;

use filmgrid_api::tmdb::MovieSummary;

use crate::grid::GridState;
use crate::notify::Toasts;
use crate::pagination::{DEFAULT_MARGIN, DEFAULT_PAGE_RANGE};
use crate::search::{Effect, FetchTicket, SearchEvent, SearchState};

/// Which widget receives typed keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Typing into the search box.
    Query,
    /// Moving around the result grid.
    Browse,
}

/// What the event loop should do after a key press.
#[derive(Debug)]
pub enum KeyAction {
    /// Nothing beyond the state already updated.
    None,
    /// Leave the application.
    Quit,
    /// Feed an event to the search controller.
    Search(SearchEvent),
    /// Open a URL in the system browser.
    Open(String),
}

/// State for the search TUI.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct AppState {
    /// Search bundle, changed only through [`AppState::apply`].
    pub(crate) search: SearchState,
    /// Grid cursor and scroll.
    pub grid: GridState,
    /// Current input mode.
    pub input_mode: InputMode,
    /// Search box text.
    pub input: String,
    /// Visible notifications.
    pub toasts: Toasts,
    /// Pages shown around the current one in the pagination bar.
    pub page_range: u32,
    /// Pages always shown at each end of the pagination bar.
    pub page_margin: u32,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Creates an idle state with the search box focused.
    #[must_use]
    pub fn new() -> Self {
        Self {
            search: SearchState::new(),
            grid: GridState::default(),
            input_mode: InputMode::Query,
            input: String::new(),
            toasts: Toasts::default(),
            page_range: DEFAULT_PAGE_RANGE,
            page_margin: DEFAULT_MARGIN,
        }
    }

    /// Read access to the search bundle.
    #[must_use]
    pub const fn search(&self) -> &SearchState {
        &self.search
    }

    /// Results currently on screen (empty when none).
    #[must_use]
    pub fn visible_results(&self) -> &[MovieSummary] {
        self.search
            .results()
            .map_or(&[], |page| page.results.as_slice())
    }

    /// Runs the controller on `event`, shows its notifications and
    /// returns the fetches the caller must dispatch.
    pub fn apply(&mut self, event: SearchEvent, now: Instant) -> Vec<FetchTicket> {
        let replaces_results = match &event {
            SearchEvent::Submit(_) => true,
            SearchEvent::FetchSucceeded { ticket, .. } => self.search.is_current(ticket),
            _ => false,
        };

        let effects = self.search.apply(event);
        if replaces_results {
            self.grid.reset();
        }

        let mut tickets = Vec::new();
        for effect in effects {
            match effect {
                Effect::Fetch(ticket) => tickets.push(ticket),
                Effect::Notify(notification) => self.toasts.push(notification, now),
            }
        }
        tickets
    }
}
