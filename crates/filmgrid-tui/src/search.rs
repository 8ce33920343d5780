//! Search state controller.
//!
//! Query, page, fetch status, the displayed result page and the
//! selected movie form one owned bundle, [`SearchState`]. Nothing
//! mutates it except [`transition`], which maps `(state, event)` to
//! the next state plus the side effects the caller must perform.
//!
//! Every dispatched fetch carries a [`FetchTicket`] stamped with the
//! generation current at dispatch time. A response whose generation no
//! longer matches is stale and is dropped, so the observed status
//! always belongs to the most recent `(query, page)` request no matter
//! in which order responses arrive.
//!
//! Policies:
//! - Submitting a new query clears the displayed results and closes
//!   the detail overlay.
//! - Changing page keeps the previous results on screen until the new
//!   page arrives. The selection survives page changes and failures.
//! - A failed fetch discards the displayed results.

use filmgrid_api::tmdb::{MovieSummary, NetworkError, ResultPage};

use crate::notify::Notification;

/// Shown when a blank query is submitted.
pub const EMPTY_QUERY_MESSAGE: &str = "Please enter your search query.";

/// Shown when a search succeeds with no results.
pub const NO_RESULTS_MESSAGE: &str = "No movies found for your request.";

/// Lifecycle of the most recent request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStatus {
    /// Nothing submitted yet.
    #[default]
    Idle,
    /// A request for the current `(query, page)` is in flight.
    Loading,
    /// The last request for the current `(query, page)` failed.
    Error,
    /// The last request for the current `(query, page)` succeeded.
    Success,
}

/// Identity of one dispatched fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    /// Generation the state was at when the fetch was dispatched.
    pub generation: u64,
    /// Query to search for.
    pub query: String,
    /// Page to fetch (1-based).
    pub page: u32,
}

/// Inputs to the controller.
#[derive(Debug)]
pub enum SearchEvent {
    /// User submitted a query (raw, untrimmed).
    Submit(String),
    /// User asked for another page of the current query.
    GoToPage(u32),
    /// A fetch completed successfully.
    FetchSucceeded {
        /// Ticket the fetch was dispatched with.
        ticket: FetchTicket,
        /// Received page.
        page: ResultPage,
    },
    /// A fetch failed.
    FetchFailed {
        /// Ticket the fetch was dispatched with.
        ticket: FetchTicket,
        /// Failure cause.
        error: NetworkError,
    },
    /// User picked a movie in the grid.
    Select(MovieSummary),
    /// User dismissed the detail overlay.
    CloseDetail,
}

/// Side effects requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Start a fetch for this ticket.
    Fetch(FetchTicket),
    /// Show a transient notification.
    Notify(Notification),
}

/// The single owned search state bundle.
#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct SearchState {
    query: String,
    page: u32,
    generation: u64,
    status: FetchStatus,
    results: Option<ResultPage>,
    error: Option<String>,
    selected: Option<MovieSummary>,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            query: String::new(),
            page: 1,
            generation: 0,
            status: FetchStatus::Idle,
            results: None,
            error: None,
            selected: None,
        }
    }
}

impl SearchState {
    /// Creates the idle state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current query; empty until something is submitted.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Current page number (1-based).
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Generation of the most recent dispatch.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Current fetch status.
    #[must_use]
    pub const fn status(&self) -> FetchStatus {
        self.status
    }

    /// Result page on screen. While a page change is loading this is
    /// still the previous page.
    #[must_use]
    pub const fn results(&self) -> Option<&ResultPage> {
        self.results.as_ref()
    }

    /// Description of the last failure, when in `Error`.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Movie shown in the detail overlay.
    #[must_use]
    pub const fn selected(&self) -> Option<&MovieSummary> {
        self.selected.as_ref()
    }

    /// Last requestable page of the displayed results, or 0 with none.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        self.results.as_ref().map_or(0, ResultPage::last_page)
    }

    /// Returns `true` if `ticket` belongs to the latest dispatch.
    #[must_use]
    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Applies an event in place and returns the requested effects.
    pub fn apply(&mut self, event: SearchEvent) -> Vec<Effect> {
        let Transition { state, effects } = transition(std::mem::take(self), event);
        *self = state;
        effects
    }

    /// Bumps the generation and returns a ticket for the current parameters.
    fn next_ticket(&mut self) -> FetchTicket {
        self.generation = self.generation.wrapping_add(1);
        FetchTicket {
            generation: self.generation,
            query: self.query.clone(),
            page: self.page,
        }
    }
}

/// Result of one transition.
#[derive(Debug)]
pub struct Transition {
    /// Next state.
    pub state: SearchState,
    /// Effects to perform, in order.
    pub effects: Vec<Effect>,
}

impl Transition {
    const fn unchanged(state: SearchState) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }
}

/// Computes the next state for `event`. Performs no I/O.
#[must_use]
pub fn transition(state: SearchState, event: SearchEvent) -> Transition {
    match event {
        SearchEvent::Submit(raw) => submit(state, &raw),
        SearchEvent::GoToPage(page) => go_to_page(state, page),
        SearchEvent::FetchSucceeded { ticket, page } => fetch_succeeded(state, &ticket, page),
        SearchEvent::FetchFailed { ticket, error } => fetch_failed(state, &ticket, &error),
        SearchEvent::Select(movie) => {
            let mut state = state;
            state.selected = Some(movie);
            Transition::unchanged(state)
        }
        SearchEvent::CloseDetail => {
            let mut state = state;
            state.selected = None;
            Transition::unchanged(state)
        }
    }
}

fn submit(mut state: SearchState, raw: &str) -> Transition {
    let query = raw.trim();
    if query.is_empty() {
        return Transition {
            state,
            effects: vec![Effect::Notify(Notification::warning(EMPTY_QUERY_MESSAGE))],
        };
    }

    state.query = String::from(query);
    state.page = 1;
    state.status = FetchStatus::Loading;
    state.results = None;
    state.error = None;
    state.selected = None;
    let ticket = state.next_ticket();

    Transition {
        state,
        effects: vec![Effect::Fetch(ticket)],
    }
}

fn go_to_page(mut state: SearchState, page: u32) -> Transition {
    let last_page = state.total_pages();
    if state.query.is_empty() || last_page <= 1 || page == 0 || page > last_page {
        return Transition::unchanged(state);
    }
    if page == state.page {
        return Transition::unchanged(state);
    }

    state.page = page;
    state.status = FetchStatus::Loading;
    state.error = None;
    let ticket = state.next_ticket();

    Transition {
        state,
        effects: vec![Effect::Fetch(ticket)],
    }
}

fn fetch_succeeded(mut state: SearchState, ticket: &FetchTicket, page: ResultPage) -> Transition {
    if !state.is_current(ticket) {
        tracing::debug!(
            query = %ticket.query,
            page = ticket.page,
            generation = ticket.generation,
            current = state.generation,
            "discarding stale search response"
        );
        return Transition::unchanged(state);
    }

    let empty = page.is_empty();
    state.status = FetchStatus::Success;
    state.results = Some(page);
    state.error = None;

    let effects = if empty {
        vec![Effect::Notify(Notification::info(NO_RESULTS_MESSAGE))]
    } else {
        Vec::new()
    };
    Transition { state, effects }
}

fn fetch_failed(mut state: SearchState, ticket: &FetchTicket, error: &NetworkError) -> Transition {
    if !state.is_current(ticket) {
        tracing::debug!(
            query = %ticket.query,
            page = ticket.page,
            generation = ticket.generation,
            current = state.generation,
            "discarding stale search failure"
        );
        return Transition::unchanged(state);
    }

    tracing::warn!(
        query = %ticket.query,
        page = ticket.page,
        error = %error,
        "search request failed"
    );
    state.status = FetchStatus::Error;
    state.results = None;
    state.error = Some(error.to_string());
    Transition::unchanged(state)
}
