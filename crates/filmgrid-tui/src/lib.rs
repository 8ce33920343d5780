//! Terminal movie search client for filmgrid.
//!
//! The search controller in [`search`] is a pure state machine over
//! `(state, event)`. The [`app`] module feeds it terminal input and
//! fetch results, and renders the grid, pagination and detail overlay.

/// Interactive terminal application.
pub mod app;
/// Detail overlay for one selected movie.
pub mod detail;
/// Spawns fetches and reports their outcome as search events.
pub mod dispatch;
/// Result grid presenter.
pub mod grid;
/// Transient notifications.
pub mod notify;
/// Pagination control.
pub mod pagination;
/// Search state controller.
pub mod search;

pub use app::run_search_app;
