//! Result grid presenter.
//!
//! Lays out the current page of results row-major in as many columns
//! as fit, in API order. Selecting a card emits the whole summary as
//! [`SearchEvent::Select`]; no lookup or refetch happens here.

use filmgrid_api::tmdb::MovieSummary;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::search::SearchEvent;

/// Width of one card in terminal cells.
pub const CARD_WIDTH: u16 = 30;

/// Height of one card in terminal cells (borders included).
pub const CARD_HEIGHT: u16 = 5;

/// Returns how many cards fit side by side in `width` cells (at least one).
#[must_use]
pub fn columns_for_width(width: u16) -> usize {
    usize::from((width / CARD_WIDTH).max(1))
}

/// Cursor and scroll position within the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub struct GridState {
    cursor: usize,
    columns: usize,
    first_row: usize,
}

impl Default for GridState {
    fn default() -> Self {
        Self {
            cursor: 0,
            columns: 1,
            first_row: 0,
        }
    }
}

impl GridState {
    /// Index of the card under the cursor.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of columns from the last layout.
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// First visible row.
    #[must_use]
    pub const fn first_row(&self) -> usize {
        self.first_row
    }

    /// Moves the cursor back to the first card.
    pub const fn reset(&mut self) {
        self.cursor = 0;
        self.first_row = 0;
    }

    /// Records the column count from the latest layout.
    pub fn set_columns(&mut self, columns: usize) {
        self.columns = columns.max(1);
    }

    /// Moves one card left.
    pub const fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Moves one card right, staying within `len` cards.
    pub fn move_right(&mut self, len: usize) {
        if self.cursor.saturating_add(1) < len {
            self.cursor = self.cursor.saturating_add(1);
        }
    }

    /// Moves one row up.
    pub const fn move_up(&mut self) {
        if self.cursor >= self.columns {
            self.cursor = self.cursor.saturating_sub(self.columns);
        }
    }

    /// Moves one row down, staying within `len` cards.
    pub fn move_down(&mut self, len: usize) {
        let target = self.cursor.saturating_add(self.columns);
        if target < len {
            self.cursor = target;
        }
    }

    /// Clamps the cursor after the result count changed.
    pub fn clamp(&mut self, len: usize) {
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    /// Adjusts the scroll offset so the cursor row is among `visible_rows`.
    pub fn scroll_into_view(&mut self, visible_rows: usize) {
        let visible_rows = visible_rows.max(1);
        let row = self.cursor / self.columns;
        if row < self.first_row {
            self.first_row = row;
        } else if row >= self.first_row.saturating_add(visible_rows) {
            self.first_row = row.saturating_sub(visible_rows.saturating_sub(1));
        }
    }

    /// Emits the selection event for the card under the cursor.
    #[must_use]
    pub fn select(&self, results: &[MovieSummary]) -> Option<SearchEvent> {
        results
            .get(self.cursor)
            .map(|movie| SearchEvent::Select(movie.clone()))
    }
}

/// Builds the text lines of one card.
#[must_use]
pub fn card_lines(movie: &MovieSummary) -> Vec<Line<'static>> {
    let year = movie
        .release_year()
        .map_or_else(|| String::from("----"), |y| y.to_string());
    let rating = if movie.vote_count == 0 {
        String::from("\u{2605} -")
    } else {
        format!("\u{2605} {:.1}", movie.vote_average)
    };

    let mut lines = vec![
        Line::from(Span::styled(
            movie.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(year, Style::default().fg(Color::Yellow)),
            Span::raw("  "),
            Span::styled(rating, Style::default().fg(Color::Green)),
        ]),
    ];
    if !movie.original_title.is_empty() && movie.original_title != movie.title {
        lines.push(Line::from(Span::styled(
            movie.original_title.clone(),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines
}

/// Draws the visible rows of cards into `area`.
pub fn draw_grid(
    frame: &mut Frame,
    area: Rect,
    results: &[MovieSummary],
    state: &mut GridState,
    title: &str,
) {
    let block = Block::default().borders(Borders::ALL).title(String::from(title));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    state.set_columns(columns_for_width(inner.width));
    state.clamp(results.len());
    let visible_rows = usize::from((inner.height / CARD_HEIGHT).max(1));
    state.scroll_into_view(visible_rows);

    let columns = state.columns();
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CARD_HEIGHT); visible_rows])
        .split(inner);

    for (slot, row_area) in row_areas.iter().enumerate() {
        let row = state.first_row().saturating_add(slot);
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Length(CARD_WIDTH); columns])
            .split(*row_area);

        for (col, cell) in cells.iter().enumerate() {
            let index = row.saturating_mul(columns).saturating_add(col);
            let Some(movie) = results.get(index) else {
                return;
            };
            let border_style = if index == state.cursor() {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let card = Paragraph::new(card_lines(movie)).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style),
            );
            frame.render_widget(card, *cell);
        }
    }
}
