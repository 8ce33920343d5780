//! TUI rendering for the search screen.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::state::{AppState, InputMode};
use crate::detail::draw_detail;
use crate::grid::draw_grid;
use crate::notify::NotificationKind;
use crate::pagination::{page_window, pagination_line};
use crate::search::FetchStatus;

/// Text shown while a fetch is outstanding and nothing is on screen.
pub const LOADING_TEXT: &str = "Loading...";

/// Text shown when the last fetch failed.
pub const ERROR_TEXT: &str = "There was an error, please try again...";

/// Draws the whole screen.
#[allow(clippy::indexing_slicing)]
pub fn draw(frame: &mut Frame, app: &mut AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // search box + status
            Constraint::Min(5),    // results
            Constraint::Length(1), // pagination
            Constraint::Length(3), // footer
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], app);
    draw_results(frame, chunks[1], app);
    draw_pagination(frame, chunks[2], app);
    draw_footer(frame, chunks[3], app);

    if let Some(movie) = app.search.selected() {
        draw_detail(frame, movie);
    }
}

/// Draws the search box and the page counter.
#[allow(clippy::indexing_slicing)]
fn draw_header(frame: &mut Frame, area: Rect, app: &AppState) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let input_style = if app.input_mode == InputMode::Query {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let input = Paragraph::new(app.input.as_str())
        .style(input_style)
        .block(Block::default().borders(Borders::ALL).title(" Search: / "));
    frame.render_widget(input, header_chunks[0]);

    let search = &app.search;
    let status = match (search.status(), search.results()) {
        (FetchStatus::Idle, _) => String::new(),
        (FetchStatus::Error, _) => String::from("error"),
        (FetchStatus::Loading, None) => String::from(LOADING_TEXT),
        (_, Some(results)) => format!(
            "page {}/{}  {} results",
            search.page(),
            search.total_pages(),
            results.total_results
        ),
        (FetchStatus::Success, None) => String::new(),
    };
    let counter =
        Paragraph::new(status).block(Block::default().borders(Borders::ALL).title(" filmgrid "));
    frame.render_widget(counter, header_chunks[1]);

    if app.input_mode == InputMode::Query && app.search.selected().is_none() {
        let typed = u16::try_from(app.input.chars().count()).unwrap_or(u16::MAX);
        let x = header_chunks[0]
            .x
            .saturating_add(1)
            .saturating_add(typed)
            .min(header_chunks[0].right().saturating_sub(2));
        frame.set_cursor_position(Position::new(x, header_chunks[0].y.saturating_add(1)));
    }
}

/// Draws the body according to the fetch status.
fn draw_results(frame: &mut Frame, area: Rect, app: &mut AppState) {
    let status = app.search.status();
    let visible = app
        .search
        .results()
        .map_or(&[][..], |page| page.results.as_slice());

    if !visible.is_empty() && matches!(status, FetchStatus::Loading | FetchStatus::Success) {
        let title = if status == FetchStatus::Loading {
            format!(" Results ({LOADING_TEXT}) ")
        } else {
            format!(" Results for \"{}\" ", app.search.query())
        };
        draw_grid(frame, area, visible, &mut app.grid, &title);
        return;
    }

    let lines = match status {
        FetchStatus::Idle => vec![Line::from(Span::styled(
            "Type a movie title and press Enter.",
            Style::default().fg(Color::DarkGray),
        ))],
        FetchStatus::Loading => vec![Line::from(Span::styled(
            LOADING_TEXT,
            Style::default().fg(Color::Cyan),
        ))],
        FetchStatus::Error => {
            let mut lines = vec![Line::from(Span::styled(
                ERROR_TEXT,
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ))];
            if let Some(detail) = app.search.error() {
                lines.push(Line::from(Span::styled(
                    detail.to_owned(),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            lines
        }
        FetchStatus::Success => vec![Line::from(Span::styled(
            "No movies to show.",
            Style::default().fg(Color::DarkGray),
        ))],
    };
    let body = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Results "));
    frame.render_widget(body, area);
}

/// Draws the pagination bar; blank for a single page.
fn draw_pagination(frame: &mut Frame, area: Rect, app: &AppState) {
    let total = app.search.total_pages();
    if total <= 1 || app.search.status() == FetchStatus::Error {
        return;
    }
    let current = app.search.page();
    let items = page_window(current, total, app.page_range, app.page_margin);
    frame.render_widget(
        Paragraph::new(pagination_line(&items, current)).alignment(Alignment::Center),
        area,
    );
}

/// Draws the latest notification, or key hints when there is none.
fn draw_footer(frame: &mut Frame, area: Rect, app: &AppState) {
    let line = if let Some(toast) = app.toasts.latest() {
        let color = match toast.kind {
            NotificationKind::Info => Color::Cyan,
            NotificationKind::Warning => Color::Yellow,
        };
        Line::from(Span::styled(toast.message.clone(), Style::default().fg(color)))
    } else if app.search.selected().is_some() {
        Line::from("Esc/q/Enter: close  o: open image")
    } else {
        match app.input_mode {
            InputMode::Query => Line::from("Type a title | Enter: search | Esc: browse"),
            InputMode::Browse => Line::from(vec![Span::raw(
                "\u{2190}\u{2191}\u{2192}\u{2193}/hjkl: move  Enter: details  [/]: page  Home/End: first/last  /: search  q: quit",
            )]),
        }
    };

    let footer = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
