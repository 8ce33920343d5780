//! Detail overlay for the selected movie.

use filmgrid_api::tmdb::MovieSummary;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

/// Image size used for the poster link.
pub const POSTER_SIZE: &str = "w500";

/// Image size used for the backdrop link.
pub const BACKDROP_SIZE: &str = "original";

/// Returns the URL opened by the overlay's "open image" action.
///
/// Prefers the poster, falling back to the backdrop.
#[must_use]
pub fn image_link(movie: &MovieSummary) -> Option<String> {
    movie
        .poster_url(POSTER_SIZE)
        .or_else(|| movie.backdrop_url(BACKDROP_SIZE))
}

/// Builds a `label: value` line.
fn field(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{label:<16}"),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(value),
    ])
}

/// Builds every attribute line shown in the overlay.
#[must_use]
pub fn detail_lines(movie: &MovieSummary) -> Vec<Line<'static>> {
    let dash = || String::from("-");
    let genres = if movie.genre_ids.is_empty() {
        dash()
    } else {
        movie
            .genre_ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut lines = vec![
        field("TMDB ID", movie.id.to_string()),
        field("Original title", movie.original_title.clone()),
        field(
            "Release date",
            movie
                .release()
                .map_or_else(dash, |d| d.format("%B %-d, %Y").to_string()),
        ),
        field(
            "Rating",
            format!("{:.1}/10 ({} votes)", movie.vote_average, movie.vote_count),
        ),
        field("Popularity", format!("{:.1}", movie.popularity)),
        field("Language", movie.original_language.clone()),
        field("Genre IDs", genres),
        field("Adult", movie.adult.to_string()),
        field(
            "Poster",
            movie.poster_url(POSTER_SIZE).unwrap_or_else(dash),
        ),
        field(
            "Backdrop",
            movie.backdrop_url(BACKDROP_SIZE).unwrap_or_else(dash),
        ),
        Line::default(),
    ];
    lines.push(Line::from(
        movie
            .overview
            .clone()
            .unwrap_or_else(|| String::from("No overview available.")),
    ));
    lines
}

/// Returns a rectangle of `percent_x` by `percent_y` centered in `area`.
#[must_use]
pub fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [row] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(row);
    cell
}

/// Draws the overlay above whatever is already rendered.
pub fn draw_detail(frame: &mut Frame, movie: &MovieSummary) {
    let area = centered_rect(frame.area(), 80, 80);
    frame.render_widget(Clear, area);

    let title = match movie.release_year() {
        Some(year) => format!(" {} ({year}) ", movie.title),
        None => format!(" {} ", movie.title),
    };
    let body = Paragraph::new(detail_lines(movie))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(title)
                .title_bottom(" Esc: close  o: open image "),
        );
    frame.render_widget(body, area);
}
