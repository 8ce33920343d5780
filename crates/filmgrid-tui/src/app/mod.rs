//! Search TUI main loop.

/// Application state types.
pub mod state;
mod ui;

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use filmgrid_api::tmdb::{MovieApi, SearchMovieParams};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;

use self::state::{AppState, InputMode, KeyAction};
use crate::detail::image_link;
use crate::dispatch::Dispatcher;
use crate::pagination::{next_page, previous_page};
use crate::search::{FetchTicket, SearchEvent};

/// How long the loop waits for a fetch result before polling keys again.
const TICK: Duration = Duration::from_millis(50);

/// Runs the search TUI until the user quits.
///
/// `template` carries the filters applied to every request. When
/// `initial_query` is non-blank it is submitted before the first frame.
///
/// # Errors
///
/// Returns an error if terminal setup or event handling fails.
pub async fn run_search_app<A>(
    api: Arc<A>,
    template: SearchMovieParams,
    initial_query: Option<String>,
) -> Result<()>
where
    A: MovieApi + Sync + 'static,
{
    let (dispatcher, mut fetch_rx) = Dispatcher::new(api, template);
    let mut app = AppState::new();

    if let Some(query) = initial_query.filter(|q| !q.trim().is_empty()) {
        app.input.clone_from(&query);
        app.input_mode = InputMode::Browse;
        let tickets = app.apply(SearchEvent::Submit(query), Instant::now());
        spawn_fetches(&dispatcher, tickets);
    }

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let result = run_event_loop(&mut terminal, &mut app, &dispatcher, &mut fetch_rx).await;

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;

    result
}

/// Main event loop.
async fn run_event_loop<A>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
    dispatcher: &Dispatcher<A>,
    fetch_rx: &mut mpsc::UnboundedReceiver<SearchEvent>,
) -> Result<()>
where
    A: MovieApi + Sync + 'static,
{
    loop {
        app.toasts.prune(Instant::now());
        terminal
            .draw(|frame| ui::draw(frame, app))
            .context("failed to draw TUI")?;

        tokio::select! {
            Some(event) = fetch_rx.recv() => {
                let tickets = app.apply(event, Instant::now());
                spawn_fetches(dispatcher, tickets);
            }
            () = tokio::time::sleep(TICK) => {}
        }

        while event::poll(Duration::ZERO).context("failed to poll events")? {
            let Event::Key(key) = event::read().context("failed to read event")? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match handle_key(app, key) {
                KeyAction::None => {}
                KeyAction::Quit => return Ok(()),
                KeyAction::Search(event) => {
                    let tickets = app.apply(event, Instant::now());
                    spawn_fetches(dispatcher, tickets);
                }
                KeyAction::Open(url) => open_url(&url),
            }
        }
    }
}

/// Hands every ticket to the dispatcher.
fn spawn_fetches<A>(dispatcher: &Dispatcher<A>, tickets: Vec<FetchTicket>)
where
    A: MovieApi + Sync + 'static,
{
    for ticket in tickets {
        // Detached: superseded fetches finish on their own and are discarded.
        drop(dispatcher.dispatch(ticket));
    }
}

/// Opens `url` in the system browser.
fn open_url(url: &str) {
    if let Err(e) = open::that(url) {
        tracing::warn!(url, error = %e, "failed to open browser");
    }
}

/// Routes a key press to the handler of the focused widget.
fn handle_key(app: &mut AppState, key: KeyEvent) -> KeyAction {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return KeyAction::Quit;
    }
    if app.search().selected().is_some() {
        return handle_detail_input(app, key.code);
    }
    match app.input_mode {
        InputMode::Query => handle_query_input(app, key.code),
        InputMode::Browse => handle_browse_input(app, key.code),
    }
}

/// Handles key input while the detail overlay is open.
fn handle_detail_input(app: &AppState, key: KeyCode) -> KeyAction {
    match key {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter | KeyCode::Backspace => {
            KeyAction::Search(SearchEvent::CloseDetail)
        }
        KeyCode::Char('o') => app
            .search()
            .selected()
            .and_then(image_link)
            .map_or(KeyAction::None, KeyAction::Open),
        _ => KeyAction::None,
    }
}

/// Handles key input in the search box.
fn handle_query_input(app: &mut AppState, key: KeyCode) -> KeyAction {
    match key {
        KeyCode::Esc => {
            app.input_mode = InputMode::Browse;
            KeyAction::None
        }
        KeyCode::Enter => {
            if !app.input.trim().is_empty() {
                app.input_mode = InputMode::Browse;
            }
            KeyAction::Search(SearchEvent::Submit(app.input.clone()))
        }
        KeyCode::Backspace => {
            app.input.pop();
            KeyAction::None
        }
        KeyCode::Char(c) => {
            app.input.push(c);
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

/// Handles key input on the result grid.
fn handle_browse_input(app: &mut AppState, key: KeyCode) -> KeyAction {
    let len = app.visible_results().len();
    let current = app.search().page();
    let total = app.search().total_pages();
    let go_to = |page: Option<u32>| {
        page.map_or(KeyAction::None, |p| KeyAction::Search(SearchEvent::GoToPage(p)))
    };

    match key {
        KeyCode::Char('q') => KeyAction::Quit,
        KeyCode::Char('/' | 's') => {
            app.input_mode = InputMode::Query;
            KeyAction::None
        }
        KeyCode::Left | KeyCode::Char('h') => {
            app.grid.move_left();
            KeyAction::None
        }
        KeyCode::Right | KeyCode::Char('l') => {
            app.grid.move_right(len);
            KeyAction::None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.grid.move_up();
            KeyAction::None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.grid.move_down(len);
            KeyAction::None
        }
        KeyCode::Enter => app
            .grid
            .select(app.visible_results())
            .map_or(KeyAction::None, KeyAction::Search),
        KeyCode::Char(']' | 'n') | KeyCode::PageDown => go_to(next_page(current, total)),
        KeyCode::Char('[' | 'p') | KeyCode::PageUp => go_to(previous_page(current, total)),
        KeyCode::Home | KeyCode::Char('g') => go_to((total > 0).then_some(1)),
        KeyCode::End | KeyCode::Char('G') => go_to((total > 0).then_some(total)),
        KeyCode::Char('r') if !app.search().query().is_empty() => {
            KeyAction::Search(SearchEvent::Submit(app.search().query().to_owned()))
        }
        _ => KeyAction::None,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::panic)]

    use filmgrid_api::tmdb::ResultPage;

    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn batman_page() -> ResultPage {
        serde_json::from_str(include_str!(
            "../../../../fixtures/tmdb/search_movie_batman.json"
        ))
        .unwrap()
    }

    /// Submits "batman" and delivers the first page.
    fn browsing() -> AppState {
        let mut app = AppState::new();
        for c in "batman".chars() {
            handle_key(&mut app, press(KeyCode::Char(c)));
        }
        let KeyAction::Search(event) = handle_key(&mut app, press(KeyCode::Enter)) else {
            panic!("enter should submit");
        };
        let ticket = app.apply(event, Instant::now()).remove(0);
        app.apply(
            SearchEvent::FetchSucceeded {
                ticket,
                page: batman_page(),
            },
            Instant::now(),
        );
        app
    }

    #[test]
    fn test_typing_and_submit() {
        // Arrange
        let app = browsing();

        // Assert
        assert_eq!(app.input, "batman");
        assert_eq!(app.input_mode, InputMode::Browse);
        assert_eq!(app.search().query(), "batman");
        assert_eq!(app.visible_results().len(), 3);
    }

    #[test]
    fn test_blank_submit_stays_in_query_mode() {
        // Arrange
        let mut app = AppState::new();
        handle_key(&mut app, press(KeyCode::Char(' ')));

        // Act
        let action = handle_key(&mut app, press(KeyCode::Enter));

        // Assert
        assert_eq!(app.input_mode, InputMode::Query);
        match action {
            KeyAction::Search(SearchEvent::Submit(text)) => assert_eq!(text, " "),
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[test]
    fn test_backspace_and_escape_in_query_mode() {
        // Arrange
        let mut app = AppState::new();
        handle_key(&mut app, press(KeyCode::Char('a')));
        handle_key(&mut app, press(KeyCode::Char('b')));

        // Act
        handle_key(&mut app, press(KeyCode::Backspace));
        handle_key(&mut app, press(KeyCode::Esc));

        // Assert
        assert_eq!(app.input, "a");
        assert_eq!(app.input_mode, InputMode::Browse);
    }

    #[test]
    fn test_page_keys() {
        // Arrange
        let mut app = browsing();

        // Act & Assert
        assert!(matches!(
            handle_key(&mut app, press(KeyCode::Char(']'))),
            KeyAction::Search(SearchEvent::GoToPage(2))
        ));
        assert!(matches!(
            handle_key(&mut app, press(KeyCode::Char('['))),
            KeyAction::None
        ));
        assert!(matches!(
            handle_key(&mut app, press(KeyCode::End)),
            KeyAction::Search(SearchEvent::GoToPage(3))
        ));
        assert!(matches!(
            handle_key(&mut app, press(KeyCode::Home)),
            KeyAction::Search(SearchEvent::GoToPage(1))
        ));
    }

    #[test]
    fn test_page_keys_without_results() {
        // Arrange
        let mut app = AppState::new();
        app.input_mode = InputMode::Browse;

        // Act & Assert
        assert!(matches!(
            handle_key(&mut app, press(KeyCode::Char(']'))),
            KeyAction::None
        ));
        assert!(matches!(
            handle_key(&mut app, press(KeyCode::End)),
            KeyAction::None
        ));
    }

    #[test]
    fn test_select_and_close_detail() {
        // Arrange
        let mut app = browsing();
        handle_key(&mut app, press(KeyCode::Right));

        // Act
        let KeyAction::Search(event) = handle_key(&mut app, press(KeyCode::Enter)) else {
            panic!("enter should select");
        };
        app.apply(event, Instant::now());

        // Assert
        assert_eq!(app.search().selected().unwrap().id, 414_906);

        // Act: 'q' closes the overlay instead of quitting
        let action = handle_key(&mut app, press(KeyCode::Char('q')));

        // Assert
        assert!(matches!(
            action,
            KeyAction::Search(SearchEvent::CloseDetail)
        ));
    }

    #[test]
    fn test_open_image_from_detail() {
        // Arrange
        let mut app = browsing();
        let KeyAction::Search(event) = handle_key(&mut app, press(KeyCode::Enter)) else {
            panic!("enter should select");
        };
        app.apply(event, Instant::now());

        // Act
        let action = handle_key(&mut app, press(KeyCode::Char('o')));

        // Assert
        match action {
            KeyAction::Open(url) => assert_eq!(
                url,
                "https://image.tmdb.org/t/p/w500/cij4dd21v2Rk2YtUQbV5kW69WB2.jpg"
            ),
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[test]
    fn test_quit_keys() {
        // Arrange
        let mut app = browsing();

        // Act & Assert
        assert!(matches!(
            handle_key(&mut app, press(KeyCode::Char('q'))),
            KeyAction::Quit
        ));
        app.input_mode = InputMode::Query;
        assert!(matches!(
            handle_key(
                &mut app,
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
            ),
            KeyAction::Quit
        ));
    }

    #[test]
    fn test_resubmit_current_query() {
        // Arrange
        let mut app = browsing();

        // Act
        let action = handle_key(&mut app, press(KeyCode::Char('r')));

        // Assert
        match action {
            KeyAction::Search(SearchEvent::Submit(query)) => assert_eq!(query, "batman"),
            other => panic!("unexpected action: {other:?}"),
        }
    }
}
