//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! translates keyboard events into `core::Action` values, and carries out
//! the `Effect`s that `update()` returns.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Effects
//!
//! Network effects run as tokio tasks; disk effects run on the blocking
//! pool. Both report back by sending an `Action` over a std channel that the
//! event loop drains every tick. Nothing is cancelled: stale completions are
//! filtered by generation inside `update()`.
//!
//! ## Redraw Strategy
//!
//! The store notifies a subscriber on every dispatch, which raises a redraw
//! flag. Otherwise the loop only redraws on terminal events, ticking faster
//! while anything is loading so completions show up promptly.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::{self, stdout};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::api::{MovieApi, TmdbClient};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::favorites;
use crate::core::state::{App, Route};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    DetailEvent, DetailViewState, GridEvent, MovieGridState, SearchBox, SearchEvent,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub search_box: SearchBox,
    pub grid: MovieGridState,
    pub detail_view: DetailViewState,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            search_box: SearchBox::new(),
            grid: MovieGridState::new(),
            detail_view: DetailViewState::new(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, EnableBracketedPaste)?;
        info!("Terminal modes enabled (mouse, bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste);
    }
}

/// Build the API client from the resolved config.
pub fn build_api(config: &ResolvedConfig) -> io::Result<Arc<dyn MovieApi>> {
    let client = TmdbClient::new(
        config.base_url.clone(),
        config.api_key.clone().unwrap_or_default(),
    )
    .map_err(io::Error::other)?;
    Ok(Arc::new(client))
}

pub fn run(config: ResolvedConfig) -> io::Result<()> {
    let api = build_api(&config)?;
    let mut app = App::from_config(api, &config);
    let mut tui = TuiState::new();

    let needs_redraw = Arc::new(AtomicBool::new(true));
    let redraw_flag = needs_redraw.clone();
    app.store.subscribe(move |_| redraw_flag.store(true, Ordering::Relaxed));

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    let mut should_quit = apply(&mut app, Action::Start, &tx);

    while !should_quit {
        // Sync grid props before events are routed to it
        tui.grid.item_count = app.display_movies().len();

        if needs_redraw.swap(false, Ordering::Relaxed) {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
        }

        let busy = app.state().loading
            || app.list.loading_more
            || app.detail.as_ref().is_some_and(|d| d.loading);
        let timeout = if busy {
            Duration::from_millis(50)
        } else {
            Duration::from_millis(250)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw.store(true, Ordering::Relaxed);
        }

        // Process first event + drain all pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let actions = route_event(&app, &mut tui, &event);
            for action in actions {
                should_quit |= apply(&mut app, action, &tx);
            }
            if should_quit {
                break;
            }
        }

        // Handle completed background work
        while let Ok(action) = rx.try_recv() {
            needs_redraw.store(true, Ordering::Relaxed);
            should_quit |= apply(&mut app, action, &tx);
        }
    }

    ratatui::restore();
    Ok(())
}

/// Translate one terminal event into core actions for the current screen.
fn route_event(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Vec<Action> {
    match event {
        TuiEvent::ForceQuit => return vec![Action::Quit],
        TuiEvent::DismissError => return vec![Action::DismissError],
        TuiEvent::Resize => return Vec::new(),
        _ => {}
    }

    if let Route::Detail { .. } = app.route() {
        return match tui.detail_view.handle_event(event) {
            Some(DetailEvent::Back) => vec![Action::Back],
            Some(DetailEvent::ToggleFavorite) => vec![Action::ToggleFavorite],
            None => Vec::new(),
        };
    }

    match event {
        TuiEvent::Refresh => {
            tui.grid.reset();
            return vec![Action::Refresh];
        }
        TuiEvent::Escape if tui.search_box.is_empty() => return vec![Action::Quit],
        TuiEvent::Escape => {
            tui.search_box.clear();
            tui.grid.reset();
            return vec![Action::ClearSearch];
        }
        _ => {}
    }

    if let Some(search_event) = tui.search_box.handle_event(event) {
        tui.grid.reset();
        return match search_event {
            SearchEvent::Changed(text) => vec![Action::QueryChanged(text)],
            SearchEvent::Cleared => vec![Action::ClearSearch],
        };
    }

    let movies = app.display_movies();
    match tui.grid.handle_event(event) {
        Some(GridEvent::Open(index)) => movies
            .get(index)
            .map(|m| {
                tui.detail_view = DetailViewState::new();
                vec![Action::SelectMovie(m.id)]
            })
            .unwrap_or_default(),
        Some(GridEvent::ToggleFavorite(index)) => movies
            .get(index)
            .map(|m| vec![Action::ToggleFavoriteMovie(m.clone())])
            .unwrap_or_default(),
        Some(GridEvent::EndReached) => vec![Action::EndReached],
        None => Vec::new(),
    }
}

/// Run `update` and execute its effects. Returns true when the app should quit.
fn apply(app: &mut App, action: Action, tx: &mpsc::Sender<Action>) -> bool {
    debug!("Applying action: {:?}", action);
    let mut quit = false;
    for effect in update(app, action) {
        match effect {
            Effect::Quit => quit = true,
            other => spawn_effect(app, other, tx.clone()),
        }
    }
    quit
}

fn spawn_effect(app: &App, effect: Effect, tx: mpsc::Sender<Action>) {
    match effect {
        Effect::Quit => {}
        Effect::LoadFavorites => {
            let path = app.favorites_file.clone();
            tokio::task::spawn_blocking(move || {
                let movies = favorites::load_favorites(&path);
                send(&tx, Action::FavoritesLoaded(movies));
            });
        }
        Effect::SaveFavorites(movies) => {
            let path = app.favorites_file.clone();
            tokio::task::spawn_blocking(move || {
                let result = favorites::save_favorites(&path, &movies).map_err(|e| {
                    warn!("Failed to save favorites to {}: {}", path.display(), e);
                    e.to_string()
                });
                send(&tx, Action::FavoritesSaved(result));
            });
        }
        request => {
            info!("Spawning request: {:?}", request);
            let api = app.api.clone();
            tokio::spawn(async move {
                if let Some(action) = perform_request(api.as_ref(), request).await {
                    send(&tx, action);
                }
            });
        }
    }
}

/// Perform a network effect and wrap the outcome in the matching completion action.
async fn perform_request(api: &dyn MovieApi, effect: Effect) -> Option<Action> {
    match effect {
        Effect::FetchPopular {
            page,
            append,
            generation,
        } => Some(Action::PopularLoaded {
            page,
            append,
            generation,
            result: api.popular(page).await,
        }),
        Effect::Search { query, generation } => Some(Action::SearchLoaded {
            generation,
            result: api.search(&query, 1).await,
        }),
        Effect::FetchDetail {
            movie_id,
            generation,
        } => Some(Action::DetailLoaded {
            movie_id,
            generation,
            result: api.detail(movie_id).await,
        }),
        Effect::Quit | Effect::LoadFavorites | Effect::SaveFavorites(_) => None,
    }
}

fn send(tx: &mpsc::Sender<Action>, action: Action) {
    if tx.send(action).is_err() {
        warn!("Failed to deliver completion: event loop has exited");
    }
}
