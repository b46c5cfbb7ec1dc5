//! # Movie Store
//!
//! The shared state every screen reads from, and the only place it changes.
//!
//! ```text
//! MovieState + StoreAction  →  reduce()  →  MovieState
//! ```
//!
//! `reduce` is pure: no network, no disk, no logging. Callers perform I/O,
//! then dispatch the outcome. `Store` wraps the state, applies actions one at
//! a time and notifies subscribers after each dispatch.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::api::Movie;

/// Ordered set of favorite movies, unique by id.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct Favorites(Vec<Movie>);

impl Favorites {
    /// Builds a favorite set, keeping the first entry for each id.
    pub fn from_movies(movies: Vec<Movie>) -> Self {
        let mut unique: Vec<Movie> = Vec::with_capacity(movies.len());
        for movie in movies {
            if !unique.iter().any(|m| m.id == movie.id) {
                unique.push(movie);
            }
        }
        Self(unique)
    }

    pub fn contains(&self, movie_id: i64) -> bool {
        self.0.iter().any(|m| m.id == movie_id)
    }

    /// Removes the movie if present (by id), appends it otherwise.
    pub fn toggle(&mut self, movie: Movie) {
        if self.contains(movie.id) {
            self.0.retain(|m| m.id != movie.id);
        } else {
            self.0.push(movie);
        }
    }

    pub fn as_slice(&self) -> &[Movie] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieState {
    /// Popular movies, accumulated across pages.
    pub movies: Vec<Movie>,
    /// Results of the latest search, replaced wholesale.
    pub search_results: Vec<Movie>,
    pub favorites: Favorites,
    pub loading: bool,
    pub error: Option<String>,
}

/// Every way the store can change.
///
/// The serde form mirrors the classic `{type, payload}` action object so
/// actions can be logged and replayed. Unrecognized types become `Unknown`
/// whatever their payload.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(
    tag = "type",
    content = "payload",
    rename_all = "SCREAMING_SNAKE_CASE",
    try_from = "WireAction"
)]
pub enum StoreAction {
    SetLoading(bool),
    SetMovies(Vec<Movie>),
    AppendMovies(Vec<Movie>),
    SetSearchResults(Vec<Movie>),
    SetError(String),
    ToggleFavorite(Movie),
    LoadFavorites(Vec<Movie>),
    ClearError,
    Unknown,
}

impl StoreAction {
    pub fn kind(&self) -> &'static str {
        match self {
            StoreAction::SetLoading(_) => "SET_LOADING",
            StoreAction::SetMovies(_) => "SET_MOVIES",
            StoreAction::AppendMovies(_) => "APPEND_MOVIES",
            StoreAction::SetSearchResults(_) => "SET_SEARCH_RESULTS",
            StoreAction::SetError(_) => "SET_ERROR",
            StoreAction::ToggleFavorite(_) => "TOGGLE_FAVORITE",
            StoreAction::LoadFavorites(_) => "LOAD_FAVORITES",
            StoreAction::ClearError => "CLEAR_ERROR",
            StoreAction::Unknown => "UNKNOWN",
        }
    }
}

/// Raw `{type, payload}` object, decoded per type in `TryFrom`.
#[derive(Deserialize)]
struct WireAction {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    payload: serde_json::Value,
}

impl TryFrom<WireAction> for StoreAction {
    type Error = serde_json::Error;

    fn try_from(wire: WireAction) -> Result<Self, Self::Error> {
        use serde_json::from_value;
        let payload = wire.payload;
        Ok(match wire.kind.as_str() {
            "SET_LOADING" => StoreAction::SetLoading(from_value(payload)?),
            "SET_MOVIES" => StoreAction::SetMovies(from_value(payload)?),
            "APPEND_MOVIES" => StoreAction::AppendMovies(from_value(payload)?),
            "SET_SEARCH_RESULTS" => StoreAction::SetSearchResults(from_value(payload)?),
            "SET_ERROR" => StoreAction::SetError(from_value(payload)?),
            "TOGGLE_FAVORITE" => StoreAction::ToggleFavorite(from_value(payload)?),
            "LOAD_FAVORITES" => StoreAction::LoadFavorites(from_value(payload)?),
            "CLEAR_ERROR" => StoreAction::ClearError,
            _ => StoreAction::Unknown,
        })
    }
}

pub fn reduce(state: MovieState, action: StoreAction) -> MovieState {
    match action {
        StoreAction::SetLoading(loading) => MovieState { loading, ..state },
        StoreAction::SetMovies(movies) => MovieState {
            movies,
            loading: false,
            ..state
        },
        StoreAction::AppendMovies(more) => {
            let mut movies = state.movies;
            movies.extend(more);
            MovieState {
                movies,
                loading: false,
                ..state
            }
        }
        StoreAction::SetSearchResults(search_results) => MovieState {
            search_results,
            loading: false,
            ..state
        },
        StoreAction::SetError(message) => MovieState {
            error: Some(message),
            loading: false,
            ..state
        },
        StoreAction::ToggleFavorite(movie) => {
            let mut favorites = state.favorites;
            favorites.toggle(movie);
            MovieState { favorites, ..state }
        }
        StoreAction::LoadFavorites(movies) => MovieState {
            favorites: Favorites::from_movies(movies),
            ..state
        },
        StoreAction::ClearError => MovieState {
            error: None,
            ..state
        },
        StoreAction::Unknown => state,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&MovieState) + Send>;

/// Owns the `MovieState` and is the single writer to it.
pub struct Store {
    state: MovieState,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: u64,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(MovieState::default())
    }
}

impl Store {
    pub fn new(state: MovieState) -> Self {
        Self {
            state,
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    pub fn state(&self) -> &MovieState {
        &self.state
    }

    /// Applies one action and notifies subscribers. Returns the new state.
    pub fn dispatch(&mut self, action: StoreAction) -> &MovieState {
        debug!("dispatch {}", action.kind());
        let previous = std::mem::take(&mut self.state);
        self.state = reduce(previous, action);
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(&self.state);
        }
        &self.state
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&MovieState) + Send + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
    }
}
