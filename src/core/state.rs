//! # Application State
//!
//! Core state for Reel. Domain logic only, no TUI types. Presentation state
//! (selection, scroll offsets, the search box cursor) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── api: Arc<dyn MovieApi>        // upstream movie API
//! ├── store: Store                  // shared movie state (reducer)
//! ├── list: ListScreen              // list screen local state
//! ├── detail: Option<DetailScreen>  // Some = detail screen is showing
//! ├── image_base_url: String        // poster host
//! └── favorites_file: PathBuf       // where favorites are persisted
//! ```
//!
//! Changes go through `update(app, action)` in action.rs, which in turn
//! routes every shared-state mutation through `Store::dispatch`.

use std::path::PathBuf;
use std::sync::Arc;

use crate::api::{MovieApi, MovieDetail, Movie};
use crate::core::config::ResolvedConfig;
use crate::core::store::{MovieState, Store};

/// Addressable screens. The detail screen takes the movie id as its only parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    List,
    Detail { movie_id: i64 },
}

/// Local state of the list screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ListScreen {
    /// Raw text of the search box (untrimmed).
    pub query: String,
    /// True while the grid shows search results instead of popular movies.
    pub searching: bool,
    /// Last popular page requested (1-based).
    pub page: u32,
    /// Last page reported by the API, when known.
    pub total_pages: Option<u32>,
    /// Guards against overlapping page fetches.
    pub loading_more: bool,
    /// A fresh page 1 fetch is in flight; pagination waits for it.
    pub refreshing: bool,
    /// Bumped on every search or search reset; older results are stale.
    pub search_generation: u64,
    /// Bumped on every fresh (non-appending) popular fetch.
    pub page_generation: u64,
}

impl Default for ListScreen {
    fn default() -> Self {
        Self {
            query: String::new(),
            searching: false,
            page: 1,
            total_pages: None,
            loading_more: false,
            refreshing: false,
            search_generation: 0,
            page_generation: 0,
        }
    }
}

impl ListScreen {
    pub fn has_more_pages(&self) -> bool {
        self.total_pages.is_none_or(|total| self.page < total)
    }
}

/// Local state of the detail screen.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailScreen {
    pub movie_id: i64,
    pub movie: Option<MovieDetail>,
    pub loading: bool,
    pub error: Option<String>,
    pub generation: u64,
}

impl DetailScreen {
    pub fn new(movie_id: i64, generation: u64) -> Self {
        Self {
            movie_id,
            movie: None,
            loading: true,
            error: None,
            generation,
        }
    }
}

pub struct App {
    pub api: Arc<dyn MovieApi>,
    pub store: Store,
    pub list: ListScreen,
    pub detail: Option<DetailScreen>,
    pub image_base_url: String,
    pub favorites_file: PathBuf,
    /// Source of detail screen generations.
    pub detail_generation: u64,
}

impl App {
    pub fn new(api: Arc<dyn MovieApi>, image_base_url: String, favorites_file: PathBuf) -> Self {
        Self {
            api,
            store: Store::default(),
            list: ListScreen::default(),
            detail: None,
            image_base_url,
            favorites_file,
            detail_generation: 0,
        }
    }

    pub fn from_config(api: Arc<dyn MovieApi>, config: &ResolvedConfig) -> Self {
        Self::new(
            api,
            config.image_base_url.clone(),
            config.favorites_file.clone(),
        )
    }

    pub fn state(&self) -> &MovieState {
        self.store.state()
    }

    pub fn route(&self) -> Route {
        match &self.detail {
            Some(detail) => Route::Detail {
                movie_id: detail.movie_id,
            },
            None => Route::List,
        }
    }

    /// What the list screen shows right now.
    pub fn display_movies(&self) -> &[Movie] {
        if self.list.searching {
            &self.state().search_results
        } else {
            &self.state().movies
        }
    }

    /// Favorite marker for the detail screen, keyed by the navigation id.
    pub fn is_favorite(&self, movie_id: i64) -> bool {
        self.state().favorites.contains(movie_id)
    }
}
