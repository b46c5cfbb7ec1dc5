//! # Actions
//!
//! Everything that can happen in Reel becomes an `Action`.
//! User types in the search box? That's `Action::QueryChanged(text)`.
//! A page of popular movies arrives? That's `Action::PopularLoaded { .. }`.
//!
//! `update()` applies an action to the `App` and returns the `Effect`s the
//! adapter must carry out (network calls, disk writes). No I/O happens here.
//!
//! ```text
//! App + Action  →  update()  →  Vec<Effect>
//! ```
//!
//! Requests carry the generation that was current when they started.
//! A completion from an older generation is dropped, so a slow response
//! can never overwrite newer results.

use log::{debug, info, warn};

use crate::api::{ApiError, Movie, MovieDetail, MoviePage};
use crate::core::state::{App, DetailScreen};
use crate::core::store::StoreAction;

/// TMDB reports more popular pages than it serves; requests past 500 fail.
const MAX_POPULAR_PAGES: u32 = 500;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// App launched: load favorites and the first popular page.
    Start,
    Quit,

    // List screen
    QueryChanged(String),
    ClearSearch,
    /// Fresh, non-appending reload of popular movies.
    Refresh,
    /// The grid scrolled near its end.
    EndReached,
    SelectMovie(i64),
    /// Favorite toggle from the grid (no detail fetch needed).
    ToggleFavoriteMovie(Movie),
    DismissError,

    // Detail screen
    Back,
    ToggleFavorite,

    // Completions
    FavoritesLoaded(Vec<Movie>),
    FavoritesSaved(Result<(), String>),
    PopularLoaded {
        page: u32,
        append: bool,
        generation: u64,
        result: Result<MoviePage, ApiError>,
    },
    SearchLoaded {
        generation: u64,
        result: Result<MoviePage, ApiError>,
    },
    DetailLoaded {
        movie_id: i64,
        generation: u64,
        result: Result<MovieDetail, ApiError>,
    },
}

/// I/O requested by `update`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Quit,
    LoadFavorites,
    SaveFavorites(Vec<Movie>),
    FetchPopular {
        page: u32,
        append: bool,
        generation: u64,
    },
    Search {
        query: String,
        generation: u64,
    },
    FetchDetail {
        movie_id: i64,
        generation: u64,
    },
}

pub fn update(app: &mut App, action: Action) -> Vec<Effect> {
    match action {
        Action::Start => {
            info!("Starting: loading favorites and popular movies");
            vec![Effect::LoadFavorites, fresh_popular_fetch(app)]
        }
        Action::Quit => vec![Effect::Quit],

        Action::QueryChanged(text) => {
            app.list.query = text;
            let trimmed = app.list.query.trim().to_string();
            app.list.search_generation += 1;
            if trimmed.is_empty() {
                exit_search(app);
                Vec::new()
            } else {
                app.list.searching = true;
                app.store.dispatch(StoreAction::SetLoading(true));
                vec![Effect::Search {
                    query: trimmed,
                    generation: app.list.search_generation,
                }]
            }
        }
        Action::ClearSearch => {
            app.list.query.clear();
            app.list.search_generation += 1;
            exit_search(app);
            Vec::new()
        }
        Action::Refresh => vec![fresh_popular_fetch(app)],
        Action::EndReached => {
            let list = &mut app.list;
            if list.searching || list.refreshing || list.loading_more || !list.has_more_pages() {
                return Vec::new();
            }
            list.page += 1;
            list.loading_more = true;
            debug!("End reached, fetching page {}", list.page);
            vec![Effect::FetchPopular {
                page: list.page,
                append: true,
                generation: list.page_generation,
            }]
        }
        Action::SelectMovie(movie_id) => {
            app.detail_generation += 1;
            let generation = app.detail_generation;
            app.detail = Some(DetailScreen::new(movie_id, generation));
            vec![Effect::FetchDetail {
                movie_id,
                generation,
            }]
        }
        Action::ToggleFavoriteMovie(movie) => toggle_and_persist(app, movie),
        Action::DismissError => {
            app.store.dispatch(StoreAction::ClearError);
            Vec::new()
        }

        Action::Back => {
            app.detail = None;
            Vec::new()
        }
        Action::ToggleFavorite => {
            let Some(movie) = app
                .detail
                .as_ref()
                .and_then(|d| d.movie.as_ref())
                .map(MovieDetail::summary)
            else {
                debug!("Favorite toggle ignored: detail not loaded");
                return Vec::new();
            };
            toggle_and_persist(app, movie)
        }

        Action::FavoritesLoaded(movies) => {
            info!("Loaded {} saved favorites", movies.len());
            app.store.dispatch(StoreAction::LoadFavorites(movies));
            Vec::new()
        }
        Action::FavoritesSaved(result) => {
            if let Err(message) = result {
                app.store.dispatch(StoreAction::SetError(format!(
                    "Failed to save favorites: {message}"
                )));
            }
            Vec::new()
        }
        Action::PopularLoaded {
            page,
            append,
            generation,
            result,
        } => {
            if generation != app.list.page_generation {
                debug!(
                    "Dropping stale popular page {} (generation {} < {})",
                    page, generation, app.list.page_generation
                );
                return Vec::new();
            }
            app.list.loading_more = false;
            if !append {
                app.list.refreshing = false;
            }
            match result {
                Ok(movie_page) => {
                    app.list.total_pages = movie_page
                        .total_pages
                        .map(|total| total.min(MAX_POPULAR_PAGES))
                        .or(app.list.total_pages);
                    if append {
                        app.store
                            .dispatch(StoreAction::AppendMovies(movie_page.results));
                    } else {
                        app.store.dispatch(StoreAction::SetMovies(movie_page.results));
                    }
                }
                Err(e) => {
                    warn!("Popular page {} failed: {}", page, e);
                    if append {
                        // Let the next EndReached retry the same page
                        app.list.page = page.saturating_sub(1).max(1);
                    }
                    app.store.dispatch(StoreAction::SetError(e.to_string()));
                }
            }
            Vec::new()
        }
        Action::SearchLoaded { generation, result } => {
            if generation != app.list.search_generation {
                debug!(
                    "Dropping stale search results (generation {} < {})",
                    generation, app.list.search_generation
                );
                return Vec::new();
            }
            match result {
                Ok(movie_page) => {
                    app.store
                        .dispatch(StoreAction::SetSearchResults(movie_page.results));
                }
                Err(e) => {
                    warn!("Search failed: {}", e);
                    app.store.dispatch(StoreAction::SetError(e.to_string()));
                }
            }
            Vec::new()
        }
        Action::DetailLoaded {
            movie_id,
            generation,
            result,
        } => {
            let Some(detail) = app
                .detail
                .as_mut()
                .filter(|d| d.movie_id == movie_id && d.generation == generation)
            else {
                debug!("Dropping detail for movie {}: screen no longer showing it", movie_id);
                return Vec::new();
            };
            detail.loading = false;
            match result {
                Ok(movie) => detail.movie = Some(movie),
                Err(e) => {
                    warn!("Detail fetch for movie {} failed: {}", movie_id, e);
                    detail.error = Some(e.to_string());
                }
            }
            Vec::new()
        }
    }
}

/// Starts a non-appending popular fetch from page 1, superseding any in-flight page.
fn fresh_popular_fetch(app: &mut App) -> Effect {
    app.list.page = 1;
    app.list.total_pages = None;
    app.list.loading_more = false;
    app.list.refreshing = true;
    app.list.page_generation += 1;
    app.store.dispatch(StoreAction::SetLoading(true));
    Effect::FetchPopular {
        page: 1,
        append: false,
        generation: app.list.page_generation,
    }
}

fn exit_search(app: &mut App) {
    app.list.searching = false;
    app.store.dispatch(StoreAction::SetSearchResults(Vec::new()));
}

/// The store is the only authority on favorites: persist what it holds
/// after the toggle, never a separately computed list.
fn toggle_and_persist(app: &mut App, movie: Movie) -> Vec<Effect> {
    info!("Toggling favorite {} ({})", movie.id, movie.title);
    let state = app.store.dispatch(StoreAction::ToggleFavorite(movie));
    vec![Effect::SaveFavorites(state.favorites.as_slice().to_vec())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::Route;
    use crate::test_support::{sample_detail, sample_movies, test_app};

    fn page(results: Vec<Movie>) -> MoviePage {
        MoviePage {
            page: 1,
            results,
            total_pages: Some(10),
            total_results: None,
        }
    }

    fn started_app() -> App {
        let mut app = test_app();
        update(&mut app, Action::Start);
        let generation = app.list.page_generation;
        update(
            &mut app,
            Action::PopularLoaded {
                page: 1,
                append: false,
                generation,
                result: Ok(page(sample_movies())),
            },
        );
        app
    }

    #[test]
    fn test_start_loads_favorites_and_first_page() {
        let mut app = test_app();
        let effects = update(&mut app, Action::Start);
        assert_eq!(
            effects,
            vec![
                Effect::LoadFavorites,
                Effect::FetchPopular {
                    page: 1,
                    append: false,
                    generation: 1
                }
            ]
        );
        assert!(app.state().loading);
    }

    #[test]
    fn test_first_page_sets_movies() {
        let app = started_app();
        assert_eq!(app.state().movies, sample_movies());
        assert!(!app.state().loading);
    }

    #[test]
    fn test_search_leaves_movies_untouched() {
        let mut app = started_app();
        let effects = update(&mut app, Action::QueryChanged("batman ".to_string()));
        assert_eq!(
            effects,
            vec![Effect::Search {
                query: "batman".to_string(),
                generation: 1
            }]
        );
        assert!(app.list.searching);
        assert!(app.state().loading);

        let batman = vec![Movie::new(268, "Batman")];
        update(
            &mut app,
            Action::SearchLoaded {
                generation: 1,
                result: Ok(page(batman.clone())),
            },
        );
        assert_eq!(app.state().search_results, batman);
        assert_eq!(app.state().movies, sample_movies());
        assert_eq!(app.display_movies(), batman.as_slice());
    }

    #[test]
    fn test_clearing_query_exits_search_without_effects() {
        let mut app = started_app();
        update(&mut app, Action::QueryChanged("batman".to_string()));
        update(
            &mut app,
            Action::SearchLoaded {
                generation: 1,
                result: Ok(page(vec![Movie::new(268, "Batman")])),
            },
        );

        let effects = update(&mut app, Action::QueryChanged("   ".to_string()));
        assert!(effects.is_empty());
        assert!(!app.list.searching);
        assert!(app.state().search_results.is_empty());
        assert!(!app.state().loading);
        assert_eq!(app.display_movies(), sample_movies().as_slice());
    }

    #[test]
    fn test_clear_search_resets_query() {
        let mut app = started_app();
        update(&mut app, Action::QueryChanged("dune".to_string()));
        let effects = update(&mut app, Action::ClearSearch);
        assert!(effects.is_empty());
        assert!(app.list.query.is_empty());
        assert!(!app.list.searching);
        assert!(app.state().search_results.is_empty());
    }

    #[test]
    fn test_stale_search_result_is_dropped() {
        let mut app = started_app();
        update(&mut app, Action::QueryChanged("b".to_string()));
        update(&mut app, Action::QueryChanged("ba".to_string()));

        let fresh = vec![Movie::new(268, "Batman")];
        update(
            &mut app,
            Action::SearchLoaded {
                generation: 2,
                result: Ok(page(fresh.clone())),
            },
        );
        // The slower, older request lands last
        update(
            &mut app,
            Action::SearchLoaded {
                generation: 1,
                result: Ok(page(vec![Movie::new(1, "B Movie")])),
            },
        );
        assert_eq!(app.state().search_results, fresh);
    }

    #[test]
    fn test_search_after_clear_is_dropped() {
        let mut app = started_app();
        update(&mut app, Action::QueryChanged("batman".to_string()));
        update(&mut app, Action::ClearSearch);
        update(
            &mut app,
            Action::SearchLoaded {
                generation: 1,
                result: Ok(page(vec![Movie::new(268, "Batman")])),
            },
        );
        assert!(app.state().search_results.is_empty());
    }

    #[test]
    fn test_search_failure_sets_error() {
        let mut app = started_app();
        update(&mut app, Action::QueryChanged("batman".to_string()));
        update(
            &mut app,
            Action::SearchLoaded {
                generation: 1,
                result: Err(ApiError::Network("connection refused".to_string())),
            },
        );
        assert_eq!(
            app.state().error.as_deref(),
            Some("network error: connection refused")
        );
        assert!(!app.state().loading);

        update(&mut app, Action::DismissError);
        assert!(app.state().error.is_none());
    }

    #[test]
    fn test_end_reached_appends_next_page() {
        let mut app = started_app();
        let effects = update(&mut app, Action::EndReached);
        assert_eq!(
            effects,
            vec![Effect::FetchPopular {
                page: 2,
                append: true,
                generation: 1
            }]
        );
        assert!(app.list.loading_more);

        // Guard holds while the page is in flight
        assert!(update(&mut app, Action::EndReached).is_empty());

        let more = vec![Movie::new(100, "Next")];
        update(
            &mut app,
            Action::PopularLoaded {
                page: 2,
                append: true,
                generation: 1,
                result: Ok(page(more.clone())),
            },
        );
        let expected: Vec<Movie> = sample_movies().into_iter().chain(more).collect();
        assert_eq!(app.state().movies, expected);
        assert!(!app.list.loading_more);
    }

    #[test]
    fn test_end_reached_ignored_while_searching() {
        let mut app = started_app();
        update(&mut app, Action::QueryChanged("batman".to_string()));
        assert!(update(&mut app, Action::EndReached).is_empty());
        assert_eq!(app.list.page, 1);
    }

    #[test]
    fn test_end_reached_stops_at_last_page() {
        let mut app = started_app();
        app.list.total_pages = Some(1);
        assert!(update(&mut app, Action::EndReached).is_empty());
    }

    #[test]
    fn test_failed_page_is_retried() {
        let mut app = started_app();
        update(&mut app, Action::EndReached);
        update(
            &mut app,
            Action::PopularLoaded {
                page: 2,
                append: true,
                generation: 1,
                result: Err(ApiError::Api {
                    status: 500,
                    message: "Internal error".to_string(),
                }),
            },
        );
        assert!(app.state().error.is_some());
        assert_eq!(app.state().movies, sample_movies());
        assert!(matches!(
            update(&mut app, Action::EndReached).as_slice(),
            [Effect::FetchPopular { page: 2, .. }]
        ));
    }

    #[test]
    fn test_refresh_supersedes_in_flight_page() {
        let mut app = started_app();
        update(&mut app, Action::EndReached);
        let effects = update(&mut app, Action::Refresh);
        assert_eq!(
            effects,
            vec![Effect::FetchPopular {
                page: 1,
                append: false,
                generation: 2
            }]
        );

        let fresh = vec![Movie::new(7, "Fresh")];
        update(
            &mut app,
            Action::PopularLoaded {
                page: 1,
                append: false,
                generation: 2,
                result: Ok(page(fresh.clone())),
            },
        );
        update(
            &mut app,
            Action::PopularLoaded {
                page: 2,
                append: true,
                generation: 1,
                result: Ok(page(vec![Movie::new(8, "Stale")])),
            },
        );
        assert_eq!(app.state().movies, fresh);
    }

    #[test]
    fn test_end_reached_waits_for_refresh() {
        let mut app = started_app();
        update(&mut app, Action::Refresh);
        assert!(app.list.refreshing);
        assert!(update(&mut app, Action::EndReached).is_empty());
        assert_eq!(app.list.page, 1);

        let fresh = vec![Movie::new(100, "Fresh")];
        update(
            &mut app,
            Action::PopularLoaded {
                page: 1,
                append: false,
                generation: 2,
                result: Ok(page(fresh.clone())),
            },
        );
        assert!(!app.list.refreshing);
        assert_eq!(app.state().movies, fresh);
        assert_eq!(
            update(&mut app, Action::EndReached),
            vec![Effect::FetchPopular {
                page: 2,
                append: true,
                generation: 2
            }]
        );
    }

    #[test]
    fn test_failed_refresh_unblocks_pagination() {
        let mut app = started_app();
        update(&mut app, Action::Refresh);
        update(
            &mut app,
            Action::PopularLoaded {
                page: 1,
                append: false,
                generation: 2,
                result: Err(ApiError::Network("timed out".to_string())),
            },
        );
        assert!(!app.list.refreshing);
        assert!(!update(&mut app, Action::EndReached).is_empty());
    }

    #[test]
    fn test_total_pages_capped_at_api_limit() {
        let mut app = test_app();
        update(&mut app, Action::Start);
        update(
            &mut app,
            Action::PopularLoaded {
                page: 1,
                append: false,
                generation: 1,
                result: Ok(MoviePage {
                    page: 1,
                    results: sample_movies(),
                    total_pages: Some(48_213),
                    total_results: None,
                }),
            },
        );
        assert_eq!(app.list.total_pages, Some(MAX_POPULAR_PAGES));

        app.list.page = MAX_POPULAR_PAGES;
        assert!(update(&mut app, Action::EndReached).is_empty());
    }

    #[test]
    fn test_select_movie_navigates_and_fetches() {
        let mut app = started_app();
        let effects = update(&mut app, Action::SelectMovie(550));
        assert_eq!(
            effects,
            vec![Effect::FetchDetail {
                movie_id: 550,
                generation: 1
            }]
        );
        assert_eq!(app.route(), Route::Detail { movie_id: 550 });
        assert!(app.detail.as_ref().is_some_and(|d| d.loading));

        update(&mut app, Action::Back);
        assert_eq!(app.route(), Route::List);
    }

    #[test]
    fn test_detail_loaded_for_current_screen_only() {
        let mut app = started_app();
        update(&mut app, Action::SelectMovie(550));
        update(&mut app, Action::Back);
        update(&mut app, Action::SelectMovie(551));

        update(
            &mut app,
            Action::DetailLoaded {
                movie_id: 550,
                generation: 1,
                result: Ok(sample_detail(550)),
            },
        );
        let detail = app.detail.as_ref().unwrap();
        assert!(detail.movie.is_none());
        assert!(detail.loading);

        update(
            &mut app,
            Action::DetailLoaded {
                movie_id: 551,
                generation: 2,
                result: Ok(sample_detail(551)),
            },
        );
        let detail = app.detail.as_ref().unwrap();
        assert_eq!(detail.movie.as_ref().map(|m| m.movie.id), Some(551));
        assert!(!detail.loading);
    }

    #[test]
    fn test_detail_failure_stops_loading_and_records_error() {
        let mut app = started_app();
        update(&mut app, Action::SelectMovie(550));
        update(
            &mut app,
            Action::DetailLoaded {
                movie_id: 550,
                generation: 1,
                result: Err(ApiError::Api {
                    status: 404,
                    message: "The resource you requested could not be found.".to_string(),
                }),
            },
        );
        let detail = app.detail.as_ref().unwrap();
        assert!(!detail.loading);
        assert!(detail.error.as_deref().unwrap().contains("404"));
        // Shared error state is not used for detail failures
        assert!(app.state().error.is_none());
    }

    #[test]
    fn test_toggle_favorite_persists_post_dispatch_set() {
        let mut app = started_app();
        update(&mut app, Action::SelectMovie(550));
        assert!(update(&mut app, Action::ToggleFavorite).is_empty());

        update(
            &mut app,
            Action::DetailLoaded {
                movie_id: 550,
                generation: 1,
                result: Ok(sample_detail(550)),
            },
        );
        let effects = update(&mut app, Action::ToggleFavorite);
        assert_eq!(
            effects,
            vec![Effect::SaveFavorites(vec![sample_detail(550).summary()])]
        );
        assert!(app.is_favorite(550));

        let effects = update(&mut app, Action::ToggleFavorite);
        assert_eq!(effects, vec![Effect::SaveFavorites(Vec::new())]);
        assert!(!app.is_favorite(550));
    }

    #[test]
    fn test_toggle_from_grid_keeps_other_favorites() {
        let mut app = started_app();
        update(&mut app, Action::FavoritesLoaded(vec![Movie::new(1, "Kept")]));
        let effects = update(&mut app, Action::ToggleFavoriteMovie(Movie::new(2, "Added")));
        assert_eq!(
            effects,
            vec![Effect::SaveFavorites(vec![
                Movie::new(1, "Kept"),
                Movie::new(2, "Added")
            ])]
        );
    }

    #[test]
    fn test_save_failure_surfaces_error() {
        let mut app = started_app();
        update(
            &mut app,
            Action::FavoritesSaved(Err("permission denied".to_string())),
        );
        assert_eq!(
            app.state().error.as_deref(),
            Some("Failed to save favorites: permission denied")
        );
        update(&mut app, Action::FavoritesSaved(Ok(())));
        assert!(app.state().error.is_some());
    }

    #[test]
    fn test_quit() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), vec![Effect::Quit]);
    }
}
