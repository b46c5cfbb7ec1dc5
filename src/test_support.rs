//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use crate::api::{ApiError, Genre, Movie, MovieApi, MovieDetail, MoviePage};

/// Canned API for tests that don't need real HTTP.
///
/// `popular` and `search` return `sample_movies()`, `detail` returns
/// `sample_detail(id)`. Ids listed in `failing` make `detail` fail with a 404.
#[derive(Default)]
pub struct StubApi {
    pub failing: Vec<i64>,
}

#[async_trait]
impl MovieApi for StubApi {
    async fn popular(&self, page: u32) -> Result<MoviePage, ApiError> {
        Ok(MoviePage {
            page,
            results: sample_movies(),
            total_pages: Some(3),
            total_results: Some(60),
        })
    }

    async fn search(&self, query: &str, page: u32) -> Result<MoviePage, ApiError> {
        let needle = query.to_lowercase();
        Ok(MoviePage {
            page,
            results: sample_movies()
                .into_iter()
                .filter(|m| m.title.to_lowercase().contains(&needle))
                .collect(),
            total_pages: Some(1),
            total_results: None,
        })
    }

    async fn detail(&self, movie_id: i64) -> Result<MovieDetail, ApiError> {
        if self.failing.contains(&movie_id) {
            return Err(ApiError::Api {
                status: 404,
                message: "The resource you requested could not be found.".to_string(),
            });
        }
        Ok(sample_detail(movie_id))
    }
}

pub fn sample_movies() -> Vec<Movie> {
    let mut dune = Movie::new(438631, "Dune");
    dune.poster_path = Some("/d5NXSklXo0qyIYkgV94XAgMIckC.jpg".to_string());
    dune.vote_average = Some(7.8);
    dune.release_date = Some("2021-09-15".to_string());

    let mut batman = Movie::new(414906, "The Batman");
    batman.vote_average = Some(7.7);
    batman.release_date = Some("2022-03-01".to_string());

    let mut oppenheimer = Movie::new(872585, "Oppenheimer");
    oppenheimer.vote_average = Some(8.1);
    oppenheimer.release_date = Some("2023-07-19".to_string());

    vec![dune, batman, oppenheimer, Movie::new(1, "Untitled Project")]
}

pub fn sample_detail(movie_id: i64) -> MovieDetail {
    let mut movie = Movie::new(movie_id, format!("Movie {movie_id}"));
    movie.vote_average = Some(8.4);
    movie.release_date = Some("1999-10-15".to_string());
    movie.poster_path = Some("/poster.jpg".to_string());
    MovieDetail {
        movie,
        runtime: Some(139),
        overview: "A ticking-time-bomb insomniac and a slippery soap salesman.".to_string(),
        genres: vec![
            Genre {
                id: 18,
                name: "Drama".to_string(),
            },
            Genre {
                id: 53,
                name: "Thriller".to_string(),
            },
        ],
    }
}

/// Creates a test App backed by a `StubApi`.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(
        Arc::new(StubApi::default()),
        "https://image.tmdb.org/t/p/w500".to_string(),
        PathBuf::from("favorites.json"),
    )
}
