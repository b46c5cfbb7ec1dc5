//! # Movie API
//!
//! Typed access to the upstream movie-metadata service.

pub mod client;
pub mod types;

pub use client::{ApiError, MovieApi, TmdbClient};
pub use types::{Genre, Movie, MovieDetail, MoviePage};
