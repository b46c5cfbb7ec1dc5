//! TMDB REST client.
//!
//! Three read-only endpoints behind the `MovieApi` trait. The credential goes
//! in the `api_key` query parameter on every request. No retries, no timeouts
//! beyond reqwest's defaults, no caching.

use std::fmt;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;

use super::types::{MovieDetail, MoviePage, StatusBody};

/// Errors that can occur while talking to the movie API.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Client misconfigured (missing API key, bad base URL).
    Config(String),
    /// Network-level failure (DNS, connection refused, TLS).
    Network(String),
    /// API answered with a non-success status.
    Api { status: u16, message: String },
    /// Body was not the JSON we expected.
    Parse(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Config(msg) => write!(f, "config error: {msg}"),
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

#[async_trait]
pub trait MovieApi: Send + Sync {
    /// Ranked list of popular movies, 1-based `page`.
    async fn popular(&self, page: u32) -> Result<MoviePage, ApiError>;

    /// Free-text title search.
    async fn search(&self, query: &str, page: u32) -> Result<MoviePage, ApiError>;

    async fn detail(&self, movie_id: i64) -> Result<MovieDetail, ApiError>;
}

#[derive(Debug)]
pub struct TmdbClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl TmdbClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, ApiError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ApiError::Config(
                "TMDB API key is not set (config file, TMDB_API_KEY env var, or --api-key)"
                    .to_string(),
            ));
        }
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ApiError::Config("TMDB base URL is empty".to_string()));
        }

        Ok(Self {
            base_url,
            api_key,
            client: reqwest::Client::new(),
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {} params={:?}", url, params);

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        debug!("TMDB response status: {}", status);

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("TMDB API error: {} - {}", status.as_u16(), body);
            let message = serde_json::from_str::<StatusBody>(&body)
                .map(|b| b.status_message)
                .unwrap_or(body);
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| {
            warn!("Failed to parse TMDB response from {}: {}", path, e);
            ApiError::Parse(e.to_string())
        })
    }
}

#[async_trait]
impl MovieApi for TmdbClient {
    async fn popular(&self, page: u32) -> Result<MoviePage, ApiError> {
        info!("Fetching popular movies, page {}", page);
        self.get("/movie/popular", &[("page", page.to_string())])
            .await
    }

    async fn search(&self, query: &str, page: u32) -> Result<MoviePage, ApiError> {
        info!("Searching movies: {:?} (page {})", query, page);
        self.get(
            "/search/movie",
            &[("query", query.to_string()), ("page", page.to_string())],
        )
        .await
    }

    async fn detail(&self, movie_id: i64) -> Result<MovieDetail, ApiError> {
        info!("Fetching movie detail {}", movie_id);
        self.get(&format!("/movie/{movie_id}"), &[]).await
    }
}
