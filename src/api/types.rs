use serde::{Deserialize, Serialize};

/// A movie as it appears in list endpoints (popular, search).
///
/// Upstream omits or nulls several of these fields for obscure titles,
/// so everything but `id` and `title` is optional.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Movie {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub release_date: Option<String>,
}

impl Movie {
    /// Minimal movie with only id and title, mostly useful for tests and fixtures.
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            poster_path: None,
            vote_average: None,
            release_date: None,
        }
    }

    /// Rating formatted to one decimal, e.g. `7.5`.
    pub fn rating_label(&self) -> Option<String> {
        self.vote_average.map(|v| format!("{v:.1}"))
    }

    /// Release year taken from the `YYYY-MM-DD` date. Empty dates count as missing.
    pub fn release_year(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .and_then(|d| d.split('-').next())
            .filter(|y| !y.is_empty())
    }

    /// Full poster URL, if the movie has a poster.
    pub fn poster_url(&self, image_base_url: &str) -> Option<String> {
        self.poster_path
            .as_deref()
            .map(|p| format!("{}{}", image_base_url.trim_end_matches('/'), p))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// Response of the movie detail endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MovieDetail {
    #[serde(flatten)]
    pub movie: Movie,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub genres: Vec<Genre>,
}

impl MovieDetail {
    /// The summary part of the detail record (what gets stored as a favorite).
    pub fn summary(&self) -> Movie {
        self.movie.clone()
    }

    /// Human readable release date, `Mar 14, 2024`. Falls back to the raw string.
    pub fn release_label(&self) -> Option<String> {
        let raw = self.movie.release_date.as_deref().filter(|d| !d.is_empty())?;
        match chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => Some(date.format("%b %-d, %Y").to_string()),
            Err(_) => Some(raw.to_string()),
        }
    }

    pub fn genre_names(&self) -> Vec<&str> {
        self.genres.iter().map(|g| g.name.as_str()).collect()
    }
}

/// One page of a paginated list endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MoviePage {
    #[serde(default = "first_page")]
    pub page: u32,
    pub results: Vec<Movie>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub total_results: Option<u64>,
}

fn first_page() -> u32 {
    1
}

/// Error body TMDB returns alongside non-2xx statuses.
#[derive(Deserialize, Debug)]
pub(crate) struct StatusBody {
    pub status_message: String,
}
