//! # Favorites Persistence
//!
//! The favorite list lives in a single JSON file (default
//! `~/.reel/favorites.json`) holding an array of movie summaries.
//! The whole list is rewritten on every save; there are no partial updates.
//!
//! Writes use atomic rename (write `.tmp`, then `rename()`).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::Serialize;

use crate::api::Movie;

/// Returns `~/.reel/favorites.json`.
pub fn default_favorites_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".reel").join("favorites.json"))
}

/// Load the favorite list. Missing or unreadable files yield an empty list.
pub fn load_favorites(path: &Path) -> Vec<Movie> {
    if !path.exists() {
        debug!("No favorites file at {}", path.display());
        return Vec::new();
    }

    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) => {
            warn!("Failed to read favorites {}: {}", path.display(), e);
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<Movie>>(&json) {
        Ok(movies) => {
            debug!("Loaded {} favorites from {}", movies.len(), path.display());
            movies
        }
        Err(e) => {
            warn!("Favorites file {} is malformed, ignoring: {}", path.display(), e);
            Vec::new()
        }
    }
}

/// Replace the stored favorite list with `movies`.
pub fn save_favorites(path: &Path, movies: &[Movie]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    atomic_write_json(path, &movies)?;
    debug!("Saved {} favorites to {}", movies.len(), path.display());
    Ok(())
}

fn atomic_write_json<T: Serialize>(path: &Path, data: &T) -> io::Result<()> {
    let tmp_path = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}
