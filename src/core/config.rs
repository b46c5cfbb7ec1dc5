//! # Configuration
//!
//! Where Reel finds its TMDB credentials, API hosts and favorites file.
//! Each value is taken from the first source that sets it:
//! CLI flag, then env var, then `~/.reel/config.toml`, then the built-in default.
//!
//! On first run a fully commented config file is written so the available
//! keys are discoverable. `main` loads `.env` before resolving, so env vars
//! may also come from there.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::favorites::default_favorites_path;

// ============================================================================
// File Sections (every key optional)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ReelConfig {
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TmdbConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub image_base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    pub favorites_file: Option<PathBuf>,
}

/// Values given on the command line. `None` means "not specified".
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub favorites_file: Option<PathBuf>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";
const FALLBACK_FAVORITES_FILE: &str = "favorites.json";

// ============================================================================
// Resolved Settings
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Missing keys are reported when the client is built, not here.
    pub api_key: Option<String>,
    pub base_url: String,
    pub image_base_url: String,
    pub favorites_file: PathBuf,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Startup aborts on config errors; `main` returns `io::Result`.
impl From<ConfigError> for std::io::Error {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io(e) => e,
            parse @ ConfigError::Parse(_) => {
                std::io::Error::new(std::io::ErrorKind::InvalidData, parse)
            }
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.reel/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".reel").join("config.toml"))
}

/// Load config from `~/.reel/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ReelConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<ReelConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(ReelConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(ReelConfig::default());
    }

    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<ReelConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ReelConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    // Debug output would leak the API key into the log.
    debug!(
        "Config: base_url={:?} image_base_url={:?} favorites_file={:?} api_key_set={}",
        config.tmdb.base_url,
        config.tmdb.image_base_url,
        config.storage.favorites_file,
        config.tmdb.api_key.is_some()
    );
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# Reel Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [tmdb]
# api_key = "..."                                   # Or set TMDB_API_KEY env var
# base_url = "https://api.themoviedb.org/3"         # Or TMDB_BASE_URL
# image_base_url = "https://image.tmdb.org/t/p/w500" # Or TMDB_IMAGE_BASE_URL

# [storage]
# favorites_file = "/home/me/.reel/favorites.json"  # Or REEL_FAVORITES_FILE
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &ReelConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as `resolve`, with the environment lookup injected.
pub fn resolve_with_env(
    config: &ReelConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    let api_key = cli
        .api_key
        .clone()
        .or_else(|| env("TMDB_API_KEY"))
        .or_else(|| config.tmdb.api_key.clone())
        .filter(|k| !k.trim().is_empty());

    let base_url = cli
        .base_url
        .clone()
        .or_else(|| env("TMDB_BASE_URL"))
        .or_else(|| config.tmdb.base_url.clone())
        .unwrap_or_else(|| DEFAULT_TMDB_BASE_URL.to_string());

    // No CLI flag for the image host
    let image_base_url = env("TMDB_IMAGE_BASE_URL")
        .or_else(|| config.tmdb.image_base_url.clone())
        .unwrap_or_else(|| DEFAULT_IMAGE_BASE_URL.to_string());

    let favorites_file = cli
        .favorites_file
        .clone()
        .or_else(|| env("REEL_FAVORITES_FILE").map(PathBuf::from))
        .or_else(|| config.storage.favorites_file.clone())
        .or_else(default_favorites_path)
        .unwrap_or_else(|| PathBuf::from(FALLBACK_FAVORITES_FILE));

    ResolvedConfig {
        api_key,
        base_url,
        image_base_url,
        favorites_file,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with_env(&ReelConfig::default(), &CliOverrides::default(), no_env);
        assert!(resolved.api_key.is_none());
        assert_eq!(resolved.base_url, DEFAULT_TMDB_BASE_URL);
        assert_eq!(resolved.image_base_url, DEFAULT_IMAGE_BASE_URL);
        assert!(resolved.favorites_file.ends_with("favorites.json"));
    }

    #[test]
    fn test_env_overrides_file_and_cli_overrides_env() {
        let config: ReelConfig = toml::from_str(
            r#"
[tmdb]
api_key = "from-file"
base_url = "https://file.example/3"
"#,
        )
        .unwrap();
        let env: HashMap<&str, &str> = [
            ("TMDB_API_KEY", "from-env"),
            ("TMDB_BASE_URL", "https://env.example/3"),
        ]
        .into_iter()
        .collect();
        let lookup = |k: &str| env.get(k).map(|v| v.to_string());

        let resolved = resolve_with_env(&config, &CliOverrides::default(), lookup);
        assert_eq!(resolved.api_key.as_deref(), Some("from-env"));
        assert_eq!(resolved.base_url, "https://env.example/3");

        let cli = CliOverrides {
            api_key: Some("from-cli".to_string()),
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &cli, lookup);
        assert_eq!(resolved.api_key.as_deref(), Some("from-cli"));
        assert_eq!(resolved.base_url, "https://env.example/3");
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        let config = ReelConfig {
            tmdb: TmdbConfig {
                api_key: Some("   ".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert!(resolved.api_key.is_none());
    }

    #[test]
    fn test_favorites_file_precedence() {
        let config = ReelConfig {
            storage: StorageConfig {
                favorites_file: Some(PathBuf::from("/data/file.json")),
            },
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.favorites_file, PathBuf::from("/data/file.json"));

        let cli = CliOverrides {
            favorites_file: Some(PathBuf::from("/tmp/cli.json")),
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &cli, |k| {
            (k == "REEL_FAVORITES_FILE").then(|| "/env.json".to_string())
        });
        assert_eq!(resolved.favorites_file, PathBuf::from("/tmp/cli.json"));
    }

    #[test]
    fn test_sparse_toml_parses() {
        let config: ReelConfig = toml::from_str(
            r#"
[tmdb]
image_base_url = "https://image.tmdb.org/t/p/w342"
"#,
        )
        .unwrap();
        assert!(config.tmdb.api_key.is_none());
        assert!(config.storage.favorites_file.is_none());
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.image_base_url, "https://image.tmdb.org/t/p/w342");
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[tmdb\napi_key = ").unwrap();
        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_malformed_file_aborts_startup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[storage]\nfavorites_file = 42\n").unwrap();
        let err: std::io::Error = load_config_from(&path).unwrap_err().into();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
        assert!(err.to_string().starts_with("config parse error"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_config_from(&dir.path().join("absent.toml")),
            Err(ConfigError::Io(_))
        ));
    }
}
