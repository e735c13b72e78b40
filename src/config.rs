//! Configuration management for Weekly Releases.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory. Every value has a default, so the tool
//! runs without any configuration:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults

use std::{env, path::PathBuf};

/// Directory name used below the platform data and cache directories.
pub const APP_DIR: &str = "weekly-releases";

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The file lives at:
/// - Linux: `~/.local/share/weekly-releases/.env`
/// - macOS: `~/Library/Application Support/weekly-releases/.env`
/// - Windows: `%LOCALAPPDATA%/weekly-releases/.env`
///
/// A missing file is not an error. Variables already set in the environment
/// win over the file.
///
/// # Errors
///
/// Fails if the directory cannot be created or the file exists but cannot be
/// parsed.
pub async fn load_env() -> Result<(), String> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| e.to_string())
}

pub fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path.push(".env");
    path
}

/// Returns the Spotify Web API base URL.
///
/// Read from `SPOTIFY_API_URL`, defaults to `https://api.spotify.com/v1`.
pub fn api_url() -> String {
    env::var("SPOTIFY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

/// Returns the directory of the response cache.
///
/// Read from `WEEKLY_RELEASES_CACHE_DIR`, defaults to `weekly-releases` below
/// the platform cache directory.
pub fn cache_dir() -> PathBuf {
    match env::var("WEEKLY_RELEASES_CACHE_DIR") {
        Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
        _ => dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from(".cache"))
            .join(APP_DIR),
    }
}

/// Returns how often a rate limited request is retried.
///
/// Read from `WEEKLY_RELEASES_MAX_RETRIES`. Unset or unparseable means
/// requests are retried for as long as the API keeps asking to back off.
pub fn max_rate_limit_retries() -> Option<u32> {
    env::var("WEEKLY_RELEASES_MAX_RETRIES")
        .ok()
        .and_then(|v| v.trim().parse::<u32>().ok())
}
