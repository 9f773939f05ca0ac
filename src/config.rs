//! Configuration management for the playlist sync tool.
//!
//! This module handles loading the settings document and optional environment
//! overrides. Configuration follows a hierarchical approach:
//! 1. Environment variables (highest priority, e.g. `SPOTIFY_CLIENT_ID`)
//! 2. `.env` file in the local data directory
//! 3. The `settings.json` document in the platform config directory
//!
//! A missing or unparsable settings document is a fatal error: no sync job
//! runs without a valid configuration.

use std::{env, path::PathBuf};

use crate::types::Settings;

/// Spotify OAuth authorization endpoint.
pub const SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/authorize";

/// Spotify OAuth token exchange endpoint.
pub const SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Spotify Web API base URL.
pub const SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from a `.env` file located in the platform-specific
/// local data directory under `tunesync/.env`. This allows users to keep the
/// Spotify client id out of the settings document.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/tunesync/.env`
/// - macOS: `~/Library/Application Support/tunesync/.env`
/// - Windows: `%LOCALAPPDATA%/tunesync/.env`
///
/// # Returns
///
/// Returns `Ok(())` when the directory exists; a missing `.env` file is not
/// an error since all values can live in the settings document instead.
///
/// # Errors
///
/// This function will return an error if the parent directory cannot be
/// created.
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("tunesync/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Returns the path of the settings document.
///
/// The `TUNESYNC_SETTINGS` environment variable overrides the default
/// location in the platform config directory:
/// - Linux: `~/.config/tunesync/settings.json`
/// - macOS: `~/Library/Application Support/tunesync/settings.json`
/// - Windows: `%APPDATA%/tunesync/settings.json`
pub fn settings_path() -> PathBuf {
    if let Ok(path) = env::var("TUNESYNC_SETTINGS") {
        return PathBuf::from(path);
    }

    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("tunesync/settings.json");
    path
}

/// Loads and parses the settings document.
///
/// Applies the `SPOTIFY_CLIENT_ID` environment override after parsing, so a
/// `.env` file can supply the credential while the document carries the sync
/// jobs.
///
/// # Errors
///
/// Returns a descriptive error string when the document is missing or not
/// valid JSON. Callers at the CLI layer treat both as fatal.
pub async fn load_settings() -> Result<Settings, String> {
    let path = settings_path();
    let content = async_fs::read_to_string(&path).await.map_err(|e| {
        format!(
            "cannot read settings file at {path}: {e}\nCopy settings.example.json there to get started.",
            path = path.display()
        )
    })?;

    let mut settings: Settings = serde_json::from_str(&content)
        .map_err(|e| format!("cannot parse settings file at {}: {}", path.display(), e))?;

    if let Ok(client_id) = env::var("SPOTIFY_CLIENT_ID") {
        settings.spotify.client_id = client_id;
    }

    Ok(settings)
}
