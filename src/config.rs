//! Configuration management for trakt-watch.
//!
//! Values come from, in order of priority:
//! 1. Environment variables
//! 2. A `.env` file in the local data directory (`trakt-watch/.env`)
//! 3. Built-in defaults

use std::{env, path::PathBuf};

use crate::Res;

pub const DEFAULT_API_URL: &str = "https://api.trakt.tv";
pub const TRAKT_WEB_URL: &str = "https://trakt.tv";
pub const LETTERBOXD_URL: &str = "https://letterboxd.com";

/// Number of history entries shown after `watch` and by default in `recent`.
pub const DEFAULT_HISTORY_LIMIT: u32 = 10;

/// Path of the optional `.env` file.
///
/// - Linux: `~/.local/share/trakt-watch/.env`
/// - macOS: `~/Library/Application Support/trakt-watch/.env`
/// - Windows: `%LOCALAPPDATA%/trakt-watch/.env`
pub fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("trakt-watch/.env");
    path
}

/// Loads the `.env` file if there is one. Variables already set in the
/// environment keep their value.
pub async fn load_env() -> Res<()> {
    let path = env_path();
    if async_fs::metadata(&path).await.is_err() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| {
        crate::Error::validation(format!("cannot read {}: {}", path.display(), e))
    })?;
    Ok(())
}

/// Base URL of the trakt API, `TRAKT_API_URL` overrides the default.
pub fn api_url() -> String {
    env::var("TRAKT_API_URL")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

/// Session file written by the external authentication tool.
///
/// `TRAKT_SESSION_FILE` overrides the default `~/.pytrakt.json`.
pub fn session_file() -> PathBuf {
    if let Ok(path) = env::var("TRAKT_SESSION_FILE") {
        if !path.trim().is_empty() {
            return expand_home(path.trim());
        }
    }

    let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(".pytrakt.json");
    path
}

/// Resolves a leading `~` against the home directory. Neither the shell nor
/// dotenv does this for values read from `.env`.
pub fn expand_home(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some("") => "",
        Some(rest) if rest.starts_with('/') || rest.starts_with('\\') => &rest[1..],
        _ => return PathBuf::from(path),
    };

    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(path),
    }
}

pub fn user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
