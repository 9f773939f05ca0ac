use std::path::{Path, PathBuf};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::types::PathComparison;

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Audio container types recognized in the staging directory.
pub const AUDIO_EXTENSIONS: [&str; 4] = ["mp3", "m4a", "opus", "flac"];

pub fn is_audio_file(path: &Path) -> bool {
    match path.extension() {
        Some(ext) => {
            let ext = ext.to_string_lossy().to_lowercase();
            AUDIO_EXTENSIONS.contains(&ext.as_str())
        }
        None => false,
    }
}

/// Canonical comparison form of a path. Two paths denote the same track iff
/// their normalized forms are byte-equal.
pub fn normalize_path(path: &Path, policy: PathComparison) -> String {
    let raw = path.to_string_lossy();
    match policy {
        PathComparison::CaseInsensitive => raw.to_lowercase(),
        PathComparison::Exact => raw.into_owned(),
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        return dirs::home_dir().unwrap_or_else(|| PathBuf::from("~"));
    }

    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(mut home) = dirs::home_dir() {
            home.push(rest);
            return home;
        }
    }

    PathBuf::from(path)
}

/// Creates the directory if absent and returns its absolute form.
pub async fn ensure_dir(path: &Path) -> Result<PathBuf, std::io::Error> {
    async_fs::create_dir_all(path).await?;
    std::path::absolute(path)
}

/// True when the directory holds no entries at all, audio or otherwise.
/// Unreadable directories count as empty.
pub fn dir_is_empty(path: &Path) -> bool {
    match std::fs::read_dir(path) {
        Ok(mut entries) => entries.next().is_none(),
        Err(_) => true,
    }
}

/// Escapes a string for inclusion inside a double-quoted AppleScript
/// literal.
pub fn escape_applescript(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Extracts the playlist id from an open.spotify.com playlist URL. Bare ids
/// pass through unchanged.
pub fn playlist_id_from_url(url: &str) -> Option<String> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return None;
    }

    let id = match trimmed.find("playlist/") {
        Some(pos) => {
            let rest = &trimmed[pos + "playlist/".len()..];
            rest.split(['?', '/']).next().unwrap_or("")
        }
        None => trimmed,
    };

    if !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric()) {
        Some(id.to_string())
    } else {
        None
    }
}

/// Derives the bind address for the local callback server from the
/// configured redirect URI, e.g. `http://127.0.0.1:9172/callback` →
/// `127.0.0.1:9172`. The URI must carry an explicit port.
pub fn callback_bind_addr(redirect_uri: &str) -> Option<String> {
    let without_scheme = match redirect_uri.find("://") {
        Some(pos) => &redirect_uri[pos + 3..],
        None => redirect_uri,
    };

    let authority = without_scheme.split('/').next().unwrap_or("");
    let (host, port) = authority.rsplit_once(':')?;
    if host.is_empty() || port.is_empty() || !port.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    Some(authority.to_string())
}

/// Turns a playlist name into a filesystem-friendly staging directory name.
pub fn directory_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash && !slug.is_empty() {
            slug.push('-');
            last_dash = true;
        }
    }

    let slug = slug.trim_end_matches('-').to_string();
    if slug.is_empty() { "playlist".to_string() } else { slug }
}
