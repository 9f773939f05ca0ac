use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub spotify: SpotifySettings,
    #[serde(default = "default_sync_limit")]
    pub sync_limit_default: u32,
    #[serde(default)]
    pub sync_all_playlists: bool,
    #[serde(default)]
    pub staging_root: Option<String>,
    #[serde(default = "default_add_delay_ms")]
    pub add_delay_ms: u64,
    #[serde(default)]
    pub path_comparison: PathComparison,
    #[serde(default)]
    pub playlists: Vec<PlaylistEntry>,
}

fn default_sync_limit() -> u32 {
    50
}

fn default_add_delay_ms() -> u64 {
    300
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifySettings {
    pub client_id: String,
    pub redirect_uri: String,
    pub scope: String,
}

/// How two file paths are decided to denote the same track.
///
/// `CaseInsensitive` matches the default Apple Music environment (APFS is
/// case-preserving but case-insensitive). `Exact` is for case-sensitive
/// filesystems where folding would under-match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PathComparison {
    #[default]
    CaseInsensitive,
    Exact,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SourceKind,
    #[serde(default)]
    pub spotify_playlist_url: Option<String>,
    pub local_dir: String,
    pub apple_playlist_name: String,
    #[serde(default)]
    pub sync_limit: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Playlist,
    SavedTracks,
}

/// One configured unit of sync work, immutable for the run.
#[derive(Debug, Clone)]
pub struct SyncJob {
    pub name: String,
    pub source: SourceSelector,
    pub local_dir: PathBuf,
    pub apple_playlist_name: String,
    pub sync_limit: Option<u32>,
}

#[derive(Debug, Clone)]
pub enum SourceSelector {
    Playlist(String),
    SavedTracks,
}

impl SyncJob {
    /// Builds a runtime job from its configuration record. A `playlist`
    /// entry without a source URL is a configuration error.
    pub fn from_entry(entry: &PlaylistEntry) -> Result<Self, String> {
        let source = match entry.kind {
            SourceKind::Playlist => match &entry.spotify_playlist_url {
                Some(url) => SourceSelector::Playlist(url.clone()),
                None => {
                    return Err(format!(
                        "playlist entry '{}' has type 'playlist' but no spotify_playlist_url",
                        entry.name
                    ));
                }
            },
            SourceKind::SavedTracks => SourceSelector::SavedTracks,
        };

        Ok(SyncJob {
            name: entry.name.clone(),
            source,
            local_dir: crate::utils::expand_tilde(&entry.local_dir),
            apple_playlist_name: entry.apple_playlist_name.clone(),
            sync_limit: entry.sync_limit,
        })
    }
}

/// A track as reported by the Apple Music library, rebuilt fresh on every
/// enumeration. `resolved_path` is absent for cloud-only or dead entries;
/// `raw_location` keeps the bridge's original location field for
/// troubleshooting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRecord {
    pub name: String,
    pub artist: String,
    pub resolved_path: Option<PathBuf>,
    pub raw_location: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistSummary {
    pub name: String,
    pub tracks: u64,
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    pub name: String,
    pub tracks: u64,
}

#[derive(Tabled)]
pub struct ProbeDumpRow {
    pub name: String,
    pub artist: String,
    pub location: String,
    pub normalized: String,
    pub diagnostic: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackObject {
    pub external_urls: Option<ExternalUrls>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<TrackObject>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItemsResponse {
    pub items: Vec<PlaylistItem>,
    pub next: Option<String>,
    pub total: Option<u64>,
}

/// A playlist of the authenticated Spotify user, reduced to what job
/// synthesis needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePlaylist {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPlaylist {
    pub name: Option<String>,
    pub external_urls: Option<ExternalUrls>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPlaylistsResponse {
    pub items: Vec<Option<UserPlaylist>>,
    pub next: Option<String>,
}
