//! # Spotify Integration Module
//!
//! This module implements the Spotify Web API surface the sync tool needs:
//! OAuth 2.0 PKCE authentication and the read-only catalog queries that feed
//! the reconciliation engine. It is the production implementation of the
//! [`crate::sync::TrackSource`] capability.
//!
//! ## Submodules
//!
//! - [`auth`] - the complete PKCE flow: verifier/challenge generation,
//!   local callback server, browser hand-off, token persistence
//! - [`tracks`] - playlist items and saved-tracks pages
//! - [`playlists`] - enumeration of the user's playlists (used by
//!   `sync_all_playlists`)
//!
//! ## Request behavior
//!
//! All requests go through one rate-limit aware helper: 429 responses are
//! retried after the `Retry-After` delay (with a warning for excessive
//! pauses), 502 responses are retried after a fixed pause, and every other
//! error status is propagated to the caller. Access tokens are refreshed
//! proactively by [`crate::management::TokenManager`] before each page.
//!
//! ## Error Types
//!
//! - **`reqwest::Error`** - HTTP client errors, network issues, API errors
//! - **`String`** - authentication and token management errors

pub mod auth;
pub mod playlists;
pub mod tracks;

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tokio::time::sleep;

use crate::management::TokenManager;
use crate::sync::TrackSource;
use crate::types::{SourceSelector, SyncJob};
use crate::{utils, warning};

/// Page size for catalog requests; the Web API caps list endpoints at 50.
const PAGE_SIZE: u32 = 50;

pub(crate) async fn get_json<T: DeserializeOwned>(
    token: &str,
    api_url: &str,
) -> Result<T, reqwest::Error> {
    loop {
        let client = Client::new();
        let response = client.get(api_url).bearer_auth(token).send().await?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(2);
            if retry_after > 120 {
                warning!("Spotify rate limit asks for a {}s pause; waiting.", retry_after);
            }
            sleep(Duration::from_secs(retry_after)).await;
            continue;
        }

        if response.status() == StatusCode::BAD_GATEWAY {
            sleep(Duration::from_secs(10)).await;
            continue;
        }

        let response = response.error_for_status()?;
        return response.json::<T>().await;
    }
}

/// Production [`TrackSource`]: resolves a job's source selector into an
/// ordered list of open.spotify.com track URLs, one page at a time.
pub struct SpotifySource {
    tokens: Mutex<TokenManager>,
    client_id: String,
}

impl SpotifySource {
    pub fn new(tokens: TokenManager, client_id: String) -> Self {
        SpotifySource {
            tokens: Mutex::new(tokens),
            client_id,
        }
    }

    async fn token(&self) -> String {
        self.tokens.lock().await.get_valid_token(&self.client_id).await
    }
}

impl TrackSource for SpotifySource {
    async fn track_urls(
        &self,
        job: &SyncJob,
        limit: Option<u32>,
    ) -> Result<Vec<String>, String> {
        let playlist_id = match &job.source {
            SourceSelector::Playlist(url) => Some(
                utils::playlist_id_from_url(url)
                    .ok_or_else(|| format!("'{}' is not a Spotify playlist URL or id", url))?,
            ),
            SourceSelector::SavedTracks => None,
        };

        let page_size = match limit {
            Some(cap) => cap.clamp(1, PAGE_SIZE),
            None => PAGE_SIZE,
        };

        let mut urls: Vec<String> = Vec::new();
        let mut offset: u32 = 0;

        loop {
            let token = self.token().await;
            let page = match &playlist_id {
                Some(id) => tracks::playlist_items(&token, id, page_size, offset).await,
                None => tracks::saved_tracks(&token, page_size, offset).await,
            }
            .map_err(|e| e.to_string())?;

            if page.items.is_empty() {
                break;
            }
            let fetched = page.items.len() as u32;

            // Local-file and market-withdrawn entries come back without a
            // track object or without external URLs; skip them.
            for item in &page.items {
                if let Some(track) = &item.track {
                    if let Some(external) = &track.external_urls {
                        if let Some(url) = &external.spotify {
                            urls.push(url.clone());
                        }
                    }
                }
            }

            if let Some(cap) = limit {
                if urls.len() as u32 >= cap {
                    urls.truncate(cap as usize);
                    break;
                }
            }

            if page.next.is_none() {
                break;
            }
            offset += fetched;
        }

        Ok(urls)
    }
}
