//! # Apple Music Adapter
//!
//! This module is the only place that talks to the Apple Music application.
//! All queries and mutations go through the osascript bridge: a script is
//! rendered, executed, and its textual response parsed by the strict decoder.
//!
//! Four operations cover everything the reconciliation core needs:
//!
//! - playlist existence check (soft-false on bridge errors)
//! - playlist creation
//! - track enumeration with on-disk locations
//! - single-file addition (the Music scripting surface has no batch add)
//!
//! Track enumeration distinguishes three location states and preserves the
//! raw location text, because losing that distinction makes the
//! copy-versus-reference failure mode (see [`crate::sync::probe`])
//! impossible to troubleshoot from the console output.
//!
//! The adapter is deliberately safe to call out of order: enumerating a
//! playlist that does not exist logs a warning and returns an empty
//! sequence instead of failing, even though the orchestrator always checks
//! existence first.

pub mod bridge;
pub mod decoder;

use std::path::Path;

use crate::{
    sync::MediaLibrary,
    types::{PlaylistSummary, TrackRecord},
    utils, warning,
};
use self::bridge::BridgeError;

/// Response sentinel for enumeration against a playlist the Music library
/// does not know.
const PLAYLIST_ABSENT: &str = "absent";

/// Adapter for the local Apple Music application.
pub struct MusicApp;

impl MusicApp {
    pub fn new() -> Self {
        MusicApp
    }

    /// Lists every user playlist with its track count. Diagnostic surface,
    /// not part of the sync path.
    pub async fn playlist_summaries(&self) -> Result<Vec<PlaylistSummary>, String> {
        let script = r#"tell application "Music"
	set payload to "" & (count of user playlists)
	repeat with p in user playlists
		set payload to payload & ":::" & (get name of p) & "|||" & (count of tracks of p)
	end repeat
	return payload
end tell"#;

        let output = bridge::run_osascript(script)
            .await
            .map_err(|e| e.to_string())?;
        decoder::decode_playlist_summaries(&output).map_err(|e| e.to_string())
    }
}

impl Default for MusicApp {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaLibrary for MusicApp {
    async fn playlist_exists(&self, name: &str) -> bool {
        let script = format!(
            r#"tell application "Music" to return exists user playlist "{}""#,
            utils::escape_applescript(name)
        );

        match bridge::run_osascript(&script).await {
            Ok(output) => output == "true",
            Err(e) => {
                warning!("Playlist existence check failed: {}", e);
                false
            }
        }
    }

    async fn create_playlist(&self, name: &str) -> bool {
        let script = format!(
            r#"tell application "Music" to make new user playlist with properties {{name:"{}"}}"#,
            utils::escape_applescript(name)
        );

        bridge::run_osascript(&script).await.is_ok()
    }

    async fn playlist_tracks(&self, name: &str) -> Result<Vec<TrackRecord>, BridgeError> {
        let escaped = utils::escape_applescript(name);
        let script = format!(
            r#"tell application "Music"
	if not (exists user playlist "{name}") then return "{absent}"
	set payload to "" & (count of tracks of user playlist "{name}")
	repeat with t in (get tracks of user playlist "{name}")
		set payload to payload & ":::" & (get name of t) & "|||" & (get artist of t)
		try
			set loc to (get location of t)
			if loc is missing value then
				set payload to payload & "|||missing|||"
			else
				set payload to payload & "|||ok|||" & (POSIX path of loc)
			end if
		on error errText
			set payload to payload & "|||error|||" & errText
		end try
	end repeat
	return payload
end tell"#,
            name = escaped,
            absent = PLAYLIST_ABSENT,
        );

        let output = bridge::run_osascript(&script).await?;
        if output == PLAYLIST_ABSENT {
            warning!("Apple Music playlist '{}' does not exist; treating as empty", name);
            return Ok(Vec::new());
        }

        decoder::decode_track_records(&output)
            .map_err(|e| BridgeError::Script(format!("undecodable enumeration response: {}", e)))
    }

    async fn add_file(&self, path: &Path, playlist: &str) -> Result<(), BridgeError> {
        let script = format!(
            r#"tell application "Music"
	add (POSIX file "{path}") to user playlist "{playlist}"
end tell"#,
            path = utils::escape_applescript(&path.to_string_lossy()),
            playlist = utils::escape_applescript(playlist),
        );

        bridge::run_osascript(&script).await.map(|_| ())
    }
}
