use tabled::Table;

use crate::{apple::MusicApp, types::PlaylistTableRow, warning};

/// Prints every user playlist the Music library reports, with track counts.
/// Useful for checking what the sync would be talking to before running it.
pub async fn playlists() {
    let library = MusicApp::new();

    match library.playlist_summaries().await {
        Ok(summaries) => {
            if summaries.is_empty() {
                warning!("The Music library has no user playlists.");
                return;
            }

            let rows: Vec<PlaylistTableRow> = summaries
                .into_iter()
                .map(|summary| PlaylistTableRow {
                    name: summary.name,
                    tracks: summary.tracks,
                })
                .collect();

            println!("{}", Table::new(rows));
        }
        Err(e) => warning!("Failed to list Apple Music playlists: {}", e),
    }
}
