use crate::{config, types::PlaylistItemsResponse};

/// Retrieves one page of a playlist's items from the Spotify Web API.
///
/// Uses the `/playlists/{id}/tracks` endpoint with `limit`/`offset`
/// pagination. Rate limiting and gateway hiccups are handled by the shared
/// request helper; other failures are propagated.
pub async fn playlist_items(
    token: &str,
    playlist_id: &str,
    limit: u32,
    offset: u32,
) -> Result<PlaylistItemsResponse, reqwest::Error> {
    let api_url = format!(
        "{uri}/playlists/{id}/tracks?limit={limit}&offset={offset}",
        uri = config::SPOTIFY_API_URL,
        id = playlist_id,
        limit = limit,
        offset = offset
    );

    super::get_json(token, &api_url).await
}

/// Retrieves one page of the user's saved tracks ("Liked Songs").
///
/// The `/me/tracks` endpoint returns the same item shape as playlist
/// enumeration, so both share a response type.
pub async fn saved_tracks(
    token: &str,
    limit: u32,
    offset: u32,
) -> Result<PlaylistItemsResponse, reqwest::Error> {
    let api_url = format!(
        "{uri}/me/tracks?limit={limit}&offset={offset}",
        uri = config::SPOTIFY_API_URL,
        limit = limit,
        offset = offset
    );

    super::get_json(token, &api_url).await
}
