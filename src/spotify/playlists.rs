use crate::{
    config,
    management::TokenManager,
    types::{SourcePlaylist, UserPlaylistsResponse},
};

/// Fetches every playlist of the authenticated user.
///
/// Pages through `/me/playlists` and keeps only entries that carry both a
/// name and an external URL (collaborative placeholders can lack either).
/// Used by the `sync_all_playlists` mode to synthesize jobs for playlists
/// that have no explicit configuration entry.
pub async fn get_all_user_playlists(
    tokens: &mut TokenManager,
    client_id: &str,
) -> Result<Vec<SourcePlaylist>, String> {
    let mut playlists: Vec<SourcePlaylist> = Vec::new();
    let mut offset: u32 = 0;

    loop {
        let token = tokens.get_valid_token(client_id).await;
        let api_url = format!(
            "{uri}/me/playlists?limit=50&offset={offset}",
            uri = config::SPOTIFY_API_URL,
            offset = offset
        );

        let page: UserPlaylistsResponse = super::get_json(&token, &api_url)
            .await
            .map_err(|e| e.to_string())?;

        if page.items.is_empty() {
            break;
        }
        let fetched = page.items.len() as u32;

        for item in page.items.into_iter().flatten() {
            let name = item.name.unwrap_or_default();
            let url = item
                .external_urls
                .and_then(|external| external.spotify)
                .unwrap_or_default();
            if !name.is_empty() && !url.is_empty() {
                playlists.push(SourcePlaylist { name, url });
            }
        }

        if page.next.is_none() {
            break;
        }
        offset += fetched;
    }

    Ok(playlists)
}
