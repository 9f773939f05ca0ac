use std::path::PathBuf;
use std::time::Duration;

use crate::{
    apple::MusicApp,
    config,
    downloader::SpotDl,
    error, info,
    management::TokenManager,
    prompt::{FixedAnswer, TerminalPrompt},
    spotify::{self, SpotifySource},
    sync::{ProbeConfig, RunConfig, run_jobs},
    types::{Settings, SourceSelector, SyncJob},
    utils, warning,
};

pub async fn sync(job_filter: Option<String>, assume_yes: bool) {
    let settings = match config::load_settings().await {
        Ok(settings) => settings,
        Err(e) => error!("{}", e),
    };

    let mut jobs = build_jobs(&settings);

    let mut token_mgr = match TokenManager::load().await {
        Ok(manager) => manager,
        Err(e) => {
            error!(
                "Failed to load token. Please run tunesync auth\n Error: {}",
                e
            );
        }
    };

    if settings.sync_all_playlists {
        extend_with_user_playlists(&mut jobs, &settings, &mut token_mgr).await;
    }

    if let Some(filter) = &job_filter {
        jobs.retain(|job| &job.name == filter);
        if jobs.is_empty() {
            error!("No configured job named '{}'", filter);
        }
    }

    if jobs.is_empty() {
        warning!("No playlists defined in the settings file.");
        return;
    }

    let source = SpotifySource::new(token_mgr, settings.spotify.client_id.clone());
    let downloader = SpotDl::new();
    let library = MusicApp::new();
    let run_config = RunConfig {
        default_limit: settings.sync_limit_default,
        add_delay: Duration::from_millis(settings.add_delay_ms),
        path_comparison: settings.path_comparison,
        probe: ProbeConfig::default(),
    };

    if assume_yes {
        run_jobs(
            &jobs,
            &source,
            &downloader,
            &library,
            &FixedAnswer(true),
            &run_config,
        )
        .await;
    } else {
        run_jobs(
            &jobs,
            &source,
            &downloader,
            &library,
            &TerminalPrompt,
            &run_config,
        )
        .await;
    }
}

fn build_jobs(settings: &Settings) -> Vec<SyncJob> {
    let mut jobs = Vec::with_capacity(settings.playlists.len());
    for entry in &settings.playlists {
        match SyncJob::from_entry(entry) {
            Ok(job) => jobs.push(job),
            Err(e) => error!("Invalid settings: {}", e),
        }
    }
    jobs
}

/// Synthesizes a job for every Spotify playlist that no configured entry
/// already covers, staged under the configured staging root.
async fn extend_with_user_playlists(
    jobs: &mut Vec<SyncJob>,
    settings: &Settings,
    tokens: &mut TokenManager,
) {
    info!("Fetching your Spotify playlists...");
    let playlists =
        match spotify::playlists::get_all_user_playlists(tokens, &settings.spotify.client_id)
            .await
        {
            Ok(playlists) => playlists,
            Err(e) => {
                warning!("Could not list your Spotify playlists: {}", e);
                return;
            }
        };

    let staging_root = settings
        .staging_root
        .as_deref()
        .map(utils::expand_tilde)
        .unwrap_or_else(default_staging_root);

    for playlist in playlists {
        let covered = jobs
            .iter()
            .any(|job| job.name == playlist.name || job.apple_playlist_name == playlist.name);
        if covered {
            continue;
        }

        jobs.push(SyncJob {
            name: playlist.name.clone(),
            source: SourceSelector::Playlist(playlist.url),
            local_dir: staging_root.join(utils::directory_slug(&playlist.name)),
            apple_playlist_name: playlist.name,
            sync_limit: None,
        });
    }
}

fn default_staging_root() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("tunesync/library");
    path
}
