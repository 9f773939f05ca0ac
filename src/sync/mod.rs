//! # Sync Module
//!
//! The reconciliation core: everything that decides what exists locally,
//! what the Apple Music library already tracks, what is missing, and what
//! must be added.
//!
//! ## Components
//!
//! - [`scan`] - staging-directory audio scan
//! - [`diff`] - pure add-set computation
//! - [`probe`] - settings-verification probe run before each batch
//! - the job orchestrator in this module, driving one playlist through
//!   check → download → scan → diff → verify → add
//!
//! ## Capability seams
//!
//! The orchestrator only sees traits: [`TrackSource`] (the streaming
//! catalog), [`TrackDownloader`] (the external download tool),
//! [`MediaLibrary`] (the destination application) and
//! [`crate::prompt::DecisionProvider`] (operator confirmation). Production
//! wiring lives in `cli::sync`; tests substitute in-memory fakes.
//!
//! ## Error policy
//!
//! Every failure while processing one job is a [`JobError`] reported by
//! [`run_jobs`], which always continues with the next job. Individual file
//! additions that fail inside a batch are warnings, not job failures.
//! Nothing in this module terminates the process.

pub mod diff;
pub mod probe;
pub mod scan;

pub use diff::compute_add_set;
pub use probe::{ProbeConfig, ProbeError, verify_library_settings};
pub use scan::scan_audio_files;

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::time::sleep;

use crate::apple::bridge::BridgeError;
use crate::prompt::DecisionProvider;
use crate::types::{PathComparison, SyncJob, TrackRecord};
use crate::{info, success, utils, warning};

/// Ordered sequence of downloadable track identifiers for a job, capped at
/// `limit` when given.
pub trait TrackSource {
    async fn track_urls(&self, job: &SyncJob, limit: Option<u32>)
    -> Result<Vec<String>, String>;
}

/// Ensures audio files for the given identifiers exist in `dir`. Safe to
/// re-invoke; identifiers already downloaded are skipped by the tool.
pub trait TrackDownloader {
    async fn download(&self, urls: &[String], dir: &Path) -> Result<(), String>;
}

/// The destination media library, reduced to the four operations the
/// reconciliation core needs.
pub trait MediaLibrary {
    async fn playlist_exists(&self, name: &str) -> bool;
    async fn create_playlist(&self, name: &str) -> bool;
    async fn playlist_tracks(&self, name: &str) -> Result<Vec<TrackRecord>, BridgeError>;
    async fn add_file(&self, path: &Path, playlist: &str) -> Result<(), BridgeError>;
}

/// Run-wide knobs shared by every job.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Download cap applied when a job has no `sync_limit` of its own.
    pub default_limit: u32,
    /// Pause between additions; rapid-fire adds are known to make the Music
    /// indexer misreport locations.
    pub add_delay: Duration,
    pub path_comparison: PathComparison,
    pub probe: ProbeConfig,
}

#[derive(Debug)]
pub enum JobReport {
    UpToDate { local_files: usize },
    Added { added: usize, attempted: usize },
}

#[derive(Debug)]
pub enum JobError {
    Staging(std::io::Error),
    CreationDeclined,
    CreationFailed,
    EmptySource,
    Source(String),
    Enumeration(BridgeError),
    Probe(ProbeError),
}

impl fmt::Display for JobError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobError::Staging(e) => write!(f, "cannot prepare the staging directory: {}", e),
            JobError::CreationDeclined => {
                write!(f, "target playlist is missing and creation was declined")
            }
            JobError::CreationFailed => write!(f, "failed to create the Apple Music playlist"),
            JobError::EmptySource => write!(f, "no tracks found in the Spotify source"),
            JobError::Source(msg) => write!(f, "fetching tracks from Spotify failed: {}", msg),
            JobError::Enumeration(e) => {
                write!(f, "enumerating the Apple Music playlist failed: {}", e)
            }
            JobError::Probe(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for JobError {}

impl From<ProbeError> for JobError {
    fn from(err: ProbeError) -> Self {
        JobError::Probe(err)
    }
}

/// Adds each path to the playlist one by one, counting confirmed successes.
///
/// The Music scripting surface has no batch add, so this is a sequential
/// loop with the configured delay between items. A failed item is logged
/// and skipped; the batch keeps going.
pub async fn add_files<L: MediaLibrary>(
    library: &L,
    paths: &[PathBuf],
    playlist: &str,
    delay: Duration,
) -> usize {
    if paths.is_empty() {
        return 0;
    }

    let pb = ProgressBar::new(paths.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{bar:40.blue} {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=> "),
    );

    let mut added = 0;
    for path in paths {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        pb.set_message(file_name.clone());

        match library.add_file(path, playlist).await {
            Ok(()) => added += 1,
            Err(e) => {
                pb.suspend(|| warning!("Failed to add to Apple Music: {} ({})", file_name, e));
            }
        }

        pb.inc(1);
        sleep(delay).await;
    }

    pb.finish_and_clear();
    added
}

/// Drives one sync job through the full sequence. Strictly sequential, no
/// backtracking; the first failed step aborts this job only.
pub async fn process_job<S, D, L, P>(
    job: &SyncJob,
    source: &S,
    downloader: &D,
    library: &L,
    decisions: &P,
    config: &RunConfig,
) -> Result<JobReport, JobError>
where
    S: TrackSource,
    D: TrackDownloader,
    L: MediaLibrary,
    P: DecisionProvider,
{
    if !library.playlist_exists(&job.apple_playlist_name).await {
        warning!(
            "Apple Music playlist '{}' does not exist.",
            job.apple_playlist_name
        );
        if !decisions.confirm(&format!(
            "Create playlist '{}' in Apple Music?",
            job.apple_playlist_name
        )) {
            return Err(JobError::CreationDeclined);
        }
        if !library.create_playlist(&job.apple_playlist_name).await {
            return Err(JobError::CreationFailed);
        }
        success!("Created playlist '{}'", job.apple_playlist_name);
    }

    let local_dir = utils::ensure_dir(&job.local_dir)
        .await
        .map_err(JobError::Staging)?;

    // A fresh staging directory is the one case where pulling the whole
    // source can be worth the cost; otherwise the configured cap applies.
    let mut limit = Some(job.sync_limit.unwrap_or(config.default_limit));
    if utils::dir_is_empty(&local_dir) {
        info!("Local directory {} is empty.", local_dir.display());
        if decisions
            .confirm("Download ALL songs from the Spotify source? (No = use the configured limit)")
        {
            info!("Preparing to download the entire source...");
            limit = None;
        }
    }

    info!("Fetching track list from Spotify...");
    let track_urls = source
        .track_urls(job, limit)
        .await
        .map_err(JobError::Source)?;
    if track_urls.is_empty() {
        return Err(JobError::EmptySource);
    }

    if let Err(e) = downloader.download(&track_urls, &local_dir).await {
        warning!("Download step reported a problem: {}", e);
    }

    info!("Syncing local files to Apple Music...");
    let local_files = scan::scan_audio_files(&local_dir);
    let records = library
        .playlist_tracks(&job.apple_playlist_name)
        .await
        .map_err(JobError::Enumeration)?;
    let add_set = diff::compute_add_set(&local_files, &records, config.path_comparison);

    let Some((first, rest)) = add_set.split_first() else {
        return Ok(JobReport::UpToDate {
            local_files: local_files.len(),
        });
    };

    info!("Found {} songs to add to Apple Music.", add_set.len());

    verify_library_settings(
        library,
        &job.apple_playlist_name,
        first,
        config.path_comparison,
        config.add_delay,
        &config.probe,
    )
    .await?;

    let added_rest = add_files(library, rest, &job.apple_playlist_name, config.add_delay).await;
    Ok(JobReport::Added {
        added: added_rest + 1,
        attempted: add_set.len(),
    })
}

/// Runs every job in configured order. This loop is the run-level backstop:
/// a failed job is reported and the run moves on.
pub async fn run_jobs<S, D, L, P>(
    jobs: &[SyncJob],
    source: &S,
    downloader: &D,
    library: &L,
    decisions: &P,
    config: &RunConfig,
) where
    S: TrackSource,
    D: TrackDownloader,
    L: MediaLibrary,
    P: DecisionProvider,
{
    for job in jobs {
        info!("Processing: {}", job.name);
        match process_job(job, source, downloader, library, decisions, config).await {
            Ok(JobReport::UpToDate { local_files }) => success!(
                "'{}' is already up to date ({} local files tracked).",
                job.apple_playlist_name,
                local_files
            ),
            Ok(JobReport::Added { added, attempted }) => {
                if added == attempted {
                    success!(
                        "Successfully added {} songs to '{}'.",
                        added,
                        job.apple_playlist_name
                    );
                } else {
                    warning!(
                        "Added {} of {} songs to '{}'; the rest failed and were skipped.",
                        added,
                        attempted,
                        job.apple_playlist_name
                    );
                }
            }
            Err(e) => crate::failure!("Job '{}' aborted: {}", job.name, e),
        }
    }

    success!("All sync jobs completed.");
}
