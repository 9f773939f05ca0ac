use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use tempfile::TempDir;
use tunesync::apple::bridge::BridgeError;
use tunesync::prompt::FixedAnswer;
use tunesync::sync::{
    JobError, JobReport, MediaLibrary, ProbeConfig, ProbeError, RunConfig, TrackDownloader,
    TrackSource, process_job,
};
use tunesync::types::{PathComparison, SourceSelector, SyncJob, TrackRecord};

// --- fakes -----------------------------------------------------------------

struct FakeSource {
    urls: Vec<String>,
    calls: Mutex<Vec<Option<u32>>>,
}

impl FakeSource {
    fn with_tracks(count: usize) -> Self {
        FakeSource {
            urls: (0..count)
                .map(|i| format!("https://open.spotify.com/track/{:022}", i))
                .collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn requested_limits(&self) -> Vec<Option<u32>> {
        self.calls.lock().unwrap().clone()
    }
}

impl TrackSource for FakeSource {
    async fn track_urls(
        &self,
        _job: &SyncJob,
        limit: Option<u32>,
    ) -> Result<Vec<String>, String> {
        self.calls.lock().unwrap().push(limit);
        let mut urls = self.urls.clone();
        if let Some(cap) = limit {
            urls.truncate(cap as usize);
        }
        Ok(urls)
    }
}

struct FakeDownloader {
    /// When set, writes one staged audio file per requested identifier.
    materialize: bool,
    calls: Mutex<Vec<usize>>,
}

impl FakeDownloader {
    fn new(materialize: bool) -> Self {
        FakeDownloader {
            materialize,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn batch_sizes(&self) -> Vec<usize> {
        self.calls.lock().unwrap().clone()
    }
}

impl TrackDownloader for FakeDownloader {
    async fn download(&self, urls: &[String], dir: &Path) -> Result<(), String> {
        self.calls.lock().unwrap().push(urls.len());
        if self.materialize {
            for i in 0..urls.len() {
                std::fs::write(dir.join(format!("track{:03}.mp3", i)), b"x").unwrap();
            }
        }
        Ok(())
    }
}

/// Whether the simulated library references added files in place or
/// relocates them into a managed media folder (the unsupported copy mode).
#[derive(Clone, Copy, PartialEq)]
enum FileHandling {
    Reference,
    Copy,
}

struct FakeLibrary {
    handling: FileHandling,
    fail_adds: bool,
    fail_create: bool,
    playlists: Mutex<HashMap<String, Vec<TrackRecord>>>,
    adds_attempted: Mutex<usize>,
}

impl FakeLibrary {
    fn new(handling: FileHandling) -> Self {
        FakeLibrary {
            handling,
            fail_adds: false,
            fail_create: false,
            playlists: Mutex::new(HashMap::new()),
            adds_attempted: Mutex::new(0),
        }
    }

    fn seed_playlist(&self, name: &str) {
        self.playlists
            .lock()
            .unwrap()
            .insert(name.to_string(), Vec::new());
    }

    fn adds(&self) -> usize {
        *self.adds_attempted.lock().unwrap()
    }

    fn track_count(&self, name: &str) -> usize {
        self.playlists
            .lock()
            .unwrap()
            .get(name)
            .map(|tracks| tracks.len())
            .unwrap_or(0)
    }
}

impl MediaLibrary for FakeLibrary {
    async fn playlist_exists(&self, name: &str) -> bool {
        self.playlists.lock().unwrap().contains_key(name)
    }

    async fn create_playlist(&self, name: &str) -> bool {
        if self.fail_create {
            return false;
        }
        self.seed_playlist(name);
        true
    }

    async fn playlist_tracks(&self, name: &str) -> Result<Vec<TrackRecord>, BridgeError> {
        Ok(self
            .playlists
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .unwrap_or_default())
    }

    async fn add_file(&self, path: &Path, playlist: &str) -> Result<(), BridgeError> {
        *self.adds_attempted.lock().unwrap() += 1;
        if self.fail_adds {
            return Err(BridgeError::Script("execution error: add refused".to_string()));
        }

        let stored = match self.handling {
            FileHandling::Reference => path.to_path_buf(),
            FileHandling::Copy => PathBuf::from("/Users/me/Music/Media/Music")
                .join(path.file_name().unwrap()),
        };

        let record = TrackRecord {
            name: path.file_stem().unwrap().to_string_lossy().into_owned(),
            artist: "Unknown".to_string(),
            resolved_path: Some(stored.clone()),
            raw_location: format!("ok: {}", stored.display()),
        };

        self.playlists
            .lock()
            .unwrap()
            .entry(playlist.to_string())
            .or_default()
            .push(record);
        Ok(())
    }
}

// --- helpers ---------------------------------------------------------------

const PLAYLIST: &str = "Focus (Spotify)";

fn job(dir: &Path) -> SyncJob {
    SyncJob {
        name: "focus".to_string(),
        source: SourceSelector::Playlist(
            "https://open.spotify.com/playlist/37i9dQZF1DX8NTLI2TtZa6".to_string(),
        ),
        local_dir: dir.to_path_buf(),
        apple_playlist_name: PLAYLIST.to_string(),
        sync_limit: None,
    }
}

fn config() -> RunConfig {
    RunConfig {
        default_limit: 50,
        add_delay: Duration::ZERO,
        path_comparison: PathComparison::CaseInsensitive,
        probe: ProbeConfig {
            poll_interval: Duration::ZERO,
            timeout: Duration::from_secs(5),
        },
    }
}

fn stage_files(dir: &Path, count: usize) {
    for i in 0..count {
        std::fs::write(dir.join(format!("track{:03}.mp3", i)), b"x").unwrap();
    }
}

// --- scenarios -------------------------------------------------------------

#[tokio::test]
async fn declined_creation_performs_no_downloads_and_no_adds() {
    let dir = TempDir::new().unwrap();
    let source = FakeSource::with_tracks(5);
    let downloader = FakeDownloader::new(false);
    let library = FakeLibrary::new(FileHandling::Reference);

    let result = process_job(
        &job(dir.path()),
        &source,
        &downloader,
        &library,
        &FixedAnswer(false),
        &config(),
    )
    .await;

    assert!(matches!(result, Err(JobError::CreationDeclined)));
    assert!(source.requested_limits().is_empty());
    assert!(downloader.batch_sizes().is_empty());
    assert_eq!(library.adds(), 0);
}

#[tokio::test]
async fn failed_creation_aborts_the_job() {
    let dir = TempDir::new().unwrap();
    let source = FakeSource::with_tracks(5);
    let downloader = FakeDownloader::new(false);
    let mut library = FakeLibrary::new(FileHandling::Reference);
    library.fail_create = true;

    let result = process_job(
        &job(dir.path()),
        &source,
        &downloader,
        &library,
        &FixedAnswer(true),
        &config(),
    )
    .await;

    assert!(matches!(result, Err(JobError::CreationFailed)));
    assert!(source.requested_limits().is_empty());
    assert_eq!(library.adds(), 0);
}

#[tokio::test]
async fn empty_source_aborts_the_job_before_downloading() {
    let dir = TempDir::new().unwrap();
    stage_files(dir.path(), 1);
    let source = FakeSource::with_tracks(0);
    let downloader = FakeDownloader::new(false);
    let library = FakeLibrary::new(FileHandling::Reference);
    library.seed_playlist(PLAYLIST);

    let result = process_job(
        &job(dir.path()),
        &source,
        &downloader,
        &library,
        &FixedAnswer(false),
        &config(),
    )
    .await;

    assert!(matches!(result, Err(JobError::EmptySource)));
    assert!(downloader.batch_sizes().is_empty());
    assert_eq!(library.adds(), 0);
}

#[tokio::test]
async fn second_run_with_no_changes_adds_nothing() {
    let dir = TempDir::new().unwrap();
    stage_files(dir.path(), 3);
    let source = FakeSource::with_tracks(3);
    let downloader = FakeDownloader::new(false);
    let library = FakeLibrary::new(FileHandling::Reference);
    library.seed_playlist(PLAYLIST);

    let first = process_job(
        &job(dir.path()),
        &source,
        &downloader,
        &library,
        &FixedAnswer(false),
        &config(),
    )
    .await
    .unwrap();

    assert!(matches!(
        first,
        JobReport::Added {
            added: 3,
            attempted: 3
        }
    ));
    assert_eq!(library.adds(), 3);
    assert_eq!(library.track_count(PLAYLIST), 3);

    let second = process_job(
        &job(dir.path()),
        &source,
        &downloader,
        &library,
        &FixedAnswer(false),
        &config(),
    )
    .await
    .unwrap();

    assert!(matches!(second, JobReport::UpToDate { .. }));
    // No further adds happened on the second pass
    assert_eq!(library.adds(), 3);
    assert_eq!(library.track_count(PLAYLIST), 3);
}

#[tokio::test]
async fn fresh_job_downloads_all_and_adds_probe_then_batch() {
    let dir = TempDir::new().unwrap();
    let source = FakeSource::with_tracks(120);
    let downloader = FakeDownloader::new(true);
    let library = FakeLibrary::new(FileHandling::Reference);
    library.seed_playlist(PLAYLIST);

    // Empty staging dir + confirmed "download all" lifts the cap entirely
    let result = process_job(
        &job(dir.path()),
        &source,
        &downloader,
        &library,
        &FixedAnswer(true),
        &config(),
    )
    .await
    .unwrap();

    assert_eq!(source.requested_limits(), vec![None]);
    assert_eq!(downloader.batch_sizes(), vec![120]);

    assert!(matches!(
        result,
        JobReport::Added {
            added: 120,
            attempted: 120
        }
    ));

    // One probe add plus the remaining 119 as a batch
    assert_eq!(library.adds(), 120);
    assert_eq!(library.track_count(PLAYLIST), 120);
}

#[tokio::test]
async fn non_empty_staging_dir_uses_the_configured_cap() {
    let dir = TempDir::new().unwrap();
    stage_files(dir.path(), 2);
    let source = FakeSource::with_tracks(120);
    let downloader = FakeDownloader::new(false);
    let library = FakeLibrary::new(FileHandling::Reference);
    library.seed_playlist(PLAYLIST);

    let result = process_job(
        &job(dir.path()),
        &source,
        &downloader,
        &library,
        &FixedAnswer(true),
        &config(),
    )
    .await;

    assert!(result.is_ok());
    // The default cap applied; "download all" was never offered
    assert_eq!(source.requested_limits(), vec![Some(50)]);
}

#[tokio::test]
async fn copy_mode_destination_aborts_after_the_probe() {
    let dir = TempDir::new().unwrap();
    stage_files(dir.path(), 3);
    let source = FakeSource::with_tracks(3);
    let downloader = FakeDownloader::new(false);
    let library = FakeLibrary::new(FileHandling::Copy);
    library.seed_playlist(PLAYLIST);

    let result = process_job(
        &job(dir.path()),
        &source,
        &downloader,
        &library,
        &FixedAnswer(false),
        &config(),
    )
    .await;

    assert!(matches!(
        result,
        Err(JobError::Probe(ProbeError::Incompatible))
    ));

    // Only the probe file was ever attempted; the batch was never started
    assert_eq!(library.adds(), 1);
}

#[tokio::test]
async fn first_add_failure_aborts_the_job() {
    let dir = TempDir::new().unwrap();
    stage_files(dir.path(), 2);
    let source = FakeSource::with_tracks(2);
    let downloader = FakeDownloader::new(false);
    let mut library = FakeLibrary::new(FileHandling::Reference);
    library.fail_adds = true;
    library.seed_playlist(PLAYLIST);

    let result = process_job(
        &job(dir.path()),
        &source,
        &downloader,
        &library,
        &FixedAnswer(false),
        &config(),
    )
    .await;

    assert!(matches!(
        result,
        Err(JobError::Probe(ProbeError::AddFailed(_)))
    ));
    assert_eq!(library.adds(), 1);
}
