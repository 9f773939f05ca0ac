//! Settings-verification probe.
//!
//! Apple Music has a global setting that decides whether added files are
//! referenced in place or copied into the managed media folder. In copy
//! mode every path this tool remembers is invalidated the moment the file
//! is added, so each subsequent diff would re-add the entire batch forever.
//!
//! Before committing a batch, the probe adds only the first candidate and
//! watches the playlist until the file shows up at its original path
//! (reference mode confirmed), the enumeration stabilizes without it (copy
//! mode, hard stop for the job), or a deadline passes (could not verify).

use std::fmt;
use std::path::Path;
use std::time::Duration;

use tabled::Table;
use tokio::time::{Instant, sleep};

use crate::sync::MediaLibrary;
use crate::types::{PathComparison, ProbeDumpRow, TrackRecord};
use crate::{apple::bridge::BridgeError, failure, info, utils, warning};

/// Polling parameters for the post-add verification loop.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub poll_interval: Duration,
    pub timeout: Duration,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        ProbeConfig {
            poll_interval: Duration::from_secs(1),
            timeout: Duration::from_secs(15),
        }
    }
}

#[derive(Debug)]
pub enum ProbeError {
    /// The first add itself failed; nothing further is attempted.
    AddFailed(BridgeError),
    /// The library settled without the probe file at its original path:
    /// copy mode is on. Not retryable without operator intervention.
    Incompatible,
    /// The enumeration never stabilized before the deadline.
    CouldNotVerify,
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeError::AddFailed(e) => write!(f, "adding the first file failed: {}", e),
            ProbeError::Incompatible => write!(
                f,
                "Apple Music relocates added files (copy mode); path-based sync cannot proceed"
            ),
            ProbeError::CouldNotVerify => write!(
                f,
                "could not verify Apple Music file handling before the deadline"
            ),
        }
    }
}

impl std::error::Error for ProbeError {}

/// Adds `probe_file` to the playlist and verifies it lands at its own path.
///
/// Returns `Ok(())` when a subsequent enumeration reports a track whose
/// resolved location equals the probe file under the comparison policy.
/// Two consecutive identical enumerations without it mean the library has
/// settled in copy mode: the current playlist contents are dumped for
/// troubleshooting and [`ProbeError::Incompatible`] is returned. If the
/// enumeration keeps changing until the deadline, the distinct
/// [`ProbeError::CouldNotVerify`] is returned instead of guessing.
pub async fn verify_library_settings<L: MediaLibrary>(
    library: &L,
    playlist: &str,
    probe_file: &Path,
    policy: PathComparison,
    add_delay: Duration,
    config: &ProbeConfig,
) -> Result<(), ProbeError> {
    info!(
        "Verifying Apple Music file handling with '{}'",
        probe_file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| probe_file.display().to_string())
    );

    if let Err(e) = library.add_file(probe_file, playlist).await {
        return Err(ProbeError::AddFailed(e));
    }
    sleep(add_delay).await;

    let wanted = utils::normalize_path(probe_file, policy);
    let deadline = Instant::now() + config.timeout;
    let mut previous: Option<Vec<TrackRecord>> = None;

    loop {
        match library.playlist_tracks(playlist).await {
            Ok(records) => {
                let found = records.iter().any(|record| {
                    record
                        .resolved_path
                        .as_deref()
                        .map(|path| utils::normalize_path(path, policy) == wanted)
                        .unwrap_or(false)
                });

                if found {
                    return Ok(());
                }

                if previous.as_deref() == Some(records.as_slice()) {
                    dump_playlist_state(&records, policy);
                    return Err(ProbeError::Incompatible);
                }
                previous = Some(records);
            }
            Err(e) => {
                warning!("Enumeration failed while verifying settings: {}", e);
                previous = None;
            }
        }

        if Instant::now() + config.poll_interval > deadline {
            return Err(ProbeError::CouldNotVerify);
        }
        sleep(config.poll_interval).await;
    }
}

/// Prints everything the library reported for the playlist, one row per
/// track, so the operator can see where the probe file actually went.
fn dump_playlist_state(records: &[TrackRecord], policy: PathComparison) {
    failure!(
        "The file added for verification did not appear at its own path. \
         Apple Music is most likely configured to copy files into its media \
         folder on add."
    );
    failure!(
        "Disable it under Music > Settings > Files: 'Copy files to Music \
         Media folder when adding to library', then re-run the sync."
    );

    let rows: Vec<ProbeDumpRow> = records
        .iter()
        .map(|record| ProbeDumpRow {
            name: record.name.clone(),
            artist: record.artist.clone(),
            location: record
                .resolved_path
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "-".to_string()),
            normalized: record
                .resolved_path
                .as_deref()
                .map(|p| utils::normalize_path(p, policy))
                .unwrap_or_else(|| "-".to_string()),
            diagnostic: record.raw_location.clone(),
        })
        .collect();

    if rows.is_empty() {
        warning!("The playlist enumeration came back empty.");
    } else {
        println!("{}", Table::new(rows));
    }
}
