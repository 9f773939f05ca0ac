//! External downloader invocation.
//!
//! Downloads are delegated to the `spotdl` command-line tool, invoked in
//! batches with the working directory set to the staging folder so the
//! files land there without any output-path flags. spotdl skips tracks
//! that already exist on disk, which makes re-invocation safe and cheap.

use std::path::Path;

use tokio::process::Command;

use crate::sync::TrackDownloader;
use crate::{info, warning};

/// Tracks handed to one spotdl invocation. Very long argument lists make
/// spotdl flaky, so the list is chunked.
const DOWNLOAD_BATCH_SIZE: usize = 50;

pub struct SpotDl;

impl SpotDl {
    pub fn new() -> Self {
        SpotDl
    }
}

impl Default for SpotDl {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackDownloader for SpotDl {
    /// Runs `spotdl download <urls…>` per batch inside `dir`.
    ///
    /// A non-zero exit is a warning, not a failure: the usual cause is
    /// tracks that already exist. A missing spotdl binary aborts the
    /// download step with an error the orchestrator downgrades to a
    /// warning, since the diff against whatever is on disk is still valid.
    async fn download(&self, urls: &[String], dir: &Path) -> Result<(), String> {
        if urls.is_empty() {
            return Ok(());
        }

        info!("Sending {} songs to spotdl...", urls.len());

        for (batch_index, chunk) in urls.chunks(DOWNLOAD_BATCH_SIZE).enumerate() {
            let status = Command::new("spotdl")
                .arg("download")
                .args(chunk)
                .current_dir(dir)
                .status()
                .await;

            match status {
                Ok(status) if status.success() => {}
                Ok(_) => {
                    warning!(
                        "spotdl exited non-zero for batch {}; usually the tracks already exist.",
                        batch_index + 1
                    );
                }
                Err(e) => {
                    return Err(format!(
                        "spotdl could not be run ({}); install it with 'pip install spotdl'",
                        e
                    ));
                }
            }
        }

        Ok(())
    }
}
