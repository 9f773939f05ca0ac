use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::utils;

/// Recursively enumerates the audio files under `root` and returns their
/// absolute paths in walk order.
///
/// Only files whose extension is on the audio allow-list are returned; see
/// [`utils::AUDIO_EXTENSIONS`]. An empty directory yields an empty vector.
/// The caller guarantees `root` exists (the orchestrator creates the staging
/// directory before scanning); unreadable entries are skipped.
pub fn scan_audio_files(root: &Path) -> Vec<PathBuf> {
    let root = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());

    WalkDir::new(&root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| utils::is_audio_file(path))
        .collect()
}
