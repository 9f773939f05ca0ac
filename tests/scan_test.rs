use std::fs;
use std::path::Path;

use tempfile::TempDir;
use tunesync::sync::scan_audio_files;

fn touch(dir: &Path, name: &str) {
    fs::write(dir.join(name), b"x").unwrap();
}

#[test]
fn test_scan_returns_only_allowed_extensions() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "a.mp3");
    touch(dir.path(), "b.flac");
    touch(dir.path(), "c.opus");
    touch(dir.path(), "d.m4a");
    touch(dir.path(), "cover.jpg");
    touch(dir.path(), "notes.txt");

    let files = scan_audio_files(dir.path());
    assert_eq!(files.len(), 4);
    assert!(files.iter().all(|p| {
        let ext = p.extension().unwrap().to_string_lossy().to_lowercase();
        ["mp3", "flac", "opus", "m4a"].contains(&ext.as_str())
    }));
}

#[test]
fn test_scan_is_case_insensitive_on_extensions() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "loud.MP3");
    touch(dir.path(), "quiet.Flac");

    let files = scan_audio_files(dir.path());
    assert_eq!(files.len(), 2);
}

#[test]
fn test_scan_recurses_into_nested_directories() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("artist").join("album");
    fs::create_dir_all(&nested).unwrap();

    touch(dir.path(), "top.mp3");
    touch(&nested, "deep.mp3");
    touch(&nested, "art.png");

    let files = scan_audio_files(dir.path());
    assert_eq!(files.len(), 2);
}

#[test]
fn test_scan_returns_absolute_paths() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "a.mp3");

    let files = scan_audio_files(dir.path());
    assert_eq!(files.len(), 1);
    assert!(files[0].is_absolute());
}

#[test]
fn test_scan_empty_directory_yields_empty_list() {
    let dir = TempDir::new().unwrap();
    assert!(scan_audio_files(dir.path()).is_empty());
}

#[test]
fn test_scan_counts_every_allowed_file() {
    let dir = TempDir::new().unwrap();
    for i in 0..25 {
        touch(dir.path(), &format!("track{:02}.mp3", i));
    }
    touch(dir.path(), "playlist.m3u");

    let files = scan_audio_files(dir.path());
    assert_eq!(files.len(), 25);
}
