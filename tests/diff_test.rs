use std::path::PathBuf;

use tunesync::sync::compute_add_set;
use tunesync::types::{PathComparison, TrackRecord};

fn record(path: Option<&str>) -> TrackRecord {
    TrackRecord {
        name: "Song".to_string(),
        artist: "Artist".to_string(),
        resolved_path: path.map(PathBuf::from),
        raw_location: path.map(|p| format!("ok: {}", p)).unwrap_or_else(|| "missing: ".to_string()),
    }
}

fn paths(items: &[&str]) -> Vec<PathBuf> {
    items.iter().map(PathBuf::from).collect()
}

#[test]
fn test_add_set_is_exact_set_difference() {
    let local = paths(&["/m/a.mp3", "/m/b.mp3", "/m/c.mp3"]);
    let destination = vec![record(Some("/m/b.mp3"))];

    let add_set = compute_add_set(&local, &destination, PathComparison::CaseInsensitive);
    assert_eq!(add_set, paths(&["/m/a.mp3", "/m/c.mp3"]));
}

#[test]
fn test_add_set_empty_when_local_subset_of_destination() {
    let local = paths(&["/m/a.mp3", "/m/b.mp3"]);
    let destination = vec![
        record(Some("/m/a.mp3")),
        record(Some("/m/b.mp3")),
        record(Some("/m/extra.mp3")),
    ];

    let add_set = compute_add_set(&local, &destination, PathComparison::CaseInsensitive);
    assert!(add_set.is_empty());
}

#[test]
fn test_add_set_full_against_empty_destination() {
    let local = paths(&["/m/a.mp3", "/m/b.mp3"]);
    let add_set = compute_add_set(&local, &[], PathComparison::CaseInsensitive);
    assert_eq!(add_set, local);
}

#[test]
fn test_add_set_is_pure_and_idempotent() {
    let local = paths(&["/m/a.mp3", "/m/b.mp3", "/m/c.mp3"]);
    let destination = vec![record(Some("/m/c.mp3"))];

    let first = compute_add_set(&local, &destination, PathComparison::CaseInsensitive);
    let second = compute_add_set(&local, &destination, PathComparison::CaseInsensitive);
    assert_eq!(first, second);
}

#[test]
fn test_add_set_preserves_scan_order() {
    let local = paths(&["/m/z.mp3", "/m/a.mp3", "/m/k.mp3"]);
    let add_set = compute_add_set(&local, &[], PathComparison::CaseInsensitive);

    // Same order as the input, not sorted
    assert_eq!(add_set, paths(&["/m/z.mp3", "/m/a.mp3", "/m/k.mp3"]));
}

#[test]
fn test_add_set_keeps_duplicate_inputs() {
    let local = paths(&["/m/a.mp3", "/m/a.mp3"]);
    let add_set = compute_add_set(&local, &[], PathComparison::CaseInsensitive);
    assert_eq!(add_set.len(), 2);
}

#[test]
fn test_add_set_ignores_records_without_location() {
    let local = paths(&["/m/a.mp3"]);

    // A record with no on-disk location can never match a local file
    let destination = vec![record(None)];
    let add_set = compute_add_set(&local, &destination, PathComparison::CaseInsensitive);
    assert_eq!(add_set, local);
}

#[test]
fn test_add_set_respects_comparison_policy() {
    let local = paths(&["/Music/Song.mp3"]);
    let destination = vec![record(Some("/music/song.mp3"))];

    // Case-insensitive policy treats the paths as the same track
    let folded = compute_add_set(&local, &destination, PathComparison::CaseInsensitive);
    assert!(folded.is_empty());

    // Exact policy sees two different paths
    let exact = compute_add_set(&local, &destination, PathComparison::Exact);
    assert_eq!(exact, local);
}
