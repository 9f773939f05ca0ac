use std::path::{Path, PathBuf};

use tunesync::types::PathComparison;
use tunesync::utils::*;

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let verifier = "test_verifier_123";
    let challenge = generate_code_challenge(verifier);

    // Should not be empty
    assert!(!challenge.is_empty());

    // Should be deterministic - same input produces same output
    let challenge2 = generate_code_challenge(verifier);
    assert_eq!(challenge, challenge2);

    // Different input should produce different output
    let challenge3 = generate_code_challenge("different_verifier");
    assert_ne!(challenge, challenge3);

    // Should be base64-encoded (URL-safe, no padding)
    assert!(
        challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
}

#[test]
fn test_is_audio_file() {
    assert!(is_audio_file(Path::new("/music/song.mp3")));
    assert!(is_audio_file(Path::new("/music/song.m4a")));
    assert!(is_audio_file(Path::new("/music/song.opus")));
    assert!(is_audio_file(Path::new("/music/song.flac")));

    // Extension matching is case-insensitive
    assert!(is_audio_file(Path::new("/music/SONG.MP3")));
    assert!(is_audio_file(Path::new("/music/Song.Flac")));

    // Non-audio and extension-less files are rejected
    assert!(!is_audio_file(Path::new("/music/cover.jpg")));
    assert!(!is_audio_file(Path::new("/music/notes.txt")));
    assert!(!is_audio_file(Path::new("/music/README")));
    assert!(!is_audio_file(Path::new("/music/song.mp3.part")));
}

#[test]
fn test_normalize_path_case_insensitive() {
    let a = Path::new("/Users/Me/Music/Song.mp3");
    let b = Path::new("/users/me/music/song.MP3");

    let na = normalize_path(a, PathComparison::CaseInsensitive);
    let nb = normalize_path(b, PathComparison::CaseInsensitive);
    assert_eq!(na, nb);

    // Normalization is deterministic
    assert_eq!(na, normalize_path(a, PathComparison::CaseInsensitive));
}

#[test]
fn test_normalize_path_exact() {
    let a = Path::new("/Users/Me/Music/Song.mp3");
    let b = Path::new("/users/me/music/song.mp3");

    let na = normalize_path(a, PathComparison::Exact);
    let nb = normalize_path(b, PathComparison::Exact);
    assert_ne!(na, nb);

    // Exact policy keeps the path unchanged
    assert_eq!(na, "/Users/Me/Music/Song.mp3");
}

#[test]
fn test_escape_applescript() {
    // Plain strings pass through
    assert_eq!(escape_applescript("My Playlist"), "My Playlist");

    // Quotes and backslashes are escaped
    assert_eq!(escape_applescript(r#"Rock "n" Roll"#), r#"Rock \"n\" Roll"#);
    assert_eq!(escape_applescript(r"back\slash"), r"back\\slash");

    // Both at once
    assert_eq!(escape_applescript(r#"a\"b"#), r#"a\\\"b"#);
}

#[test]
fn test_playlist_id_from_url() {
    // Standard share URL
    let url = "https://open.spotify.com/playlist/37i9dQZF1DX8NTLI2TtZa6";
    assert_eq!(
        playlist_id_from_url(url),
        Some("37i9dQZF1DX8NTLI2TtZa6".to_string())
    );

    // Share URL with tracking query
    let url = "https://open.spotify.com/playlist/37i9dQZF1DX8NTLI2TtZa6?si=abc123";
    assert_eq!(
        playlist_id_from_url(url),
        Some("37i9dQZF1DX8NTLI2TtZa6".to_string())
    );

    // Bare id passes through
    assert_eq!(
        playlist_id_from_url("37i9dQZF1DX8NTLI2TtZa6"),
        Some("37i9dQZF1DX8NTLI2TtZa6".to_string())
    );

    // Garbage is rejected
    assert_eq!(playlist_id_from_url(""), None);
    assert_eq!(playlist_id_from_url("https://open.spotify.com/playlist/"), None);
    assert_eq!(playlist_id_from_url("not a url"), None);
}

#[test]
fn test_callback_bind_addr() {
    assert_eq!(
        callback_bind_addr("http://127.0.0.1:9172/callback"),
        Some("127.0.0.1:9172".to_string())
    );
    assert_eq!(
        callback_bind_addr("http://localhost:8080/callback"),
        Some("localhost:8080".to_string())
    );

    // Explicit port is required
    assert_eq!(callback_bind_addr("http://localhost/callback"), None);
    assert_eq!(callback_bind_addr("http://localhost:abc/callback"), None);
    assert_eq!(callback_bind_addr(""), None);
}

#[test]
fn test_directory_slug() {
    assert_eq!(directory_slug("Focus"), "focus");
    assert_eq!(directory_slug("Deep Focus 2024"), "deep-focus-2024");
    assert_eq!(directory_slug("Rock & Roll!!"), "rock-roll");
    assert_eq!(directory_slug("  trim  "), "trim");

    // Never empty
    assert_eq!(directory_slug("!!!"), "playlist");
    assert_eq!(directory_slug(""), "playlist");
}

#[test]
fn test_expand_tilde() {
    // Paths without a tilde are untouched
    assert_eq!(expand_tilde("/tmp/music"), PathBuf::from("/tmp/music"));
    assert_eq!(expand_tilde("relative/dir"), PathBuf::from("relative/dir"));

    // Tilde-prefixed paths resolve under the home directory
    if let Some(home) = dirs::home_dir() {
        assert_eq!(expand_tilde("~/Music"), home.join("Music"));
        assert_eq!(expand_tilde("~"), home);
    }
}
