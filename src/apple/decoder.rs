//! Strict decoder for the scripting-bridge response payloads.
//!
//! The bridge scripts serialize their results as delimited text: fields
//! joined with a literal `|||`, records joined with a literal `:::`, and the
//! first token carrying the reported record count. Malformed payloads are
//! rejected with a specific error rather than silently dropped, because a
//! half-parsed enumeration would poison every diff computed from it.

use std::fmt;
use std::path::PathBuf;

use crate::types::{PlaylistSummary, TrackRecord};

pub const FIELD_SEPARATOR: &str = "|||";
pub const RECORD_SEPARATOR: &str = ":::";

/// Location tag for a track with an on-disk file.
pub const LOCATION_OK: &str = "ok";
/// Location tag for a track whose location is `missing value`.
pub const LOCATION_MISSING: &str = "missing";
/// Location tag for a track whose location could not be read at all.
pub const LOCATION_ERROR: &str = "error";

#[derive(Debug, PartialEq, Eq)]
pub enum DecodeError {
    EmptyPayload,
    InvalidCount(String),
    CountMismatch { reported: usize, found: usize },
    MalformedRecord { index: usize, fields: usize },
    EmptyLocation { index: usize },
    UnknownLocationTag { index: usize, tag: String },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::EmptyPayload => write!(f, "empty bridge payload"),
            DecodeError::InvalidCount(token) => {
                write!(f, "bridge payload count prefix '{}' is not a number", token)
            }
            DecodeError::CountMismatch { reported, found } => write!(
                f,
                "bridge payload reported {} records but contained {}",
                reported, found
            ),
            DecodeError::MalformedRecord { index, fields } => write!(
                f,
                "bridge record {} has {} fields where 4 were expected",
                index, fields
            ),
            DecodeError::EmptyLocation { index } => write!(
                f,
                "bridge record {} claims an on-disk location but carries none",
                index
            ),
            DecodeError::UnknownLocationTag { index, tag } => {
                write!(f, "bridge record {} has unknown location tag '{}'", index, tag)
            }
        }
    }
}

impl std::error::Error for DecodeError {}

/// Decodes a track enumeration payload.
///
/// Each record carries four fields: track name, artist, a location tag
/// (`ok` / `missing` / `error`) and the location payload (a POSIX path for
/// `ok`, an error message for `error`, empty for `missing`). A payload of
/// just `0` is a valid empty playlist.
pub fn decode_track_records(payload: &str) -> Result<Vec<TrackRecord>, DecodeError> {
    let payload = payload.trim();
    if payload.is_empty() {
        return Err(DecodeError::EmptyPayload);
    }

    let mut segments = payload.split(RECORD_SEPARATOR);
    let count_token = segments.next().unwrap_or("").trim();
    let reported: usize = count_token
        .parse()
        .map_err(|_| DecodeError::InvalidCount(count_token.to_string()))?;

    let records: Vec<&str> = segments.collect();
    if records.len() != reported {
        return Err(DecodeError::CountMismatch {
            reported,
            found: records.len(),
        });
    }

    let mut decoded = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let fields: Vec<&str> = record.split(FIELD_SEPARATOR).collect();
        if fields.len() != 4 {
            return Err(DecodeError::MalformedRecord {
                index,
                fields: fields.len(),
            });
        }

        let (name, artist, tag, rest) = (fields[0], fields[1], fields[2], fields[3]);
        let resolved_path = match tag {
            LOCATION_OK => {
                if rest.is_empty() {
                    return Err(DecodeError::EmptyLocation { index });
                }
                Some(PathBuf::from(rest))
            }
            LOCATION_MISSING | LOCATION_ERROR => None,
            _ => {
                return Err(DecodeError::UnknownLocationTag {
                    index,
                    tag: tag.to_string(),
                });
            }
        };

        decoded.push(TrackRecord {
            name: name.to_string(),
            artist: artist.to_string(),
            resolved_path,
            raw_location: format!("{}: {}", tag, rest),
        });
    }

    Ok(decoded)
}

/// Decodes the two-field playlist summary payload used by the diagnostic
/// listing: playlist name and track count per record.
pub fn decode_playlist_summaries(payload: &str) -> Result<Vec<PlaylistSummary>, DecodeError> {
    let payload = payload.trim();
    if payload.is_empty() {
        return Err(DecodeError::EmptyPayload);
    }

    let mut segments = payload.split(RECORD_SEPARATOR);
    let count_token = segments.next().unwrap_or("").trim();
    let reported: usize = count_token
        .parse()
        .map_err(|_| DecodeError::InvalidCount(count_token.to_string()))?;

    let records: Vec<&str> = segments.collect();
    if records.len() != reported {
        return Err(DecodeError::CountMismatch {
            reported,
            found: records.len(),
        });
    }

    let mut decoded = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let fields: Vec<&str> = record.split(FIELD_SEPARATOR).collect();
        if fields.len() != 2 {
            return Err(DecodeError::MalformedRecord {
                index,
                fields: fields.len(),
            });
        }

        let tracks: u64 = fields[1]
            .trim()
            .parse()
            .map_err(|_| DecodeError::MalformedRecord { index, fields: 2 })?;

        decoded.push(PlaylistSummary {
            name: fields[0].to_string(),
            tracks,
        });
    }

    Ok(decoded)
}
