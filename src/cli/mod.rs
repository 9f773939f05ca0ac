//! # CLI Module
//!
//! This module provides the command-line interface layer for tunesync, a
//! tool that mirrors Spotify playlists into the Apple Music library through
//! a local staging directory. It implements all user-facing commands and
//! coordinates between the Spotify client, the downloader, the Apple Music
//! adapter, and the reconciliation engine.
//!
//! ## Commands
//!
//! - [`auth`] - Spotify OAuth 2.0 PKCE authentication flow
//! - [`sync`] - runs the configured sync jobs in order
//! - [`playlists`] - diagnostic listing of Apple Music user playlists
//!
//! ## Architecture Design
//!
//! The CLI layer owns all process-fatal decisions: a missing or unparsable
//! settings document and a missing auth token terminate here, before any
//! job runs. Everything below this layer reports errors as values.
//!
//! ```text
//! CLI Layer (commands, wiring, fatal config errors)
//!     ↓
//! Sync Layer (orchestrator, diff, probe — per-job errors)
//!     ↓
//! Collaborators (Spotify API, spotdl, osascript bridge)
//! ```
//!
//! ## Interaction
//!
//! Prompts go through the injected decision provider: interactive runs get
//! the dialoguer-backed terminal prompt, `--yes` runs get a fixed answer.
//! This keeps the orchestrator itself free of terminal I/O.

mod auth;
mod playlists;
mod sync;

pub use auth::auth;
pub use playlists::playlists;
pub use sync::sync;
