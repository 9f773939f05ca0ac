//! # API Module
//!
//! HTTP endpoints for the short-lived local web server that backs the OAuth
//! flow. Two routes exist:
//!
//! - [`callback`] - completes the Spotify OAuth 2.0 PKCE flow by exchanging
//!   the authorization code for an access token
//! - [`health`] - liveness check with the application version
//!
//! The server only runs for the duration of `tunesync auth`; no endpoint is
//! involved in the sync path itself. Routing is built with
//! [Axum](https://docs.rs/axum), and the callback receives its shared PKCE
//! state and the Spotify credentials through request extensions.

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
