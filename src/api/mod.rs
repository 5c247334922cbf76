//! # API Module
//!
//! HTTP endpoints for the local OAuth backend, built on
//! [Axum](https://docs.rs/axum):
//!
//! - [`login`] - starts the authorization flow: sets the CSRF state cookie
//!   and redirects the browser to Spotify's consent page
//! - [`callback`] - validates the returned state, exchanges the code and
//!   stores the resulting tokens
//! - [`token`] - hands the front-end a currently valid access token,
//!   refreshing behind the scenes when the cached one is stale
//! - [`logout`] - drops all in-memory credentials
//! - [`health`] - liveness probe with the package version
//!
//! Anything not matched here is served from the static front-end directory
//! (see [`crate::server`]).
//!
//! Handlers convert every internal failure into an HTTP status; nothing in
//! this module panics or propagates an error past the routing boundary.

mod callback;
mod health;
mod login;
mod logout;
mod token;

pub use callback::callback;
pub use health::health;
pub use login::login;
pub use logout::logout;
pub use token::token;

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

/// Cookie binding a login attempt to its callback.
pub const STATE_COOKIE: &str = "oauth_state";

/// Plain 302 redirect. Axum's `Redirect` only offers 303/307/308; the
/// browser flow here expects the classic found semantics.
pub(crate) fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}
