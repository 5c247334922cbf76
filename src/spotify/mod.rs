//! # Spotify Accounts Service Module
//!
//! Client-side half of the OAuth 2.0 Authorization Code flow: building the
//! authorize redirect URL and talking to the token endpoint. This is the
//! only module that performs outbound HTTP; everything above it works with
//! the [`crate::types::TokenResponse`] values it returns.
//!
//! The exchange operations carry the application's client secret via HTTP
//! Basic auth and therefore live strictly on the server side — the browser
//! front-end only ever receives finished access tokens through `/token`.

mod auth;

pub use auth::AUTHORIZE_URL;
pub use auth::ExchangeError;
pub use auth::SCOPES;
pub use auth::SpotifyAuthClient;
pub use auth::TOKEN_URL;
pub use auth::authorize_url;
