//! Configuration for the local OAuth backend.
//!
//! All settings come from environment variables, optionally seeded from a
//! `.env` file in the working directory. Spotify credentials are allowed to
//! be absent at startup: the process still comes up and serves the static
//! front-end, and `/login` answers with a configuration error instead of
//! issuing a broken redirect (fail closed, never a half-built authorize URL).

use std::{env, path::PathBuf};

use thiserror::Error;

use crate::types::ClientCredentials;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5050;
pub const DEFAULT_STATIC_DIR: &str = "public";

/// A required environment variable is unset or empty.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("missing required configuration: {0} is not set")]
pub struct ConfigError(pub &'static str);

/// Runtime configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_uri: Option<String>,
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
}

impl Config {
    /// Reads configuration from the environment.
    ///
    /// Recognized variables: `CLIENT_ID`, `CLIENT_SECRET`, `REDIRECT_URI`,
    /// `HOST` (default `127.0.0.1`), `PORT` (default 5050) and `STATIC_DIR`
    /// (default `public`). An unparsable `PORT` falls back to the default
    /// with a warning rather than aborting startup.
    pub fn from_env() -> Self {
        let port = match env::var("PORT") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                crate::warning!("PORT={} is not a valid port, using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            Err(_) => DEFAULT_PORT,
        };

        Config {
            client_id: non_empty_var("CLIENT_ID"),
            client_secret: non_empty_var("CLIENT_SECRET"),
            redirect_uri: non_empty_var("REDIRECT_URI"),
            host: non_empty_var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            static_dir: non_empty_var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
        }
    }

    /// Returns the complete client credentials, or the first missing piece.
    ///
    /// `/login` and the token handlers call this instead of reading fields
    /// directly so that an unconfigured process degrades to an HTTP error
    /// on the affected endpoints only.
    pub fn credentials(&self) -> Result<ClientCredentials, ConfigError> {
        let client_id = self.client_id.clone().ok_or(ConfigError("CLIENT_ID"))?;
        let client_secret = self
            .client_secret
            .clone()
            .ok_or(ConfigError("CLIENT_SECRET"))?;
        let redirect_uri = self
            .redirect_uri
            .clone()
            .ok_or(ConfigError("REDIRECT_URI"))?;
        Ok(ClientCredentials {
            client_id,
            client_secret,
            redirect_uri,
        })
    }

    /// Socket address string the server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Treats empty values the same as unset ones.
fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
