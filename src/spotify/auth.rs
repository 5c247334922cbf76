use std::time::Duration;

use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::{Client, StatusCode, Url, header::AUTHORIZATION};
use thiserror::Error;

use crate::{
    config::ConfigError,
    types::{ClientCredentials, TokenResponse},
};

/// Spotify's OAuth authorize endpoint (user consent page).
pub const AUTHORIZE_URL: &str = "https://accounts.spotify.com/authorize";

/// Spotify's OAuth token endpoint (code exchange and refresh).
pub const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Scopes requested for the web player front-end, space-joined into the
/// authorize URL.
pub const SCOPES: [&str; 5] = [
    "streaming",
    "user-read-email",
    "user-read-private",
    "user-modify-playback-state",
    "user-read-playback-state",
];

/// Bound on every call to the token endpoint; expiry surfaces as a
/// transport error.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A token-endpoint operation failed.
///
/// Every variant means the same thing to callers: the token store must not
/// be updated. No variant is retried internally; a single failed attempt is
/// surfaced immediately.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// Non-success HTTP status from the provider, with its response body.
    #[error("token endpoint returned {status}: {body}")]
    Provider { status: StatusCode, body: String },

    /// Connection failure, timeout, or a body that did not decode.
    #[error("token endpoint request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Client credentials are not configured, so no request was issued.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Builds the provider authorize URL for a login redirect.
///
/// Callers must have validated the credentials first (see
/// [`crate::config::Config::credentials`]); this function assumes non-empty
/// `client_id` and `redirect_uri`.
pub fn authorize_url(creds: &ClientCredentials, state: &str) -> Url {
    let mut url = Url::parse(AUTHORIZE_URL).expect("authorize endpoint is a valid URL");
    url.query_pairs_mut()
        .append_pair("response_type", "code")
        .append_pair("client_id", &creds.client_id)
        .append_pair("scope", &SCOPES.join(" "))
        .append_pair("redirect_uri", &creds.redirect_uri)
        .append_pair("state", state);
    url
}

/// HTTP client for the two token-endpoint operations.
///
/// The endpoint URL is injectable so tests can point the client at a local
/// mock; production code uses [`TOKEN_URL`].
#[derive(Debug, Clone)]
pub struct SpotifyAuthClient {
    http: Client,
    token_url: String,
}

impl SpotifyAuthClient {
    pub fn new(token_url: impl Into<String>) -> reqwest::Result<Self> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(SpotifyAuthClient {
            http,
            token_url: token_url.into(),
        })
    }

    /// Exchanges an authorization code for a fresh token set.
    ///
    /// `redirect_uri` must match the one used on the authorize redirect or
    /// Spotify rejects the grant.
    pub async fn exchange_code(
        &self,
        creds: &ClientCredentials,
        code: &str,
    ) -> Result<TokenResponse, ExchangeError> {
        self.token_request(
            creds,
            &[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", &creds.redirect_uri),
            ],
        )
        .await
    }

    /// Trades a refresh token for a renewed access token.
    ///
    /// The response may omit both `refresh_token` and `expires_in`; the
    /// caller normalizes those via [`crate::types::TokenSet`].
    pub async fn refresh(
        &self,
        creds: &ClientCredentials,
        refresh_token: &str,
    ) -> Result<TokenResponse, ExchangeError> {
        self.token_request(
            creds,
            &[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ],
        )
        .await
    }

    async fn token_request(
        &self,
        creds: &ClientCredentials,
        params: &[(&str, &str)],
    ) -> Result<TokenResponse, ExchangeError> {
        let res = self
            .http
            .post(&self.token_url)
            .header(AUTHORIZATION, basic_credentials(creds))
            .form(params)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(ExchangeError::Provider { status, body });
        }

        Ok(res.json().await?)
    }
}

/// `Basic base64(client_id:client_secret)` per RFC 6749 §2.3.1.
fn basic_credentials(creds: &ClientCredentials) -> String {
    let pair = format!("{}:{}", creds.client_id, creds.client_secret);
    format!("Basic {}", STANDARD.encode(pair))
}
