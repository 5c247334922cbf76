use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

/// Seconds subtracted from the provider's `expires_in` so a token is
/// refreshed slightly before Spotify actually rejects it.
pub const EXPIRY_SAFETY_MARGIN_SECS: i64 = 60;

/// Fallback lifetime applied when the provider omits `expires_in`.
pub const DEFAULT_EXPIRES_IN_SECS: u64 = 3600;

/// Immutable application credentials for the Spotify accounts service.
///
/// Loaded once at startup from the environment and never exposed to the
/// browser; the front-end only ever sees access tokens.
#[derive(Debug, Clone)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

/// Wire format of a successful response from the token endpoint.
///
/// Spotify omits `refresh_token` on most refresh-grant responses (tokens
/// are not always rotated) and has been observed to omit `expires_in`,
/// so both are optional here and normalized in [`TokenSet`].
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub scope: Option<String>,
}

/// The single process-wide set of credentials for the local user.
///
/// All three fields are always replaced together; no partial updates.
#[derive(Debug, Clone)]
pub struct TokenSet {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: DateTime<Utc>,
}

impl TokenSet {
    /// Builds a token set from a token-endpoint response received at `now`.
    ///
    /// `expires_at` is `now + expires_in - 60s`, so the accessor refreshes
    /// before the token actually dies mid-request. A missing `expires_in`
    /// falls back to one hour, Spotify's documented default.
    pub fn from_response(resp: TokenResponse, now: DateTime<Utc>) -> Self {
        let lifetime = resp
            .expires_in
            .unwrap_or(DEFAULT_EXPIRES_IN_SECS)
            .min(i64::MAX as u64) as i64;
        TokenSet {
            access_token: resp.access_token,
            refresh_token: resp.refresh_token,
            expires_at: now + Duration::seconds(lifetime - EXPIRY_SAFETY_MARGIN_SECS),
        }
    }

    /// A token is usable strictly before its safety-margin-adjusted expiry.
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    /// Merges a refresh-grant response into this set.
    ///
    /// Spotify does not always rotate refresh tokens; when the response
    /// carries none, the previously stored one stays usable and is kept.
    pub fn refreshed(&self, resp: TokenResponse, now: DateTime<Utc>) -> Self {
        let mut next = TokenSet::from_response(resp, now);
        if next.refresh_token.is_none() {
            next.refresh_token = self.refresh_token.clone();
        }
        next
    }
}
