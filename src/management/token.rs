use std::future::Future;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::Mutex;

use crate::{
    spotify::ExchangeError,
    types::{TokenResponse, TokenSet},
    warning,
};

/// No valid access token is available and none can be obtained by
/// refreshing; the user has to run the login flow again.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("no valid or refreshable token held")]
pub struct NoTokenError;

/// What the accessor has to do for the current store contents at `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshPlan {
    /// Token is still valid, hand it out without touching the network.
    UseCached,
    /// Token is stale but a refresh token is held.
    Refresh,
    /// Nothing stored, or stale with no refresh token.
    Reauthenticate,
}

/// Pure expiry decision, kept free of I/O so it is testable on its own.
pub fn plan(held: Option<&TokenSet>, now: DateTime<Utc>) -> RefreshPlan {
    match held {
        None => RefreshPlan::Reauthenticate,
        Some(set) if set.is_valid(now) => RefreshPlan::UseCached,
        Some(set) if set.refresh_token.is_some() => RefreshPlan::Refresh,
        Some(_) => RefreshPlan::Reauthenticate,
    }
}

/// Owner of the single process-wide [`TokenSet`].
///
/// Exactly one of these exists, shared by the callback handler (writer),
/// the `/token` accessor (reader, writer on refresh) and `/logout`
/// (writer). Every mutation replaces the whole `Option<TokenSet>` under the
/// mutex, so a concurrent reader never observes a half-updated set.
#[derive(Debug, Default)]
pub struct TokenManager {
    current: Mutex<Option<TokenSet>>,
}

impl TokenManager {
    pub fn new() -> Self {
        TokenManager {
            current: Mutex::new(None),
        }
    }

    /// Replaces the held token set, e.g. after a successful code exchange.
    pub async fn store(&self, set: TokenSet) {
        *self.current.lock().await = Some(set);
    }

    /// Snapshot of the held token set, if any.
    pub async fn current(&self) -> Option<TokenSet> {
        self.current.lock().await.clone()
    }

    /// Drops all held credentials. Logout resets all fields together.
    pub async fn clear(&self) {
        *self.current.lock().await = None;
    }

    /// Returns a currently valid access token, refreshing if necessary.
    ///
    /// `refresh` is only invoked when the held token is stale and a refresh
    /// token exists; it receives that refresh token and performs the
    /// provider round trip. On success the whole set is replaced (keeping
    /// the previous refresh token when the provider did not rotate it). On
    /// any refresh failure the store is left untouched and the caller gets
    /// [`NoTokenError`] — errors never escape this boundary.
    ///
    /// The store mutex is held across the refresh await, so concurrent
    /// callers hitting a stale token coalesce into a single provider call:
    /// the winner refreshes, the waiters then read the fresh set.
    pub async fn access_token<F, Fut>(&self, refresh: F) -> Result<String, NoTokenError>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<TokenResponse, ExchangeError>>,
    {
        let mut slot = self.current.lock().await;

        match plan(slot.as_ref(), Utc::now()) {
            RefreshPlan::UseCached => slot
                .as_ref()
                .map(|set| set.access_token.clone())
                .ok_or(NoTokenError),
            RefreshPlan::Reauthenticate => Err(NoTokenError),
            RefreshPlan::Refresh => {
                let Some(refresh_token) = slot.as_ref().and_then(|s| s.refresh_token.clone())
                else {
                    return Err(NoTokenError);
                };

                match refresh(refresh_token).await {
                    Ok(resp) => {
                        let renewed = match slot.as_ref() {
                            Some(old) => old.refreshed(resp, Utc::now()),
                            None => TokenSet::from_response(resp, Utc::now()),
                        };
                        let token = renewed.access_token.clone();
                        *slot = Some(renewed);
                        Ok(token)
                    }
                    Err(e) => {
                        warning!("token refresh failed: {}", e);
                        Err(NoTokenError)
                    }
                }
            }
        }
    }
}
