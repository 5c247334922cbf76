use std::sync::Arc;

use axum::{
    Extension,
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use chrono::Utc;
use serde::Deserialize;

use crate::{
    api::{STATE_COOKIE, found},
    server::AppState,
    success,
    types::TokenSet,
    warning,
};

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

/// Completes the authorization flow.
///
/// The `state` query parameter must equal the value of the state cookie set
/// on `/login`; on a missing or mismatched state the request is rejected
/// before any provider call is made. A successful exchange replaces the
/// stored token set, invalidates the state cookie and sends the browser
/// back to the front-end.
pub async fn callback(
    Query(params): Query<CallbackParams>,
    jar: CookieJar,
    Extension(state): Extension<Arc<AppState>>,
) -> Response {
    let expected = jar.get(STATE_COOKIE).map(|c| c.value().to_string());
    let matches = matches!((&params.state, &expected), (Some(got), Some(want)) if got == want);
    if !matches {
        warning!("callback state did not match the login cookie");
        return (StatusCode::BAD_REQUEST, "invalid state").into_response();
    }

    if let Some(reason) = params.error {
        warning!("authorization was not granted: {}", reason);
        return (StatusCode::BAD_REQUEST, "authorization denied").into_response();
    }

    let Some(code) = params.code else {
        return (StatusCode::BAD_REQUEST, "missing authorization code").into_response();
    };

    let creds = match state.config.credentials() {
        Ok(creds) => creds,
        Err(e) => {
            warning!("cannot exchange authorization code: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response();
        }
    };

    match state.auth.exchange_code(&creds, &code).await {
        Ok(resp) => {
            state
                .tokens
                .store(TokenSet::from_response(resp, Utc::now()))
                .await;
            success!("authorization complete, tokens cached");

            // State is single-use; drop the cookie with the exchange done.
            let jar = jar.remove(Cookie::build((STATE_COOKIE, "")).path("/").build());
            (jar, found("/")).into_response()
        }
        Err(e) => {
            warning!("authorization code exchange failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "token exchange failed").into_response()
        }
    }
}
