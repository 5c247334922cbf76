use std::sync::Arc;

use axum::{
    Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::{
    api::{STATE_COOKIE, found},
    server::AppState,
    spotify, utils, warning,
};

/// Starts the authorization flow.
///
/// Generates a fresh CSRF state, stores it in an HTTP-only, SameSite=Lax
/// cookie and redirects to Spotify's consent page. With incomplete client
/// credentials this answers 500 instead of issuing a redirect that could
/// never complete.
pub async fn login(Extension(state): Extension<Arc<AppState>>, jar: CookieJar) -> Response {
    let creds = match state.config.credentials() {
        Ok(creds) => creds,
        Err(e) => {
            warning!("refusing login redirect: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response();
        }
    };

    let csrf = utils::generate_state(utils::STATE_LENGTH);
    let authorize = spotify::authorize_url(&creds, &csrf);

    let cookie = Cookie::build((STATE_COOKIE, csrf))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .build();

    (jar.add(cookie), found(authorize.as_str())).into_response()
}
