use std::sync::Arc;

use axum::{
    Extension, Router,
    http::{HeaderValue, header},
    routing::{get, post},
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    services::{ServeDir, ServeFile},
    set_header::SetResponseHeaderLayer,
};

use crate::{
    Res, api, config::Config, info, management::TokenManager, spotify::SpotifyAuthClient,
};

/// Shared state handed to every handler.
///
/// One instance per process. [`TokenManager`] does its own locking; the
/// rest is immutable after startup.
pub struct AppState {
    pub config: Config,
    pub auth: SpotifyAuthClient,
    pub tokens: TokenManager,
}

/// Everything self-hosted except the playback SDK and the Web API.
const CONTENT_SECURITY_POLICY: &str = "default-src 'self'; \
    script-src 'self' https://sdk.scdn.co; \
    connect-src 'self' https://api.spotify.com; \
    img-src 'self' https://i.scdn.co data:; \
    style-src 'self' 'unsafe-inline'";

/// Assembles the application router.
///
/// The OAuth and token endpoints are routed explicitly; everything else
/// falls through to the static front-end directory, with unknown paths
/// rewritten to `index.html` so client-side routing keeps working.
pub fn router(state: Arc<AppState>) -> Router {
    let index = state.config.static_dir.join("index.html");
    let frontend = ServeDir::new(&state.config.static_dir).fallback(ServeFile::new(index));

    Router::new()
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .route("/token", get(api::token))
        .route("/logout", post(api::logout))
        .route("/health", get(api::health))
        .fallback_service(frontend)
        .layer(Extension(state))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static(CONTENT_SECURITY_POLICY),
        ))
        .layer(CatchPanicLayer::new())
}

/// Binds the configured address and serves until the process ends.
///
/// A bind failure is returned to the caller, which treats it as fatal —
/// every other error in request handling is converted to an HTTP status
/// long before it could reach this level.
pub async fn serve(state: Arc<AppState>) -> Res<()> {
    let addr = state.config.bind_addr();
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
