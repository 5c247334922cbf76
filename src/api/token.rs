use std::sync::Arc;

use axum::{
    Extension,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::server::AppState;

/// Hands the front-end a currently valid access token.
///
/// Serves the cached token while it is fresh; once stale, a refresh happens
/// transparently inside the token manager. When no token is held and none
/// can be refreshed, the front-end gets a 401 and is expected to send the
/// user through `/login` again.
pub async fn token(Extension(state): Extension<Arc<AppState>>) -> Response {
    let result = state
        .tokens
        .access_token(|refresh_token| {
            let state = state.clone();
            async move {
                let creds = state.config.credentials()?;
                state.auth.refresh(&creds, &refresh_token).await
            }
        })
        .await;

    match result {
        Ok(access_token) => Json(json!({ "access_token": access_token })).into_response(),
        Err(_) => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "no_token" })),
        )
            .into_response(),
    }
}
