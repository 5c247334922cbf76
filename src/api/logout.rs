use std::sync::Arc;

use axum::{Extension, response::Json};
use serde_json::{Value, json};

use crate::{info, server::AppState};

/// Drops all in-memory credentials.
///
/// The provider-side grant stays untouched; this only clears the local
/// token cache so the next `/token` call answers 401.
pub async fn logout(Extension(state): Extension<Arc<AppState>>) -> Json<Value> {
    state.tokens.clear().await;
    info!("token cache cleared");
    Json(json!({ "ok": true }))
}
