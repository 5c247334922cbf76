use std::{collections::HashMap, sync::Arc};

use axum::{
    Form, Json, Router,
    http::{HeaderMap, StatusCode},
    routing::post,
};
use base64::{Engine, engine::general_purpose::STANDARD};
use serde_json::{Value, json};
use spotauthd::spotify::{ExchangeError, SpotifyAuthClient, authorize_url};
use spotauthd::types::ClientCredentials;
use tokio::sync::Mutex;

#[derive(Debug, Default, Clone)]
struct Captured {
    authorization: Option<String>,
    form: HashMap<String, String>,
}

/// Stands in for Spotify's token endpoint: records the request and answers
/// with a canned status and body.
async fn spawn_provider(
    status: StatusCode,
    body: Value,
) -> (String, Arc<Mutex<Option<Captured>>>) {
    let captured: Arc<Mutex<Option<Captured>>> = Arc::new(Mutex::new(None));
    let sink = captured.clone();

    let app = Router::new().route(
        "/api/token",
        post(
            move |headers: HeaderMap, Form(form): Form<HashMap<String, String>>| {
                let sink = sink.clone();
                let body = body.clone();
                async move {
                    *sink.lock().await = Some(Captured {
                        authorization: headers
                            .get("authorization")
                            .and_then(|v| v.to_str().ok())
                            .map(|v| v.to_string()),
                        form,
                    });
                    (status, Json(body))
                }
            },
        ),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/api/token", addr), captured)
}

fn creds() -> ClientCredentials {
    ClientCredentials {
        client_id: "abc".to_string(),
        client_secret: "shh".to_string(),
        redirect_uri: "http://localhost:5050/callback".to_string(),
    }
}

#[test]
fn test_authorize_url_shape() {
    let url = authorize_url(&creds(), "S1");
    let rendered = url.to_string();
    assert!(rendered.starts_with("https://accounts.spotify.com/authorize?response_type=code&client_id=abc"));
    assert!(rendered.contains("scope=streaming+user-read-email+user-read-private"));
    assert!(rendered.contains("redirect_uri=http%3A%2F%2Flocalhost%3A5050%2Fcallback"));
    assert!(rendered.ends_with("&state=S1"));
}

#[tokio::test]
async fn test_exchange_code_sends_basic_auth_and_form() {
    let (url, captured) = spawn_provider(
        StatusCode::OK,
        json!({ "access_token": "A", "refresh_token": "R", "expires_in": 3600 }),
    )
    .await;

    let client = SpotifyAuthClient::new(url).unwrap();
    let resp = client.exchange_code(&creds(), "XYZ").await.unwrap();
    assert_eq!(resp.access_token, "A");
    assert_eq!(resp.refresh_token.as_deref(), Some("R"));
    assert_eq!(resp.expires_in, Some(3600));

    let seen = captured.lock().await.clone().expect("provider was called");
    let expected_auth = format!("Basic {}", STANDARD.encode("abc:shh"));
    assert_eq!(seen.authorization.as_deref(), Some(expected_auth.as_str()));
    assert_eq!(
        seen.form.get("grant_type").map(String::as_str),
        Some("authorization_code")
    );
    assert_eq!(seen.form.get("code").map(String::as_str), Some("XYZ"));
    assert_eq!(
        seen.form.get("redirect_uri").map(String::as_str),
        Some("http://localhost:5050/callback")
    );
}

#[tokio::test]
async fn test_refresh_sends_refresh_grant() {
    let (url, captured) = spawn_provider(
        StatusCode::OK,
        json!({ "access_token": "A2", "expires_in": 3600 }),
    )
    .await;

    let client = SpotifyAuthClient::new(url).unwrap();
    let resp = client.refresh(&creds(), "R").await.unwrap();
    assert_eq!(resp.access_token, "A2");
    assert_eq!(resp.refresh_token, None);

    let seen = captured.lock().await.clone().expect("provider was called");
    assert_eq!(
        seen.form.get("grant_type").map(String::as_str),
        Some("refresh_token")
    );
    assert_eq!(seen.form.get("refresh_token").map(String::as_str), Some("R"));
}

#[tokio::test]
async fn test_provider_error_carries_status_and_body() {
    let (url, _captured) = spawn_provider(
        StatusCode::BAD_REQUEST,
        json!({ "error": "invalid_grant" }),
    )
    .await;

    let client = SpotifyAuthClient::new(url).unwrap();
    let err = client.exchange_code(&creds(), "XYZ").await.unwrap_err();
    match err {
        ExchangeError::Provider { status, body } => {
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(body.contains("invalid_grant"));
        }
        other => panic!("expected provider error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_connection_failure_is_a_transport_error() {
    // Nothing listens on port 1.
    let client = SpotifyAuthClient::new("http://127.0.0.1:1/api/token").unwrap();
    let err = client.refresh(&creds(), "R").await.unwrap_err();
    assert!(matches!(err, ExchangeError::Transport(_)));
}

#[tokio::test]
async fn test_malformed_body_is_a_transport_error() {
    let app = Router::new().route("/api/token", post(|| async { "definitely not json" }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = SpotifyAuthClient::new(format!("http://{}/api/token", addr)).unwrap();
    let err = client.exchange_code(&creds(), "XYZ").await.unwrap_err();
    assert!(matches!(err, ExchangeError::Transport(_)));
}
