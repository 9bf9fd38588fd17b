mod common;

use api_types::{Ack, auth::Login};
use cashflow_tui::client::{Client, ClientError, GENERIC_ERROR};
use reqwest::Method;

#[tokio::test]
async fn login_failure_carries_server_message() {
    let stub = common::spawn_stub().await;
    let client = Client::new(&stub.base_url()).unwrap();

    let err = client
        .login(&Login {
            email: common::EMAIL.to_string(),
            password: "wrong".to_string(),
        })
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), "invalid credentials");
}

#[tokio::test]
async fn session_cookie_is_replayed_by_the_client_that_logged_in() {
    let stub = common::spawn_stub().await;
    let signed_in = common::signed_in(&stub).await;
    let stranger = Client::new(&stub.base_url()).unwrap();

    assert_eq!(signed_in.summary().await.unwrap().username, "Asha");
    assert!(stranger.summary().await.unwrap_err().is_unauthorized());

    // Clones share the cookie jar, as the spawned tasks rely on.
    let clone = signed_in.clone();
    assert!(clone.budgets().await.is_ok());
}

#[tokio::test]
async fn missing_error_field_uses_generic_message() {
    let stub = common::spawn_stub().await;
    let client = Client::new(&stub.base_url()).unwrap();

    let err = client
        .request::<(), Ack>(Method::GET, "/api/broken", None)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Server { status: 500, .. }));
    assert_eq!(err.to_string(), GENERIC_ERROR);
}

#[tokio::test]
async fn every_request_declares_json_content_type() {
    let stub = common::spawn_stub().await;
    let client = Client::new(&stub.base_url()).unwrap();

    let _ = client.me().await;
    let _ = client.logout().await;
    let _ = client
        .login(&Login {
            email: common::EMAIL.to_string(),
            password: common::PASSWORD.to_string(),
        })
        .await;

    let backend = stub.backend.lock().unwrap();
    assert_eq!(backend.content_types.len(), 3);
    assert!(
        backend
            .content_types
            .iter()
            .all(|value| value.as_deref() == Some("application/json"))
    );
}

#[tokio::test]
async fn probe_is_idempotent() {
    let stub = common::spawn_stub().await;
    let client = common::signed_in(&stub).await;

    let first = client.me().await.unwrap();
    let second = client.me().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.name, "Asha");
    assert_eq!(stub.hits("/api/me"), 2);
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let client = Client::new(&common::dead_address().await).unwrap();

    let err = client.summary().await.unwrap_err();

    assert!(matches!(err, ClientError::Transport(_)));
    assert!(!err.is_unauthorized());
}
