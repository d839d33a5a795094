//! 会话持久化集成测试

use invest_client::auth::{is_token_expired, FileStorage, Session};
use invest_client::services::system_service;
use invest_client::ApiClient;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;
use common::{api_base, mint_token};

fn file_session(path: &std::path::Path) -> Arc<Session> {
    Arc::new(Session::new(Arc::new(FileStorage::open(path).unwrap())))
}

#[test]
fn test_tokens_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let session_file = dir.path().join("session.json");
    let access = mint_token("user-1", 3600);

    {
        let session = file_session(&session_file);
        session.set_tokens(&access, Some("refresh-1"));
        session.set_tokens(&access, None);
    }

    let restored = file_session(&session_file);
    assert_eq!(restored.access_token().as_deref(), Some(access.as_str()));
    assert_eq!(restored.refresh_token().as_deref(), Some("refresh-1"));
    assert!(restored.is_authenticated());
}

#[test]
fn test_clear_is_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let session_file = dir.path().join("session.json");

    let session = file_session(&session_file);
    session.set_tokens("a", Some("r"));
    session.set_session_marker("{}");
    session.clear();

    let restored = file_session(&session_file);
    assert!(restored.access_token().is_none());
    assert!(restored.refresh_token().is_none());
    assert!(restored.session_marker().is_none());
}

#[test]
fn test_expiry_of_restored_token() {
    let dir = tempfile::tempdir().unwrap();
    let session_file = dir.path().join("session.json");

    let session = file_session(&session_file);
    session.set_tokens(&mint_token("user-1", -1), Some("refresh-1"));

    let restored = file_session(&session_file);
    assert!(restored.is_access_token_expired());
    assert!(is_token_expired(restored.access_token().as_deref()));
}

#[tokio::test]
async fn test_client_uses_persisted_token() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let session_file = dir.path().join("session.json");
    let access = mint_token("user-1", 3600);

    file_session(&session_file).set_tokens(&access, Some("refresh-1"));

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(header("authorization", format!("Bearer {}", access).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(&server)
        .await;

    let client = ApiClient::builder(api_base(&server))
        .timeout(Duration::from_secs(2))
        .session(file_session(&session_file))
        .build()
        .unwrap();

    let response = invest_client::services::auth_service::me(&client).await;
    assert!(response.success);
    assert!(system_service::health_check(&client).await.success);
}
