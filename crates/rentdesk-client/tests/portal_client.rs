//! Integration tests for the plain request helpers and session lifecycle.
//!
//! The plain helpers are single-shot: one HTTP call, no retry, no caching.
//! They share header construction and status classification with the gated
//! query layer.

use rentdesk_client::{
    ApiError, ClientConfig, PortalClient, SessionState, SessionStore, PORTAL_USER_AGENT,
};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn create_test_client(mock_server: &MockServer) -> PortalClient {
    let config = ClientConfig::default().with_base_url(mock_server.uri());
    let client = PortalClient::new(config).expect("failed to create client");
    client.session().authenticate("abc123").await;
    client
}

#[tokio::test]
async fn test_post_sends_headers_and_body() {
    let mock_server = MockServer::start().await;

    let payload = serde_json::json!({"firstName": "Jane", "lastName": "Doe"});

    Mock::given(method("POST"))
        .and(path("/api/tenants"))
        .and(header("authorization", "Bearer abc123"))
        .and(header("content-type", "application/json"))
        .and(header("user-agent", PORTAL_USER_AGENT))
        .and(body_json(&payload))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "t1", "firstName": "Jane", "lastName": "Doe"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server).await;
    let created: serde_json::Value = client
        .post("/api/tenants", &payload)
        .await
        .expect("post failed");

    assert_eq!(created["id"], "t1");
}

#[tokio::test]
async fn test_mutation_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/rent-payments"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server).await;
    let result: Result<serde_json::Value, _> = client
        .post("/api/rent-payments", &serde_json::json!({"amount": "500"}))
        .await;

    match result {
        Err(ApiError::Server { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("expected Server error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_mutation_unauthorized_invalidates_session() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/leases/l1"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server).await;
    let result: Result<serde_json::Value, _> = client
        .put("/api/leases/l1", &serde_json::json!({"status": "ended"}))
        .await;

    assert!(matches!(result, Err(ApiError::Auth { status: 401, .. })));
    assert_eq!(
        client.session().state().await,
        SessionState::Unauthenticated
    );
}

#[tokio::test]
async fn test_delete_decodes_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/documents/d1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"message": "deleted"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server).await;
    let body: serde_json::Value = client.delete("/api/documents/d1").await.expect("delete failed");

    assert_eq!(body["message"], "deleted");
}

#[tokio::test]
async fn test_patch_decodes_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/maintenance-requests/m1"))
        .and(body_json(serde_json::json!({"status": "in_progress"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "m1", "status": "in_progress"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server).await;
    let body: serde_json::Value = client
        .patch(
            "/api/maintenance-requests/m1",
            &serde_json::json!({"status": "in_progress"}),
        )
        .await
        .expect("patch failed");

    assert_eq!(body["status"], "in_progress");
}

#[tokio::test]
async fn test_invalid_json_body_is_surfaced() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/notifications"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json{{{"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server).await;
    let result: Result<serde_json::Value, _> = client.get("/api/notifications").await;

    assert!(matches!(result, Err(ApiError::InvalidResponse { .. })));
}

#[tokio::test]
async fn test_session_lifecycle_with_store() {
    let mock_server = MockServer::start().await;
    let temp_dir = tempfile::TempDir::new().unwrap();
    let store = SessionStore::with_dir(temp_dir.path().join("session"));

    let config = ClientConfig::default().with_base_url(mock_server.uri());
    let client = PortalClient::new(config.clone()).expect("failed to create client");

    // Nothing stored yet: bootstrap settles in Unauthenticated
    client.bootstrap(&store).await;
    assert_eq!(
        client.session().state().await,
        SessionState::Unauthenticated
    );

    // Login persists the token
    client.login(&store, "abc123").await.expect("login failed");
    assert_eq!(client.session().state().await, SessionState::Authenticated);

    // A fresh client picks the token up at bootstrap
    let restarted = PortalClient::new(config).expect("failed to create client");
    restarted.bootstrap(&store).await;
    let snapshot = restarted.session().snapshot().await;
    assert_eq!(snapshot.state, SessionState::Authenticated);
    assert_eq!(snapshot.bearer(), Some("abc123"));

    // Logout clears both the session and the store
    client.logout(&store).await.expect("logout failed");
    assert_eq!(
        client.session().state().await,
        SessionState::Unauthenticated
    );
    assert!(store.load_token().await.is_none());
}
