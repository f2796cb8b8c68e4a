//! Integration tests for RequestClient over the reqwest transport.
//!
//! Uses wiremock for HTTP mocking.

use client_http::{RequestClient, RequestError, ReqwestTransport, UserApi};
use satchel::auth::{StaticToken, UserSession};
use satchel::{AuthTokenProvider, CacheStore, NoopFeedback, UiFeedback};
use serde_json::json;
use shared::config::{AppConfig, Environment};
use shared_http::messages::{CONNECTION_FAILED_MESSAGE, TIMEOUT_MESSAGE};
use shared_http::{Method, RequestDescriptor, RequestOptions};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use storage_engine::MemoryBackend;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(base_url: &str) -> AppConfig {
    let mut config = AppConfig::for_environment(Environment::Development);
    config.api_base_url = base_url.to_string();
    config
}

fn create_test_client(
    base_url: &str,
    tokens: Arc<dyn AuthTokenProvider>,
    feedback: Arc<dyn UiFeedback>,
) -> RequestClient {
    let transport = Arc::new(ReqwestTransport::new().expect("failed to create transport"));
    RequestClient::new(&config_for(base_url), transport, tokens, feedback)
}

#[derive(Default)]
struct RecordingFeedback(Mutex<Vec<String>>);

impl UiFeedback for RecordingFeedback {
    fn show_busy(&self, label: &str) {
        self.0.lock().unwrap().push(format!("show:{label}"));
    }
    fn hide_busy(&self) {
        self.0.lock().unwrap().push("hide".to_string());
    }
    fn notify(&self, message: &str) {
        self.0.lock().unwrap().push(format!("notify:{message}"));
    }
}

#[tokio::test]
async fn test_both_success_conventions() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/by-code"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 200, "data": {"x": 1}})))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/by-flag"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": {"x": 1}})),
        )
        .mount(&mock_server)
        .await;

    let client = create_test_client(
        &mock_server.uri(),
        Arc::new(StaticToken::anonymous()),
        Arc::new(NoopFeedback),
    );

    for endpoint in ["/by-code", "/by-flag"] {
        let response = client
            .get(endpoint, None, RequestOptions::default())
            .await
            .expect("request failed");
        assert_eq!(response.data(), Some(&json!({"x": 1})));
    }
}

#[tokio::test]
async fn test_bearer_token_and_json_body_are_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/orders"))
        .and(header("authorization", "Bearer test-token"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"sku": "A-1", "qty": 2})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 200, "data": {"id": 9}})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(
        &mock_server.uri(),
        Arc::new(StaticToken::new("test-token")),
        Arc::new(NoopFeedback),
    );

    let response = client
        .post("/orders", Some(json!({"sku": "A-1", "qty": 2})), RequestOptions::default())
        .await
        .expect("request failed");
    assert_eq!(response.data(), Some(&json!({"id": 9})));
}

#[tokio::test]
async fn test_get_body_becomes_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/articles"))
        .and(query_param("page", "2"))
        .and(query_param("tag", "rust"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 200, "data": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(
        &mock_server.uri(),
        Arc::new(StaticToken::anonymous()),
        Arc::new(NoopFeedback),
    );

    client
        .get("/articles", Some(json!({"page": 2, "tag": "rust"})), RequestOptions::default())
        .await
        .expect("request failed");
}

#[tokio::test]
async fn test_status_mapping_over_http() {
    let mock_server = MockServer::start().await;

    Mock::given(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    Mock::given(path("/odd"))
        .respond_with(ResponseTemplate::new(599))
        .mount(&mock_server)
        .await;

    let feedback = Arc::new(RecordingFeedback::default());
    let client = create_test_client(
        &mock_server.uri(),
        Arc::new(StaticToken::anonymous()),
        feedback.clone(),
    );

    let err = client
        .get("/gone", None, RequestOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.message(), "Requested resource not found");

    let err = client
        .delete("/odd", None, RequestOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(599));
    assert!(err.message().contains("599"));

    let events = feedback.0.lock().unwrap().clone();
    assert_eq!(
        events,
        vec![
            "show:Loading...",
            "hide",
            "notify:Requested resource not found",
            "show:Loading...",
            "hide",
            "notify:Request failed (599)",
        ]
    );
}

#[tokio::test]
async fn test_non_json_body_is_business_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(path("/html"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(
        &mock_server.uri(),
        Arc::new(StaticToken::anonymous()),
        Arc::new(NoopFeedback),
    );

    let err = client
        .get("/html", None, RequestOptions::silent())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        RequestError::Business {
            code: None,
            message: "Request failed".to_string()
        }
    );
}

#[tokio::test]
async fn test_timeout_is_classified() {
    let mock_server = MockServer::start().await;

    Mock::given(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"code": 200}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let feedback = Arc::new(RecordingFeedback::default());
    let client = create_test_client(
        &mock_server.uri(),
        Arc::new(StaticToken::anonymous()),
        feedback.clone(),
    )
    .with_timeout(Duration::from_millis(200));

    let err = client
        .get("/slow", None, RequestOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, RequestError::Network { .. }));
    assert_eq!(err.message(), TIMEOUT_MESSAGE);

    let events = feedback.0.lock().unwrap().clone();
    assert_eq!(events.iter().filter(|e| *e == "hide").count(), 1);
}

#[tokio::test]
async fn test_connection_refused_is_classified() {
    let client = create_test_client(
        "http://127.0.0.1:1",
        Arc::new(StaticToken::anonymous()),
        Arc::new(NoopFeedback),
    );

    let err = client
        .request(RequestDescriptor::new(Method::Get, "/anything").surface_error(false))
        .await
        .unwrap_err();

    assert!(matches!(err, RequestError::Network { .. }));
    assert_eq!(err.message(), CONNECTION_FAILED_MESSAGE);
}

#[tokio::test]
async fn test_concurrent_requests_are_independent() {
    let mock_server = MockServer::start().await;

    Mock::given(path("/fast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 200, "data": "fast"})))
        .mount(&mock_server)
        .await;
    Mock::given(path("/broken"))
        .respond_with(ResponseTemplate::new(500).set_delay(Duration::from_millis(100)))
        .mount(&mock_server)
        .await;

    let client = create_test_client(
        &mock_server.uri(),
        Arc::new(StaticToken::anonymous()),
        Arc::new(NoopFeedback),
    );

    let (broken, fast) = futures::join!(
        client.get("/broken", None, RequestOptions::silent()),
        client.get("/fast", None, RequestOptions::silent()),
    );

    assert_eq!(broken.unwrap_err().message(), "Internal server error");
    assert_eq!(fast.unwrap().data(), Some(&json!("fast")));
}

#[tokio::test]
async fn test_login_then_authenticated_profile_fetch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"username": "ana", "password": "pw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"token": "session-token", "userInfo": {"id": 1, "username": "ana"}}
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/user/info"))
        .and(header("authorization", "Bearer session-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "data": {"id": 1, "username": "ana"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = config_for(&mock_server.uri());
    let cache = Arc::new(CacheStore::from_config(Arc::new(MemoryBackend::new(1 << 20)), &config));
    let session = Arc::new(UserSession::new(cache));
    let transport = Arc::new(ReqwestTransport::new().expect("failed to create transport"));
    let client = Arc::new(RequestClient::new(
        &config,
        transport,
        session.clone(),
        Arc::new(NoopFeedback),
    ));
    let api = UserApi::new(client);

    let login = api.login("ana", "pw").await.expect("login failed");
    let token = login.data().and_then(|d| d["token"].as_str()).expect("token");
    session.set_token(token).unwrap();

    let profile = api.get_user_info().await.expect("profile fetch failed");
    assert_eq!(profile.data().unwrap()["username"], "ana");
}
