//! Tests for the auth module

use super::*;
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpClient {
    HttpClient::with_config(
        HttpClientConfig::builder()
            .base_url(server.uri())
            .max_retries(0)
            .build(),
    )
}

#[test]
fn test_extract_path_simple() {
    let value = json!({"token": "abc"});
    assert_eq!(extract_path(&value, "token"), Some("abc".to_string()));
}

#[test]
fn test_extract_path_nested() {
    let value = json!({"session": {"token": "xyz", "ttl": 300}});
    assert_eq!(
        extract_path(&value, "session.token"),
        Some("xyz".to_string())
    );
    assert_eq!(extract_path(&value, "session.ttl"), Some("300".to_string()));
}

#[test]
fn test_extract_path_missing() {
    let value = json!({"a": 1});
    assert_eq!(extract_path(&value, "b"), None);
    assert_eq!(extract_path(&value, "a.b"), None);
}

#[tokio::test]
async fn test_apply_none_leaves_request_unchanged() {
    let auth = Authenticator::new(AuthConfig::None);
    let http = HttpClient::new();
    let req = auth.apply(RequestConfig::new(), &http).await.unwrap();
    assert!(req.headers.is_empty());
}

#[tokio::test]
async fn test_apply_basic() {
    let auth = Authenticator::new(AuthConfig::Basic {
        username: "user".to_string(),
        password: "pass".to_string(),
    });
    let http = HttpClient::new();
    let req = auth.apply(RequestConfig::new(), &http).await.unwrap();
    assert_eq!(
        req.headers.get("Authorization").unwrap(),
        "Basic dXNlcjpwYXNz"
    );
}

#[tokio::test]
async fn test_apply_bearer() {
    let auth = Authenticator::new(AuthConfig::Bearer {
        token: "T".to_string(),
    });
    let http = HttpClient::new();
    let req = auth.apply(RequestConfig::new(), &http).await.unwrap();
    assert_eq!(req.headers.get("Authorization").unwrap(), "Bearer T");
}

#[tokio::test]
async fn test_session_login_raw_text_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"login": "u", "password": "p"})))
        .respond_with(ResponseTemplate::new(200).set_body_string("RAW_TOKEN"))
        .mount(&mock_server)
        .await;

    let auth = Authenticator::new(AuthConfig::Session {
        login_url: format!("{}/auth/login", mock_server.uri()),
        login_body: json!({"login": "u", "password": "p"}),
        token_path: None,
    });

    let http = client_for(&mock_server);
    let req = auth.apply(RequestConfig::new(), &http).await.unwrap();
    assert_eq!(
        req.headers.get("Authorization").unwrap(),
        "Bearer RAW_TOKEN"
    );
}

#[tokio::test]
async fn test_session_login_json_token_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"session": {"token": "JSON_TOKEN"}})),
        )
        .mount(&mock_server)
        .await;

    let auth = Authenticator::new(AuthConfig::Session {
        login_url: format!("{}/auth/login", mock_server.uri()),
        login_body: json!({"login": "u", "password": "p"}),
        token_path: Some("session.token".to_string()),
    });

    let http = client_for(&mock_server);
    let token = auth.session_token(&http).await.unwrap();
    assert_eq!(token, "JSON_TOKEN");
}

#[tokio::test]
async fn test_session_login_empty_body_is_auth_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .mount(&mock_server)
        .await;

    let auth = Authenticator::new(AuthConfig::Session {
        login_url: format!("{}/auth/login", mock_server.uri()),
        login_body: json!({}),
        token_path: None,
    });

    let http = client_for(&mock_server);
    let err = auth.session_token(&http).await.unwrap_err();
    assert!(err.is_auth());
    assert!(err.to_string().contains("no token returned"));
}

#[tokio::test]
async fn test_session_login_json_object_body_without_path_is_auth_failure() {
    let mock_server = MockServer::start().await;

    // a JSON error object is not a usable raw-text token
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "bad login"})))
        .mount(&mock_server)
        .await;

    let auth = Authenticator::new(AuthConfig::Session {
        login_url: format!("{}/auth/login", mock_server.uri()),
        login_body: json!({}),
        token_path: None,
    });

    let http = client_for(&mock_server);
    assert!(auth.session_token(&http).await.unwrap_err().is_auth());
}

#[tokio::test]
async fn test_session_login_401_maps_to_auth_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad credentials"))
        .mount(&mock_server)
        .await;

    let auth = Authenticator::new(AuthConfig::Session {
        login_url: format!("{}/auth/login", mock_server.uri()),
        login_body: json!({}),
        token_path: None,
    });

    let http = client_for(&mock_server);
    let err = auth.session_token(&http).await.unwrap_err();
    assert!(err.is_auth());
}

#[tokio::test]
async fn test_session_token_cached_for_chain() {
    let mock_server = MockServer::start().await;

    // the login endpoint must be hit exactly once per authenticator
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ONCE"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let auth = Authenticator::new(AuthConfig::Session {
        login_url: format!("{}/auth/login", mock_server.uri()),
        login_body: json!({}),
        token_path: None,
    });

    let http = client_for(&mock_server);
    assert_eq!(auth.session_token(&http).await.unwrap(), "ONCE");
    assert_eq!(auth.session_token(&http).await.unwrap(), "ONCE");
}

#[tokio::test]
async fn test_clear_cache_forces_new_login() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string("T"))
        .expect(2)
        .mount(&mock_server)
        .await;

    let auth = Authenticator::new(AuthConfig::Session {
        login_url: format!("{}/auth/login", mock_server.uri()),
        login_body: json!({}),
        token_path: None,
    });

    let http = client_for(&mock_server);
    auth.session_token(&http).await.unwrap();
    auth.clear_cache().await;
    auth.session_token(&http).await.unwrap();
}

#[tokio::test]
async fn test_basic_auth_end_to_end() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/guarded"))
        .and(header("Authorization", "Basic dXNlcjpwYXNz"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let auth = Authenticator::new(AuthConfig::Basic {
        username: "user".to_string(),
        password: "pass".to_string(),
    });

    let http = client_for(&mock_server);
    let req = auth.apply(RequestConfig::new(), &http).await.unwrap();
    let response = http.get_with_config("/guarded", req).await.unwrap();
    assert_eq!(response.status(), 200);
}
