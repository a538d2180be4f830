//! Integration tests for cookie sessions and request throttling.

mod helpers;

use axum::http::StatusCode;
use helpers::TestApp;
use serde_json::json;

#[tokio::test]
async fn test_login_sets_session_cookie() {
    let app = TestApp::new().await;
    app.create_test_user("owner@folio.test", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/v1/auth/login",
            Some(json!({ "email": "owner@folio.test", "password": "password123" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["email"], "owner@folio.test");

    let cookie = response.set_cookie().expect("Missing Set-Cookie header");
    assert!(cookie.starts_with("session_id="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("Max-Age=7200"));
}

#[tokio::test]
async fn test_me_returns_logged_in_user() {
    let app = TestApp::new().await;
    let cookie = app.authenticated().await;

    let response = app.request("GET", "/api/v1/auth/me", None, Some(&cookie)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["email"], "owner@folio.test");
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    let app = TestApp::new().await;
    app.create_test_user("owner@folio.test", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/v1/auth/login",
            Some(json!({ "email": "owner@folio.test", "password": "wrong-password" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");
    assert_eq!(response.message(), "invalid email or password");
    assert!(response.set_cookie().is_none());
}

#[tokio::test]
async fn test_login_with_unknown_user() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/v1/auth/login",
            Some(json!({ "email": "nobody@folio.test", "password": "password123" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.message(), "invalid email or password");
}

#[tokio::test]
async fn test_login_rejects_malformed_email() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/v1/auth/login",
            Some(json!({ "email": "not-an-email", "password": "password123" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_me_without_cookie() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/v1/auth/me", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.message(), "authentication required");
}

#[tokio::test]
async fn test_me_with_unknown_session() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/api/v1/auth/me", None, Some("session_id=bogus"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.message(), "session not found");
}

#[tokio::test]
async fn test_logout_ends_session() {
    let app = TestApp::new().await;
    let cookie = app.authenticated().await;

    let response = app
        .request("POST", "/api/v1/auth/logout", None, Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let cleared = response.set_cookie().expect("Logout should clear the cookie");
    assert!(cleared.starts_with("session_id="));

    let response = app.request("GET", "/api/v1/auth/me", None, Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_rate_limit_rejects_burst_overflow() {
    let app = TestApp::with_config(|config| {
        config.rate_limit.enabled = true;
        config.rate_limit.burst = 2;
        config.rate_limit.requests_per_second = 0.001;
    })
    .await;

    for _ in 0..2 {
        let response = app.request("GET", "/health", None, None).await;
        assert_eq!(response.status, StatusCode::OK);
    }

    let response = app.request("GET", "/health", None, None).await;
    assert_eq!(response.status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(response.body["error"], "RATE_LIMITED");
    assert_eq!(response.message(), "Too many requests");
}
