//! Shared test helpers for integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Request, StatusCode, header};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use folio_api::{AppState, build_router};
use folio_core::config::{AppConfig, DatabaseBackend};
use folio_database::Repositories;
use folio_storage::LocalObjectStore;

/// Host header sent with every request.
pub const TEST_HOST: &str = "folio.test";

const BOUNDARY: &str = "folio-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for reaching services directly
    pub state: AppState,
    /// Upload directory; removed when the app is dropped
    pub upload_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body (`Null` when not JSON)
    pub body: Value,
    /// Raw body
    pub bytes: Bytes,
}

/// One file part of a multipart upload.
pub struct FilePart<'a> {
    pub file_name: &'a str,
    pub content_type: &'a str,
    pub data: &'a [u8],
}

impl<'a> FilePart<'a> {
    pub fn png(file_name: &'a str) -> Self {
        Self {
            file_name,
            content_type: "image/png",
            data: b"\x89PNG\r\n\x1a\nfake",
        }
    }
}

impl TestApp {
    /// Create a test application over memory repositories with throttling off
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Create a test application after adjusting the default configuration
    pub async fn with_config(customize: impl FnOnce(&mut AppConfig)) -> Self {
        let upload_dir = tempfile::tempdir().expect("Failed to create upload dir");

        let mut config = AppConfig::default();
        config.database.backend = DatabaseBackend::Memory;
        config.rate_limit.enabled = false;
        config.storage.upload_dir = upload_dir.path().to_string_lossy().into_owned();
        customize(&mut config);

        let store = LocalObjectStore::new(&config.storage.upload_dir)
            .await
            .expect("Failed to init object store");
        let repositories = Repositories::from_config(&config.database)
            .await
            .expect("Failed to init repositories");

        let state = AppState::new(config, repositories, Arc::new(store));
        let router = build_router(state.clone());

        Self {
            router,
            state,
            upload_dir,
        }
    }

    /// Create an account
    pub async fn create_test_user(&self, email: &str, password: &str) -> i64 {
        self.state
            .auth_service
            .create_user(email, password)
            .await
            .expect("Failed to create test user")
            .id
    }

    /// Log in and return the `Cookie` header value for the session
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/v1/auth/login",
                Some(serde_json::json!({ "email": email, "password": password })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response
            .set_cookie()
            .and_then(|c| c.split(';').next().map(str::to_string))
            .expect("No session cookie in login response")
    }

    /// Create a user and log in as them
    pub async fn authenticated(&self) -> String {
        self.create_test_user("owner@folio.test", "password123").await;
        self.login("owner@folio.test", "password123").await
    }

    /// Make a JSON request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        cookie: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::HOST, TEST_HOST)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(cookie) = cookie {
            req = req.header(header::COOKIE, cookie);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// POST a multipart form with `files` parts and plain text fields
    pub async fn upload(
        &self,
        path: &str,
        files: &[FilePart<'_>],
        fields: &[(&str, &str)],
        cookie: Option<&str>,
    ) -> TestResponse {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        for file in files {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"files\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                    file.file_name, file.content_type
                )
                .as_bytes(),
            );
            body.extend_from_slice(file.data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let mut req = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::HOST, TEST_HOST)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            );

        if let Some(cookie) = cookie {
            req = req.header(header::COOKIE, cookie);
        }

        let req = req.body(Body::from(body)).expect("Failed to build request");
        self.send(req).await
    }

    /// Send a prepared request
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
            bytes,
        }
    }
}

impl TestResponse {
    /// The `Set-Cookie` header, if any
    pub fn set_cookie(&self) -> Option<String> {
        self.headers
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }

    /// `body.message` (or `body.error` for error bodies)
    pub fn message(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }
}
